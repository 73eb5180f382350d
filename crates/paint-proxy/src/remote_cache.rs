//! Bounded LRU of remote stylesheet responses.
//!
//! Bounded both by entry count and by total body bytes. Expired entries
//! are dropped lazily when looked up.

use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use lru::LruCache;

/// One cached upstream response.
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    pub expires_at: Instant,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RemoteEntry {
    pub fn bytes(&self) -> usize {
        self.body.len()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn to_response(&self) -> Response {
        let mut res = Response::new(Body::from(self.body.clone()));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers.clone();
        res
    }
}

pub struct RemoteCache {
    entries: LruCache<String, RemoteEntry>,
    max_entries: usize,
    max_bytes: usize,
    total_bytes: usize,
}

impl RemoteCache {
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            max_entries,
            max_bytes,
            total_bytes: 0,
        }
    }

    /// Fresh entry for `key`, marking it most recently used.
    pub fn get(&mut self, key: &str) -> Option<RemoteEntry> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<RemoteEntry> {
        let expired = self.entries.peek(key)?.is_expired(now);
        if expired {
            self.remove(key);
            return None;
        }
        self.entries.get(key).cloned()
    }

    /// Insert or replace, then evict least recently used entries until
    /// both limits hold.
    pub fn set(&mut self, key: String, entry: RemoteEntry) {
        self.remove(&key);
        self.total_bytes += entry.bytes();
        self.entries.push(key, entry);

        while self.entries.len() > self.max_entries || self.total_bytes > self.max_bytes {
            match self.entries.pop_lru() {
                Some((_, old)) => self.total_bytes -= old.bytes(),
                None => break,
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(old) = self.entries.pop(key) {
            self.total_bytes -= old.bytes();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }
}
