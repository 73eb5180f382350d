//! Streaming local stylesheets from disk.

use std::path::Path;

use axum::body::Body;
use tokio_util::io::ReaderStream;

/// Open `path` and return a body that streams it in chunks.
pub async fn file_body(path: &Path) -> std::io::Result<Body> {
    let file = tokio::fs::File::open(path).await?;
    if file.metadata().await?.is_dir() {
        return Err(std::io::Error::other(format!("{} is a directory", path.display())));
    }
    Ok(Body::from_stream(ReaderStream::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn streams_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.css");
        std::fs::write(&path, "body { color: red }").unwrap();

        let body = file_body(&path).await.unwrap();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"body { color: red }");
    }

    #[tokio::test]
    async fn missing_file_and_directory_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_body(&dir.path().join("nope.css")).await.is_err());
        assert!(file_body(dir.path()).await.is_err());
    }
}
