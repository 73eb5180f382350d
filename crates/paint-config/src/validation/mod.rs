//! Configuration validation.
//!
//! Every check runs; problems are collected into a single `ConfigError`.


use paint_common::ConfigError;
use paint_cookie::{is_cookie_token, MAX_PREFS_STACK};

use crate::schema::KitConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KitConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if !is_cookie_token(&config.cookie_name) {
        errors.push(format!(
            "cookie_name = {:?} is not a valid cookie name",
            config.cookie_name
        ));
    }

    validate_defaults(&mut errors, config);
    validate_proxy(&mut errors, config);
    validate_middleware(&mut errors, config);

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_defaults(errors: &mut Vec<String>, config: &KitConfig) {
    let d = &config.defaults;
    validate_non_blank(errors, "defaults.theme", &d.theme);
    validate_non_blank(errors, "defaults.layout", &d.layout);
    for (i, id) in d.stack.iter().enumerate() {
        validate_non_blank(errors, &format!("defaults.stack[{i}]"), id);
    }
}

fn validate_proxy(errors: &mut Vec<String>, config: &KitConfig) {
    let p = &config.proxy;
    validate_non_blank(errors, "proxy.base_path", &p.base_path);
    validate_positive(errors, "proxy.remote_max_entries", p.remote_max_entries as u64);
    validate_positive(errors, "proxy.remote_max_bytes", p.remote_max_bytes as u64);
    validate_positive(
        errors,
        "proxy.remote_max_resource_bytes",
        p.remote_max_resource_bytes as u64,
    );
    validate_positive(errors, "proxy.remote_fetch_timeout_ms", p.remote_fetch_timeout_ms);
}

fn validate_middleware(errors: &mut Vec<String>, config: &KitConfig) {
    let m = &config.middleware;
    if !m.preferences_endpoint.starts_with('/') {
        errors.push(format!(
            "middleware.preferences_endpoint = {:?} must start with '/'",
            m.preferences_endpoint
        ));
    }
    validate_positive(errors, "middleware.max_stack", m.max_stack as u64);
    if m.max_stack > MAX_PREFS_STACK {
        errors.push(format!(
            "middleware.max_stack = {} exceeds the cookie limit of {MAX_PREFS_STACK}",
            m.max_stack
        ));
    }
}

/// Push an error if `value` is empty after trimming.
fn validate_non_blank(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must be a non-empty string"));
    }
}

/// Push an error if `value` is zero.
fn validate_positive(errors: &mut Vec<String>, name: &str, value: u64) {
    if value == 0 {
        errors.push(format!("{name} must be greater than 0"));
    }
}
