//! Worker identity resolution.
//!
//! The identity is resolved once at startup and passed into the services at
//! construction; operations never read the environment themselves.

/// Resolve the worker identity: explicit configured value, then the
/// WORKER_ID environment variable, then the host's network name.
pub fn resolve_worker_id(configured: Option<&str>) -> String {
    if let Some(id) = configured.filter(|s| !s.is_empty()) {
        return id.to_string();
    }
    if let Ok(id) = std::env::var("WORKER_ID") {
        if !id.is_empty() {
            return id;
        }
    }
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown-worker".into())
}
