//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the dashboard asset directory is configured but missing.
///
/// Returns whether the directory can be served.
pub async fn ensure_env(static_dir: Option<&str>) -> bool {
    let Some(dir) = static_dir else { return false };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(%dir, "dashboard assets directory not found; static assets disabled");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_dir_is_not_served() {
        assert!(!ensure_env(None).await);
        assert!(!ensure_env(Some("/definitely/not/here")).await);
        assert!(ensure_env(Some(env!("CARGO_MANIFEST_DIR"))).await);
    }
}
