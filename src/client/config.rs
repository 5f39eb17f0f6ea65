//! Client configuration options.

use std::time::Duration;

use super::routes::RouteTable;

/// The single origin every Noren route hangs off.
pub const DEFAULT_BASE_URL: &str = "https://api.shoonya.com/NorenWClientTP";

/// Configuration for a Shoonya session.
///
/// # Example
///
/// ```
/// use shoonya_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every route path is appended to
    pub base_url: String,
    /// Request timeout, enforced by the HTTP transport
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Version tag sent as `apkversion` at login
    pub app_version: String,
    /// Route name to path mapping
    pub routes: RouteTable,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("shoonya-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            app_version: format!("rust:{}", env!("CARGO_PKG_VERSION")),
            routes: RouteTable::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the `apkversion` tag sent at login.
    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    /// Replace the route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub(crate) fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.app_version.starts_with("rust:"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new().with_base_url("http://localhost:8080/api/");
        assert_eq!(config.base_url(), "http://localhost:8080/api");
    }
}
