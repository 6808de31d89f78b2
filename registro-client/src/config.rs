//! Client configuration

/// Sent as `x-client-info` on every REST call
pub const DEFAULT_CLIENT_INFO: &str = concat!("registro-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the hosted REST endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project URL (e.g., "https://xyz.supabase.co")
    pub base_url: String,

    /// Public anon key, sent as `apikey` and bearer token
    pub anon_key: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Value of the `x-client-info` header
    pub client_info: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            timeout: 30,
            client_info: DEFAULT_CLIENT_INFO.to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_client_info(mut self, info: impl Into<String>) -> Self {
        self.client_info = info.into();
        self
    }

    /// `<base>/rest/v1`
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url.trim_end_matches('/'))
    }

    /// Create a REST store from this configuration
    pub fn build_rest_store(&self) -> crate::ClientResult<crate::store::RestStore> {
        crate::store::RestStore::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://abc.supabase.co/", "anon")
            .with_timeout(5)
            .with_client_info("tests");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.client_info, "tests");
        assert_eq!(config.rest_url(), "https://abc.supabase.co/rest/v1");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://abc.supabase.co", "anon");
        assert_eq!(config.timeout, 30);
        assert!(config.client_info.starts_with("registro-client/"));
    }
}
