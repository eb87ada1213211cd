use std::env;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub scratch_api_url: String,
    pub avatar_base_url: String,
    pub avatar_size: u32,
    pub http_timeout_secs: u64,
    pub cache_max_entries: u64,
    /// Unset means cached IDs never expire
    pub cache_ttl_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 3005,
            scratch_api_url: "https://api.scratch.mit.edu".to_string(),
            avatar_base_url: "https://cdn2.scratch.mit.edu/get_image/user".to_string(),
            avatar_size: 18,
            http_timeout_secs: 10,
            cache_max_entries: 10_000,
            cache_ttl_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Parse configuration from any variable source; unparsable values fall
    /// back to their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let scratch_api_url = var("SCRATCH_API_URL").unwrap_or(defaults.scratch_api_url);

        let avatar_base_url = var("SCRATCH_AVATAR_BASE_URL").unwrap_or(defaults.avatar_base_url);

        let avatar_size = var("AVATAR_SIZE")
            .and_then(|s| s.parse().ok())
            .filter(|&s| s > 0)
            .unwrap_or(defaults.avatar_size);

        let http_timeout_secs = var("HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&s| s > 0)
            .unwrap_or(defaults.http_timeout_secs);

        // A zero-capacity moka cache retains nothing
        let cache_max_entries = var("CACHE_MAX_ENTRIES")
            .and_then(|s| s.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.cache_max_entries);

        let cache_ttl_secs = var("CACHE_TTL_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&s| s > 0);

        Self {
            port,
            scratch_api_url,
            avatar_base_url,
            avatar_size,
            http_timeout_secs,
            cache_max_entries,
            cache_ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), ServiceConfig::default());
        let config = ServiceConfig::default();
        assert_eq!(config.port, 3005);
        assert_eq!(config.avatar_size, 18);
        assert_eq!(config.cache_ttl_secs, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("SCRATCH_API_URL", "http://localhost:9999"),
            ("SCRATCH_AVATAR_BASE_URL", "http://localhost:9998/img"),
            ("AVATAR_SIZE", "60"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("CACHE_MAX_ENTRIES", "50"),
            ("CACHE_TTL_SECS", "3600"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.scratch_api_url, "http://localhost:9999");
        assert_eq!(config.avatar_base_url, "http://localhost:9998/img");
        assert_eq!(config.avatar_size, 60);
        assert_eq!(config.http_timeout_secs, 3);
        assert_eq!(config.cache_max_entries, 50);
        assert_eq!(config.cache_ttl_secs, Some(3600));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("AVATAR_SIZE", "0"),
            ("HTTP_TIMEOUT_SECS", "-1"),
            ("CACHE_TTL_SECS", "0"),
            ("CACHE_MAX_ENTRIES", "0"),
        ]);
        assert_eq!(config.port, 3005);
        assert_eq!(config.avatar_size, 18);
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.cache_ttl_secs, None);
        assert_eq!(config.cache_max_entries, 10_000);
    }
}
