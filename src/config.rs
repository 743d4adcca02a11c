use std::env;

/// Runtime configuration from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointConfig {
    /// Highest balance a charge may produce
    pub max_balance: u64,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl PointConfig {
    /// Load from the environment, after applying a `.env` file if one is present
    pub fn load() -> Self {
        // Missing .env is fine
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_balance = lookup("POINT_MAX_BALANCE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_balance);

        let log_level = lookup("POINT_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            max_balance,
            log_level,
        }
    }
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            max_balance: u64::MAX,
            log_level: "info".to_string(),
        }
    }
}
