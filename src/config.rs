//! REST client configuration.

use std::fmt;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
pub const DEFAULT_USER_AGENT: &str = "DiscordBot (hello-components, 0.1)";
pub const DEFAULT_MAX_RETRIES: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN environment variable not set")]
    MissingToken,
    #[error("{name} is not valid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Settings for [`DiscordHttpClient`](crate::http::DiscordHttpClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token: String,
    pub api_base: String,
    pub user_agent: String,
    /// Retries after a 429 before giving up.
    pub max_retries: u32,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Build from a variable lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let mut config = Self::new(token.trim());

        if let Some(base) = lookup("DISCORD_API_BASE") {
            config.api_base = base;
        }
        if let Some(retries) = lookup("DISCORD_MAX_RETRIES") {
            config.max_retries = retries.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidVar {
                    name: "DISCORD_MAX_RETRIES",
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(config)
    }

    /// Load `.env` (if present) and read `DISCORD_TOKEN`, plus the optional
    /// `DISCORD_API_BASE` and `DISCORD_MAX_RETRIES`.
    #[cfg(feature = "io")]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_token_is_an_error() {
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingToken)
        );
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "  ")])),
            Err(ConfigError::MissingToken)
        );
    }

    #[test]
    fn defaults_apply_when_optional_vars_absent() {
        let config = ClientConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "abc\n")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn overrides_are_read() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_API_BASE", "http://localhost:8080"),
            ("DISCORD_MAX_RETRIES", "2"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn bad_retry_count_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_MAX_RETRIES", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "DISCORD_MAX_RETRIES", .. }));
    }

    #[test]
    fn debug_redacts_token() {
        let debug = format!("{:?}", ClientConfig::new("hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
