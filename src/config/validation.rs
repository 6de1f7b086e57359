//! Configuration validation
//!
//! A configuration that parses can still be unusable (zero timeouts, empty
//! paths); validation runs right after parsing so a bad file fails before
//! any network request is made.

use crate::config::types::Config;
use crate::{ConfigError, ConfigResult};

/// Validates a parsed configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.http.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "http.user-agent must not be empty".to_string(),
        ));
    }

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http.timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.http.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http.connect-timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.output.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.directory must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let mut config = Config::default();
        config.http.connect_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_directory_rejected() {
        let mut config = Config::default();
        config.output.directory = String::new();
        assert!(validate(&config).is_err());
    }
}
