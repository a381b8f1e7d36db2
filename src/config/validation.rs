use crate::config::types::{ClientConfig, Config};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_client_config(&config.client)?;
    Ok(())
}

/// Validates client configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.request_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-ms must be > 0".to_string(),
        ));
    }

    if config.connect_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-ms must be > 0".to_string(),
        ));
    }

    if config.connect_timeout_ms > config.request_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-ms ({}) must not exceed request-timeout-ms ({})",
            config.connect_timeout_ms, config.request_timeout_ms
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
