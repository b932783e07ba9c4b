//! Error types and handling for the travel assistant

use thiserror::Error;

/// Main error type for the travel assistant library
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors (caller contract violations)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Failures reported by a flight, weather or points-of-interest provider
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    /// Session store errors
    #[error("Session error: {message}")]
    Session { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl AssistantError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new session error
    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AssistantError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AssistantError::Provider { provider, .. } => {
                format!("The {provider} service is unavailable right now. Please try again later.")
            }
            AssistantError::Session { .. } => {
                "Your conversation could not be saved. Please try again.".to_string()
            }
            AssistantError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AssistantError::config("missing section");
        assert!(matches!(config_err, AssistantError::Config { .. }));

        let validation_err = AssistantError::validation("days must be positive");
        assert!(matches!(validation_err, AssistantError::Validation { .. }));

        let provider_err = AssistantError::provider("Weather", "timeout");
        assert_eq!(provider_err.to_string(), "Weather error: timeout");
    }

    #[test]
    fn test_user_messages() {
        let config_err = AssistantError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let provider_err = AssistantError::provider("Tourism", "boom");
        assert!(provider_err.user_message().contains("Tourism service"));

        let validation_err = AssistantError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));

        let session_err = AssistantError::session("disk full");
        assert_eq!(session_err.to_string(), "Session error: disk full");
        assert!(session_err.user_message().contains("could not be saved"));
    }
}
