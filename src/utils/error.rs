use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("GET {path} returned HTTP {status}")]
    UnexpectedStatus {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {path}: {reason} (body: {body:?})")]
    InvalidResponse {
        path: String,
        body: String,
        reason: String,
    },

    #[error("{message}")]
    SshState { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl InspectorError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            InspectorError::ConfigError { .. } | InspectorError::InvalidConfigValueError { .. }
        )
    }

    /// Process exit code for the CLI: 2 for configuration problems, 1 for
    /// everything that went wrong while talking to the device.
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InspectorError::Transport(e) if e.is_timeout() => {
                "The device did not answer in time. Is the HTTP inspector plugin enabled?"
                    .to_string()
            }
            InspectorError::Transport(e) if e.is_connect() => {
                "Could not connect to the device. Check the base URL and that it is on the same network."
                    .to_string()
            }
            InspectorError::UnexpectedStatus { path, status, .. } if *status == 404 => {
                format!("The device does not know the endpoint '{}'", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InspectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config = InspectorError::InvalidConfigValueError {
            field: "device.base_url".to_string(),
            value: "ftp://kobo/".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(config.exit_code(), 2);

        let state = InspectorError::SshState {
            message: "SSH is still running".to_string(),
        };
        assert_eq!(state.exit_code(), 1);
    }

    #[test]
    fn test_not_found_message_names_the_endpoint() {
        let err = InspectorError::UnexpectedStatus {
            path: "event/Nope".to_string(),
            status: 404,
            body: String::new(),
        };
        assert!(err.user_friendly_message().contains("event/Nope"));
    }
}
