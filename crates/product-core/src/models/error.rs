use thiserror::Error;

/// Raised while assembling the API documentation at startup.
///
/// None of these are recoverable: they propagate out of startup and the
/// process exits before it starts serving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupConfigError {
    #[error("missing required configuration value `{key}`")]
    Missing { key: String },

    #[error("invalid configuration value `{key}`: {reason}")]
    Invalid { key: String, reason: String },

    #[error("failed to load configuration: {0}")]
    Source(String),

    #[error("security scheme `{0}` is registered more than once")]
    DuplicateScheme(String),

    #[error("security requirement references unknown scheme `{0}`")]
    UnknownScheme(String),

    #[error("security requirement on `{scheme}` requests undeclared scope `{scope}`")]
    UnknownScope { scheme: String, scope: String },

    #[error("failed to render API document: {0}")]
    Render(String),
}

impl StartupConfigError {
    pub fn missing(key: &str) -> Self {
        Self::Missing {
            key: key.to_string(),
        }
    }

    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
