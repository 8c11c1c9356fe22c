use crate::listener::ListenerConfigError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Missing config with key \"{key}\"")]
    MissingConfig { key: String },

    #[error("Configuration error: {msg}")]
    ConfigurationError { msg: String },

    #[error("Failed to load listeners: {0}")]
    Listeners(#[from] ListenerConfigError),
}
