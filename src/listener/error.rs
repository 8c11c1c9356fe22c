/// Error code reported when a resolved listener service cannot be called.
pub const NOT_CALLABLE_CODE: u32 = 1549988537;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ListenerError {
    #[error("Event listener \"{}\" is not callable.", display_target(.service, .method))]
    NotCallable {
        service: String,
        method: Option<String>,
    },

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl ListenerError {
    /// Stable numeric code for errors raised by the provider itself.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::NotCallable { .. } => Some(NOT_CALLABLE_CODE),
            Self::Failed(_) => None,
        }
    }
}

fn display_target(service: &str, method: &Option<String>) -> String {
    match method {
        Some(method) => format!("{service}::{method}"),
        None => service.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ListenerConfigError {
    #[error("Failed to read listener configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse listener configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Circular before/after dependency between listeners: {}", .identifiers.join(", "))]
    CircularDependency { identifiers: Vec<String> },
}
