#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("No service registered with id \"{id}\".")]
    NotFound { id: String },

    #[error("Failed to build service \"{id}\": {source}")]
    ResolutionFailed {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Circular reference detected while building service \"{id}\".")]
    CircularReference { id: String },
}
