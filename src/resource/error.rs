use crate::dispatcher::DispatchError;

/// Error code reported when metadata is requested for a file without a valid uid.
pub const INVALID_UID_CODE: u32 = 1381590731;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("Metadata can only be retrieved for indexed files. UID: \"{uid}\"")]
    InvalidUid { uid: i64 },

    #[error("No metadata record exists for file {file_uid}.")]
    MetaDataNotFound { file_uid: i64 },

    #[error("A metadata record for file {file_uid} already exists.")]
    MetaDataExists { file_uid: i64 },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl ResourceError {
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::InvalidUid { .. } => Some(INVALID_UID_CODE),
            Self::Dispatch(e) => e.code(),
            _ => None,
        }
    }
}
