use gate_api::ApiError;
use gate_core::errors::CoreError;
use gate_media::MediaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    /// A local rule rejected the input before anything was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Media(#[from] MediaError),

    /// The operator declined a confirmation prompt.
    #[error("cancelled")]
    Cancelled,
}

impl DeskError {
    /// Whether the caller must sign in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Api(e) if e.requires_login())
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
