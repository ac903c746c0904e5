//! Media error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    /// The camera could not be opened (denied, missing, or busy).
    #[error("Unable to access camera: {0}")]
    CameraAccess(String),

    /// The stream has not produced a readable frame yet.
    #[error("Camera not ready, try again")]
    CaptureNotReady,

    /// The captured frame could not be encoded.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The image host refused the request, or the payload was unusable.
    #[error("{message}")]
    Upload {
        /// Host status code, when the host answered at all.
        status: Option<u16>,
        message: String,
    },

    /// Signing credentials are not configured.
    #[error("ImageKit credentials not configured")]
    Credentials,

    /// Transport failure talking to the image host.
    #[error("image host request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response with an unexpected body.
    #[error("parse error: {0}")]
    Parse(String),
}

impl MediaError {
    pub(crate) fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            status: None,
            message: message.into(),
        }
    }
}
