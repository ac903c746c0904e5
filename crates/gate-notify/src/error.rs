use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("WhatsApp is not configured")]
    NotConfigured,

    #[error("recipient phone number is missing")]
    MissingRecipient,

    #[error("Failed to send WhatsApp message: {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to send WhatsApp message: {0}")]
    Http(#[from] reqwest::Error),
}
