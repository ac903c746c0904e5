use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),
}
