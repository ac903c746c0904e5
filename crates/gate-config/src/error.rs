use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load gatepass config: {0}")]
    Figment(#[from] figment::Error),

    /// The section is missing a field it needs before it can be used.
    #[error("'{section}' is not configured. Set the GATEPASS_{} variables or edit config.toml", section.to_uppercase())]
    NotConfigured { section: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
