use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "gatepass-cli";
const KEYRING_USER: &str = "api-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Env var checked between the keyring and the credentials file.
pub const TOKEN_ENV: &str = "GATEPASS_AUTH__TOKEN";

/// Where a loaded token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Token storage across the OS keychain, an env var, and a 0600 file.
///
/// Priority on load: keyring → `GATEPASS_AUTH__TOKEN` → file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
    file: Option<PathBuf>,
    use_keyring: bool,
}

impl CredentialStore {
    /// The store used by the CLI.
    ///
    /// The keyring service defaults to `"gatepass-cli"`; override it with
    /// `GATEPASS_KEYRING_SERVICE` to keep test runs away from real credentials.
    #[must_use]
    pub fn system() -> Self {
        Self {
            service: std::env::var("GATEPASS_KEYRING_SERVICE")
                .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string()),
            file: dirs::home_dir().map(|h| h.join(".gatepass").join(CREDENTIALS_FILE_NAME)),
            use_keyring: true,
        }
    }

    /// A store backed only by `path` (and the env var).
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            service: DEFAULT_KEYRING_SERVICE.to_string(),
            file: Some(path.into()),
            use_keyring: false,
        }
    }

    /// Save a token in the keychain, falling back to the credentials file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
    pub fn store(&self, token: &str) -> Result<(), AuthError> {
        if !self.use_keyring {
            return self.store_file(token);
        }
        match keyring::Entry::new(&self.service, KEYRING_USER) {
            Ok(entry) => match entry.set_password(token) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.store_file(token)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.store_file(token)
            }
        }
    }

    #[must_use]
    pub fn load(&self) -> Option<String> {
        self.load_with_source().map(|(token, _)| token)
    }

    /// Load a token together with the tier it came from.
    #[must_use]
    pub fn load_with_source(&self) -> Option<(String, TokenSource)> {
        if let Some(token) = self.load_keyring() {
            return Some((token, TokenSource::Keyring));
        }

        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.trim().is_empty()
        {
            return Some((token, TokenSource::Env));
        }

        self.load_file().map(|token| (token, TokenSource::File))
    }

    /// Remove the token from the keyring and the credentials file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if self.use_keyring
            && let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER)
        {
            let _ = entry.delete_credential();
        }

        let path = self.credentials_path()?;
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn load_keyring(&self) -> Option<String> {
        if !self.use_keyring {
            return None;
        }
        keyring::Entry::new(&self.service, KEYRING_USER)
            .ok()?
            .get_password()
            .ok()
            .filter(|t| !t.is_empty())
    }

    fn credentials_path(&self) -> Result<&Path, AuthError> {
        self.file.as_deref().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found. Cannot store credentials".into())
        })
    }

    fn store_file(&self, token: &str) -> Result<(), AuthError> {
        let path = self.credentials_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, token)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<String> {
        let path = self.file.as_deref()?;
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
