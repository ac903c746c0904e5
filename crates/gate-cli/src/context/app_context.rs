use std::sync::Arc;

use anyhow::Context;
use gate_api::{ApiClient, DirectoryStore, InMemoryDirectory};
use gate_auth::CredentialStore;
use gate_config::GateConfig;
use gate_core::session::SessionContext;
use gate_desk::Desk;
use gate_media::ImageKitClient;
use gate_notify::WhatsAppNotifier;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: GateConfig,
    pub desk: Desk,
    pub session: SessionContext,
    pub credentials: CredentialStore,
    pub assume_yes: bool,
}

impl AppContext {
    /// Build the directory store, image host, and notifier from config, and
    /// restore the stored session.
    pub fn init(config: GateConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let store: Arc<dyn DirectoryStore> = if config.api.use_mock {
            tracing::debug!("using in-memory directory");
            Arc::new(InMemoryDirectory::seeded())
        } else {
            Arc::new(ApiClient::new(&config.api).context("failed to build api client")?)
        };
        let images = ImageKitClient::new(config.imagekit.clone())
            .context("failed to build image host client")?;

        let mut desk = Desk::new(store, Arc::new(images));
        if config.whatsapp.is_configured() {
            let notifier = WhatsAppNotifier::new(config.whatsapp.clone())
                .context("failed to build whatsapp client")?;
            desk = desk.with_notifier(Arc::new(notifier));
        }

        let credentials = CredentialStore::system();
        let session = gate_auth::restore_session(&credentials);

        Ok(Self {
            config,
            desk,
            session,
            credentials,
            assume_yes: flags.yes,
        })
    }

    /// After a command: if the store rejected the credential (the session was
    /// invalidated), drop it from persistent storage as well.
    pub fn forget_rejected_credential(&mut self) {
        if self.session.has_token() || self.credentials.load().is_none() {
            return;
        }
        match gate_auth::logout(&self.credentials, &mut self.session) {
            Ok(()) => tracing::warn!("stored credential was rejected and has been cleared; run `gatepass auth login`"),
            Err(error) => tracing::warn!(%error, "failed to clear rejected credential"),
        }
    }
}
