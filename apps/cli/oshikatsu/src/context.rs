use crate::error::OshikatsuError;

use client_core::api_client::ApiClient;
use client_core::config::ClientConfig;
use client_core::navigation::Route;
use client_core::session::AuthSession;
use client_core::token_store::FileTokenStore;
use client_core::workflow::GroupPage;

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

/// Everything a command needs: configuration, the credential store, and a
/// client that reads from that store.
pub struct AppContext {
    config: ClientConfig,
    store: Arc<FileTokenStore>,
    client: ApiClient,
}

impl AppContext {
    /// Load `config.json` (plus `.env` and environment overrides) from
    /// `config_dir`, or from the platform config directory.
    pub fn load(config_dir: Option<&Path>) -> Result<Self, OshikatsuError> {
        let config_dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => ClientConfig::default_dir()?,
        };
        debug!("Config directory: {}", config_dir.display());

        let config = ClientConfig::load_with_env(&config_dir)?;
        Self::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, OshikatsuError> {
        config.validate()?;

        let store = Arc::new(FileTokenStore::detect(config.storage.data_dir.as_deref())?);
        let client = ApiClient::from_config(&config, store.clone())?;
        info!("Backend: {}", client.base_url());

        Ok(Self {
            config,
            store,
            client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &FileTokenStore {
        &self.store
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Where a request for `route` lands given the stored credential.
    pub fn guard(&self, route: Route) -> Route {
        route.guard(self.store.as_ref())
    }

    pub fn session(&self) -> AuthSession<ApiClient> {
        AuthSession::new(self.client.clone(), self.store.clone())
    }

    pub fn group_page(&self) -> GroupPage<ApiClient> {
        GroupPage::new(self.client.clone())
    }
}
