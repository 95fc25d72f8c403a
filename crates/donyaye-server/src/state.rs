use std::sync::Arc;

use donyaye_core::{Addon, CatalogClient, Config, DonyayeSerial, Result, build_http_client};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub addon: Arc<Addon<DonyayeSerial>>,
}

impl AppState {
    /// Builds the addon with one HTTP client shared by the provider and the catalogs
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = build_http_client(&config)?;
        let addon = Addon::new(
            DonyayeSerial::with_client(client.clone(), &config),
            CatalogClient::new(client, &config),
            config,
        );
        Ok(Self {
            addon: Arc::new(addon),
        })
    }
}
