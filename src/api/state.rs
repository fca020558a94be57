use std::sync::Arc;

use crate::calculate::{Paginator, WindowSpec};
use crate::config::{AppConfig, ConfigError};
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub config: Arc<AppConfig>,
    pub paginator: Paginator,
    pub window: WindowSpec,
}

impl AppState {
    /// Build shared state, validating page sizes once up front.
    pub fn new(storage: StorageConfig, config: AppConfig) -> Result<Self, ConfigError> {
        let paginator = config.paginator()?;
        let window = config.window_spec();

        Ok(Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
            paginator,
            window,
        })
    }
}
