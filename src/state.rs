use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{self, TransactionStore};

/// Process-wide shared state, built once at startup and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let store = storage::connect(&config).await?;
        Ok(Self { store, config })
    }

    pub fn from_parts(store: Arc<dyn TransactionStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}
