use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{AppConfig, DatabaseClient};
use crate::transactions::model::{NewTransaction, Transaction};

pub mod postgres;
pub mod sqlite;

pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Persistence operations behind the transaction routes.
///
/// One implementation per supported `DATABASE_CLIENT`; handlers only ever see
/// the trait object held in the application state.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Applies pending schema migrations.
    async fn migrate(&self) -> anyhow::Result<()>;

    /// Inserts a row, stamping `created_at`, and returns it as stored.
    async fn insert(&self, new: NewTransaction) -> Result<Transaction, sqlx::Error>;

    async fn list_by_session(&self, session_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error>;

    async fn find_by_id(
        &self,
        session_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error>;

    /// Signed sum of every amount recorded for the session, `None` when the
    /// session has no transactions.
    async fn sum_by_session(&self, session_id: Uuid) -> Result<Option<f64>, sqlx::Error>;
}

/// Connects to the database selected by the configuration.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn TransactionStore>> {
    match config.database_client {
        DatabaseClient::Sqlite => {
            let store = SqliteStore::connect(&config.database_url).await?;
            Ok(Arc::new(store))
        }
        DatabaseClient::Pg => {
            let store = PgStore::connect(&config.database_url).await?;
            Ok(Arc::new(store))
        }
    }
}
