use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::transactions::model::{NewTransaction, Transaction};

use super::TransactionStore;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// SQLite-backed store. The database file is created on first connect.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Accepts a bare file path or a `sqlite:` URL.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = database_url
            .parse::<SqliteConnectOptions>()
            .with_context(|| format!("invalid sqlite database url {database_url:?}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("connect to sqlite database")?;

        Ok(Self { pool })
    }

    /// In-memory database for tests. Capped at a single connection, since
    /// every connection would otherwise get its own empty database.
    pub async fn connect_in_memory() -> anyhow::Result<Self> {
        let options = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()
            .context("parse in-memory sqlite url")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("open in-memory sqlite database")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TransactionStore for SqliteStore {
    async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("run sqlite migrations")?;
        Ok(())
    }

    async fn insert(&self, new: NewTransaction) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, session_id, title, amount, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, session_id, title, amount, created_at
            "#,
        )
        .bind(new.id)
        .bind(new.session_id)
        .bind(&new.title)
        .bind(new.amount)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await
    }

    async fn list_by_session(&self, session_id: Uuid) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, session_id, title, amount, created_at
            FROM transactions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_by_id(
        &self,
        session_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, session_id, title, amount, created_at
            FROM transactions
            WHERE session_id = ? AND id = ?
            "#,
        )
        .bind(session_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn sum_by_session(&self, session_id: Uuid) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT SUM(amount)
            FROM transactions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        let store = SqliteStore::connect_in_memory()
            .await
            .expect("open in-memory database");
        store.migrate().await.expect("run migrations");
        store
    }

    fn new_transaction(session_id: Uuid, title: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            id: Uuid::new_v4(),
            session_id,
            title: title.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn insert_then_list_round_trips() {
        let store = store().await;
        let session_id = Uuid::new_v4();

        let inserted = store
            .insert(new_transaction(session_id, "Salary", 5000.0))
            .await
            .expect("insert transaction");
        assert_eq!(inserted.title, "Salary");
        assert_eq!(inserted.session_id, Some(session_id));

        let listed = store
            .list_by_session(session_id)
            .await
            .expect("list transactions");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, inserted.id);
        assert_eq!(listed[0].amount, 5000.0);
    }

    #[tokio::test]
    async fn find_by_id_is_scoped_to_the_session() {
        let store = store().await;
        let session_id = Uuid::new_v4();

        let inserted = store
            .insert(new_transaction(session_id, "Groceries", -120.0))
            .await
            .expect("insert transaction");

        let found = store
            .find_by_id(session_id, inserted.id)
            .await
            .expect("find transaction");
        assert_eq!(found.map(|t| t.id), Some(inserted.id));

        let other_session = store
            .find_by_id(Uuid::new_v4(), inserted.id)
            .await
            .expect("find transaction");
        assert!(other_session.is_none());
    }

    #[tokio::test]
    async fn sum_is_null_for_an_empty_session() {
        let store = store().await;

        let sum = store
            .sum_by_session(Uuid::new_v4())
            .await
            .expect("sum transactions");
        assert_eq!(sum, None);
    }

    #[tokio::test]
    async fn sum_adds_signed_amounts() {
        let store = store().await;
        let session_id = Uuid::new_v4();

        store
            .insert(new_transaction(session_id, "Salary", 5000.0))
            .await
            .expect("insert credit");
        store
            .insert(new_transaction(session_id, "Rent", -2000.0))
            .await
            .expect("insert debit");

        let sum = store
            .sum_by_session(session_id)
            .await
            .expect("sum transactions");
        assert_eq!(sum, Some(3000.0));
    }
}
