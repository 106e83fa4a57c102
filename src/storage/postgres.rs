use anyhow::Context;
use async_trait::async_trait;
use sqlx::{
    migrate::Migrator,
    postgres::{PgPool, PgPoolOptions},
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::transactions::model::{NewTransaction, Transaction};

use super::TransactionStore;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");

/// Postgres-backed store for deployments pointing `DATABASE_CLIENT` at `pg`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to postgres database")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TransactionStore for PgStore {
    async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("run postgres migrations")?;
        Ok(())
    }

    async fn insert(&self, new: NewTransaction) -> Result<Transaction, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, session_id, title, amount, created_at)
            VALUES ($1, $2, $3, $4, $5)
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
            WHERE session_id = $1
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
            WHERE session_id = $1 AND id = $2
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
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
    }
}
