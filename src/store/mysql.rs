//! MySQL-backed target store.
//!
//! # Responsibilities
//! - Own the connection pool
//! - Verify connectivity once at startup
//! - Run the target query and decode rows

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;

use crate::config::StoreConfig;
use crate::store::types::{StoreError, StoreResult, Target};
use crate::store::TargetStore;

/// Target store reading the `id`/`url` columns of a MySQL table.
#[derive(Clone)]
pub struct MySqlTargetStore {
    pool: MySqlPool,
    query: String,
}

impl MySqlTargetStore {
    /// Build the pool and ping the server once.
    ///
    /// Failure here is a startup error and is returned to the caller.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect_with(options)
            .await
            .map_err(classify)?;

        let mut conn = pool.acquire().await.map_err(classify)?;
        conn.ping().await.map_err(classify)?;
        drop(conn);

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            table = %config.table,
            "Connected to target store"
        );

        Ok(Self::from_pool(pool, &config.table))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: MySqlPool, table: &str) -> Self {
        Self {
            pool,
            query: target_query(table),
        }
    }
}

#[async_trait]
impl TargetStore for MySqlTargetStore {
    async fn load_targets(&self) -> StoreResult<Vec<Target>> {
        let rows = sqlx::query_as::<_, (i64, String)>(&self.query)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        Ok(rows.into_iter().map(Target::from).collect())
    }
}

/// Build the target query for a validated table name.
fn target_query(table: &str) -> String {
    format!("SELECT CAST(id AS SIGNED) AS id, url FROM `{}`", table)
}

/// Map a driver error onto the store error taxonomy.
fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unreachable(err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::ReadFailed(err.to_string()),
        _ => StoreError::QueryFailed(err.to_string()),
    }
}
