use anyhow::anyhow;
use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

use crate::persistence::storage::{StorageError, StorageResult};

use super::options::DatabaseOptions;

/// Owns the process wide connection pool.
///
/// Built once at startup and handed to the storage engine, nothing reaches it through global
/// state. A failed initialization leaves the pool unset: the process keeps running and every
/// data operation reports the store as unavailable.
#[derive(Clone)]
pub struct PoolManager {
    pool: Option<Pool>,
}

impl PoolManager {
    pub fn initialize(options: &DatabaseOptions) -> Self {
        match create_pool(options) {
            Ok(pool) => {
                log::info!(
                    "✅ Connection pool ready [Host: {}:{}, Database: {}, MaxConnections: {}]",
                    options.host,
                    options.port,
                    options.database,
                    options.max_connections
                );

                Self { pool: Some(pool) }
            }
            Err(err) => {
                log::error!("❌ Unable to create connection pool: {}", err);

                Self::uninitialized()
            }
        }
    }

    pub fn uninitialized() -> Self {
        Self { pool: None }
    }

    /// Returns the current pool handle, `None` when initialization failed
    pub fn get_pool(&self) -> Option<Pool> {
        self.pool.clone()
    }

    /// Checks out a connection, waiting for one to be returned if the pool is exhausted
    pub async fn get_connection(&self) -> StorageResult<Object> {
        let pool = self.pool.as_ref().ok_or(StorageError::PoolUnavailable)?;

        pool.get()
            .await
            .map_err(|e| StorageError::UnableToAcquireConnection(anyhow!(e)))
    }

    /// Opens (or reuses) one connection and runs a trivial statement against it
    pub async fn check_connection(&self) -> StorageResult<()> {
        let client = self.get_connection().await?;

        client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))?;

        Ok(())
    }

    /// Closes the pool, later checkouts fail as unavailable
    pub fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
            log::info!("Connection pool closed");
        }
    }
}

fn create_pool(options: &DatabaseOptions) -> anyhow::Result<Pool> {
    let mut config = Config::new();
    config.host = Some(options.host.clone());
    config.port = Some(options.port);
    config.user = Some(options.user.clone());
    config.password = Some(options.password.clone());
    config.dbname = Some(options.database.clone());
    config.connect_timeout = Some(options.connect_timeout);

    config.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    // No wait timeout, exhausted pools queue checkouts
    let mut pool_config = PoolConfig::new(options.max_connections);
    pool_config.timeouts.create = Some(options.connect_timeout);
    pool_config.timeouts.recycle = Some(options.connect_timeout);
    config.pool = Some(pool_config);

    let pool = config.create_pool(Some(Runtime::Tokio1), NoTls)?;

    Ok(pool)
}
