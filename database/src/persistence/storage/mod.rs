use strum::{Display, EnumString};
use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    model::person::{NewPerson, Person},
};

use self::{memory::MemoryStorage, postgres::PgStorage};

pub mod memory;
pub mod postgres;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection pool is not initialized")]
    PoolUnavailable,
    #[error("Unable to acquire a connection from the pool: {0}")]
    UnableToAcquireConnection(anyhow::Error),
    #[error("Unable to prepare statement: {0}")]
    UnableToPrepareStatement(anyhow::Error),
    #[error("Statement failed: {0}")]
    StatementFailed(anyhow::Error),
    #[error("Unable to read row: {0}")]
    UnableToReadRow(anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// One method per statement the service issues, every call is a single statement.
///
/// Writes return the affected-row count, callers use it to tell a missing row apart from a
/// changed one.
#[allow(async_fn_in_trait)]
pub trait PersonStorage {
    async fn init(&self) -> StorageResult<()>;
    async fn insert(&self, person: &NewPerson) -> StorageResult<PersonId>;
    async fn list(&self) -> StorageResult<Vec<Person>>;
    async fn get(&self, id: PersonId) -> StorageResult<Option<Person>>;
    async fn update(&self, id: PersonId, person: &NewPerson) -> StorageResult<u64>;
    async fn delete(&self, id: PersonId) -> StorageResult<u64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StorageEngineKind {
    Postgres,
    Memory,
}

pub enum StorageEngine {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageEngine {
    pub fn shutdown(&self) {
        match self {
            StorageEngine::Postgres(s) => s.shutdown(),
            StorageEngine::Memory(_) => {}
        }
    }
}

impl PersonStorage for StorageEngine {
    async fn init(&self) -> StorageResult<()> {
        match self {
            StorageEngine::Postgres(s) => s.init().await,
            StorageEngine::Memory(s) => s.init().await,
        }
    }

    async fn insert(&self, person: &NewPerson) -> StorageResult<PersonId> {
        match self {
            StorageEngine::Postgres(s) => s.insert(person).await,
            StorageEngine::Memory(s) => s.insert(person).await,
        }
    }

    async fn list(&self) -> StorageResult<Vec<Person>> {
        match self {
            StorageEngine::Postgres(s) => s.list().await,
            StorageEngine::Memory(s) => s.list().await,
        }
    }

    async fn get(&self, id: PersonId) -> StorageResult<Option<Person>> {
        match self {
            StorageEngine::Postgres(s) => s.get(id).await,
            StorageEngine::Memory(s) => s.get(id).await,
        }
    }

    async fn update(&self, id: PersonId, person: &NewPerson) -> StorageResult<u64> {
        match self {
            StorageEngine::Postgres(s) => s.update(id, person).await,
            StorageEngine::Memory(s) => s.update(id, person).await,
        }
    }

    async fn delete(&self, id: PersonId) -> StorageResult<u64> {
        match self {
            StorageEngine::Postgres(s) => s.delete(id).await,
            StorageEngine::Memory(s) => s.delete(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn engine_kind_parses_lowercase_names() {
        assert_eq!(
            StorageEngineKind::from_str("postgres").expect("should parse"),
            StorageEngineKind::Postgres
        );
        assert_eq!(
            StorageEngineKind::from_str("memory").expect("should parse"),
            StorageEngineKind::Memory
        );
        assert!(StorageEngineKind::from_str("dynamodb").is_err());
    }

    #[test]
    fn engine_kind_displays_lowercase_names() {
        assert_eq!(StorageEngineKind::Postgres.to_string(), "postgres");
    }
}
