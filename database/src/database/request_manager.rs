use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    model::{
        person::{Person, PersonPayload},
        validation::{validate_create_or_update, validate_identifier, ValidationError},
    },
    persistence::storage::{PersonStorage, StorageEngine, StorageError},
};

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Invalid identifier, expected an integer: {0:?}")]
    InvalidIdentifier(String),
    #[error("No person exists with [id: {0}]")]
    NotFound(PersonId),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
}

impl From<ValidationError> for RequestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingRequiredField(field) => {
                RequestError::MissingRequiredField(field)
            }
            ValidationError::InvalidIdentifier(raw) => RequestError::InvalidIdentifier(raw),
        }
    }
}

/// Goal of the request manager is to provide a typed interface for the CRUD operations on a person
///
/// Every operation follows the same shape:
/// 1. Validate the raw input, validation failures return before any I/O
/// 2. Issue exactly one statement against the storage engine
/// 3. Classify the outcome, an absent row becomes `RequestError::NotFound`
///
/// Store failures are returned untouched inside `RequestError::StoreUnavailable`, the caller
/// decides how much of them to reveal.
pub struct RequestManager {
    storage: StorageEngine,
}

impl RequestManager {
    pub fn new(storage: StorageEngine) -> Self {
        Self { storage }
    }

    pub async fn init(&self) -> Result<(), RequestError> {
        self.storage.init().await?;
        Ok(())
    }

    pub fn shutdown(&self) {
        self.storage.shutdown()
    }

    /// Returns the id the store assigned to the new person
    pub async fn send_add(&self, payload: PersonPayload) -> Result<PersonId, RequestError> {
        let person = validate_create_or_update(payload)?;

        let id = self.storage.insert(&person).await?;

        log::debug!("Added person [id: {}]", id);

        Ok(id)
    }

    pub async fn send_list(&self) -> Result<Vec<Person>, RequestError> {
        Ok(self.storage.list().await?)
    }

    pub async fn send_get(&self, raw_id: &str) -> Result<Person, RequestError> {
        let id = validate_identifier(raw_id)?;

        self.storage
            .get(id)
            .await?
            .ok_or(RequestError::NotFound(id))
    }

    /// Overwrites every mutable field of the person, omitted optional fields become null
    pub async fn send_update(
        &self,
        raw_id: &str,
        payload: PersonPayload,
    ) -> Result<PersonId, RequestError> {
        let id = validate_identifier(raw_id)?;
        let person = validate_create_or_update(payload)?;

        let affected_rows = self.storage.update(id, &person).await?;

        if affected_rows == 0 {
            return Err(RequestError::NotFound(id));
        }

        log::debug!("Updated person [id: {}]", id);

        Ok(id)
    }

    pub async fn send_delete(&self, raw_id: &str) -> Result<PersonId, RequestError> {
        let id = validate_identifier(raw_id)?;

        let affected_rows = self.storage.delete(id).await?;

        if affected_rows == 0 {
            return Err(RequestError::NotFound(id));
        }

        log::debug!("Deleted person [id: {}]", id);

        Ok(id)
    }
}

#[cfg(test)]
impl RequestManager {
    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }
}
