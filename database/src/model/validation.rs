use thiserror::Error;

use crate::consts::consts::PersonId;

use super::person::{NewPerson, PersonPayload};

/// Structural problems with client input, detected before any I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Invalid identifier, expected an integer: {0:?}")]
    InvalidIdentifier(String),
}

/// Checks the required fields of a create/update payload.
///
/// `nome` and `sobrenome` must be present and non-empty, every other field is passed
/// through as received.
pub fn validate_create_or_update(payload: PersonPayload) -> Result<NewPerson, ValidationError> {
    let nome = required("nome", payload.nome)?;
    let sobrenome = required("sobrenome", payload.sobrenome)?;

    Ok(NewPerson {
        nome,
        sobrenome,
        idade: payload.idade,
        sexo: payload.sexo,
        cidade: payload.cidade,
        estado: payload.estado,
        pais: payload.pais,
    })
}

pub fn validate_identifier(raw_id: &str) -> Result<PersonId, ValidationError> {
    PersonId::try_from(raw_id)
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingRequiredField(field)),
    }
}
