use serde::{Deserialize, Serialize};

use crate::consts::consts::PersonId;

/// A row of the `pessoa` table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub nome: String,
    pub sobrenome: String,
    pub idade: Option<i32>,
    pub sexo: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
}

/// Body of a create or update request, as sent by the client.
///
/// Any `id` in the body is ignored, identifiers are only ever assigned by the store.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PersonPayload {
    pub nome: Option<String>,
    pub sobrenome: Option<String>,
    pub idade: Option<i32>,
    pub sexo: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
}

/// A validated payload, every mutable column of a person
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub nome: String,
    pub sobrenome: String,
    pub idade: Option<i32>,
    pub sexo: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub pais: Option<String>,
}

impl NewPerson {
    pub fn new(nome: String, sobrenome: String) -> Self {
        NewPerson {
            nome,
            sobrenome,
            idade: None,
            sexo: None,
            cidade: None,
            estado: None,
            pais: None,
        }
    }

    pub fn with_id(self, id: PersonId) -> Person {
        Person {
            id,
            nome: self.nome,
            sobrenome: self.sobrenome,
            idade: self.idade,
            sexo: self.sexo,
            cidade: self.cidade,
            estado: self.estado,
            pais: self.pais,
        }
    }

    pub fn new_test() -> Self {
        NewPerson {
            nome: "Ana".to_string(),
            sobrenome: "Silva".to_string(),
            idade: Some(31),
            sexo: Some("F".to_string()),
            cidade: Some("Recife".to_string()),
            estado: Some("PE".to_string()),
            pais: Some("Brasil".to_string()),
        }
    }
}
