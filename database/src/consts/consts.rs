use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::validation::ValidationError;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
    pub fn to_number(self) -> i64 {
        self.0
    }

    pub fn increment(&self) -> PersonId {
        PersonId(self.0 + 1)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path identifiers arrive as raw strings, every handler that takes an `:id` goes through here
impl TryFrom<&str> for PersonId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value
            .parse::<i64>()
            .map(PersonId)
            .map_err(|_| ValidationError::InvalidIdentifier(value.to_string()))
    }
}

// Values
pub const PERSON_TABLE: &str = "pessoa";

/// Matches the first value handed out by a BIGSERIAL column
pub const FIRST_PERSON_ID: PersonId = PersonId(1);
