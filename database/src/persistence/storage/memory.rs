use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
    consts::consts::{PersonId, FIRST_PERSON_ID},
    model::person::{NewPerson, Person},
};

use super::{PersonStorage, StorageResult};

struct PersonTable {
    rows: BTreeMap<PersonId, Person>,
    next_id: PersonId,
}

/// Keeps the `pessoa` table in process memory.
///
/// Behaves like the relational store as far as the service can observe: ids are handed out
/// sequentially and never reused, rows are listed in id order, writes report affected rows.
pub struct MemoryStorage {
    table: Mutex<PersonTable>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(PersonTable {
                rows: BTreeMap::new(),
                next_id: FIRST_PERSON_ID,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every operation leaves the table consistent, a panic elsewhere cannot corrupt it
    fn lock(&self) -> MutexGuard<'_, PersonTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonStorage for MemoryStorage {
    async fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn insert(&self, person: &NewPerson) -> StorageResult<PersonId> {
        let mut table = self.lock();

        let id = table.next_id;
        table.next_id = id.increment();
        table.rows.insert(id, person.clone().with_id(id));

        Ok(id)
    }

    async fn list(&self) -> StorageResult<Vec<Person>> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn get(&self, id: PersonId) -> StorageResult<Option<Person>> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn update(&self, id: PersonId, person: &NewPerson) -> StorageResult<u64> {
        let mut table = self.lock();

        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = person.clone().with_id(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: PersonId) -> StorageResult<u64> {
        Ok(self.lock().rows.remove(&id).map_or(0, |_| 1))
    }
}
