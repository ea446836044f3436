use anyhow::anyhow;
use deadpool_postgres::Object;
use tokio_postgres::{Row, Statement};

use crate::{
    consts::consts::{PersonId, PERSON_TABLE},
    database::pool::PoolManager,
    model::person::{NewPerson, Person},
};

use super::{PersonStorage, StorageError, StorageResult};

// Baseline create, only run when the bootstrap asks for it.
// The statements below cast `id` to BIGINT so tables keyed by SERIAL work as well
const CREATE_PERSON_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS pessoa (
        id BIGSERIAL PRIMARY KEY,
        nome VARCHAR(255) NOT NULL,
        sobrenome VARCHAR(255) NOT NULL,
        idade INTEGER,
        sexo VARCHAR(50),
        cidade VARCHAR(255),
        estado VARCHAR(255),
        pais VARCHAR(255)
    );
"#;

const INSERT_PERSON: &str = r#"
    INSERT INTO pessoa (nome, sobrenome, idade, sexo, cidade, estado, pais)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id::BIGINT AS id;
"#;

const SELECT_PEOPLE: &str = r#"
    SELECT id::BIGINT AS id, nome, sobrenome, idade, sexo, cidade, estado, pais FROM pessoa;
"#;

const SELECT_PERSON: &str = r#"
    SELECT id::BIGINT AS id, nome, sobrenome, idade, sexo, cidade, estado, pais
    FROM pessoa WHERE id = $1::BIGINT;
"#;

const UPDATE_PERSON: &str = r#"
    UPDATE pessoa
    SET nome = $1, sobrenome = $2, idade = $3, sexo = $4, cidade = $5, estado = $6, pais = $7
    WHERE id = $8::BIGINT;
"#;

const DELETE_PERSON: &str = r#"
    DELETE FROM pessoa WHERE id = $1::BIGINT;
"#;

pub struct PgStorage {
    pool_manager: PoolManager,
    create_table: bool,
}

impl PgStorage {
    pub fn new(pool_manager: PoolManager) -> Self {
        Self {
            pool_manager,
            create_table: false,
        }
    }

    /// Makes `init` create the `pessoa` table when it does not exist yet
    pub fn set_create_table(mut self, create_table: bool) -> Self {
        self.create_table = create_table;
        self
    }

    pub fn shutdown(&self) {
        self.pool_manager.shutdown()
    }

    async fn prepare(&self, query: &str) -> StorageResult<(Object, Statement)> {
        let client = self.pool_manager.get_connection().await?;

        let statement = client
            .prepare_cached(query)
            .await
            .map_err(|e| StorageError::UnableToPrepareStatement(anyhow!(e)))?;

        Ok((client, statement))
    }
}

impl PersonStorage for PgStorage {
    async fn init(&self) -> StorageResult<()> {
        if !self.create_table {
            return Ok(());
        }

        let client = self.pool_manager.get_connection().await?;

        client
            .batch_execute(CREATE_PERSON_TABLE)
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))?;

        log::info!("Table [{}] is present", PERSON_TABLE);

        Ok(())
    }

    async fn insert(&self, person: &NewPerson) -> StorageResult<PersonId> {
        let (client, statement) = self.prepare(INSERT_PERSON).await?;

        let row = client
            .query_one(
                &statement,
                &[
                    &person.nome,
                    &person.sobrenome,
                    &person.idade,
                    &person.sexo,
                    &person.cidade,
                    &person.estado,
                    &person.pais,
                ],
            )
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| StorageError::UnableToReadRow(anyhow!(e)))?;

        Ok(PersonId(id))
    }

    async fn list(&self) -> StorageResult<Vec<Person>> {
        let (client, statement) = self.prepare(SELECT_PEOPLE).await?;

        let rows = client
            .query(&statement, &[])
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))?;

        rows.iter()
            .map(person_from_row)
            .collect::<Result<Vec<Person>, _>>()
            .map_err(|e| StorageError::UnableToReadRow(anyhow!(e)))
    }

    async fn get(&self, id: PersonId) -> StorageResult<Option<Person>> {
        let (client, statement) = self.prepare(SELECT_PERSON).await?;

        let rows = client
            .query(&statement, &[&id.to_number()])
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))?;

        // id is the primary key, so there is at most one row
        match rows.first() {
            Some(row) => person_from_row(row)
                .map(Some)
                .map_err(|e| StorageError::UnableToReadRow(anyhow!(e))),
            None => Ok(None),
        }
    }

    async fn update(&self, id: PersonId, person: &NewPerson) -> StorageResult<u64> {
        let (client, statement) = self.prepare(UPDATE_PERSON).await?;

        client
            .execute(
                &statement,
                &[
                    &person.nome,
                    &person.sobrenome,
                    &person.idade,
                    &person.sexo,
                    &person.cidade,
                    &person.estado,
                    &person.pais,
                    &id.to_number(),
                ],
            )
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))
    }

    async fn delete(&self, id: PersonId) -> StorageResult<u64> {
        let (client, statement) = self.prepare(DELETE_PERSON).await?;

        client
            .execute(&statement, &[&id.to_number()])
            .await
            .map_err(|e| StorageError::StatementFailed(anyhow!(e)))
    }
}

fn person_from_row(row: &Row) -> Result<Person, tokio_postgres::Error> {
    Ok(Person {
        id: PersonId(row.try_get("id")?),
        nome: row.try_get("nome")?,
        sobrenome: row.try_get("sobrenome")?,
        idade: row.try_get("idade")?,
        sexo: row.try_get("sexo")?,
        cidade: row.try_get("cidade")?,
        estado: row.try_get("estado")?,
        pais: row.try_get("pais")?,
    })
}
