use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use pessoas::database::request_manager::RequestError;
use serde_json::json;
use thiserror::Error;

/// The HTTP operation a failure happened in, picks the generic message shown on a server error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    ReadAll,
    ReadOne,
    Update,
    Delete,
}

impl Operation {
    fn server_error_message(self) -> &'static str {
        match self {
            Operation::Create => "Erro interno no servidor ao criar a pessoa.",
            Operation::ReadAll => "Erro interno do servidor ao buscar pessoas.",
            Operation::ReadOne => "Erro interno do servidor ao buscar pessoa.",
            Operation::Update => "Erro interno no servidor ao atualizar a pessoa.",
            Operation::Delete => "Erro interno no servidor ao deletar a pessoa.",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Operation::Create => "creating person",
            Operation::ReadAll => "listing people",
            Operation::ReadOne => "fetching person by id",
            Operation::Update => "updating person",
            Operation::Delete => "deleting person",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("Nome e sobrenome são obrigatórios.")]
    MissingRequiredField,
    #[error("ID invalido. O ID deve ser um numero")]
    InvalidIdentifier,
    #[error("Corpo da requisição inválido: {0}")]
    InvalidPayload(String),
    #[error("Pessoa não encontrada.")]
    NotFound,
    #[error("{}", .0.server_error_message())]
    Internal(Operation),
}

impl ApiError {
    /// Converts a request manager failure at the handler boundary.
    ///
    /// Store failures are logged here, once, with their full detail. The client only gets the
    /// operation's generic message.
    pub fn from_request(operation: Operation, err: RequestError) -> Self {
        match err {
            RequestError::MissingRequiredField(_) => ApiError::MissingRequiredField,
            RequestError::InvalidIdentifier(_) => ApiError::InvalidIdentifier,
            RequestError::NotFound(_) => ApiError::NotFound,
            RequestError::StoreUnavailable(storage_error) => {
                log::error!("Error {}: {}", operation.description(), storage_error);

                ApiError::Internal(operation)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingRequiredField
            | ApiError::InvalidIdentifier
            | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Not found is an answer rather than an error, it uses the same key as confirmations
        let body = match self {
            ApiError::NotFound => json!({ "message": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use pessoas::{consts::consts::PersonId, persistence::storage::StorageError};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(RequestError::MissingRequiredField("nome"), ApiError::MissingRequiredField)]
    #[case(RequestError::InvalidIdentifier("abc".to_string()), ApiError::InvalidIdentifier)]
    #[case(RequestError::NotFound(PersonId(3)), ApiError::NotFound)]
    #[case(
        RequestError::StoreUnavailable(StorageError::PoolUnavailable),
        ApiError::Internal(Operation::Update)
    )]
    fn classifies_request_errors(#[case] err: RequestError, #[case] expected: ApiError) {
        assert_eq!(ApiError::from_request(Operation::Update, err), expected);
    }

    #[rstest]
    #[case(ApiError::MissingRequiredField, StatusCode::BAD_REQUEST)]
    #[case(ApiError::InvalidIdentifier, StatusCode::BAD_REQUEST)]
    #[case(ApiError::InvalidPayload("eof".to_string()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound, StatusCode::NOT_FOUND)]
    #[case(ApiError::Internal(Operation::Create), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_to_status_codes(#[case] err: ApiError, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
    }

    #[test]
    fn server_error_hides_the_storage_detail() {
        let err = ApiError::from_request(
            Operation::ReadAll,
            RequestError::StoreUnavailable(StorageError::StatementFailed(anyhow::anyhow!(
                "relation \"pessoa\" does not exist"
            ))),
        );

        assert_eq!(
            err.to_string(),
            "Erro interno do servidor ao buscar pessoas."
        );
    }

    mod logging {
        use std::sync::{Mutex, Once};

        use log::{LevelFilter, Log, Metadata, Record};

        use super::*;

        static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
        static INIT: Once = Once::new();

        /// Keeps every record in memory so tests can look for the lines they expect
        struct CapturingLogger;

        impl Log for CapturingLogger {
            fn enabled(&self, _metadata: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                if let Ok(mut records) = RECORDS.lock() {
                    records.push(format!("{} {}", record.level(), record.args()));
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: CapturingLogger = CapturingLogger;

        fn capture_logs() {
            INIT.call_once(|| {
                log::set_logger(&LOGGER).expect("no other logger should be installed");
                log::set_max_level(LevelFilter::Trace);
            });
        }

        fn logged(needle: &str) -> Vec<String> {
            RECORDS
                .lock()
                .expect("log records lock")
                .iter()
                .filter(|line| line.contains(needle))
                .cloned()
                .collect()
        }

        #[test]
        fn store_failure_is_logged_once_with_its_detail() {
            capture_logs();

            // Given a store failure carrying a detail the client must not see
            let detail = "connection reset while deleting row 8731";

            // When it is converted at the handler boundary
            let err = ApiError::from_request(
                Operation::Delete,
                RequestError::StoreUnavailable(StorageError::StatementFailed(anyhow::anyhow!(
                    detail
                ))),
            );

            // Then the detail is logged once as an error and the client message is generic
            let lines = logged(detail);
            assert_eq!(lines.len(), 1);
            assert!(lines[0].starts_with("ERROR Error deleting person"));
            assert_eq!(err.to_string(), "Erro interno no servidor ao deletar a pessoa.");
        }
    }
}
