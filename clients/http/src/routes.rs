use actix_web::{delete, get, post, put, web, HttpResponse};
use pessoas::{
    consts::consts::PersonId,
    database::request_manager::RequestManager,
    model::{person::PersonPayload, validation::validate_identifier},
};
use serde::Serialize;

use crate::error::{ApiError, Operation};

#[derive(Serialize)]
struct CreatedResponse {
    id: PersonId,
    message: &'static str,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Registers the `/api/pessoas` endpoints and the JSON body configuration they rely on
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_people)
        .service(create_person)
        .service(get_person)
        .service(update_person)
        .service(delete_person);
}

// Malformed bodies get the same JSON error shape as every other client error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidPayload(err.to_string()).into())
}

#[post("/api/pessoas")]
async fn create_person(
    request_manager: web::Data<RequestManager>,
    payload: web::Json<PersonPayload>,
) -> Result<HttpResponse, ApiError> {
    let id = request_manager
        .send_add(payload.into_inner())
        .await
        .map_err(|e| ApiError::from_request(Operation::Create, e))?;

    Ok(HttpResponse::Created().json(CreatedResponse {
        id,
        message: "Pessoa criada com sucesso!",
    }))
}

#[get("/api/pessoas")]
async fn list_people(
    request_manager: web::Data<RequestManager>,
) -> Result<HttpResponse, ApiError> {
    let people = request_manager
        .send_list()
        .await
        .map_err(|e| ApiError::from_request(Operation::ReadAll, e))?;

    Ok(HttpResponse::Ok().json(people))
}

#[get("/api/pessoas/{id}")]
async fn get_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let person = request_manager
        .send_get(id.as_str())
        .await
        .map_err(|e| ApiError::from_request(Operation::ReadOne, e))?;

    Ok(HttpResponse::Ok().json(person))
}

// The body is read raw so a bad identifier is reported before a bad body
#[put("/api/pessoas/{id}")]
async fn update_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    validate_identifier(id.as_str())
        .map_err(|e| ApiError::from_request(Operation::Update, e.into()))?;

    let payload: PersonPayload =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidPayload(e.to_string()))?;

    request_manager
        .send_update(id.as_str(), payload)
        .await
        .map_err(|e| ApiError::from_request(Operation::Update, e))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Pessoa atualizada com sucesso!",
    }))
}

#[delete("/api/pessoas/{id}")]
async fn delete_person(
    request_manager: web::Data<RequestManager>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    request_manager
        .send_delete(id.as_str())
        .await
        .map_err(|e| ApiError::from_request(Operation::Delete, e))?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Pessoa deletada com sucesso!",
    }))
}
