use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    HttpRequest, HttpResponse, ResponseError,
};
use log::error;
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize)]
pub struct PageDto<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

#[derive(Serialize)]
pub struct ErrorDto {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_err = match err {
        JsonPayloadError::ContentType => AppError::validation("expected an application/json body"),
        JsonPayloadError::Deserialize(e) => AppError::invalid_field("body", e.to_string()),
        other => AppError::validation(other.to_string()),
    };
    app_err.into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_err = match err {
        QueryPayloadError::Deserialize(e) => AppError::invalid_field("query", e.to_string()),
        other => AppError::validation(other.to_string()),
    };
    app_err.into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let app_err = match err {
        PathError::Deserialize(e) => AppError::invalid_field("path", e.to_string()),
        other => AppError::validation(other.to_string()),
    };
    app_err.into()
}

pub fn response_from_error(err: &AppError) -> HttpResponse {
    if let AppError::Storage(e) = err {
        error!("storage failure: {}", e);
    }
    HttpResponse::build(err.status_code()).json(ErrorDto {
        detail: err.detail(),
        field: err.field().map(|s| s.to_string()),
    })
}
