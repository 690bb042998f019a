//! API 帮助函数

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{debug, error};

use super::types::ErrorResponse;
use crate::errors::TinylinkError;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 从 TinylinkError 构建错误响应
///
/// Client errors carry the message as `error`; server errors carry the error
/// kind as `error` and echo the message.
pub fn error_response(err: &TinylinkError) -> HttpResponse {
    let status = err.http_status();
    let body = if status.is_server_error() {
        error!("{}", err);
        ErrorResponse {
            error: err.error_type().to_string(),
            message: Some(err.message().to_string()),
            ..Default::default()
        }
    } else {
        debug!("Request failed: {}", err);
        ErrorResponse {
            error: err.message().to_string(),
            suggestion: err.suggestion().map(str::to_string),
            ..Default::default()
        }
    };
    json_response(status, &body)
}

/// Error response that also names the short code the request was about
pub fn code_error_response(err: &TinylinkError, code: &str) -> HttpResponse {
    match err {
        TinylinkError::NotFound(_) => not_found_response(code),
        _ => error_response(err),
    }
}

pub fn not_found_response(code: &str) -> HttpResponse {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorResponse {
            error: "URL not found".to_string(),
            short_code: Some(code.to_string()),
            ..Default::default()
        },
    )
}

/// JSON body extractor config: malformed bodies become a 400 with a JSON error
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let response = json_response(
                StatusCode::BAD_REQUEST,
                &ErrorResponse {
                    error: "Invalid request body".to_string(),
                    message: Some(err.to_string()),
                    ..Default::default()
                },
            );
            InternalError::from_response(err, response).into()
        })
}

/// Query extractor config with the same error shape as [`json_config`]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = json_response(
            StatusCode::BAD_REQUEST,
            &ErrorResponse {
                error: "Invalid query string".to_string(),
                message: Some(err.to_string()),
                ..Default::default()
            },
        );
        InternalError::from_response(err, response).into()
    })
}
