use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::api::helpers::json_response;

pub struct IndexService;

impl IndexService {
    /// Service description and endpoint list
    pub async fn describe() -> HttpResponse {
        json_response(
            StatusCode::OK,
            &json!({
                "message": "URL Shortener API",
                "version": env!("CARGO_PKG_VERSION"),
                "endpoints": {
                    "POST /api/shorten": "Shorten a URL",
                    "GET /:shortCode": "Redirect to the original URL",
                    "GET /api/stats/:shortCode": "Get statistics for a short URL",
                    "GET /api/list": "List all URLs",
                    "DELETE /api/delete/:shortCode": "Delete a URL",
                    "POST /api/cleanup": "Remove URLs not accessed within the retention window",
                    "GET /api/health": "Service health"
                },
                "examples": {
                    "shorten": {
                        "method": "POST",
                        "endpoint": "/api/shorten",
                        "body": {
                            "url": "https://www.example.com/very/long/url",
                            "customCode": "optional-custom-code"
                        }
                    }
                }
            }),
        )
    }
}

pub fn index_routes() -> actix_web::Resource {
    web::resource("/").route(web::get().to(IndexService::describe))
}
