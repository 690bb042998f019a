//! `/api` 路由：创建、统计、列表、删除、清理

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use tracing::{info, trace};

use crate::api::helpers::{code_error_response, error_response, json_response};
use crate::api::services::health::HealthService;
use crate::api::types::{
    CleanupQuery, CleanupResponse, DeleteResponse, ListItem, ListResponse, ShortenRequest,
    ShortenResponse, StatsResponse,
};
use crate::services::LinkService;

pub struct LinkApi;

impl LinkApi {
    pub async fn shorten(
        body: web::Json<ShortenRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let body = body.into_inner();
        trace!("API: shorten request {:?}", body);

        match service
            .shorten(body.url.as_deref(), body.custom_code.as_deref())
            .await
        {
            Ok(result) => json_response(StatusCode::CREATED, &ShortenResponse::from(result)),
            Err(e) => error_response(&e),
        }
    }

    pub async fn stats(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        match service.get_stats(&code).await {
            Ok(stats) => json_response(StatusCode::OK, &StatsResponse::from(stats)),
            Err(e) => code_error_response(&e, &code),
        }
    }

    pub async fn list(service: web::Data<Arc<LinkService>>) -> impl Responder {
        let urls: Vec<ListItem> = service
            .list()
            .await
            .into_iter()
            .map(ListItem::from)
            .collect();

        trace!("API: listing {} links", urls.len());
        json_response(
            StatusCode::OK,
            &ListResponse {
                total: urls.len(),
                urls,
            },
        )
    }

    pub async fn delete(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        match service.delete(&code).await {
            Ok(_) => json_response(
                StatusCode::OK,
                &DeleteResponse {
                    success: true,
                    message: "URL deleted successfully".to_string(),
                    short_code: code,
                },
            ),
            Err(e) => code_error_response(&e, &code),
        }
    }

    pub async fn cleanup(
        query: web::Query<CleanupQuery>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        match service.cleanup(query.days).await {
            Ok(result) => {
                info!("API: cleanup removed {} links", result.deleted);
                json_response(StatusCode::OK, &CleanupResponse::from(result))
            }
            Err(e) => error_response(&e),
        }
    }
}

/// `/api` 路由配置
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/shorten", web::post().to(LinkApi::shorten))
        .route("/stats/{code}", web::get().to(LinkApi::stats))
        .route("/list", web::get().to(LinkApi::list))
        .route("/delete/{code}", web::delete().to(LinkApi::delete))
        .route("/cleanup", web::post().to(LinkApi::cleanup))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check))
}
