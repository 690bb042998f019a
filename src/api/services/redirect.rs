use std::borrow::Cow;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, trace};
use url::Url;

use crate::api::helpers::{code_error_response, not_found_response};
use crate::api::services::frontend::FrontendService;
use crate::services::LinkService;
use crate::utils::is_valid_short_code;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> HttpResponse {
        let code = path.into_inner();

        if !is_valid_short_code(&code) {
            // 不是短码，当作静态文件处理
            return FrontendService::serve(&code).unwrap_or_else(|| {
                trace!("Invalid short code rejected: {}", code);
                not_found_response(&code)
            });
        }

        let referrer = Self::referrer(&req);
        match service.record_click(&code, referrer).await {
            Ok(target) => Self::finish_redirect(&target),
            Err(e) => {
                debug!("Redirect failed for {}: {}", code, e);
                code_error_response(&e, &code)
            }
        }
    }

    /// `Referer`, or the `Referrer` spelling some clients send
    fn referrer(req: &HttpRequest) -> Option<&str> {
        req.headers()
            .get(header::REFERER)
            .or_else(|| req.headers().get("referrer"))
            .and_then(|h| h.to_str().ok())
    }

    fn finish_redirect(target: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::FOUND)
            .insert_header((header::LOCATION, Self::location_value(target).as_ref()))
            .finish()
    }

    /// Header values must be visible ASCII; other targets are sent in their
    /// encoded (punycode / percent-encoded) form.
    #[inline]
    fn location_value(target: &str) -> Cow<'_, str> {
        if target.bytes().all(|b| b.is_ascii_graphic()) {
            return Cow::Borrowed(target);
        }
        match Url::parse(target) {
            Ok(url) => Cow::Owned(url.to_string()),
            Err(_) => Cow::Borrowed(target),
        }
    }
}

/// 与 `/api` 前缀同名的短码，需在 `/api` scope 之前注册
pub fn reserved_code_routes() -> actix_web::Resource {
    web::resource("/{code:api}").route(web::get().to(RedirectService::handle_redirect))
}

/// Redirect 路由配置
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("").route("/{code}", web::get().to(RedirectService::handle_redirect))
}
