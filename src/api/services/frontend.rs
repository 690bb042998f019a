use actix_web::HttpResponse;
use rust_embed::Embed;
use tracing::trace;

// 使用 RustEmbed 嵌入 public/ 下的静态文件（debug 构建直接读磁盘）
#[derive(Embed)]
#[folder = "public/"]
struct PublicAssets;

pub struct FrontendService;

impl FrontendService {
    /// Serve `path` from `public/`, or `None` if there is no such file
    pub fn serve(path: &str) -> Option<HttpResponse> {
        let path = path.trim_start_matches('/');
        if path.is_empty() || path.split('/').any(|seg| seg == "..") {
            return None;
        }

        let content = PublicAssets::get(path)?;
        trace!("Serving static file: {}", path);

        Some(
            HttpResponse::Ok()
                .content_type(Self::get_content_type(path))
                .body(content.data.into_owned()),
        )
    }

    pub fn exists(path: &str) -> bool {
        PublicAssets::get(path.trim_start_matches('/')).is_some()
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        match path.rsplit('.').next() {
            Some("html") | Some("htm") => "text/html; charset=utf-8",
            Some("css") => "text/css; charset=utf-8",
            Some("js") => "application/javascript; charset=utf-8",
            Some("json") => "application/json",
            Some("txt") => "text/plain; charset=utf-8",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("woff") => "font/woff",
            Some("woff2") => "font/woff2",
            _ => "application/octet-stream",
        }
    }
}
