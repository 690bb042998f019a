pub mod frontend;
pub mod health;
pub mod index;
pub mod links;
pub mod redirect;

use std::sync::Arc;

use actix_web::web;

use crate::services::LinkService;

pub use frontend::FrontendService;
pub use health::{AppStartTime, HealthService};
pub use index::{IndexService, index_routes};
pub use links::{LinkApi, api_routes};
pub use redirect::{RedirectService, redirect_routes, reserved_code_routes};

/// Register shared data and every route, in match order.
///
/// Used by the server and by tests so both see the same routing table.
pub fn configure(
    service: Arc<LinkService>,
    start_time: AppStartTime,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(service))
            .app_data(web::Data::new(start_time))
            .app_data(crate::api::helpers::json_config())
            .app_data(crate::api::helpers::query_config())
            .service(index_routes())
            .service(reserved_code_routes())
            .service(api_routes())
            .service(redirect_routes());
    }
}
