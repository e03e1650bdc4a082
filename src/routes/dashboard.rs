use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::bills::dashboard_overview;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Restrict to one store; absent means platform-wide.
    pub store_id: Option<String>,
}

#[get("/dashboard")]
pub async fn show_dashboard(
    repo: web::Data<DieselRepository>,
    query: web::Query<DashboardQuery>,
) -> impl Responder {
    match dashboard_overview(repo.get_ref(), query.store_id.as_deref()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err, "Failed to load dashboard"),
    }
}
