use actix_web::{HttpResponse, Responder, get, put, web};

use crate::forms::settings::UpdateSettingsForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::settings::{store_settings, update_settings};

#[get("/stores/{store_id}/settings")]
pub async fn show_settings(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
) -> impl Responder {
    let store_id = path.into_inner();
    match store_settings(repo.get_ref(), &store_id) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(err) => error_response(err, "Failed to load settings"),
    }
}

#[put("/stores/{store_id}/settings")]
pub async fn edit_settings(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    form: web::Json<UpdateSettingsForm>,
) -> impl Responder {
    let store_id = path.into_inner();
    match update_settings(repo.get_ref(), &store_id, form.into_inner()) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(err) => error_response(err, "Failed to update settings"),
    }
}
