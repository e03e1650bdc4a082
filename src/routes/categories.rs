use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::category::CategoryListQuery;
use crate::forms::categories::{CreateCategoryForm, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{DEFAULT_PER_PAGE, Paged, error_response};
use crate::services::categories::{
    create_category, list_categories, modify_category, remove_category,
};

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(default)]
    pub include_inactive: bool,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[post("/stores/{store_id}/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    form: web::Json<CreateCategoryForm>,
) -> impl Responder {
    let store_id = path.into_inner();
    match create_category(repo.get_ref(), &store_id, form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err, "Failed to create category"),
    }
}

#[get("/stores/{store_id}/categories")]
pub async fn show_categories(
    repo: web::Data<DieselRepository>,
    path: web::Path<String>,
    query: web::Query<CategoriesQuery>,
) -> impl Responder {
    let store_id = path.into_inner();
    let query = query.into_inner();

    let mut list_query = CategoryListQuery::new(store_id).paginate(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    if query.include_inactive {
        list_query = list_query.include_inactive();
    }

    match list_categories(repo.get_ref(), list_query) {
        Ok((total, items)) => HttpResponse::Ok().json(Paged { total, items }),
        Err(err) => error_response(err, "Failed to list categories"),
    }
}

#[patch("/stores/{store_id}/categories/{category_id}")]
pub async fn edit_category(
    repo: web::Data<DieselRepository>,
    path: web::Path<(String, String)>,
    form: web::Json<UpdateCategoryForm>,
) -> impl Responder {
    let (store_id, category_id) = path.into_inner();
    match modify_category(repo.get_ref(), &store_id, &category_id, form.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err, "Failed to update category"),
    }
}

#[delete("/stores/{store_id}/categories/{category_id}")]
pub async fn delete_category(
    repo: web::Data<DieselRepository>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (store_id, category_id) = path.into_inner();
    match remove_category(repo.get_ref(), &store_id, &category_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "Failed to delete category"),
    }
}
