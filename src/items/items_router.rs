// src/items/items_router.rs

use actix_web::{delete, get, post, web, HttpResponse};

use super::items_structs::ItemForm;
use crate::shared::errors::EngineError;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

/// Route listing every item with its derived status.
///
/// Available items come first and sold-out items last, so the caller can
/// render the list as-is.
#[get("/items")]
pub async fn list_items(data: web::Data<AppState>) -> Result<HttpResponse, EngineError> {
    let items = data.catalog.list_items().await?;
    Ok(HttpResponse::Ok().json(GenericResponse::success(
        format!("{} item(s) in inventory", items.len()),
        items,
    )))
}

/// Route fetching a single item by id.
#[get("/items/{id}")]
pub async fn get_item(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, EngineError> {
    let id = path.into_inner();
    let item = data.catalog.get_item(id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::success(
        format!("Item with ID {} found.", id),
        item,
    )))
}

/// Route creating a new item.
///
/// Receives the raw form fields as JSON strings; the catalog validates and
/// converts them. Name, acquisition cost and quantity are mandatory.
#[post("/items")]
pub async fn create_item(
    data: web::Data<AppState>,
    form: web::Json<ItemForm>,
) -> Result<HttpResponse, EngineError> {
    let item = data.catalog.create_item(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(GenericResponse::success(
        format!("Item created successfully! ID: {}", item.id),
        item,
    )))
}

/// Route deleting an item. Its sales history is kept.
#[delete("/items/{id}")]
pub async fn delete_item(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, EngineError> {
    let id = path.into_inner();
    data.catalog.delete_item(id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::bare(
        "success",
        format!("Item with ID {} deleted.", id),
    )))
}
