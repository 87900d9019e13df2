// src/sales/sales_router.rs

use actix_web::{get, post, web, HttpResponse};

use super::sales_structs::{SaleForm, SalesQuery};
use crate::shared::errors::EngineError;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

/// Route recording the sale of one unit of an item.
///
/// The ledger validates the form, checks availability and then decrements
/// the stock and stores the sale in a single transaction. Rejections come
/// back as 404 (unknown item) or 409 (no stock left).
#[post("/sales")]
pub async fn record_sale(
    data: web::Data<AppState>,
    form: web::Json<SaleForm>,
) -> Result<HttpResponse, EngineError> {
    let sale = data.ledger.record_sale(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(GenericResponse::success(
        "Sale recorded successfully!",
        sale,
    )))
}

/// Route listing recorded sales, optionally for a single item (`?item_id=`).
#[get("/sales")]
pub async fn list_sales(
    data: web::Data<AppState>,
    query: web::Query<SalesQuery>,
) -> Result<HttpResponse, EngineError> {
    let sales = data.ledger.list_sales(query.item_id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::success(
        format!("{} sale(s) found", sales.len()),
        sales,
    )))
}

/// Route resolving the item a sale refers to.
/// Answers 404 when the item has been deleted since the sale.
#[get("/sales/{id}/item")]
pub async fn sale_item(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, EngineError> {
    let id = path.into_inner();
    let item = data.ledger.resolve_sale_item(id).await?;
    Ok(HttpResponse::Ok().json(GenericResponse::success(
        format!("Item sold by sale {}.", id),
        item,
    )))
}
