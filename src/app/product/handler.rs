//! 产品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::error;

use super::model::{AddProductRequest, ProductResponse};
use super::service::ProductService;
use crate::core::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/products",
            get(get_all_products).post(add_product),
        )
        .route(
            "/api/v1/products/:id",
            get(get_product_by_id)
                .put(update_price)
                .delete(delete_product_by_id),
        )
        .route("/health", get(health_check))
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    store: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceQuery {
    #[serde(rename = "newPrice")]
    new_price: f64,
}

// 路径 id 解析失败时按 0 处理，0 号产品不存在，最终以 NotFound 返回
fn parse_product_id(raw: &str) -> i64 {
    raw.parse::<i64>().unwrap_or(0)
}

pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product_id = parse_product_id(&id);
    let product = state.product_service.get_by_id(product_id).await?;
    Ok(Json(ProductResponse::from(product)))
}

pub async fn get_all_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Json<Vec<ProductResponse>> {
    let products = match query.store.as_deref() {
        Some(store) if !store.is_empty() => {
            state.product_service.all_products_by_store(store).await
        }
        _ => state.product_service.all_products().await,
    };

    Json(products.into_iter().map(ProductResponse::from).collect())
}

pub async fn add_product(
    State(state): State<AppState>,
    payload: Result<Json<AddProductRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|err| AppError::BadRequest(err.body_text()))?;
    state.product_service.add_product(request.to_model()).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<UpdatePriceQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Query(query) = query.map_err(|err| AppError::BadRequest(err.body_text()))?;
    let product_id = parse_product_id(&id);

    // PUT 契约只报告参数错误，更新结果不进响应，失败只记录日志
    if let Err(err) = state
        .product_service
        .update_price(product_id, query.new_price)
        .await
    {
        error!("Unable to update price: {}", err);
    }

    Ok(StatusCode::OK)
}

pub async fn delete_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_product_id(&id);
    state.product_service.delete_by_id(product_id).await?;
    Ok(StatusCode::OK)
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
