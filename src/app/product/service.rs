//! 产品业务服务

use std::sync::Arc;

use validator::Validate;

use super::model::{Product, ProductCreate};
use super::repository::ProductRepository;
use crate::core::error::AppError;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn all_products(&self) -> Vec<Product> {
        self.repository.get_all().await
    }

    pub async fn all_products_by_store(&self, store_name: &str) -> Vec<Product> {
        self.repository.get_all_by_store(store_name).await
    }

    /// 业务校验通过后才落库，真正的 id 由数据库分配
    pub async fn add_product(&self, product_create: ProductCreate) -> Result<(), AppError> {
        product_create.validate()?;
        self.repository
            .add(Product {
                id: 0,
                name: product_create.name,
                price: product_create.price,
                discount: product_create.discount,
                store: product_create.store,
            })
            .await
    }

    pub async fn get_by_id(&self, product_id: i64) -> Result<Product, AppError> {
        self.repository.get_by_id(product_id).await
    }

    pub async fn delete_by_id(&self, product_id: i64) -> Result<(), AppError> {
        self.repository.delete_by_id(product_id).await
    }

    pub async fn update_price(&self, product_id: i64, new_price: f64) -> Result<(), AppError> {
        self.repository.update_price(product_id, new_price).await
    }
}
