//! 产品持久层

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::{error, info};

use super::model::Product;
use crate::core::error::AppError;

/// 持久层抽象，生产实现和内存实现都满足它
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Vec<Product>;
    async fn get_all_by_store(&self, store_name: &str) -> Vec<Product>;
    async fn add(&self, product: Product) -> Result<(), AppError>;
    async fn get_by_id(&self, product_id: i64) -> Result<Product, AppError>;
    async fn delete_by_id(&self, product_id: i64) -> Result<(), AppError>;
    async fn update_price(&self, product_id: i64, new_price: f64) -> Result<(), AppError>;
}

/// PostgreSQL 实现，连接池在构造时注入
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_all(&self) -> Vec<Product> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, discount, store FROM products",
        )
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(products) => products,
            Err(err) => {
                // 读取失败时降级为空列表，不向上传播
                error!("Unable to get products: {}", err);
                Vec::new()
            }
        }
    }

    async fn get_all_by_store(&self, store_name: &str) -> Vec<Product> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, discount, store FROM products WHERE store = $1",
        )
        .bind(store_name)
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(products) => products,
            Err(err) => {
                error!("Unable to get products: {}", err);
                Vec::new()
            }
        }
    }

    async fn add(&self, product: Product) -> Result<(), AppError> {
        sqlx::query("INSERT INTO products (name, price, discount, store) VALUES ($1, $2, $3, $4)")
            .bind(&product.name)
            .bind(product.price)
            .bind(product.discount)
            .bind(&product.store)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                error!("Unable to add product: {}", err);
                AppError::Persistence(format!("Unable to add product: {}", err))
            })?;

        info!("Product added successfully: {}", product.name);
        Ok(())
    }

    async fn get_by_id(&self, product_id: i64) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, discount, store FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => {
                error!("Unable to get product: {}", err);
                AppError::NotFound(product_id)
            }
            _ => AppError::Persistence(format!("Error while getting id {}", product_id)),
        })
    }

    async fn delete_by_id(&self, product_id: i64) -> Result<(), AppError> {
        // 先确认存在，再删除；两条语句之间不加事务
        self.get_by_id(product_id)
            .await
            .map_err(|_| AppError::NotFound(product_id))?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                error!("Unable to delete product: {}", err);
                AppError::Persistence(format!("Error while deleting id {}", product_id))
            })?;

        info!("Product deleted successfully: {}", product_id);
        Ok(())
    }

    async fn update_price(&self, product_id: i64, new_price: f64) -> Result<(), AppError> {
        self.get_by_id(product_id)
            .await
            .map_err(|_| AppError::NotFound(product_id))?;

        sqlx::query("UPDATE products SET price = $1 WHERE id = $2")
            .bind(new_price)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                error!("Unable to update product: {}", err);
                AppError::Persistence(format!("Error while updating id {}", product_id))
            })?;

        info!(
            "Product updated successfully: {}, with new price {}",
            product_id, new_price
        );
        Ok(())
    }
}

/// 内存实现，测试时替换 PostgreSQL，语义保持一致
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new(initial_products: Vec<Product>) -> Self {
        let next_id = initial_products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            products: Mutex::new(initial_products),
            next_id: AtomicI64::new(next_id),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    async fn get_all_by_store(&self, store_name: &str) -> Vec<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.store == store_name)
            .cloned()
            .collect()
    }

    async fn add(&self, mut product: Product) -> Result<(), AppError> {
        product.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.products.lock().unwrap().push(product);
        Ok(())
    }

    async fn get_by_id(&self, product_id: i64) -> Result<Product, AppError> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or(AppError::NotFound(product_id))
    }

    async fn delete_by_id(&self, product_id: i64) -> Result<(), AppError> {
        self.get_by_id(product_id).await?;
        self.products.lock().unwrap().retain(|p| p.id != product_id);
        Ok(())
    }

    async fn update_price(&self, product_id: i64, new_price: f64) -> Result<(), AppError> {
        self.get_by_id(product_id).await?;
        let mut products = self.products.lock().unwrap();
        if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
            product.price = new_price;
        }
        Ok(())
    }
}
