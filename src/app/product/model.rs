//! 产品数据模型

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 产品实体，id 由数据库生成
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

/// 服务层的创建模型，不携带 id
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    #[validate(range(max = 70.0, message = "Discount cannot be more than 70"))]
    pub discount: f64,
    pub store: String,
}

/// 创建产品请求体
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

impl AddProductRequest {
    pub fn to_model(self) -> ProductCreate {
        ProductCreate {
            name: self.name,
            price: self.price,
            discount: self.discount,
            store: self.store,
        }
    }
}

/// 产品响应体，响应中不暴露 id
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub store: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            name: product.name,
            price: product.price,
            discount: product.discount,
            store: product.store,
        }
    }
}
