//! # 产品服务
//!
//! 基于 axum 和 PostgreSQL 的产品 CRUD 服务，分层架构：
//! - 处理器层：参数绑定、DTO 转换、状态码
//! - 服务层：业务校验与编排
//! - 持久层：数据库访问与错误归类

pub mod app;
pub mod core;
pub mod infrastructure;
