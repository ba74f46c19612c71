use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, Level};

use product_service::app::product::handler::{routes, AppState};
use product_service::app::product::repository::PgProductRepository;
use product_service::app::product::service::ProductService;
use product_service::infrastructure::database::{create_tables, DatabaseConfig, DatabaseManager};
use product_service::infrastructure::logger::Logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::init(Level::INFO);

    info!("Starting product service...");

    let config = DatabaseConfig::from_env();
    let database = DatabaseManager::connect(&config).await.map_err(|err| {
        error!("Failed to connect to database: {}", err);
        err
    })?;
    create_tables(database.get_pool()).await?;

    let repository = Arc::new(PgProductRepository::new(database.get_pool().clone()));
    let state = AppState {
        product_service: ProductService::new(repository),
    };

    let app = routes()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:9080").await?;
    let addr = listener.local_addr()?;

    info!("🚀 Product service running on http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/v1/products      - 获取所有产品 (支持 ?store=)");
    info!("   POST   /api/v1/products      - 创建产品");
    info!("   GET    /api/v1/products/:id  - 获取指定产品");
    info!("   PUT    /api/v1/products/:id  - 更新价格 (?newPrice=)");
    info!("   DELETE /api/v1/products/:id  - 删除产品");
    info!("   GET    /health               - 健康检查");

    axum::serve(listener, app).await?;

    Ok(())
}
