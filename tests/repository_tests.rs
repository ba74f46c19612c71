//! PostgreSQL 持久层集成测试
//!
//! 需要本地数据库（配置见 DatabaseConfig，DB_* 环境变量可覆盖），
//! 测试共用一张表，需要串行执行：
//!
//! ```text
//! cargo test --test repository_tests -- --ignored --test-threads=1
//! ```

use sqlx::postgres::PgPool;

use product_service::app::product::model::Product;
use product_service::app::product::repository::{PgProductRepository, ProductRepository};
use product_service::infrastructure::database::{create_tables, DatabaseConfig, DatabaseManager};

async fn test_repository() -> (PgProductRepository, PgPool) {
    let config = DatabaseConfig::from_env();
    let database = DatabaseManager::connect(&config)
        .await
        .expect("Failed to connect to test database");
    let pool = database.get_pool().clone();
    create_tables(&pool).await.expect("Failed to create tables");
    (PgProductRepository::new(pool.clone()), pool)
}

async fn setup(pool: &PgPool) {
    clear(pool).await;
    for (name, price, discount, store) in [
        ("AirFryer", 3000.0, 22.0, "ABC TECH"),
        ("Ütü", 1500.0, 10.0, "ABC TECH"),
        ("Çamaşır Makinesi", 10000.0, 15.0, "ABC TECH"),
        ("Lambader", 2000.0, 0.0, "Dekorasyon Sarayı"),
    ] {
        sqlx::query("INSERT INTO products (name, price, discount, store) VALUES ($1, $2, $3, $4)")
            .bind(name)
            .bind(price)
            .bind(discount)
            .bind(store)
            .execute(pool)
            .await
            .expect("Failed to seed test data");
    }
}

async fn clear(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE products RESTART IDENTITY")
        .execute(pool)
        .await
        .expect("Failed to truncate test data");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn get_all_products() {
    let (repository, pool) = test_repository().await;
    setup(&pool).await;

    let expected_products = vec![
        Product {
            id: 1,
            name: "AirFryer".to_string(),
            price: 3000.0,
            discount: 22.0,
            store: "ABC TECH".to_string(),
        },
        Product {
            id: 2,
            name: "Ütü".to_string(),
            price: 1500.0,
            discount: 10.0,
            store: "ABC TECH".to_string(),
        },
        Product {
            id: 3,
            name: "Çamaşır Makinesi".to_string(),
            price: 10000.0,
            discount: 15.0,
            store: "ABC TECH".to_string(),
        },
        Product {
            id: 4,
            name: "Lambader".to_string(),
            price: 2000.0,
            discount: 0.0,
            store: "Dekorasyon Sarayı".to_string(),
        },
    ];

    let actual_products = repository.get_all().await;
    assert_eq!(4, actual_products.len());
    assert_eq!(expected_products, actual_products);

    clear(&pool).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn get_all_products_by_store() {
    let (repository, pool) = test_repository().await;
    setup(&pool).await;

    let actual_products = repository.get_all_by_store("ABC TECH").await;

    assert_eq!(3, actual_products.len());
    assert!(actual_products.iter().all(|p| p.store == "ABC TECH"));

    clear(&pool).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn add_product() {
    let (repository, pool) = test_repository().await;
    clear(&pool).await;

    let expected_products = vec![Product {
        id: 1,
        name: "Kupa".to_string(),
        price: 100.0,
        discount: 0.0,
        store: "Kırtasiye Merkezi".to_string(),
    }];

    repository
        .add(Product {
            id: 0,
            name: "Kupa".to_string(),
            price: 100.0,
            discount: 0.0,
            store: "Kırtasiye Merkezi".to_string(),
        })
        .await
        .expect("Failed to add product");

    let actual_products = repository.get_all().await;
    assert_eq!(1, actual_products.len());
    assert_eq!(expected_products, actual_products);

    clear(&pool).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn get_by_id() {
    let (repository, pool) = test_repository().await;
    clear(&pool).await;

    repository
        .add(Product {
            id: 0,
            name: "Kupa".to_string(),
            price: 100.0,
            discount: 0.0,
            store: "Kırtasiye Merkezi".to_string(),
        })
        .await
        .expect("Failed to add product");

    let actual_product = repository.get_by_id(1).await.expect("Product 1 must exist");
    assert_eq!(
        Product {
            id: 1,
            name: "Kupa".to_string(),
            price: 100.0,
            discount: 0.0,
            store: "Kırtasiye Merkezi".to_string(),
        },
        actual_product
    );

    let err = repository.get_by_id(599).await.unwrap_err();
    assert_eq!("Product not found with id 599", err.to_string());

    clear(&pool).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn delete_by_id() {
    let (repository, pool) = test_repository().await;
    setup(&pool).await;

    repository
        .delete_by_id(1)
        .await
        .expect("Failed to delete product");

    let actual_products = repository.get_all().await;
    assert_eq!(3, actual_products.len());

    let err = repository.get_by_id(1).await.unwrap_err();
    assert_eq!("Product not found with id 1", err.to_string());

    clear(&pool).await;
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn update_price() {
    let (repository, pool) = test_repository().await;
    setup(&pool).await;

    let product_before_update = repository.get_by_id(1).await.expect("Product 1 must exist");
    assert_eq!(3000.0, product_before_update.price);

    repository
        .update_price(1, 4000.0)
        .await
        .expect("Failed to update price");

    let product_after_update = repository.get_by_id(1).await.expect("Product 1 must exist");
    assert_eq!(4000.0, product_after_update.price);
    assert_eq!(product_before_update.name, product_after_update.name);
    assert_eq!(product_before_update.discount, product_after_update.discount);
    assert_eq!(product_before_update.store, product_after_update.store);

    clear(&pool).await;
}
