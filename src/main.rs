use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use rust_storefront::api::create_api_router;
use rust_storefront::config::Settings;
use rust_storefront::entities::setup_schema;
use rust_storefront::init;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env().expect("DATABASE_URL must be set");

    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to the database");
    setup_schema(&db).await.expect("Failed to create the schema");

    if settings.seed_on_startup {
        init::initialize_data(&db)
            .await
            .expect("Failed to initialize store data");
    }

    let shared_db = Arc::new(db);
    let app = create_api_router(shared_db);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind");
    println!("Running at {:?}", listener);
    axum::serve(listener, app).await.expect("Server error");
}
