use reqwest::{header, Client, StatusCode};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;

use rust_storefront::api::create_api_router;
use rust_storefront::init;

/// Boots the full router on an ephemeral port over a freshly seeded
/// in-memory database and returns the base url.
async fn spawn_app() -> String {
    std::env::set_var("SECRET", "integration-test-secret");

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    init::initialize_data(&db).await.expect("Initialization failed");

    let app = create_api_router(Arc::new(db));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{addr}")
}

async fn login(client: &Client, base: &str, email: &str, password: &str) -> String {
    let payload = serde_json::json!({
        "email": email,
        "password": password
    });

    let response = client
        .post(format!("{base}/api/login"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse response JSON");
    body["token"]
        .as_str()
        .expect("No token in response")
        .to_string()
}

fn bearer(token: &str) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token))
            .expect("Failed to insert header"),
    );
    headers
}

#[tokio::test]
async fn public_catalog_serves_seeded_data() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{base}/api/category"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let categories = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(categories.as_array().unwrap().len(), 4);

    let response = client
        .get(format!("{base}/api/product?featured=true"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let featured = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(featured.as_array().unwrap().len(), 3);

    let response = client
        .get(format!("{base}/api/product/1"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let product = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(product["name"], "Ridgeline 10x42 Binoculars");

    let response = client
        .get(format!("{base}/api/product/999"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{base}/api/category/1/products"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let optics = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(optics.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn registration_and_profile_round_trip() {
    let base = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "full_name": "Noa Lindgren",
        "email": "noa.lindgren@example.com",
        "password": "ridge-line8"
    });
    let response = client
        .post(format!("{base}/api/register"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same email again is a conflict.
    let response = client
        .post(format!("{base}/api/register"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A malformed email never reaches the database.
    let bad = serde_json::json!({
        "full_name": "Noa Lindgren",
        "email": "not-an-email",
        "password": "ridge-line8"
    });
    let response = client
        .post(format!("{base}/api/register"))
        .json(&bad)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let token = login(&client, &base, "noa.lindgren@example.com", "ridge-line8").await;
    let response = client
        .get(format!("{base}/api/profile"))
        .headers(bearer(&token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let profile = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(profile["full_name"], "Noa Lindgren");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let base = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "email": "dana.whitfield@example.com",
        "password": "not-the-password"
    });
    let response = client
        .post(format!("{base}/api/login"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cart_flow_ends_in_an_order() {
    let base = spawn_app().await;
    let client = Client::new();

    let token = login(&client, &base, "dana.whitfield@example.com", "trailhead7").await;
    let headers = bearer(&token);

    let response = client
        .get(format!("{base}/api/cart"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let cart = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(cart.as_array().unwrap().len(), 2);

    let payload = serde_json::json!({
        "product_id": 6,
        "quantity": 2
    });
    let response = client
        .post(format!("{base}/api/cart"))
        .headers(headers.clone())
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{base}/api/cart/checkout"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(order["details"].as_array().unwrap().len(), 3);
    assert!(order["total"].as_f64().unwrap() > 0.0);

    let response = client
        .get(format!("{base}/api/cart"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    let cart = response.json::<serde_json::Value>().await.unwrap();
    assert!(cart.as_array().unwrap().is_empty());

    // Two seeded orders plus the one just checked out.
    let response = client
        .get(format!("{base}/api/orders"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let orders = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 3);

    let response = client
        .post(format!("{base}/api/cart/checkout"))
        .headers(headers)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_are_scoped_to_their_customer() {
    let base = spawn_app().await;
    let client = Client::new();

    // Every seeded order belongs to the first customer.
    let token = login(&client, &base, "priya.raman@example.com", "summit2024").await;
    let response = client
        .get(format!("{base}/api/orders/1"))
        .headers(bearer(&token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let owner = login(&client, &base, "dana.whitfield@example.com", "trailhead7").await;
    let response = client
        .get(format!("{base}/api/orders/1"))
        .headers(bearer(&owner))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let order = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(order["details"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn admin_area_is_role_gated() {
    let base = spawn_app().await;
    let client = Client::new();

    let payload = serde_json::json!({
        "name": "Lighting",
        "description": "Headlamps and lanterns."
    });

    // No token.
    let response = client
        .post(format!("{base}/api/admin/category"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A customer token is not enough.
    let customer_token = login(&client, &base, "dana.whitfield@example.com", "trailhead7").await;
    let response = client
        .post(format!("{base}/api/admin/category"))
        .headers(bearer(&customer_token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin_token = login(&client, &base, "admin@example.com", "counter-top9").await;
    let response = client
        .post(format!("{base}/api/admin/category"))
        .headers(bearer(&admin_token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(created["id"], 5);
}

#[tokio::test]
async fn admin_patch_honors_the_row_version_token() {
    let base = spawn_app().await;
    let client = Client::new();

    let admin_token = login(&client, &base, "admin@example.com", "counter-top9").await;
    let headers = bearer(&admin_token);

    let response = client
        .get(format!("{base}/api/admin/category/1"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let category = response.json::<serde_json::Value>().await.unwrap();
    let row_version = category["row_version"].as_i64().unwrap();

    let payload = serde_json::json!({
        "description": "Glass for every budget.",
        "row_version": row_version
    });
    let response = client
        .patch(format!("{base}/api/admin/category/1"))
        .headers(headers.clone())
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    // Replaying the same token conflicts.
    let response = client
        .patch(format!("{base}/api/admin/category/1"))
        .headers(headers.clone())
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .get(format!("{base}/api/admin/customer"))
        .headers(headers)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let customers = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(customers.as_array().unwrap().len(), 3);
}
