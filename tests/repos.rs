use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};

use rust_storefront::entities::customer::Role;
use rust_storefront::entities::{order_detail, setup_schema};
use rust_storefront::error::StoreError;
use rust_storefront::repos;
use rust_storefront::repos::category::CategoryChanges;
use rust_storefront::repos::customer::CustomerChanges;
use rust_storefront::repos::order_detail::{NewOrderDetail, OrderDetailChanges};
use rust_storefront::repos::product::{NewProduct, ProductFilter};

async fn connect() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create the schema");
    db
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

async fn new_product(db: &DatabaseConnection, name: &str, price: f32, featured: bool) -> i32 {
    let category = match repos::category::find_by_id(db, 1).await {
        Ok(category) => category,
        Err(_) => repos::category::add(db, "Gear".to_string(), "Everything.".to_string())
            .await
            .expect("Failed to add category"),
    };

    repos::product::add(
        db,
        NewProduct {
            name: name.to_string(),
            description: "A sturdy one.".to_string(),
            unit_price: price,
            is_featured: featured,
            category_id: category.id,
        },
    )
    .await
    .expect("Failed to add product")
    .id
}

async fn new_customer(db: &DatabaseConnection, email: &str) -> i32 {
    repos::customer::add(
        db,
        "Sam Fisher".to_string(),
        email.to_string(),
        "password-1".to_string(),
        Role::Customer,
    )
    .await
    .expect("Failed to add customer")
    .id
}

#[tokio::test]
async fn category_crud_round_trip() {
    let db = connect().await;

    let added = repos::category::add(&db, "Optics".to_string(), "Glass.".to_string())
        .await
        .unwrap();
    assert_eq!(added.row_version, 0);

    let found = repos::category::find_by_id(&db, added.id).await.unwrap();
    assert_eq!(found.name, "Optics");

    let updated = repos::category::update(
        &db,
        added.id,
        CategoryChanges {
            name: Some("Optics & Glass".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Optics & Glass");
    assert_eq!(updated.row_version, 1);

    repos::category::delete(&db, added.id).await.unwrap();
    let missing = repos::category::find_by_id(&db, added.id).await;
    assert!(matches!(missing, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn stale_row_version_is_rejected() {
    let db = connect().await;

    let added = repos::category::add(&db, "Packs".to_string(), "Bags.".to_string())
        .await
        .unwrap();

    let updated = repos::category::update(
        &db,
        added.id,
        CategoryChanges {
            description: Some("Bags and straps.".to_string()),
            row_version: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.row_version, 1);

    // The token from before the first update is now stale.
    let conflict = repos::category::update(
        &db,
        added.id,
        CategoryChanges {
            description: Some("Just bags.".to_string()),
            row_version: Some(0),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(conflict, Err(StoreError::StaleRowVersion)));
}

#[tokio::test]
async fn duplicate_category_name_conflicts() {
    let db = connect().await;

    repos::category::add(&db, "Optics".to_string(), "Glass.".to_string())
        .await
        .unwrap();
    let duplicate = repos::category::add(&db, "Optics".to_string(), "More glass.".to_string()).await;
    assert!(matches!(duplicate, Err(StoreError::Conflict(_))));
}

#[tokio::test]
async fn product_requires_existing_category() {
    let db = connect().await;

    let orphan = repos::product::add(
        &db,
        NewProduct {
            name: "Mystery Widget".to_string(),
            description: "No home.".to_string(),
            unit_price: 5.0,
            is_featured: false,
            category_id: 42,
        },
    )
    .await;
    assert!(matches!(orphan, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn product_filters_apply() {
    let db = connect().await;

    new_product(&db, "Budget Compass", 12.0, false).await;
    new_product(&db, "Expedition Compass", 89.0, true).await;
    new_product(&db, "Signal Mirror", 45.0, false).await;

    let featured = repos::product::list(
        &db,
        ProductFilter {
            featured: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].name, "Expedition Compass");

    let mid_range = repos::product::list(
        &db,
        ProductFilter {
            min_price: Some(20.0),
            max_price: Some(50.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(mid_range.len(), 1);
    assert_eq!(mid_range[0].name, "Signal Mirror");
}

#[tokio::test]
async fn duplicate_email_conflicts_and_hash_verifies() {
    let db = connect().await;

    let id = new_customer(&db, "sam.fisher@example.com").await;
    let model = repos::customer::find_by_id(&db, id).await.unwrap();

    assert!(model.check_hash("password-1").is_ok());
    assert!(model.check_hash("wrong-password").is_err());
    // The stored value is a hash, not the plain text.
    assert_ne!(model.password, "password-1");

    let duplicate = repos::customer::add(
        &db,
        "Sam Impostor".to_string(),
        "sam.fisher@example.com".to_string(),
        "password-2".to_string(),
        Role::Customer,
    )
    .await;
    assert!(matches!(duplicate, Err(StoreError::Conflict(_))));
}

#[tokio::test]
async fn customer_update_rehashes_password() {
    let db = connect().await;

    let id = new_customer(&db, "sam.fisher@example.com").await;
    repos::customer::update(
        &db,
        id,
        CustomerChanges {
            password: Some("password-3".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let model = repos::customer::find_by_id(&db, id).await.unwrap();
    assert!(model.check_hash("password-3").is_ok());
    assert!(model.check_hash("password-1").is_err());
    assert_eq!(model.row_version, 1);
}

#[tokio::test]
async fn order_total_tracks_detail_changes() {
    let db = connect().await;

    let customer_id = new_customer(&db, "sam.fisher@example.com").await;
    let product_id = new_product(&db, "Budget Compass", 10.0, false).await;

    let order = repos::order::add(&db, customer_id, date(2025, 3, 1), date(2025, 3, 4))
        .await
        .unwrap();

    let detail = repos::order_detail::add(
        &db,
        NewOrderDetail {
            order_id: order.id,
            product_id,
            quantity: 2,
            unit_price: None,
        },
    )
    .await
    .unwrap();
    // No explicit price: the product's current price is captured.
    assert_eq!(detail.unit_price, 10.0);
    assert_eq!(repos::order::total(&db, order.id).await.unwrap(), 20.0);

    repos::order_detail::update(
        &db,
        detail.id,
        OrderDetailChanges {
            quantity: Some(3),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(repos::order::total(&db, order.id).await.unwrap(), 30.0);

    repos::order_detail::add(
        &db,
        NewOrderDetail {
            order_id: order.id,
            product_id,
            quantity: 1,
            unit_price: Some(5.0),
        },
    )
    .await
    .unwrap();
    assert_eq!(repos::order::total(&db, order.id).await.unwrap(), 35.0);

    let with_details = repos::order::with_details(&db, order.id).await.unwrap();
    assert_eq!(with_details.details.len(), 2);
    assert_eq!(with_details.total, 35.0);
}

#[tokio::test]
async fn detail_requires_existing_order_and_product() {
    let db = connect().await;

    let customer_id = new_customer(&db, "sam.fisher@example.com").await;
    let product_id = new_product(&db, "Budget Compass", 10.0, false).await;
    let order = repos::order::add(&db, customer_id, date(2025, 3, 1), date(2025, 3, 4))
        .await
        .unwrap();

    let no_order = repos::order_detail::add(
        &db,
        NewOrderDetail {
            order_id: 999,
            product_id,
            quantity: 1,
            unit_price: None,
        },
    )
    .await;
    assert!(matches!(no_order, Err(StoreError::NotFound(_))));

    let no_product = repos::order_detail::add(
        &db,
        NewOrderDetail {
            order_id: order.id,
            product_id: 999,
            quantity: 1,
            unit_price: None,
        },
    )
    .await;
    assert!(matches!(no_product, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn deleting_an_order_cascades_to_details() {
    let db = connect().await;

    let customer_id = new_customer(&db, "sam.fisher@example.com").await;
    let product_id = new_product(&db, "Budget Compass", 10.0, false).await;
    let order = repos::order::add(&db, customer_id, date(2025, 3, 1), date(2025, 3, 4))
        .await
        .unwrap();
    repos::order_detail::add(
        &db,
        NewOrderDetail {
            order_id: order.id,
            product_id,
            quantity: 2,
            unit_price: None,
        },
    )
    .await
    .unwrap();

    repos::order::delete(&db, order.id).await.unwrap();
    assert_eq!(order_detail::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn cart_accumulates_per_product() {
    let db = connect().await;

    let customer_id = new_customer(&db, "sam.fisher@example.com").await;
    let first = new_product(&db, "Budget Compass", 10.0, false).await;
    let second = new_product(&db, "Signal Mirror", 45.0, false).await;

    let entry = repos::cart::add(&db, customer_id, first, 1).await.unwrap();
    let merged = repos::cart::add(&db, customer_id, first, 2).await.unwrap();
    assert_eq!(merged.id, entry.id);
    assert_eq!(merged.quantity, 3);

    let other = repos::cart::add(&db, customer_id, second, 1).await.unwrap();
    // Both records belong to the same cart session.
    assert_eq!(other.cart_session_id, entry.cart_session_id);

    let records = repos::cart::list_for_customer(&db, customer_id)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn cart_quantity_zero_removes_the_record() {
    let db = connect().await;

    let customer_id = new_customer(&db, "sam.fisher@example.com").await;
    let product_id = new_product(&db, "Budget Compass", 10.0, false).await;

    let entry = repos::cart::add(&db, customer_id, product_id, 2).await.unwrap();
    let removed = repos::cart::set_quantity(&db, customer_id, entry.id, 0)
        .await
        .unwrap();
    assert!(removed.is_none());

    let records = repos::cart::list_for_customer(&db, customer_id)
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn checkout_converts_the_cart_into_an_order() {
    let db = connect().await;

    let customer_id = new_customer(&db, "sam.fisher@example.com").await;
    let first = new_product(&db, "Budget Compass", 10.0, false).await;
    let second = new_product(&db, "Signal Mirror", 45.0, false).await;

    repos::cart::add(&db, customer_id, first, 3).await.unwrap();
    repos::cart::add(&db, customer_id, second, 1).await.unwrap();

    let order = repos::cart::checkout(&db, customer_id).await.unwrap();
    assert_eq!(order.details.len(), 2);
    assert_eq!(order.total, 3.0 * 10.0 + 45.0);
    assert_eq!(order.order.customer_id, customer_id);

    // The cart is emptied by the same transaction.
    let records = repos::cart::list_for_customer(&db, customer_id)
        .await
        .unwrap();
    assert!(records.is_empty());

    let empty_again = repos::cart::checkout(&db, customer_id).await;
    assert!(matches!(empty_again, Err(StoreError::Validation(_))));
}
