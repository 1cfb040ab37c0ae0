pub mod sample;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    Statement, TransactionTrait,
};

use crate::entities::{
    cart_record, category, customer, order, order_detail, product, setup_schema,
};

const TABLES: [&str; 6] = [
    "categories",
    "customers",
    "order_details",
    "orders",
    "products",
    "cart_records",
];

/// Development-startup reset: make sure the schema exists, wipe the previous
/// fixture rows, then reseed. Schema and clear failures propagate; seeding
/// itself is best effort.
pub async fn initialize_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    setup_schema(db).await?;
    clear_data(db).await?;
    seed_data(db).await;
    Ok(())
}

/// Deletes categories and customers directly; products, orders, order details
/// and cart records go with them through the FK cascades. Identity counters
/// are reset for all six tables afterwards.
pub async fn clear_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute_delete(db, "categories").await?;
    execute_delete(db, "customers").await?;
    reset_identity(db).await;
    Ok(())
}

async fn execute_delete(db: &DatabaseConnection, table: &str) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, format!("DELETE FROM {table}")))
        .await
        .map(|_| ())
}

/// Forces the auto-increment counter of every store table back to 1, so a
/// reseed reproduces the fixture ids.
pub async fn reset_identity(db: &DatabaseConnection) {
    let backend = db.get_database_backend();
    for table in TABLES {
        let sql = match backend {
            DbBackend::Sqlite => format!("DELETE FROM sqlite_sequence WHERE name = '{table}'"),
            DbBackend::Postgres => format!("ALTER SEQUENCE {table}_id_seq RESTART WITH 1"),
            DbBackend::MySql => format!("ALTER TABLE {table} AUTO_INCREMENT = 1"),
        };
        // On SQLite the sequence row does not exist until the first insert,
        // so a failure here just means there is nothing to reset.
        if let Err(err) = db.execute(Statement::from_string(backend, sql)).await {
            println!("->> Identity reset skipped for `{table}`: {err}");
        }
    }
}

/// Inserts the fixture rows in dependency order, each block guarded by an
/// "only if the table is empty" check and committed on its own. Errors are
/// printed and swallowed so a half-seeded database never blocks startup.
pub async fn seed_data(db: &DatabaseConnection) {
    if let Err(err) = try_seed(db).await {
        println!("->> Seeding failed: {err}");
    }
}

async fn try_seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    if category::Entity::find().count(db).await? == 0 {
        let txn = db.begin().await?;
        category::Entity::insert_many(sample::categories())
            .exec(&txn)
            .await?;
        txn.commit().await?;
    }

    if product::Entity::find().count(db).await? == 0 {
        let categories = category::Entity::find().all(db).await?;
        let txn = db.begin().await?;
        product::Entity::insert_many(sample::products(&categories)?)
            .exec(&txn)
            .await?;
        txn.commit().await?;
    }

    if customer::Entity::find().count(db).await? == 0 {
        let txn = db.begin().await?;
        customer::Entity::insert_many(sample::customers()?)
            .exec(&txn)
            .await?;
        txn.commit().await?;
    }

    let shopper = customer::Entity::find()
        .order_by_asc(customer::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom("no customer to attach the fixture orders to".to_string()))?;

    if order::Entity::find().count(db).await? == 0 {
        let txn = db.begin().await?;
        order::Entity::insert_many(sample::orders(&shopper))
            .exec(&txn)
            .await?;
        txn.commit().await?;
    }

    if order_detail::Entity::find().count(db).await? == 0 {
        let orders = order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(db)
            .await?;
        let products = product::Entity::find().all(db).await?;
        let txn = db.begin().await?;
        order_detail::Entity::insert_many(sample::order_details(&orders, &products)?)
            .exec(&txn)
            .await?;
        txn.commit().await?;
    }

    if cart_record::Entity::find().count(db).await? == 0 {
        let products = product::Entity::find().all(db).await?;
        let txn = db.begin().await?;
        cart_record::Entity::insert_many(sample::cart(&shopper, &products)?)
            .exec(&txn)
            .await?;
        txn.commit().await?;
    }

    Ok(())
}
