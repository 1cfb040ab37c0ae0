use std::collections::HashMap;

use chrono::{Days, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::cart_record::{self, Entity as CartRecord};
use crate::entities::order;
use crate::entities::order_detail::{self, Entity as OrderDetail};
use crate::entities::product::{self, Entity as Product};
use crate::error::StoreError;
use crate::repos::order::{total_of, OrderWithDetails};

pub async fn list_for_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
) -> Result<Vec<cart_record::Model>, StoreError> {
    Ok(CartRecord::find()
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .order_by_asc(cart_record::Column::Id)
        .all(conn)
        .await?)
}

/// Adds a product to the customer's cart. A second add of the same product
/// accumulates onto the existing record instead of creating a new one; the
/// cart session identifier is shared by every record of the cart.
pub async fn add(
    db: &DatabaseConnection,
    customer_id: i32,
    product_id: i32,
    quantity: u32,
) -> Result<cart_record::Model, StoreError> {
    if quantity == 0 {
        return Err(StoreError::Validation(
            "Quantity should be greater than 0".to_string(),
        ));
    }

    let txn = db.begin().await?;

    Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Product {product_id}")))?;

    let existing = CartRecord::find()
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .filter(cart_record::Column::ProductId.eq(product_id))
        .one(&txn)
        .await?;

    let record = match existing {
        Some(entry) => {
            let next_quantity = entry.quantity + quantity;
            let next_version = entry.row_version + 1;
            let mut entry: cart_record::ActiveModel = entry.into();
            entry.quantity = Set(next_quantity);
            entry.row_version = Set(next_version);
            entry.update(&txn).await?
        }
        None => {
            let session = CartRecord::find()
                .filter(cart_record::Column::CustomerId.eq(customer_id))
                .one(&txn)
                .await?
                .map(|entry| entry.cart_session_id)
                .unwrap_or_else(Uuid::new_v4);

            let new_entry = cart_record::ActiveModel {
                customer_id: Set(customer_id),
                product_id: Set(product_id),
                quantity: Set(quantity),
                cart_session_id: Set(session),
                ..Default::default()
            };
            new_entry.insert(&txn).await?
        }
    };

    txn.commit().await?;
    Ok(record)
}

/// Sets the quantity of one cart record; a quantity of 0 removes it. Returns
/// `None` when the record was removed.
pub async fn set_quantity(
    db: &DatabaseConnection,
    customer_id: i32,
    record_id: i32,
    quantity: u32,
) -> Result<Option<cart_record::Model>, StoreError> {
    let txn = db.begin().await?;

    let entry = CartRecord::find_by_id(record_id)
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Cart record {record_id}")))?;

    let result = if quantity == 0 {
        let entry: cart_record::ActiveModel = entry.into();
        entry.delete(&txn).await?;
        None
    } else {
        let next_version = entry.row_version + 1;
        let mut entry: cart_record::ActiveModel = entry.into();
        entry.quantity = Set(quantity);
        entry.row_version = Set(next_version);
        Some(entry.update(&txn).await?)
    };

    txn.commit().await?;
    Ok(result)
}

pub async fn remove(
    db: &DatabaseConnection,
    customer_id: i32,
    record_id: i32,
) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let entry = CartRecord::find_by_id(record_id)
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Cart record {record_id}")))?;
    let entry: cart_record::ActiveModel = entry.into();
    entry.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

pub async fn empty(db: &DatabaseConnection, customer_id: i32) -> Result<u64, StoreError> {
    let result = CartRecord::delete_many()
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Turns the customer's cart into an order with one detail line per record,
/// capturing each product's price at checkout time, then empties the cart.
/// The whole conversion happens in a single transaction.
pub async fn checkout(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<OrderWithDetails, StoreError> {
    let txn = db.begin().await?;

    let records = CartRecord::find()
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .order_by_asc(cart_record::Column::Id)
        .all(&txn)
        .await?;
    if records.is_empty() {
        return Err(StoreError::Validation("The cart is empty".to_string()));
    }

    let product_ids: Vec<i32> = records.iter().map(|record| record.product_id).collect();
    let prices: HashMap<i32, f32> = Product::find()
        .filter(product::Column::Id.is_in(product_ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|product| (product.id, product.unit_price))
        .collect();

    let order_date = Utc::now().date_naive();
    let ship_date = order_date
        .checked_add_days(Days::new(7))
        .unwrap_or(order_date);
    let new_order = order::ActiveModel {
        order_date: Set(order_date),
        ship_date: Set(ship_date),
        customer_id: Set(customer_id),
        ..Default::default()
    };
    let order = new_order.insert(&txn).await?;

    let mut lines = Vec::with_capacity(records.len());
    for record in &records {
        let unit_price = prices.get(&record.product_id).copied().ok_or_else(|| {
            StoreError::Internal(format!(
                "cart record {} points at a missing product",
                record.id
            ))
        })?;
        lines.push(order_detail::ActiveModel {
            quantity: Set(record.quantity as i32),
            unit_price: Set(unit_price),
            order_id: Set(order.id),
            product_id: Set(record.product_id),
            ..Default::default()
        });
    }
    OrderDetail::insert_many(lines).exec(&txn).await?;

    CartRecord::delete_many()
        .filter(cart_record::Column::CustomerId.eq(customer_id))
        .exec(&txn)
        .await?;

    let details = OrderDetail::find()
        .filter(order_detail::Column::OrderId.eq(order.id))
        .order_by_asc(order_detail::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    let total = total_of(&details);
    Ok(OrderWithDetails {
        order,
        details,
        total,
    })
}
