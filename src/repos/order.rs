use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;

use crate::entities::customer::Entity as Customer;
use crate::entities::order::{self, Entity as Order};
use crate::entities::order_detail::{self, Entity as OrderDetail};
use crate::error::StoreError;

/// An order plus its derived total. The total is never stored; it is always
/// the sum of the details' quantity times unit price.
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: order::Model,
    pub total: f32,
}

#[derive(Debug, Serialize)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: order::Model,
    pub details: Vec<order_detail::Model>,
    pub total: f32,
}

#[derive(Debug, Default)]
pub struct OrderChanges {
    pub order_date: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
    pub row_version: Option<i32>,
}

pub fn total_of(details: &[order_detail::Model]) -> f32 {
    details
        .iter()
        .map(|detail| detail.quantity as f32 * detail.unit_price)
        .sum()
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> Result<Vec<OrderSummary>, StoreError> {
    let orders = Order::find().order_by_asc(order::Column::Id).all(conn).await?;
    summarize(conn, orders).await
}

pub async fn list_for_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: i32,
) -> Result<Vec<OrderSummary>, StoreError> {
    let orders = Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .order_by_asc(order::Column::Id)
        .all(conn)
        .await?;
    summarize(conn, orders).await
}

async fn summarize<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<order::Model>,
) -> Result<Vec<OrderSummary>, StoreError> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
    let mut totals: HashMap<i32, f32> = HashMap::new();
    for detail in OrderDetail::find()
        .filter(order_detail::Column::OrderId.is_in(ids))
        .all(conn)
        .await?
    {
        *totals.entry(detail.order_id).or_insert(0.0) +=
            detail.quantity as f32 * detail.unit_price;
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let total = totals.get(&order.id).copied().unwrap_or(0.0);
            OrderSummary { order, total }
        })
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<order::Model, StoreError> {
    Order::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order {id}")))
}

pub async fn with_details<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<OrderWithDetails, StoreError> {
    let order = find_by_id(conn, id).await?;
    let details = OrderDetail::find()
        .filter(order_detail::Column::OrderId.eq(id))
        .order_by_asc(order_detail::Column::Id)
        .all(conn)
        .await?;
    let total = total_of(&details);

    Ok(OrderWithDetails {
        order,
        details,
        total,
    })
}

pub async fn total<C: ConnectionTrait>(conn: &C, id: i32) -> Result<f32, StoreError> {
    Ok(with_details(conn, id).await?.total)
}

pub async fn add(
    db: &DatabaseConnection,
    customer_id: i32,
    order_date: NaiveDate,
    ship_date: NaiveDate,
) -> Result<order::Model, StoreError> {
    let txn = db.begin().await?;

    Customer::find_by_id(customer_id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Customer {customer_id}")))?;

    let new_order = order::ActiveModel {
        order_date: Set(order_date),
        ship_date: Set(ship_date),
        customer_id: Set(customer_id),
        ..Default::default()
    };

    let inserted = new_order.insert(&txn).await?;
    txn.commit().await?;
    Ok(inserted)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: OrderChanges,
) -> Result<order::Model, StoreError> {
    let txn = db.begin().await?;

    let found = Order::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order {id}")))?;
    if let Some(row_version) = changes.row_version {
        if found.row_version != row_version {
            return Err(StoreError::StaleRowVersion);
        }
    }

    let next_version = found.row_version + 1;
    let mut active: order::ActiveModel = found.into();
    if let Some(order_date) = changes.order_date {
        active.order_date = Set(order_date);
    }
    if let Some(ship_date) = changes.ship_date {
        active.ship_date = Set(ship_date);
    }
    active.row_version = Set(next_version);

    let updated = active.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let found = Order::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order {id}")))?;
    let active: order::ActiveModel = found.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
