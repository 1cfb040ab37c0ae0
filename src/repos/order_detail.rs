use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::order::Entity as Order;
use crate::entities::order_detail::{self, Entity as OrderDetail};
use crate::entities::product::Entity as Product;
use crate::error::StoreError;

#[derive(Debug)]
pub struct NewOrderDetail {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    /// Falls back to the product's current price when not given.
    pub unit_price: Option<f32>,
}

#[derive(Debug, Default)]
pub struct OrderDetailChanges {
    pub quantity: Option<i32>,
    pub unit_price: Option<f32>,
    pub row_version: Option<i32>,
}

pub async fn list_for_order<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
) -> Result<Vec<order_detail::Model>, StoreError> {
    Ok(OrderDetail::find()
        .filter(order_detail::Column::OrderId.eq(order_id))
        .order_by_asc(order_detail::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<order_detail::Model, StoreError> {
    OrderDetail::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order detail {id}")))
}

pub async fn add(
    db: &DatabaseConnection,
    new: NewOrderDetail,
) -> Result<order_detail::Model, StoreError> {
    if new.quantity <= 0 {
        return Err(StoreError::Validation(
            "Quantity should be greater than 0".to_string(),
        ));
    }

    let txn = db.begin().await?;

    Order::find_by_id(new.order_id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order {}", new.order_id)))?;
    let product = Product::find_by_id(new.product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Product {}", new.product_id)))?;

    let new_detail = order_detail::ActiveModel {
        quantity: Set(new.quantity),
        unit_price: Set(new.unit_price.unwrap_or(product.unit_price)),
        order_id: Set(new.order_id),
        product_id: Set(new.product_id),
        ..Default::default()
    };

    let inserted = new_detail.insert(&txn).await?;
    txn.commit().await?;
    Ok(inserted)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: OrderDetailChanges,
) -> Result<order_detail::Model, StoreError> {
    if changes.quantity.is_some_and(|quantity| quantity <= 0) {
        return Err(StoreError::Validation(
            "Quantity should be greater than 0".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let found = OrderDetail::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order detail {id}")))?;
    if let Some(row_version) = changes.row_version {
        if found.row_version != row_version {
            return Err(StoreError::StaleRowVersion);
        }
    }

    let next_version = found.row_version + 1;
    let mut active: order_detail::ActiveModel = found.into();
    if let Some(quantity) = changes.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(unit_price) = changes.unit_price {
        active.unit_price = Set(unit_price);
    }
    active.row_version = Set(next_version);

    let updated = active.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let found = OrderDetail::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Order detail {id}")))?;
    let active: order_detail::ActiveModel = found.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
