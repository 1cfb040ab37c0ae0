use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use serde::Serialize;

use crate::entities::customer::{self, Entity as Customer, Role};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct CustomerChanges {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub row_version: Option<i32>,
}

#[derive(Debug, Default)]
pub struct CustomerSearch {
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub role: Option<Role>,
}

/// Password-free projection used by the admin listing.
#[derive(Debug, Serialize, FromQueryResult)]
pub struct CustomerSummary {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> Result<Vec<customer::Model>, StoreError> {
    Ok(Customer::find()
        .order_by_asc(customer::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<customer::Model, StoreError> {
    Customer::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Customer {id}")))
}

/// Free-text search across name, email and id, with optional role filter
/// and sorting.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    search: CustomerSearch,
) -> Result<Vec<CustomerSummary>, StoreError> {
    let order = match search.order.as_deref() {
        Some("desc") => sea_orm::Order::Desc,
        _ => sea_orm::Order::Asc,
    };

    let sort_column = match search.sort_by.as_deref() {
        Some("full_name") => customer::Column::FullName,
        Some("email") => customer::Column::Email,
        _ => customer::Column::Id,
    };

    let mut finder = Customer::find();

    if let Some(role) = search.role {
        finder = finder.filter(customer::Column::Role.eq(role));
    }

    if let Some(text) = search.query {
        let mut condition = Condition::any()
            .add(customer::Column::FullName.contains(text.clone()))
            .add(customer::Column::Email.contains(text.clone()));
        if let Ok(id) = text.parse::<i32>() {
            condition = condition.add(customer::Column::Id.eq(id));
        }
        finder = finder.filter(condition);
    }

    Ok(finder
        .order_by(sort_column, order)
        .select_only()
        .column_as(customer::Column::Id, "id")
        .column_as(customer::Column::FullName, "full_name")
        .column_as(customer::Column::Email, "email")
        .column_as(customer::Column::Role, "role")
        .into_model::<CustomerSummary>()
        .all(conn)
        .await?)
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<customer::Model>, StoreError> {
    Ok(Customer::find()
        .filter(customer::Column::Email.eq(email))
        .one(conn)
        .await?)
}

/// Inserts a customer, hashing the plain-text password on the way in.
pub async fn add(
    db: &DatabaseConnection,
    full_name: String,
    email: String,
    password: String,
    role: Role,
) -> Result<customer::Model, StoreError> {
    let hash = customer::hash_password(&password)
        .map_err(|err| StoreError::Internal(format!("failed to hash password: {err}")))?;

    let new_customer = customer::ActiveModel {
        full_name: Set(full_name),
        email: Set(email),
        password: Set(hash),
        role: Set(role),
        ..Default::default()
    };

    new_customer.insert(db).await.map_err(into_conflict)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: CustomerChanges,
) -> Result<customer::Model, StoreError> {
    let txn = db.begin().await?;

    let found = Customer::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Customer {id}")))?;
    if let Some(row_version) = changes.row_version {
        if found.row_version != row_version {
            return Err(StoreError::StaleRowVersion);
        }
    }

    let next_version = found.row_version + 1;
    let mut active: customer::ActiveModel = found.into();
    if let Some(full_name) = changes.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(password) = changes.password {
        let hash = customer::hash_password(&password)
            .map_err(|err| StoreError::Internal(format!("failed to hash password: {err}")))?;
        active.password = Set(hash);
    }
    active.row_version = Set(next_version);

    let updated = active.update(&txn).await.map_err(into_conflict)?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let found = Customer::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Customer {id}")))?;
    let active: customer::ActiveModel = found.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

fn into_conflict(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::Conflict("A customer with that email already exists".to_string())
        }
        _ => StoreError::Db(err),
    }
}
