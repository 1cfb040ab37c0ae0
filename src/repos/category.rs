use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

use crate::entities::category::{self, Entity as Category};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub row_version: Option<i32>,
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> Result<Vec<category::Model>, StoreError> {
    Ok(Category::find()
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<category::Model, StoreError> {
    Category::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Category {id}")))
}

pub async fn add(
    db: &DatabaseConnection,
    name: String,
    description: String,
) -> Result<category::Model, StoreError> {
    let new_category = category::ActiveModel {
        name: Set(name),
        description: Set(description),
        ..Default::default()
    };

    new_category.insert(db).await.map_err(into_conflict)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: CategoryChanges,
) -> Result<category::Model, StoreError> {
    let txn = db.begin().await?;

    let found = Category::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Category {id}")))?;
    if let Some(row_version) = changes.row_version {
        if found.row_version != row_version {
            return Err(StoreError::StaleRowVersion);
        }
    }

    let next_version = found.row_version + 1;
    let mut active: category::ActiveModel = found.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    active.row_version = Set(next_version);

    let updated = active.update(&txn).await.map_err(into_conflict)?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let found = Category::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Category {id}")))?;
    let active: category::ActiveModel = found.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

fn into_conflict(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::Conflict("A category with that name already exists".to_string())
        }
        _ => StoreError::Db(err),
    }
}
