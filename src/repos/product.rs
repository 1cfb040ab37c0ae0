use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::category::Entity as Category;
use crate::entities::product::{self, Entity as Product};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct ProductFilter {
    pub featured: Option<bool>,
    pub min_price: Option<f32>,
    pub max_price: Option<f32>,
}

#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub unit_price: f32,
    pub is_featured: bool,
    pub category_id: i32,
}

#[derive(Debug, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<f32>,
    pub is_featured: Option<bool>,
    pub category_id: Option<i32>,
    pub row_version: Option<i32>,
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: ProductFilter,
) -> Result<Vec<product::Model>, StoreError> {
    let mut query = Product::find();

    if filter.featured == Some(true) {
        query = query.filter(product::Column::IsFeatured.eq(true));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(product::Column::UnitPrice.gte(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(product::Column::UnitPrice.lte(max));
    }

    Ok(query.order_by_asc(product::Column::Id).all(conn).await?)
}

pub async fn list_by_category<C: ConnectionTrait>(
    conn: &C,
    category_id: i32,
) -> Result<Vec<product::Model>, StoreError> {
    Category::find_by_id(category_id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Category {category_id}")))?;

    Ok(Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::Id)
        .all(conn)
        .await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<product::Model, StoreError> {
    Product::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Product {id}")))
}

pub async fn add(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model, StoreError> {
    let txn = db.begin().await?;

    Category::find_by_id(new.category_id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Category {}", new.category_id)))?;

    let new_product = product::ActiveModel {
        name: Set(new.name),
        description: Set(new.description),
        unit_price: Set(new.unit_price),
        is_featured: Set(new.is_featured),
        category_id: Set(new.category_id),
        ..Default::default()
    };

    let inserted = new_product.insert(&txn).await?;
    txn.commit().await?;
    Ok(inserted)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    changes: ProductChanges,
) -> Result<product::Model, StoreError> {
    let txn = db.begin().await?;

    let found = Product::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Product {id}")))?;
    if let Some(row_version) = changes.row_version {
        if found.row_version != row_version {
            return Err(StoreError::StaleRowVersion);
        }
    }

    if let Some(category_id) = changes.category_id {
        Category::find_by_id(category_id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Category {category_id}")))?;
    }

    let next_version = found.row_version + 1;
    let mut active: product::ActiveModel = found.into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(unit_price) = changes.unit_price {
        active.unit_price = Set(unit_price);
    }
    if let Some(is_featured) = changes.is_featured {
        active.is_featured = Set(is_featured);
    }
    if let Some(category_id) = changes.category_id {
        active.category_id = Set(category_id);
    }
    active.row_version = Set(next_version);

    let updated = active.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let found = Product::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Product {id}")))?;
    let active: product::ActiveModel = found.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
