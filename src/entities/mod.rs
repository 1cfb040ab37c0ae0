pub mod cart_record;
pub mod category;
pub mod customer;
pub mod order;
pub mod order_detail;
pub mod product;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::entities::{
    cart_record::Entity as CartRecord,
    category::Entity as Category,
    customer::Entity as Customer,
    order::Entity as Order,
    order_detail::Entity as OrderDetail,
    product::Entity as Product,
};

/// Creates the store tables from the entity definitions, parents before
/// children so the foreign keys resolve.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = [
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Customer),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderDetail),
        schema.create_table_from_entity(CartRecord),
    ];

    for table in tables.iter_mut() {
        db.execute(backend.build(table.if_not_exists())).await?;
    }

    Ok(())
}
