use chrono::NaiveDate;
use sea_orm::{DbErr, Set};
use uuid::Uuid;

use crate::entities::{cart_record, category, customer, order, order_detail, product};
use crate::entities::customer::Role;

pub fn categories() -> Vec<category::ActiveModel> {
    let category = |name: &str, description: &str| category::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(description.to_owned()),
        ..Default::default()
    };

    vec![
        category(
            "Optics",
            "Binoculars, monoculars and anything else you squint through.",
        ),
        category("Navigation", "Find your way out, and back again."),
        category(
            "Camp Kitchen",
            "Cook dinner anywhere you can pitch a tent.",
        ),
        category("Packs", "Carry all of it without wrecking your back."),
    ]
}

pub fn products(categories: &[category::Model]) -> Result<Vec<product::ActiveModel>, DbErr> {
    let category_id = |name: &str| -> Result<i32, DbErr> {
        categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.id)
            .ok_or_else(|| DbErr::Custom(format!("fixture category `{name}` is missing")))
    };

    let product = |name: &str, description: &str, unit_price: f32, is_featured: bool, category_id: i32| {
        product::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.to_owned()),
            unit_price: Set(unit_price),
            is_featured: Set(is_featured),
            category_id: Set(category_id),
            ..Default::default()
        }
    };

    Ok(vec![
        product(
            "Ridgeline 10x42 Binoculars",
            "Full-size roof prism binoculars with a rubber armor shell.",
            189.99,
            true,
            category_id("Optics")?,
        ),
        product(
            "Pocket Monocular",
            "Fits in a jacket pocket, focuses with one thumb.",
            34.50,
            false,
            category_id("Optics")?,
        ),
        product(
            "Summit GPS Beacon",
            "Two-way satellite messenger with a week of battery.",
            249.00,
            true,
            category_id("Navigation")?,
        ),
        product(
            "Baseplate Compass",
            "Declination-adjustable compass with a luminous bezel.",
            19.95,
            false,
            category_id("Navigation")?,
        ),
        product(
            "Storm-Proof Canister Stove",
            "Boils a liter in under four minutes, even in wind.",
            64.99,
            false,
            category_id("Camp Kitchen")?,
        ),
        product(
            "Titanium Spork",
            "The last utensil you will ever buy.",
            9.99,
            false,
            category_id("Camp Kitchen")?,
        ),
        product(
            "Switchback 38L Pack",
            "Framed weekend pack with a floating lid and rain cover.",
            129.00,
            true,
            category_id("Packs")?,
        ),
        product(
            "Bear-Resistant Food Vault",
            "Approved canister, doubles as a camp stool.",
            79.95,
            false,
            category_id("Packs")?,
        ),
    ])
}

pub fn customers() -> Result<Vec<customer::ActiveModel>, DbErr> {
    let customer = |full_name: &str, email: &str, password: &str, role: Role| -> Result<customer::ActiveModel, DbErr> {
        let hash = customer::hash_password(password)
            .map_err(|err| DbErr::Custom(format!("failed to hash fixture password: {err}")))?;
        Ok(customer::ActiveModel {
            full_name: Set(full_name.to_owned()),
            email: Set(email.to_owned()),
            password: Set(hash),
            role: Set(role),
            ..Default::default()
        })
    };

    Ok(vec![
        customer(
            "Dana Whitfield",
            "dana.whitfield@example.com",
            "trailhead7",
            Role::Customer,
        )?,
        customer(
            "Priya Raman",
            "priya.raman@example.com",
            "summit2024",
            Role::Customer,
        )?,
        customer("Store Admin", "admin@example.com", "counter-top9", Role::Admin)?,
    ])
}

pub fn orders(shopper: &customer::Model) -> Vec<order::ActiveModel> {
    let order = |order_date: NaiveDate, ship_date: NaiveDate| order::ActiveModel {
        order_date: Set(order_date),
        ship_date: Set(ship_date),
        customer_id: Set(shopper.id),
        ..Default::default()
    };

    vec![
        order(date(2024, 10, 2), date(2024, 10, 5)),
        order(date(2024, 11, 18), date(2024, 11, 21)),
    ]
}

pub fn order_details(
    orders: &[order::Model],
    products: &[product::Model],
) -> Result<Vec<order_detail::ActiveModel>, DbErr> {
    let order_id = |index: usize| -> Result<i32, DbErr> {
        orders
            .get(index)
            .map(|order| order.id)
            .ok_or_else(|| DbErr::Custom(format!("fixture order #{index} is missing")))
    };

    let line = |order_id: i32, name: &str, quantity: i32| -> Result<order_detail::ActiveModel, DbErr> {
        let product = find_product(products, name)?;
        Ok(order_detail::ActiveModel {
            quantity: Set(quantity),
            unit_price: Set(product.unit_price),
            order_id: Set(order_id),
            product_id: Set(product.id),
            ..Default::default()
        })
    };

    let first = order_id(0)?;
    let second = order_id(1)?;

    Ok(vec![
        line(first, "Ridgeline 10x42 Binoculars", 1)?,
        line(first, "Titanium Spork", 2)?,
        line(first, "Baseplate Compass", 1)?,
        line(second, "Switchback 38L Pack", 1)?,
        line(second, "Storm-Proof Canister Stove", 1)?,
    ])
}

pub fn cart(
    shopper: &customer::Model,
    products: &[product::Model],
) -> Result<Vec<cart_record::ActiveModel>, DbErr> {
    let cart_session_id = Uuid::new_v4();

    let record = |name: &str, quantity: u32| -> Result<cart_record::ActiveModel, DbErr> {
        let product = find_product(products, name)?;
        Ok(cart_record::ActiveModel {
            customer_id: Set(shopper.id),
            product_id: Set(product.id),
            quantity: Set(quantity),
            cart_session_id: Set(cart_session_id),
            ..Default::default()
        })
    };

    Ok(vec![
        record("Pocket Monocular", 1)?,
        record("Bear-Resistant Food Vault", 1)?,
    ])
}

fn find_product<'a>(
    products: &'a [product::Model],
    name: &str,
) -> Result<&'a product::Model, DbErr> {
    products
        .iter()
        .find(|product| product.name == name)
        .ok_or_else(|| DbErr::Custom(format!("fixture product `{name}` is missing")))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Fixture dates only; the literals above are all valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
