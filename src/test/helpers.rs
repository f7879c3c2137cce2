//! Test Helpers

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    articles::models::NewArticle,
    catalog::models::NewProduct,
    orders::models::{CheckoutDetails, PaymentMethod},
    users::models::{NewUser, Role},
};

pub(crate) fn new_user(uuid: Uuid, username: &str, role: Role) -> NewUser {
    NewUser {
        uuid,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        phone: "+79991234567".to_string(),
        address: "1 Orchard Lane".to_string(),
        role,
    }
}

pub(crate) fn new_product(uuid: Uuid, title: &str, price: u64) -> NewProduct {
    NewProduct {
        uuid,
        title: title.to_string(),
        description: String::new(),
        price,
        manufacturer: "Orchard".to_string(),
        category_uuid: None,
    }
}

pub(crate) fn new_article(uuid: Uuid, title: &str) -> NewArticle {
    NewArticle {
        uuid,
        title: title.to_string(),
        teaser: format!("{title} teaser"),
        full_text: format!("{title} full text"),
        source_url: String::new(),
        is_featured: false,
    }
}

/// A checkout form that passes validation, paying by cash.
pub(crate) fn checkout_details() -> CheckoutDetails {
    CheckoutDetails {
        full_name: "Test Shopper".to_string(),
        email: "shopper@example.com".to_string(),
        phone: "+79991234567".to_string(),
        shipping_address: "1 Orchard Lane".to_string(),
        payment_method: PaymentMethod::Cash,
        card: None,
        comments: String::new(),
    }
}

/// Shift an order's creation time into the past, for stale-order tests.
pub(crate) async fn backdate_order(
    pool: &PgPool,
    order: Uuid,
    days: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET created_at = now() - make_interval(days => $2) WHERE uuid = $1")
        .bind(order)
        .bind(days)
        .execute(pool)
        .await?;

    Ok(())
}

/// Drop an order's stored confirmation document, for backfill tests.
pub(crate) async fn clear_document(pool: &PgPool, order: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET confirmation_doc = NULL WHERE uuid = $1")
        .bind(order)
        .execute(pool)
        .await?;

    Ok(())
}
