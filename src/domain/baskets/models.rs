//! Basket Models

use jiff::Timestamp;
use uuid::Uuid;

/// Basket Model
///
/// One open basket per user, created lazily on first touch.
#[derive(Debug, Clone)]
pub struct Basket {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub items: Vec<BasketItem>,
    /// Sum of `line_total` over the current items, in minor units.
    pub total: u64,
    pub created_at: Timestamp,
}

/// BasketItem Model
///
/// Line items are keyed by `(basket, product)`; adding the same product
/// again merges into the existing line.
#[derive(Debug, Clone)]
pub struct BasketItem {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}
