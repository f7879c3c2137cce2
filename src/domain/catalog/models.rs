//! Catalog Models

use jiff::{Timestamp, civil::Date};
use uuid::Uuid;

/// Category Model
#[derive(Debug, Clone)]
pub struct Category {
    pub uuid: Uuid,
    pub name: String,
}

/// New Category Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: Uuid,
    pub name: String,
}

/// Category listing entry with product aggregates.
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub product_count: u64,
    /// Mean product price in minor units; `None` for empty categories.
    pub avg_price: Option<u64>,
}

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub manufacturer: String,
    pub category_uuid: Option<Uuid>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub manufacturer: String,
    pub category_uuid: Option<Uuid>,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub description: String,
    pub price: u64,
    pub manufacturer: String,
    pub category_uuid: Option<Uuid>,
    pub is_active: bool,
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    /// Newest first; the storefront's default.
    #[default]
    Newest,
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
}

impl ProductOrder {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

/// Product listing filter. The default matches every active product,
/// newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    /// Case-insensitive substring match.
    pub manufacturer: Option<String>,
    pub category_uuid: Option<Uuid>,
    pub active_only: bool,
    pub order: ProductOrder,
    pub limit: Option<u32>,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            price_min: None,
            price_max: None,
            manufacturer: None,
            category_uuid: None,
            active_only: true,
            order: ProductOrder::default(),
            limit: None,
        }
    }
}

/// Discount Model
#[derive(Debug, Clone)]
pub struct Discount {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub percent: u8,
    pub start_date: Date,
    pub end_date: Date,
}

/// New Discount Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscount {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub percent: u8,
    pub start_date: Date,
    pub end_date: Date,
}
