//! Order Models

use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

/// Order lifecycle status.
///
/// `Completed` and `Canceled` are terminal; every other transition moves
/// strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    New,
    Processing,
    Completed,
    Canceled,
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether an order in this status may move to `to`.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        match self {
            Self::New => matches!(to, Self::Processing | Self::Completed | Self::Canceled),
            Self::Processing => matches!(to, Self::Completed | Self::Canceled),
            Self::Completed | Self::Canceled => false,
        }
    }
}

/// Raised when a stored status column holds an unexpected value.
#[derive(Debug, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownStatus(pub String);

impl TryFrom<&str> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "new" => Ok(Self::New),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Cash,
    Online,
}

impl PaymentMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }
}

/// Raised when a stored payment method column holds an unexpected value.
#[derive(Debug, Error)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl TryFrom<&str> for PaymentMethod {
    type Error = UnknownPaymentMethod;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            "online" => Ok(Self::Online),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Order Model
///
/// An immutable snapshot created from a basket at checkout time.
/// `total_price` is fixed at creation and never recomputed; only the
/// status may change afterwards.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub status: OrderStatus,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub comments: String,
    /// Basket total at checkout time, in minor units.
    pub total_price: u64,
    /// Whether a confirmation document blob is stored for this order.
    pub has_document: bool,
    pub created_at: Timestamp,
}

/// A line of an order (or of the basket it is about to be created from),
/// joined with the product's current title and price.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub product_uuid: Uuid,
    pub title: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

/// Card details collected for card payments. Validated, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

/// Contact and payment data collected by the checkout form.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub card: Option<CardDetails>,
    pub comments: String,
}
