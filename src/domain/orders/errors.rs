//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::{checkout::CheckoutValidationError, models::OrderStatus};

/// Orders service error variants.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Order already exists.
    #[error("order already exists")]
    AlreadyExists,

    /// Order was not found for the requesting user.
    #[error("order not found")]
    NotFound,

    /// Referenced related row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// Checkout was attempted with an empty (or never created) basket.
    #[error("basket is empty")]
    EmptyBasket,

    /// Basket total is below the minimum order threshold.
    #[error("basket total {total} is below the minimum order total {minimum}")]
    BelowMinimum { total: u64, minimum: u64 },

    /// The requested status change is not a legal transition.
    #[error("cannot move order from `{}` to `{}`", from.as_str(), to.as_str())]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The checkout form failed validation.
    #[error(transparent)]
    Validation(#[from] CheckoutValidationError),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
