//! Baskets

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::BasketsServiceError;
pub use service::*;
