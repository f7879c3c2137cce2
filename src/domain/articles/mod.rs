//! Articles

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::ArticlesServiceError;
pub use service::*;
