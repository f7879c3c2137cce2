//! Reports

pub mod errors;
pub mod mailer;
pub mod models;
mod repository;
pub mod service;

pub use errors::ReportsServiceError;
pub use mailer::{HttpMailer, Mailer, MailerConfig, MailerError};
pub use service::*;
