//! Reports service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::reports::mailer::MailerError;

/// Reports service error variants.
#[derive(Debug, Error)]
pub enum ReportsServiceError {
    /// Sending a digest mail failed.
    #[error("failed to send digest mail")]
    Mail(#[from] MailerError),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[from] Error),
}
