//! Article Models

use jiff::Timestamp;
use uuid::Uuid;

/// Article Model
#[derive(Debug, Clone)]
pub struct Article {
    pub uuid: Uuid,
    pub title: String,
    pub teaser: String,
    pub full_text: String,
    pub source_url: String,
    pub is_featured: bool,
    pub published_at: Timestamp,
}

/// New Article Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub uuid: Uuid,
    pub title: String,
    pub teaser: String,
    pub full_text: String,
    pub source_url: String,
    pub is_featured: bool,
}
