use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Higher weights sort first.
    pub weight: f64,
    pub enabled: bool,
    pub is_subcategory: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    /// Name of the referenced category, resolved on read.
    pub category: String,
    /// Data URL prefix, e.g. `data:image/png;base64`.
    pub image_format: String,
    #[serde(with = "crate::serde::base64_bytes")]
    pub image: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_format: String,
    #[serde(with = "crate::serde::base64_bytes")]
    pub image: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A picture selected for the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouritePicture {
    #[serde(flatten)]
    pub picture: Picture,
    pub favourited_at: DateTime<Utc>,
}
