use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{parse_data_url, unique_titles, Blog, Category, ContentError, Picture};
use crate::auth::is_valid_email;

/// Longest accepted title or name.
pub const MAX_KEY_LEN: usize = 255;

fn required_key(field: &'static str, value: String) -> Result<String, ContentError> {
    let value = required(field, value)?;
    if value.chars().count() > MAX_KEY_LEN {
        return Err(ContentError::TooLong {
            field,
            max: MAX_KEY_LEN,
        });
    }
    Ok(value)
}

fn required(field: &'static str, value: String) -> Result<String, ContentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContentError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Body of `POST /blog` and `PUT /blog`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogRequest {
    pub title: String,
    pub content: String,
    /// Data URL, e.g. `data:image/png;base64,...`.
    pub image: String,
}

impl BlogRequest {
    pub fn into_blog(self, now: DateTime<Utc>) -> Result<Blog, ContentError> {
        let title = required_key("title", self.title)?;
        let content = required("content", self.content)?;
        let image = parse_data_url(&self.image)?;

        Ok(Blog {
            id: 0,
            title,
            content,
            image_format: image.format,
            image: image.data,
            created_at: now,
            updated_at: now,
        })
    }
}

fn default_enabled() -> bool {
    true
}

/// Body of `POST /category` and `PUT /category`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub weight: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub is_subcategory: bool,
}

impl CategoryRequest {
    pub fn into_category(self, now: DateTime<Utc>) -> Result<Category, ContentError> {
        let name = required_key("name", self.name)?;
        if !self.weight.is_finite() {
            return Err(ContentError::InvalidWeight);
        }

        Ok(Category {
            id: 0,
            name,
            weight: self.weight,
            enabled: self.enabled,
            is_subcategory: self.is_subcategory,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Body of `POST /picture` and `PUT /picture`. The category is named, not numbered.
#[derive(Debug, Clone, Deserialize)]
pub struct PictureRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub image: String,
}

impl PictureRequest {
    /// The category name to resolve before calling [`PictureRequest::into_picture`].
    pub fn category_name(&self) -> Result<&str, ContentError> {
        let name = self.category.trim();
        if name.is_empty() {
            return Err(ContentError::EmptyField("category"));
        }
        Ok(name)
    }

    pub fn into_picture(
        self,
        category: &Category,
        now: DateTime<Utc>,
    ) -> Result<Picture, ContentError> {
        let title = required_key("title", self.title)?;
        let image = parse_data_url(&self.image)?;

        Ok(Picture {
            id: 0,
            title,
            description: self.description.trim().to_string(),
            category_id: category.id,
            category: category.name.clone(),
            image_format: image.format,
            image: image.data,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FavouriteEntry {
    Title(String),
    Picture { title: String },
}

/// Body of `PUT /home/pictures`: bare titles or picture objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FavouritesRequest(pub Vec<FavouriteEntry>);

impl FavouritesRequest {
    /// Trimmed, de-duplicated titles in request order.
    pub fn into_titles(self) -> Result<Vec<String>, ContentError> {
        let titles = unique_titles(self.0.into_iter().map(|entry| match entry {
            FavouriteEntry::Title(title) | FavouriteEntry::Picture { title } => title,
        }));
        if titles.is_empty() {
            return Err(ContentError::NoTitles);
        }
        Ok(titles)
    }
}

/// Body of `POST /send_email`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub recaptcha: Option<String>,
}

/// A validated contact form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    pub fn into_message(self) -> Result<ContactMessage, ContentError> {
        let name = required_key("name", self.name)?;
        let email = required("email", self.email)?;
        if !is_valid_email(&email) {
            return Err(ContentError::InvalidEmail);
        }
        let message = required("message", self.message)?;

        Ok(ContactMessage {
            name,
            email,
            message,
        })
    }
}

impl ContactMessage {
    pub fn subject(&self) -> String {
        format!("Message sent from {} with email {}", self.name, self.email)
    }

    pub fn body(&self) -> String {
        format!("{}\n\nRegards, {}", self.message, self.name)
    }
}
