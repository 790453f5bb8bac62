//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! Column order must match the SELECT constants in `schema`.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::auth::{Session, SessionId};
use folio_core::content::{Blog, Category, FavouritePicture, Picture, User};
use rusqlite::Row;

/// Expected columns: id, email, username, password_hash, is_admin, is_verified,
/// created_at, updated_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        password_hash: row.get(3)?,
        is_admin: row.get(4)?,
        is_verified: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(7)?)?,
    })
}

/// Expected columns: id, user_id, created_at, expires_at
pub fn row_to_session(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: SessionId::new(row.get(0)?),
        user_id: row.get(1)?,
        created_at: parse_datetime(&row.get::<_, String>(2)?)?,
        expires_at: parse_datetime(&row.get::<_, String>(3)?)?,
    })
}

/// Expected columns: id, name, weight, enabled, is_subcategory, created_at, updated_at
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        weight: row.get(2)?,
        enabled: row.get(3)?,
        is_subcategory: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(6)?)?,
    })
}

/// Expected columns: id, title, description, category_id, category name,
/// image_format, image, created_at, updated_at
pub fn row_to_picture(row: &Row) -> rusqlite::Result<Picture> {
    Ok(Picture {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
        category: row.get(4)?,
        image_format: row.get(5)?,
        image: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(8)?)?,
    })
}

/// Picture columns followed by the time the picture was favourited.
pub fn row_to_favourite(row: &Row) -> rusqlite::Result<FavouritePicture> {
    Ok(FavouritePicture {
        picture: row_to_picture(row)?,
        favourited_at: parse_datetime(&row.get::<_, String>(9)?)?,
    })
}

/// Expected columns: id, title, content, image_format, image, created_at, updated_at
pub fn row_to_blog(row: &Row) -> rusqlite::Result<Blog> {
    Ok(Blog {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        image_format: row.get(3)?,
        image: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?)?,
        updated_at: parse_datetime(&row.get::<_, String>(6)?)?,
    })
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime for SQLite storage.
///
/// Fixed-width so that text ordering matches time ordering.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
