//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as RFC 3339 text and images as
//! blobs next to their data URL prefix.

/// Enables foreign key enforcement. Must run on every new connection.
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0,
    is_verified INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Login sessions table
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

-- Categories table
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    weight REAL NOT NULL,
    enabled INTEGER NOT NULL DEFAULT 1,
    is_subcategory INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Pictures table
CREATE TABLE IF NOT EXISTS pictures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    category_id INTEGER NOT NULL,
    image_format TEXT NOT NULL,
    image BLOB NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE RESTRICT
);

-- Blogs table
CREATE TABLE IF NOT EXISTS blogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    image_format TEXT NOT NULL,
    image BLOB NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Favourite pictures table
CREATE TABLE IF NOT EXISTS favourite_pictures (
    picture_id INTEGER PRIMARY KEY,
    position INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (picture_id) REFERENCES pictures(id) ON DELETE CASCADE
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_pictures_category_id ON pictures(category_id);
"#;

/// Drops every table, dependents first.
pub const DROP_TABLES: &str = r#"
DROP TABLE IF EXISTS favourite_pictures;
DROP TABLE IF EXISTS blogs;
DROP TABLE IF EXISTS pictures;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS sessions;
DROP TABLE IF EXISTS users;
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (email, username, password_hash, is_admin, is_verified, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, username, password_hash, is_admin, is_verified, created_at, updated_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT id, email, username, password_hash, is_admin, is_verified, created_at, updated_at
FROM users
WHERE username = ?1
"#;

pub const SELECT_ALL_USERS: &str = r#"
SELECT id, email, username, password_hash, is_admin, is_verified, created_at, updated_at
FROM users
ORDER BY id ASC
"#;

pub const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";

pub const UPDATE_USER: &str = r#"
UPDATE users
SET email = ?2, password_hash = ?3, is_admin = ?4, is_verified = ?5, updated_at = ?6
WHERE username = ?1
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE username = ?1";

// Session queries
pub const INSERT_SESSION: &str = r#"
INSERT INTO sessions (id, user_id, created_at, expires_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_SESSION_BY_ID: &str = r#"
SELECT id, user_id, created_at, expires_at
FROM sessions
WHERE id = ?1
"#;

pub const DELETE_SESSION: &str = "DELETE FROM sessions WHERE id = ?1";

pub const DELETE_USER_SESSIONS: &str = "DELETE FROM sessions WHERE user_id = ?1";

// Category queries
pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (name, weight, enabled, is_subcategory, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_CATEGORY_BY_NAME: &str = r#"
SELECT id, name, weight, enabled, is_subcategory, created_at, updated_at
FROM categories
WHERE name = ?1
"#;

pub const SELECT_ALL_CATEGORIES: &str = r#"
SELECT id, name, weight, enabled, is_subcategory, created_at, updated_at
FROM categories
ORDER BY weight DESC, name ASC
"#;

pub const UPDATE_CATEGORY: &str = r#"
UPDATE categories
SET weight = ?2, enabled = ?3, is_subcategory = ?4, updated_at = ?5
WHERE name = ?1
"#;

pub const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE name = ?1";

// Picture queries
pub const INSERT_PICTURE: &str = r#"
INSERT INTO pictures (title, description, category_id, image_format, image, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_PICTURE_BY_TITLE: &str = r#"
SELECT p.id, p.title, p.description, p.category_id, c.name, p.image_format, p.image,
       p.created_at, p.updated_at
FROM pictures p
INNER JOIN categories c ON c.id = p.category_id
WHERE p.title = ?1
"#;

pub const SELECT_ALL_PICTURES: &str = r#"
SELECT p.id, p.title, p.description, p.category_id, c.name, p.image_format, p.image,
       p.created_at, p.updated_at
FROM pictures p
INNER JOIN categories c ON c.id = p.category_id
ORDER BY p.created_at ASC, p.id ASC
"#;

pub const SELECT_PICTURE_ID_BY_TITLE: &str = "SELECT id FROM pictures WHERE title = ?1";

pub const UPDATE_PICTURE: &str = r#"
UPDATE pictures
SET description = ?2, category_id = ?3, image_format = ?4, image = ?5, updated_at = ?6
WHERE title = ?1
"#;

pub const DELETE_PICTURE: &str = "DELETE FROM pictures WHERE title = ?1";

// Blog queries
pub const INSERT_BLOG: &str = r#"
INSERT INTO blogs (title, content, image_format, image, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_BLOG_BY_TITLE: &str = r#"
SELECT id, title, content, image_format, image, created_at, updated_at
FROM blogs
WHERE title = ?1
"#;

pub const SELECT_ALL_BLOGS: &str = r#"
SELECT id, title, content, image_format, image, created_at, updated_at
FROM blogs
ORDER BY created_at ASC, id ASC
"#;

pub const UPDATE_BLOG: &str = r#"
UPDATE blogs
SET content = ?2, image_format = ?3, image = ?4, updated_at = ?5
WHERE title = ?1
"#;

pub const DELETE_BLOG: &str = "DELETE FROM blogs WHERE title = ?1";

// Favourite picture queries
pub const SELECT_ALL_FAVOURITES: &str = r#"
SELECT p.id, p.title, p.description, p.category_id, c.name, p.image_format, p.image,
       p.created_at, p.updated_at, f.created_at
FROM favourite_pictures f
INNER JOIN pictures p ON p.id = f.picture_id
INNER JOIN categories c ON c.id = p.category_id
ORDER BY f.position ASC
"#;

pub const DELETE_ALL_FAVOURITES: &str = "DELETE FROM favourite_pictures";

pub const INSERT_FAVOURITE: &str = r#"
INSERT INTO favourite_pictures (picture_id, position, created_at)
VALUES (?1, ?2, ?3)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        for table in [
            "users",
            "sessions",
            "categories",
            "pictures",
            "blogs",
            "favourite_pictures",
        ] {
            assert!(CREATE_TABLES.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")));
            assert!(DROP_TABLES.contains(&format!("DROP TABLE IF EXISTS {table}")));
        }
    }

    #[test]
    fn test_listing_orders() {
        assert!(SELECT_ALL_CATEGORIES.contains("ORDER BY weight DESC"));
        assert!(SELECT_ALL_PICTURES.contains("ORDER BY p.created_at ASC"));
        assert!(SELECT_ALL_BLOGS.contains("ORDER BY created_at ASC"));
        assert!(SELECT_ALL_FAVOURITES.contains("ORDER BY f.position ASC"));
    }

    #[test]
    fn test_updates_are_keyed_by_natural_key() {
        assert!(UPDATE_USER.contains("WHERE username = ?1"));
        assert!(UPDATE_CATEGORY.contains("WHERE name = ?1"));
        assert!(UPDATE_PICTURE.contains("WHERE title = ?1"));
        assert!(UPDATE_BLOG.contains("WHERE title = ?1"));
    }
}
