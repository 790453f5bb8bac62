//! SQLite repository implementation.
//!
//! Implements the gateway traits from `folio_core::storage` and the session
//! store from `folio_core::auth` on a single SQLite connection.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params_from_iter, types::Value, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use folio_core::auth::{Session, SessionGateway, SessionId};
use folio_core::content::{Blog, Category, FavouritePicture, Picture, User};
use folio_core::storage::{FavouriteGateway, Gateway, RepositoryError, Result, UserGateway};

use super::conversions::{
    format_datetime, row_to_blog, row_to_category, row_to_favourite, row_to_picture,
    row_to_session, row_to_user,
};
use super::error::{map_delete_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

type RowMapper<T> = fn(&Row) -> rusqlite::Result<T>;

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        tracing::info!(path, "opened sqlite database");

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::ENABLE_FOREIGN_KEYS).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Drops and recreates every table.
    pub async fn reset(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(schema::DROP_TABLES).map_err(wrap_err)?;
                conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn execute(
        &self,
        sql: &'static str,
        params: Vec<Value>,
        entity_type: &'static str,
        id: String,
    ) -> Result<usize> {
        self.conn
            .call(move |conn| {
                conn.execute(sql, params_from_iter(params))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id))
    }

    async fn query_one<T: Send + 'static>(
        &self,
        sql: &'static str,
        key: Value,
        map: RowMapper<T>,
        entity_type: &'static str,
    ) -> Result<Option<T>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                stmt.query_row([key], map).optional().map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("{entity_type}: {e}")))
    }

    async fn query_all<T: Send + 'static>(
        &self,
        sql: &'static str,
        map: RowMapper<T>,
        entity_type: &'static str,
    ) -> Result<Vec<T>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt.query_map([], map).map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(format!("{entity_type}: {e}")))
    }
}

// ============================================================================
// Gateway<Blog> implementation
// ============================================================================

#[async_trait]
impl Gateway<Blog> for SqliteRepository {
    async fn save(&self, blog: &Blog) -> Result<bool> {
        let params = vec![
            Value::from(blog.title.clone()),
            Value::from(blog.content.clone()),
            Value::from(blog.image_format.clone()),
            Value::from(blog.image.clone()),
            Value::from(format_datetime(&blog.created_at)),
            Value::from(format_datetime(&blog.updated_at)),
        ];
        let rows = self
            .execute(schema::INSERT_BLOG, params, "Blog", blog.title.clone())
            .await?;
        Ok(rows == 1)
    }

    async fn update(&self, blog: &Blog) -> Result<bool> {
        let params = vec![
            Value::from(blog.title.clone()),
            Value::from(blog.content.clone()),
            Value::from(blog.image_format.clone()),
            Value::from(blog.image.clone()),
            Value::from(format_datetime(&blog.updated_at)),
        ];
        let rows = self
            .execute(schema::UPDATE_BLOG, params, "Blog", blog.title.clone())
            .await?;
        Ok(rows > 0)
    }

    async fn get_by_key(&self, title: &str) -> Result<Option<Blog>> {
        self.query_one(
            schema::SELECT_BLOG_BY_TITLE,
            Value::from(title.to_string()),
            row_to_blog,
            "Blog",
        )
        .await
    }

    async fn get_all(&self) -> Result<Arc<Vec<Blog>>> {
        let blogs = self
            .query_all(schema::SELECT_ALL_BLOGS, row_to_blog, "Blog")
            .await?;
        Ok(Arc::new(blogs))
    }

    async fn delete_by_key(&self, title: &str) -> Result<bool> {
        let params = vec![Value::from(title.to_string())];
        let rows = self
            .execute(schema::DELETE_BLOG, params, "Blog", title.to_string())
            .await?;
        Ok(rows > 0)
    }
}

// ============================================================================
// Gateway<Category> implementation
// ============================================================================

#[async_trait]
impl Gateway<Category> for SqliteRepository {
    async fn save(&self, category: &Category) -> Result<bool> {
        let params = vec![
            Value::from(category.name.clone()),
            Value::from(category.weight),
            Value::from(category.enabled),
            Value::from(category.is_subcategory),
            Value::from(format_datetime(&category.created_at)),
            Value::from(format_datetime(&category.updated_at)),
        ];
        let rows = self
            .execute(
                schema::INSERT_CATEGORY,
                params,
                "Category",
                category.name.clone(),
            )
            .await?;
        Ok(rows == 1)
    }

    async fn update(&self, category: &Category) -> Result<bool> {
        let params = vec![
            Value::from(category.name.clone()),
            Value::from(category.weight),
            Value::from(category.enabled),
            Value::from(category.is_subcategory),
            Value::from(format_datetime(&category.updated_at)),
        ];
        let rows = self
            .execute(
                schema::UPDATE_CATEGORY,
                params,
                "Category",
                category.name.clone(),
            )
            .await?;
        Ok(rows > 0)
    }

    async fn get_by_key(&self, name: &str) -> Result<Option<Category>> {
        self.query_one(
            schema::SELECT_CATEGORY_BY_NAME,
            Value::from(name.to_string()),
            row_to_category,
            "Category",
        )
        .await
    }

    async fn get_all(&self) -> Result<Arc<Vec<Category>>> {
        let categories = self
            .query_all(schema::SELECT_ALL_CATEGORIES, row_to_category, "Category")
            .await?;
        Ok(Arc::new(categories))
    }

    /// Fails with `InUse` while a picture references the category.
    async fn delete_by_key(&self, name: &str) -> Result<bool> {
        let key = name.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_CATEGORY, [key])
                    .map_err(wrap_err)
            })
            .await
            .map(|rows| rows > 0)
            .map_err(|e| map_delete_error(e, "Category", name))
    }
}

// ============================================================================
// Gateway<Picture> implementation
// ============================================================================

#[async_trait]
impl Gateway<Picture> for SqliteRepository {
    async fn save(&self, picture: &Picture) -> Result<bool> {
        let params = vec![
            Value::from(picture.title.clone()),
            Value::from(picture.description.clone()),
            Value::from(picture.category_id),
            Value::from(picture.image_format.clone()),
            Value::from(picture.image.clone()),
            Value::from(format_datetime(&picture.created_at)),
            Value::from(format_datetime(&picture.updated_at)),
        ];
        let rows = self
            .execute(
                schema::INSERT_PICTURE,
                params,
                "Picture",
                picture.title.clone(),
            )
            .await?;
        Ok(rows == 1)
    }

    async fn update(&self, picture: &Picture) -> Result<bool> {
        let params = vec![
            Value::from(picture.title.clone()),
            Value::from(picture.description.clone()),
            Value::from(picture.category_id),
            Value::from(picture.image_format.clone()),
            Value::from(picture.image.clone()),
            Value::from(format_datetime(&picture.updated_at)),
        ];
        let rows = self
            .execute(
                schema::UPDATE_PICTURE,
                params,
                "Picture",
                picture.title.clone(),
            )
            .await?;
        Ok(rows > 0)
    }

    async fn get_by_key(&self, title: &str) -> Result<Option<Picture>> {
        self.query_one(
            schema::SELECT_PICTURE_BY_TITLE,
            Value::from(title.to_string()),
            row_to_picture,
            "Picture",
        )
        .await
    }

    async fn get_all(&self) -> Result<Arc<Vec<Picture>>> {
        let pictures = self
            .query_all(schema::SELECT_ALL_PICTURES, row_to_picture, "Picture")
            .await?;
        Ok(Arc::new(pictures))
    }

    /// Also removes the picture from the favourites.
    async fn delete_by_key(&self, title: &str) -> Result<bool> {
        let params = vec![Value::from(title.to_string())];
        let rows = self
            .execute(schema::DELETE_PICTURE, params, "Picture", title.to_string())
            .await?;
        Ok(rows > 0)
    }
}

// ============================================================================
// Gateway<User> and UserGateway implementation
// ============================================================================

#[async_trait]
impl Gateway<User> for SqliteRepository {
    async fn save(&self, user: &User) -> Result<bool> {
        let params = vec![
            Value::from(user.email.clone()),
            Value::from(user.username.clone()),
            Value::from(user.password_hash.clone()),
            Value::from(user.is_admin),
            Value::from(user.is_verified),
            Value::from(format_datetime(&user.created_at)),
            Value::from(format_datetime(&user.updated_at)),
        ];
        let rows = self
            .execute(schema::INSERT_USER, params, "User", user.username.clone())
            .await?;
        Ok(rows == 1)
    }

    async fn update(&self, user: &User) -> Result<bool> {
        let params = vec![
            Value::from(user.username.clone()),
            Value::from(user.email.clone()),
            Value::from(user.password_hash.clone()),
            Value::from(user.is_admin),
            Value::from(user.is_verified),
            Value::from(format_datetime(&user.updated_at)),
        ];
        let rows = self
            .execute(schema::UPDATE_USER, params, "User", user.username.clone())
            .await?;
        Ok(rows > 0)
    }

    async fn get_by_key(&self, username: &str) -> Result<Option<User>> {
        self.query_one(
            schema::SELECT_USER_BY_USERNAME,
            Value::from(username.to_string()),
            row_to_user,
            "User",
        )
        .await
    }

    async fn get_all(&self) -> Result<Arc<Vec<User>>> {
        let users = self
            .query_all(schema::SELECT_ALL_USERS, row_to_user, "User")
            .await?;
        Ok(Arc::new(users))
    }

    /// Also deletes the user's sessions.
    async fn delete_by_key(&self, username: &str) -> Result<bool> {
        let params = vec![Value::from(username.to_string())];
        let rows = self
            .execute(schema::DELETE_USER, params, "User", username.to_string())
            .await?;
        Ok(rows > 0)
    }
}

#[async_trait]
impl UserGateway for SqliteRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        self.query_one(schema::SELECT_USER_BY_ID, Value::from(id), row_to_user, "User")
            .await
    }

    async fn count(&self) -> Result<u64> {
        let count = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_USERS, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

// ============================================================================
// SessionGateway implementation
// ============================================================================

#[async_trait]
impl SessionGateway for SqliteRepository {
    async fn create_session(&self, session: &Session) -> Result<()> {
        let params = vec![
            Value::from(session.id.to_string()),
            Value::from(session.user_id),
            Value::from(format_datetime(&session.created_at)),
            Value::from(format_datetime(&session.expires_at)),
        ];
        self.execute(schema::INSERT_SESSION, params, "Session", session.id.to_string()).await?;
        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>> {
        self.query_one(
            schema::SELECT_SESSION_BY_ID,
            Value::from(id.to_string()),
            row_to_session,
            "Session",
        )
        .await
    }

    async fn delete_session(&self, id: &SessionId) -> Result<()> {
        let params = vec![Value::from(id.to_string())];
        self.execute(schema::DELETE_SESSION, params, "Session", id.to_string()).await?;
        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: i64) -> Result<()> {
        let params = vec![Value::from(user_id)];
        self.execute(
            schema::DELETE_USER_SESSIONS,
            params,
            "Session",
            user_id.to_string(),
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// FavouriteGateway implementation
// ============================================================================

#[async_trait]
impl FavouriteGateway for SqliteRepository {
    async fn replace_all(&self, titles: &[String]) -> Result<bool> {
        let titles = titles.to_vec();
        let now = format_datetime(&Utc::now());

        let missing = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let mut ids = Vec::with_capacity(titles.len());
                {
                    let mut select = tx
                        .prepare(schema::SELECT_PICTURE_ID_BY_TITLE)
                        .map_err(wrap_err)?;
                    for title in &titles {
                        let id = select
                            .query_row([title], |row| row.get::<_, i64>(0))
                            .optional()
                            .map_err(wrap_err)?;
                        match id {
                            Some(id) => ids.push(id),
                            // Dropping the transaction rolls it back.
                            None => return Ok(Some(title.clone())),
                        }
                    }
                }

                tx.execute(schema::DELETE_ALL_FAVOURITES, []).map_err(wrap_err)?;
                {
                    let mut insert = tx.prepare(schema::INSERT_FAVOURITE).map_err(wrap_err)?;
                    for (position, id) in ids.iter().enumerate() {
                        insert
                            .execute(rusqlite::params![id, position as i64, now])
                            .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(None)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "FavouritePicture", "home"))?;

        match missing {
            Some(title) => Err(RepositoryError::NotFound {
                entity_type: "Picture",
                id: title,
            }),
            None => Ok(true),
        }
    }

    async fn get_all(&self) -> Result<Arc<Vec<FavouritePicture>>> {
        let favourites = self
            .query_all(
                schema::SELECT_ALL_FAVOURITES,
                row_to_favourite,
                "FavouritePicture",
            )
            .await?;
        Ok(Arc::new(favourites))
    }
}
