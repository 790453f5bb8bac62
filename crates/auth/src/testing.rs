//! In-memory gateways for the auth tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::auth::{AuthError, CaptchaVerifier, Session, SessionGateway, SessionId};
use folio_core::content::User;
use folio_core::storage::{Gateway, RepositoryError, Result, UserGateway};
use tokio::sync::RwLock;

use crate::{AuthConfig, AuthState};

pub const SECRET: &str = "test-secret";

#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<Vec<User>>,
}

impl MemoryUsers {
    pub fn with_user(id: i64, username: &str, is_admin: bool, is_verified: bool) -> Self {
        let now = Utc::now();
        Self {
            users: RwLock::new(vec![User {
                id,
                email: format!("{username}@example.com"),
                username: username.to_string(),
                password_hash: String::new(),
                is_admin,
                is_verified,
                created_at: now,
                updated_at: now,
            }]),
        }
    }
}

#[async_trait]
impl Gateway<User> for MemoryUsers {
    async fn save(&self, user: &User) -> Result<bool> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.username.clone(),
            });
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(User { id, ..user.clone() });
        Ok(true)
    }

    async fn update(&self, user: &User) -> Result<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.username == user.username) {
            Some(existing) => {
                *existing = User {
                    id: existing.id,
                    ..user.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_by_key(&self, key: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == key).cloned())
    }

    async fn get_all(&self) -> Result<Arc<Vec<User>>> {
        Ok(Arc::new(self.users.read().await.clone()))
    }

    async fn delete_by_key(&self, key: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.username != key);
        Ok(users.len() != before)
    }
}

#[async_trait]
impl UserGateway for MemoryUsers {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}

#[derive(Default)]
pub struct MemorySessions {
    sessions: RwLock<HashMap<String, Session>>,
}

#[async_trait]
impl SessionGateway for MemorySessions {
    async fn create_session(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id.as_str()).cloned())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id.as_str());
        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: i64) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.user_id != user_id);
        Ok(())
    }
}

/// Accepts any response except the literal `"bad"`.
pub struct FakeCaptcha;

#[async_trait]
impl CaptchaVerifier for FakeCaptcha {
    async fn verify(&self, response: Option<&str>) -> std::result::Result<(), AuthError> {
        match response {
            Some("bad") => Err(AuthError::InvalidCaptcha),
            _ => Ok(()),
        }
    }
}

pub fn test_state(users: Arc<dyn UserGateway>, sessions: Arc<dyn SessionGateway>) -> AuthState {
    let mut config = AuthConfig::new(SECRET);
    config.cookie_secure = false;
    AuthState::new(users, sessions, Arc::new(FakeCaptcha), config)
}
