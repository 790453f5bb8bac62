//! Application state for auth.

use std::sync::Arc;

use folio_core::auth::{CaptchaVerifier, SessionGateway};
use folio_core::storage::UserGateway;
use tokio::sync::Mutex;

use crate::config::AuthConfig;
use crate::token::TokenCodec;

/// Shared state for auth handlers and the gate extractors.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserGateway>,
    pub sessions: Arc<dyn SessionGateway>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub tokens: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
    /// Held while a registration decides whether it is the first account.
    pub registrations: Arc<Mutex<()>>,
}

impl AuthState {
    pub fn new(
        users: Arc<dyn UserGateway>,
        sessions: Arc<dyn SessionGateway>,
        captcha: Arc<dyn CaptchaVerifier>,
        config: AuthConfig,
    ) -> Self {
        let tokens = Arc::new(TokenCodec::new(&config.secret));
        Self {
            users,
            sessions,
            captcha,
            tokens,
            config: Arc::new(config),
            registrations: Arc::new(Mutex::new(())),
        }
    }
}
