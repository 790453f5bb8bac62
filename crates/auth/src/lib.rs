//! Cookie token authentication for folio.
//!
//! This crate provides:
//! - Registration, login and logout routes
//! - Signed session tokens carried in an HTTP-only cookie
//! - Axum extractors that gate admin-only routes

mod config;
mod cookies;
mod error;
mod extractors;
mod handlers;
mod password;
mod reply;
mod state;
mod token;

#[cfg(test)]
mod testing;

pub use config::{AuthConfig, OwnerConfig, DEFAULT_TOKEN_TTL};
pub use cookies::{expired_cookie, session_cookie};
pub use error::GateRejection;
pub use extractors::{authenticate, AdminUser, Authenticated};
pub use handlers::{auth_routes, create_account, ensure_owner};
pub use password::{hash_password, verify_password};
pub use reply::Reply;
pub use state::AuthState;
pub use token::TokenCodec;
