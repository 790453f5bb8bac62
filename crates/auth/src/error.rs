use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use folio_core::auth::AuthError;

use crate::cookies::expired_cookie;
use crate::{AuthConfig, Reply};

/// Rejection produced by the gate extractors.
///
/// Token-stage failures carry a forced logout: the response clears the
/// session cookie.
#[derive(Debug)]
pub struct GateRejection {
    pub error: AuthError,
    logout: Option<CookieJar>,
}

impl GateRejection {
    pub fn new(error: AuthError, config: &AuthConfig) -> Self {
        let logout = error
            .forces_logout()
            .then(|| CookieJar::new().add(expired_cookie(config)));
        Self { error, logout }
    }

    pub fn forces_logout(&self) -> bool {
        self.logout.is_some()
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let reply: Reply = Reply::from(self.error);
        match self.logout {
            Some(jar) => (jar, reply).into_response(),
            None => reply.into_response(),
        }
    }
}
