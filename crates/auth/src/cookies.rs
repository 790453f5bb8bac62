use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::AuthConfig;

/// The session cookie holding a signed token.
pub fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(config.token_ttl_seconds()))
        .build()
}

/// A cookie that makes the browser drop the session cookie.
pub fn expired_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_is_http_only() {
        let config = AuthConfig::new("secret");
        let cookie = session_cookie(&config, "abc".to_string());

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn expired_cookie_has_zero_max_age() {
        let cookie = expired_cookie(&AuthConfig::new("secret"));

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
