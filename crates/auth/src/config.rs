use std::time::Duration;

/// Default token lifetime: 31 days and 3 seconds.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(31 * 24 * 60 * 60 + 3);

/// Account created at startup when no user with that username exists.
#[derive(Debug, Clone)]
pub struct OwnerConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens.
    pub secret: String,
    pub token_ttl: Duration,
    pub cookie_name: String,
    pub cookie_secure: bool,
    /// Make the first registered user an admin.
    pub promote_first_user: bool,
    pub owner: Option<OwnerConfig>,
}

impl AuthConfig {
    /// Configuration with defaults for everything but the secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            cookie_name: "token".to_string(),
            cookie_secure: true,
            promote_first_user: true,
            owner: None,
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SECRET_KEY`: token signing secret (required)
    /// - `TOKEN_TTL_SECONDS`: token lifetime (default: 31 days and 3 seconds)
    /// - `COOKIE_SECURE`: whether to set the secure flag on cookies (default: true)
    /// - `PROMOTE_FIRST_USER`: make the first registered user an admin (default: true)
    /// - `OWNER_USERNAME`, `OWNER_EMAIL`, `OWNER_PASSWORD`: optional owner account
    ///
    /// # Errors
    ///
    /// Returns an error if `SECRET_KEY` is unset, or if the owner account is
    /// partially configured.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let secret = std::env::var("SECRET_KEY")?;

        let token_ttl = std::env::var("TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL);

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let promote_first_user = std::env::var("PROMOTE_FIRST_USER")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let owner = match std::env::var("OWNER_USERNAME") {
            Ok(username) => Some(OwnerConfig {
                username,
                email: std::env::var("OWNER_EMAIL")?,
                password: std::env::var("OWNER_PASSWORD")?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            token_ttl,
            cookie_secure,
            promote_first_user,
            owner,
            ..Self::new(secret)
        })
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}
