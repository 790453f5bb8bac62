use std::{env, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Largest request body accepted, sized for full-resolution photos as data URLs.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Outgoing mail settings for the contact form.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Account the messages are sent from.
    pub backend_email: String,
    pub backend_password: String,
    /// Mailbox the messages are delivered to.
    pub business_email: String,
}

#[derive(Debug, Clone)]
pub struct RecaptchaConfig {
    pub secret: String,
    pub verify_url: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "folio.db")
    pub database_path: String,
    /// File of favourite picture titles to seed at startup
    pub favourites_path: Option<PathBuf>,
    /// Longest side of images in list responses (default: 800)
    pub compressed_max_dimension: u32,
    /// Origin allowed to make credentialed cross-origin requests
    pub cors_origin: Option<String>,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes (default: 64 MiB)
    pub max_body_bytes: usize,
    /// `None` when `BACKEND_EMAIL` is unset; the contact form then fails with 500.
    pub smtp: Option<SmtpConfig>,
    /// Contact messages accepted per day (default: 50)
    pub email_daily_limit: u32,
    /// `None` when `RECAPTCHA_SECRET` is unset; captcha checks then always pass.
    pub recaptcha: Option<RecaptchaConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_PATH` - SQLite database path (default: "folio.db")
    /// - `FAVOURITES_PATH` - favourite titles file, one title per line
    /// - `COMPRESSED_MAX_DIMENSION` - longest side of list images (default: 800)
    /// - `CORS_ORIGIN` - frontend origin allowed to send cookies
    /// - `REQUEST_TIMEOUT_SECS` - request timeout (default: 10)
    /// - `MAX_BODY_BYTES` - largest request body (default: 64 MiB)
    /// - `SMTP_HOST` (default: "smtp.gmail.com"), `SMTP_PORT` (default: 587)
    /// - `BACKEND_EMAIL`, `BACKEND_EMAIL_PASSWORD`, `BUSINESS_EMAIL`
    /// - `EMAIL_DAILY_LIMIT` - contact messages per day (default: 50)
    /// - `RECAPTCHA_SECRET`, `RECAPTCHA_VERIFY_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp = non_empty("BACKEND_EMAIL").map(|backend_email| SmtpConfig {
            host: non_empty("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            port: parse(non_empty("SMTP_PORT")).unwrap_or(587),
            backend_password: lookup("BACKEND_EMAIL_PASSWORD").unwrap_or_default(),
            business_email: non_empty("BUSINESS_EMAIL").unwrap_or_else(|| backend_email.clone()),
            backend_email,
        });

        let recaptcha = non_empty("RECAPTCHA_SECRET").map(|secret| RecaptchaConfig {
            secret,
            verify_url: non_empty("RECAPTCHA_VERIFY_URL")
                .unwrap_or_else(|| DEFAULT_RECAPTCHA_VERIFY_URL.to_string()),
        });

        Self {
            database_path: non_empty("DATABASE_PATH").unwrap_or_else(|| "folio.db".to_string()),
            favourites_path: non_empty("FAVOURITES_PATH").map(PathBuf::from),
            compressed_max_dimension: parse(non_empty("COMPRESSED_MAX_DIMENSION")).unwrap_or(800),
            cors_origin: non_empty("CORS_ORIGIN"),
            request_timeout_secs: parse(non_empty("REQUEST_TIMEOUT_SECS")).unwrap_or(10),
            max_body_bytes: parse(non_empty("MAX_BODY_BYTES")).unwrap_or(DEFAULT_MAX_BODY_BYTES),
            smtp,
            email_daily_limit: parse(non_empty("EMAIL_DAILY_LIMIT")).unwrap_or(50),
            recaptcha,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.database_path, "folio.db");
        assert_eq!(config.compressed_max_dimension, 800);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.email_daily_limit, 50);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(config.favourites_path.is_none());
        assert!(config.smtp.is_none());
        assert!(config.recaptcha.is_none());
    }

    #[test]
    fn test_smtp_requires_backend_email() {
        let config = config_from(&[("SMTP_HOST", "mail.example.com"), ("SMTP_PORT", "2525")]);
        assert!(config.smtp.is_none());

        let config = config_from(&[
            ("BACKEND_EMAIL", "site@example.com"),
            ("SMTP_PORT", "2525"),
        ]);
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.gmail.com");
        assert_eq!(smtp.port, 2525);
        assert_eq!(smtp.business_email, "site@example.com");
    }

    #[test]
    fn test_unparsable_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("COMPRESSED_MAX_DIMENSION", "big"),
            ("EMAIL_DAILY_LIMIT", "-3"),
            ("MAX_BODY_BYTES", "lots"),
        ]);

        assert_eq!(config.compressed_max_dimension, 800);
        assert_eq!(config.email_daily_limit, 50);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_recaptcha_uses_default_url() {
        let config = config_from(&[("RECAPTCHA_SECRET", "s3cret")]);

        let recaptcha = config.recaptcha.unwrap();
        assert_eq!(recaptcha.secret, "s3cret");
        assert_eq!(recaptcha.verify_url, DEFAULT_RECAPTCHA_VERIFY_URL);
    }
}
