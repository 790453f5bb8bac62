//! reCAPTCHA verification for the public forms.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use folio_core::auth::{AuthError, CaptchaVerifier};

use crate::config::RecaptchaConfig;

#[derive(Debug, Error)]
enum CaptchaError {
    #[error("request to verification service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("verification service answered {0}")]
    Status(reqwest::StatusCode),
}

impl From<CaptchaError> for AuthError {
    fn from(error: CaptchaError) -> Self {
        AuthError::Captcha(error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Checks response tokens against the reCAPTCHA `siteverify` endpoint.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    config: RecaptchaConfig,
}

impl RecaptchaVerifier {
    pub fn new(config: RecaptchaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn site_verify(&self, response: &str) -> Result<SiteVerifyResponse, CaptchaError> {
        let reply = self
            .client
            .post(&self.config.verify_url)
            .form(&[("secret", self.config.secret.as_str()), ("response", response)])
            .send()
            .await?;
        if !reply.status().is_success() {
            return Err(CaptchaError::Status(reply.status()));
        }
        Ok(reply.json().await?)
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, response: Option<&str>) -> Result<(), AuthError> {
        let response = response
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(AuthError::InvalidCaptcha)?;

        let verdict = self.site_verify(response).await?;
        if verdict.success {
            Ok(())
        } else {
            tracing::debug!(error_codes = ?verdict.error_codes, "captcha rejected");
            Err(AuthError::InvalidCaptcha)
        }
    }
}

/// Accepts everything. Used when no reCAPTCHA secret is configured.
pub struct DisabledCaptcha;

#[async_trait]
impl CaptchaVerifier for DisabledCaptcha {
    async fn verify(&self, _response: Option<&str>) -> Result<(), AuthError> {
        Ok(())
    }
}
