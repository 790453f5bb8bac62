//! Contact form delivery and its daily quota.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use folio_core::content::ContactMessage;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail delivery is not configured")]
    NotConfigured,
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivers contact messages to the site owner.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError>;
}

/// Sends through an SMTP relay from the backend account to the business mailbox.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.backend_email.clone(),
                config.backend_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.backend_email.parse()?,
            to: config.business_email.parse()?,
        })
    }
}

/// Builds the email for `message`. Replies go to the visitor.
fn build_message(from: Mailbox, to: Mailbox, message: &ContactMessage) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject())
        .header(ContentType::TEXT_PLAIN);
    if let Ok(reply_to) = message.email.parse::<Mailbox>() {
        builder = builder.reply_to(reply_to);
    }
    Ok(builder.body(message.body())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
        let email = build_message(self.from.clone(), self.to.clone(), message)?;
        self.transport.send(email).await?;
        tracing::info!(from = %message.email, "contact message sent");
        Ok(())
    }
}

/// Used when no SMTP account is configured. Every send fails.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _message: &ContactMessage) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// Caps the number of contact messages accepted per UTC day, across all senders.
pub struct DailyLimiter {
    limit: u32,
    used: Mutex<(NaiveDate, u32)>,
}

impl DailyLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            used: Mutex::new((NaiveDate::MIN, 0)),
        }
    }

    /// Takes one message from today's quota, if any is left.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_on(Utc::now().date_naive())
    }

    /// Gives back a message taken with [`DailyLimiter::try_acquire`] that was not sent.
    pub fn release(&self) {
        self.release_on(Utc::now().date_naive());
    }

    fn try_acquire_on(&self, today: NaiveDate) -> bool {
        let mut used = self.used.lock().unwrap_or_else(|e| e.into_inner());
        if used.0 != today {
            *used = (today, 0);
        }
        if used.1 >= self.limit {
            return false;
        }
        used.1 += 1;
        true
    }

    fn release_on(&self, today: NaiveDate) {
        let mut used = self.used.lock().unwrap_or_else(|e| e.into_inner());
        if used.0 == today {
            used.1 = used.1.saturating_sub(1);
        }
    }
}
