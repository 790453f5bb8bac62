use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use folio_auth::Reply;
use folio_core::content::ContactRequest;
use folio_core::envelope::{messages, StatusCode};

use super::{invalid, json_body};
use crate::state::AppState;

/// Forward a contact form message to the site owner (POST /send_email).
pub async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let request = json_body(payload, messages::INVALID_EMAIL_DATA)?;
    state
        .auth
        .captcha
        .verify(request.recaptcha.as_deref())
        .await?;
    let message = request
        .into_message()
        .map_err(|e| invalid(e, messages::INVALID_EMAIL_DATA))?;

    if !state.email_limit.try_acquire() {
        tracing::warn!(from = %message.email, "daily contact message limit reached");
        return Err(Reply::new(
            StatusCode::BadRequest,
            messages::DAILY_LIMIT_EXCEEDED,
        ));
    }

    if let Err(e) = state.mailer.send(&message).await {
        state.email_limit.release();
        tracing::error!(error = %e, from = %message.email, "failed to send contact message");
        return Err(Reply::new(
            StatusCode::InternalServerError,
            messages::ERROR_FAILED_TO_SEND_EMAIL,
        ));
    }

    Ok(Reply::new(
        StatusCode::Created,
        messages::SUCCESSFULLY_SENT_EMAIL,
    ))
}
