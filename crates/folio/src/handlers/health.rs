use folio_auth::Reply;
use folio_core::envelope::{messages, StatusCode};

/// Liveness check (GET|POST /ping).
pub async fn ping() -> Reply {
    Reply::new(StatusCode::Ok, messages::PING)
}
