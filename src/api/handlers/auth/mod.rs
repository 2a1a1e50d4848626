//! Account endpoints: sign-up, OTP verification, sign-in.
//!
//! Handlers stay thin: deserialize, hand off to the
//! [`AccountService`](crate::account::AccountService), and map the outcome to
//! the wire shapes. Every rejection is a 400 with the error's message;
//! infrastructure faults log the cause and surface only the generic message.

pub mod sign_in;
pub mod sign_up;
pub mod types;
pub mod verify_otp;

pub use sign_in::sign_in;
pub use sign_up::sign_up;
pub use verify_otp::verify_otp;

use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::error;

use crate::account::AuthError;
use types::ErrorResponse;

pub(super) const MSG_MISSING_PAYLOAD: &str = "Fields should not be empty";

/// Map a domain error to its HTTP response, logging infrastructure causes.
pub(super) fn error_response(err: &AuthError) -> axum::response::Response {
    if let AuthError::Infrastructure(cause) = err {
        error!("Infrastructure fault: {cause:?}");
    }
    (
        err.status(),
        Json(ErrorResponse {
            message: err.to_string(),
        }),
    )
        .into_response()
}

/// Missing or undeserializable body, reported like any other empty-field
/// rejection.
pub(super) fn missing_payload() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: MSG_MISSING_PAYLOAD.to_string(),
        }),
    )
        .into_response()
}
