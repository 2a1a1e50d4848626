use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::instrument;

use super::types::{UserDetails, UserResponse, VerifyOtpRequest};
use super::{error_response, missing_payload};
use crate::account::AccountService;

#[utoipa::path(
    post,
    path = "/api/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Account verified, session token issued", body = UserResponse),
        (status = 400, description = "Unknown account, expired or invalid OTP", body = super::types::ErrorResponse)
    ),
    tag = "account"
)]
#[instrument(skip(service, payload))]
pub async fn verify_otp(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<VerifyOtpRequest>>,
) -> impl IntoResponse {
    let request: VerifyOtpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return missing_payload(),
    };

    match service.confirm_otp(&request.user, &request.otp).await {
        Ok(session) => (
            StatusCode::OK,
            Json(UserResponse {
                user_details: UserDetails::session(&session),
                message: None,
            }),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}
