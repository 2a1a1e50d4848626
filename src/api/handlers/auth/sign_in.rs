use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::instrument;

use super::types::{SignInRequest, UserDetails, UserResponse};
use super::{error_response, missing_payload};
use crate::account::{AccountService, SignInOutcome};

#[utoipa::path(
    post,
    path = "/api/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session token issued, or fresh OTP sent for an unverified account", body = UserResponse),
        (status = 400, description = "Unknown account, wrong password, or OTP cooldown", body = super::types::ErrorResponse)
    ),
    tag = "account"
)]
#[instrument(skip(service, payload))]
pub async fn sign_in(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<SignInRequest>>,
) -> impl IntoResponse {
    let request: SignInRequest = match payload {
        Some(Json(payload)) => payload,
        None => return missing_payload(),
    };

    match service.sign_in(&request.email, &request.password).await {
        Ok(SignInOutcome::Verified(session)) => (
            StatusCode::OK,
            Json(UserResponse {
                user_details: UserDetails::session(&session),
                message: None,
            }),
        )
            .into_response(),
        Ok(SignInOutcome::OtpSent(summary)) => (
            StatusCode::OK,
            Json(UserResponse {
                user_details: UserDetails::pending(&summary),
                message: Some("OTP sent successfully".to_string()),
            }),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}
