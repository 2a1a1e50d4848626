use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::instrument;

use super::types::{SignUpRequest, UserDetails, UserResponse};
use super::{error_response, missing_payload};
use crate::account::AccountService;

#[utoipa::path(
    post,
    path = "/api/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created, OTP sent", body = UserResponse),
        (status = 400, description = "Validation or conflict error", body = super::types::ErrorResponse)
    ),
    tag = "account"
)]
#[instrument(skip(service, payload))]
pub async fn sign_up(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<SignUpRequest>>,
) -> impl IntoResponse {
    let request: SignUpRequest = match payload {
        Some(Json(payload)) => payload,
        None => return missing_payload(),
    };

    match service
        .sign_up(
            &request.first_name,
            &request.last_name,
            &request.email,
            &request.password,
            &request.confirm_password,
        )
        .await
    {
        Ok(summary) => (
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
