//! Generated `OpenAPI` document for the HTTP surface.

use utoipa::OpenApi;

use crate::api::handlers::auth::types::{
    ErrorResponse, SignInRequest, SignUpRequest, UserDetails, UserResponse, VerifyOtpRequest,
};
use crate::api::handlers::health::Health;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::auth::sign_up::sign_up,
        crate::api::handlers::auth::verify_otp::verify_otp,
        crate::api::handlers::auth::sign_in::sign_in,
    ),
    components(schemas(
        Health,
        SignUpRequest,
        VerifyOtpRequest,
        SignInRequest,
        UserDetails,
        UserResponse,
        ErrorResponse,
    )),
    tags(
        (name = "account", description = "Sign-up, OTP verification, and sign-in"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
