//! Request/response types for the account endpoints.
//!
//! Field names on the wire (`userDetails`, `_id`, `jwtToken`) are the
//! contract inherited from the source system and are kept verbatim.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::account::models::AccountSummary;
use crate::account::service::VerifiedSession;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyOtpRequest {
    /// Account id returned by sign-up.
    pub user: String,
    pub otp: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserDetails {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub verified: bool,
    #[serde(rename = "jwtToken", skip_serializing_if = "Option::is_none")]
    pub jwt_token: Option<String>,
}

impl UserDetails {
    /// An unverified summary including the account id, as returned by
    /// sign-up and by sign-in when a fresh code was issued.
    #[must_use]
    pub fn pending(summary: &AccountSummary) -> Self {
        Self {
            id: Some(summary.id),
            first_name: summary.first_name.clone(),
            last_name: summary.last_name.clone(),
            verified: summary.verified,
            jwt_token: None,
        }
    }

    /// A verified caller with their session token; the id is omitted.
    #[must_use]
    pub fn session(session: &VerifiedSession) -> Self {
        Self {
            id: None,
            first_name: session.summary.first_name.clone(),
            last_name: session.summary.last_name.clone(),
            verified: session.summary.verified,
            jwt_token: Some(session.token.clone()),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserResponse {
    #[serde(rename = "userDetails")]
    pub user_details: UserDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn summary() -> AccountSummary {
        AccountSummary {
            id: Uuid::nil(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            verified: false,
        }
    }

    #[test]
    fn pending_details_serialize_with_underscore_id_and_no_token() {
        let response = UserResponse {
            user_details: UserDetails::pending(&summary()),
            message: Some("OTP sent successfully".to_string()),
        };
        let value = serde_json::to_value(&response).unwrap();

        let details = value.get("userDetails").unwrap();
        assert!(details.get("_id").is_some());
        assert_eq!(details.get("verified").unwrap(), false);
        assert!(details.get("jwtToken").is_none());
        assert_eq!(
            value.get("message").unwrap().as_str().unwrap(),
            "OTP sent successfully"
        );
    }

    #[test]
    fn session_details_serialize_with_token_and_no_id() {
        let session = VerifiedSession {
            summary: AccountSummary {
                verified: true,
                ..summary()
            },
            token: "signed.jwt.token".to_string(),
        };
        let value = serde_json::to_value(UserDetails::session(&session)).unwrap();

        assert!(value.get("_id").is_none());
        assert_eq!(value.get("verified").unwrap(), true);
        assert_eq!(
            value.get("jwtToken").unwrap().as_str().unwrap(),
            "signed.jwt.token"
        );
    }

    #[test]
    fn sign_up_request_deserializes_snake_case_fields() {
        let request: SignUpRequest = serde_json::from_value(serde_json::json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "a@x.com",
            "password": "Abcdefg1!",
            "confirm_password": "Abcdefg1!"
        }))
        .unwrap();
        assert_eq!(request.email, "a@x.com");
    }
}
