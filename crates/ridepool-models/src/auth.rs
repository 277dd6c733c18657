//! Authentication request and response DTOs.
//!
//! Request structs are the schemas of the validation gate. Every field has a
//! serde default so that missing fields reach validation and are reported
//! together with every other violation instead of aborting deserialization.
//! Fields not declared here are dropped while deserializing.

use ridepool_core::Role;
use ridepool_core::serde::{trimmed, trimmed_lowercase};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::accounts::AccountProfile;

/// Self-service and admin-initiated registration payload.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed_lowercase")]
    #[validate(custom(function = "crate::rules::email_address"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::rules::pseudo"))]
    #[schema(example = "janed")]
    pub pseudo: String,
    #[validate(custom(function = "crate::rules::new_password"))]
    #[schema(example = "carpool2024")]
    pub password: String,
    #[serde(rename = "firstName", deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::rules::person_name"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[serde(rename = "lastName", deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::rules::person_name"))]
    #[schema(example = "Doe")]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    /// Access token for immediate login
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed_lowercase")]
    #[validate(custom(function = "crate::rules::email_address"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[validate(custom(function = "crate::rules::required_text"))]
    #[schema(example = "carpool2024")]
    pub password: String,
}

/// Returned by login and refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    #[schema(example = "Bearer")]
    pub token_type: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    #[validate(custom(function = "crate::rules::required_text"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub account_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub account: AccountProfile,
}

/// Who the caller is, for routes that accept anonymous callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    /// `user` for anonymous callers
    pub role: Role,
}
