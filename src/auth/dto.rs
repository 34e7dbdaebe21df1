use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

use crate::auth::repo::User;

/// Optional profile-picture URI; empty and null both count as "no value".
fn optional_uri(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || validator::validate_url(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("url");
        err.message = Some("Must be a valid URI".into());
        Err(err)
    }
}

/// Request body for signup.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be 3 to 50 characters"))]
    pub name: String,
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(custom = "optional_uri")]
    pub profile_picture: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for profile update; only these fields are mutable.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 50, message = "Name must be 3 to 50 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(custom = "optional_uri")]
    pub profile_picture: Option<String>,
}

/// Request body for forget-password and resend-OTP.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
}

/// Request body for OTP verification and password reset.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    #[validate(length(equal = 6, message = "OTP must be exactly 6 characters"))]
    pub otp: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response returned after signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: PublicUser,
    pub token: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Response carrying an issued reset code.
#[derive(Debug, Serialize)]
pub struct OtpResponse {
    pub message: String,
    #[serde(rename = "OTP")]
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_collects_all_violations_at_once() {
        let req = SignupRequest {
            name: "ab".into(),
            email: "not-an-email".into(),
            password: "12345".into(),
            profile_picture: None,
        };
        let errs = req.validate().unwrap_err();
        assert_eq!(errs.field_errors().len(), 3);
    }

    #[test]
    fn signup_accepts_valid_payload() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name": "Jordan", "email": "jordan@example.com", "password": "hunter22"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.profile_picture.is_none());
    }

    #[test]
    fn profile_picture_allows_empty_and_valid_uri() {
        let mut req = SignupRequest {
            name: "Jordan".into(),
            email: "jordan@example.com".into(),
            password: "hunter22".into(),
            profile_picture: Some(String::new()),
        };
        assert!(req.validate().is_ok());

        req.profile_picture = Some("https://example.com/me.png".into());
        assert!(req.validate().is_ok());

        req.profile_picture = Some("not a uri".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn login_requires_non_empty_password() {
        let req = LoginRequest {
            email: "jordan@example.com".into(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn otp_must_be_exactly_six_characters() {
        let mut req = VerifyOtpRequest {
            email: "jordan@example.com".into(),
            otp: "12345".into(),
            new_password: "hunter22".into(),
        };
        assert!(req.validate().is_err());

        req.otp = "123456".into();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn verify_otp_reads_camel_case_fields() {
        let req: VerifyOtpRequest = serde_json::from_str(
            r#"{"email": "a@b.co", "otp": "123456", "newPassword": "hunter22"}"#,
        )
        .unwrap();
        assert_eq!(req.new_password, "hunter22");
    }

    #[test]
    fn update_profile_accepts_partial_payloads() {
        let req: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert!(req.name.is_none());

        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"profilePicture": ""}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.profile_picture.as_deref(), Some(""));
    }
}
