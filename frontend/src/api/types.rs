use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Organization,
    Admin,
    /// Any role tag this build does not know about. Never granted access.
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Organization => "organization",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl UserResponse {
    /// First character of the display name, used for the header avatar.
    pub fn initial(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "STORAGE_ERROR".to_string(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_parses_known_roles() {
        let raw = r#"{"id":"u1","name":"Amani Legal Aid","email":"ops@amani.org","role":"organization"}"#;
        let user: UserResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(user.role, Role::Organization);
        assert_eq!(user.email.as_deref(), Some("ops@amani.org"));
    }

    #[test]
    fn unrecognized_role_maps_to_unknown() {
        let raw = r#"{"id":"u2","name":"Someone","role":"superuser"}"#;
        let user: UserResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(user.role, Role::Unknown);
        assert!(user.email.is_none());
    }

    #[test]
    fn role_serializes_as_lowercase_tag() {
        assert_eq!(
            serde_json::to_string(&Role::Organization).unwrap(),
            "\"organization\""
        );
        assert_eq!(Role::Client.to_string(), "client");
    }

    #[test]
    fn initial_is_first_character_as_written() {
        let user = UserResponse {
            id: "u1".into(),
            name: "wakili".into(),
            email: None,
            role: Role::Client,
        };
        assert_eq!(user.initial(), "w");
        let unnamed = UserResponse {
            name: String::new(),
            ..user
        };
        assert_eq!(unnamed.initial(), "");
    }

    #[test]
    fn login_response_accepts_missing_refresh_token() {
        let raw = r#"{
            "access_token": "tok",
            "user": {"id":"u1","name":"Org","role":"organization"}
        }"#;
        let response: LoginResponse = serde_json::from_str(raw).unwrap();
        assert!(response.refresh_token.is_none());
        assert_eq!(response.user.role, Role::Organization);
    }

    #[test]
    fn api_error_displays_message() {
        let err = ApiError::request_failed("Request failed: timeout");
        assert_eq!(err.to_string(), "Request failed: timeout");
        assert_eq!(err.code, "REQUEST_FAILED");
    }
}
