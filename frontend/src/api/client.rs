use reqwest::{header::HeaderMap, Client, Response, StatusCode};

use crate::{
    api::types::{ApiError, LoginResponse, UserResponse},
    config,
    utils::storage::{self as storage_utils, ACCESS_TOKEN_KEY, CURRENT_USER_KEY, REFRESH_TOKEN_KEY},
};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(config::normalize_base_url(&base_url.into())),
        }
    }

    pub(super) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(super) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(super) async fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.resolved_base_url().await, path)
    }

    /// Headers for an authenticated request, or `None` when no token is stored.
    pub(super) fn auth_headers(&self) -> Result<Option<HeaderMap>, ApiError> {
        let Some(token) = storage_utils::read_item(ACCESS_TOKEN_KEY) else {
            return Ok(None);
        };
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            bearer_value(&token)
                .parse()
                .map_err(|_| ApiError::validation("Invalid token format"))?,
        );
        Ok(Some(headers))
    }

    pub(super) async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        match response.text().await {
            Ok(body) => error_from_body(status, &body),
            Err(e) => ApiError::request_failed(format!("Failed to read response: {}", e)),
        }
    }

    pub(super) fn persist_session(response: &LoginResponse) -> Result<(), ApiError> {
        let storage = storage_utils::local_storage().map_err(ApiError::storage)?;
        storage
            .set_item(ACCESS_TOKEN_KEY, &response.access_token)
            .map_err(|_| ApiError::storage("Failed to store token"))?;
        match &response.refresh_token {
            Some(refresh) => storage
                .set_item(REFRESH_TOKEN_KEY, refresh)
                .map_err(|_| ApiError::storage("Failed to store refresh token"))?,
            None => {
                let _ = storage.remove_item(REFRESH_TOKEN_KEY);
            }
        }
        let user_json = serde_json::to_string(&response.user)
            .map_err(|_| ApiError::storage("Failed to serialize user profile"))?;
        storage
            .set_item(CURRENT_USER_KEY, &user_json)
            .map_err(|_| ApiError::storage("Failed to store user profile"))?;
        Ok(())
    }

    pub(super) fn persist_user(user: &UserResponse) {
        if let (Ok(storage), Ok(json)) = (storage_utils::local_storage(), serde_json::to_string(user))
        {
            let _ = storage.set_item(CURRENT_USER_KEY, &json);
        }
    }

    pub fn clear_auth_session() {
        if let Ok(storage) = storage_utils::local_storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
            let _ = storage.remove_item(REFRESH_TOKEN_KEY);
            let _ = storage.remove_item(CURRENT_USER_KEY);
        }
    }

    /// The user cached by the last successful login or session check.
    pub fn stored_user() -> Option<UserResponse> {
        storage_utils::read_item(CURRENT_USER_KEY).and_then(|raw| parse_stored_user(&raw))
    }
}

fn join_endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn bearer_value(token: &str) -> String {
    format!("Bearer {}", token.trim())
}

fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    serde_json::from_str::<ApiError>(body).unwrap_or_else(|_| {
        let fallback = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        ApiError {
            error: fallback,
            code: format!("HTTP_{}", status.as_u16()),
            details: None,
        }
    })
}

fn parse_stored_user(raw: &str) -> Option<UserResponse> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("discarding unreadable cached user profile: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;

    #[test]
    fn join_endpoint_avoids_double_slashes() {
        assert_eq!(
            join_endpoint("http://localhost:8000/api/", "/auth/me"),
            "http://localhost:8000/api/auth/me"
        );
        assert_eq!(
            join_endpoint("http://localhost:8000/api", "auth/login"),
            "http://localhost:8000/api/auth/login"
        );
    }

    #[test]
    fn bearer_value_trims_token() {
        assert_eq!(bearer_value(" abc.def \n"), "Bearer abc.def");
    }

    #[test]
    fn error_from_body_prefers_server_payload() {
        let err = error_from_body(
            StatusCode::FORBIDDEN,
            r#"{"error":"Account suspended","code":"ACCOUNT_SUSPENDED"}"#,
        );
        assert_eq!(err.error, "Account suspended");
        assert_eq!(err.code, "ACCOUNT_SUSPENDED");
    }

    #[test]
    fn error_from_body_falls_back_to_status() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        assert_eq!(err.error, "Bad Gateway");
        assert_eq!(err.code, "HTTP_502");
    }

    #[test]
    fn parse_stored_user_rejects_garbage() {
        assert!(parse_stored_user("not-json").is_none());
        let user = parse_stored_user(r#"{"id":"u1","name":"Org","role":"organization"}"#)
            .expect("valid profile");
        assert_eq!(user.role, Role::Organization);
    }

    #[test]
    fn explicit_base_url_is_normalized() {
        let client = ApiClient::new_with_base_url("http://api.test/api///");
        assert_eq!(client.base_url.as_deref(), Some("http://api.test/api"));
    }
}
