use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, UserResponse},
};

/// Session operations the auth store depends on.
#[async_trait(?Send)]
pub trait AuthApi {
    /// The principal behind the stored session; `Ok(None)` when there is none.
    async fn current_user(&self) -> Result<Option<UserResponse>, ApiError>;

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn current_user(&self) -> Result<Option<UserResponse>, ApiError> {
        let Some(headers) = self.auth_headers()? else {
            return Ok(None);
        };
        let url = self.endpoint("auth/me").await;
        let response = self
            .http_client()
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            Self::clear_auth_session();
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?;
        Self::persist_user(&user);
        Ok(Some(user))
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("auth/login").await;
        let response = self
            .http_client()
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let login_response: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))?;
        Self::persist_session(&login_response)?;
        Ok(login_response)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("auth/logout").await;
        let headers = self.auth_headers()?;
        let mut request = self.http_client().post(&url).json(&json!({}));
        if let Some(headers) = headers {
            request = request.headers(headers);
        }
        let result = match request.send().await {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(Self::error_from_response(resp).await),
            Err(e) => Err(ApiError::request_failed(format!("Request failed: {}", e))),
        };
        // The local session ends whether or not the server acknowledged it.
        Self::clear_auth_session();
        result
    }
}
