//! Network seam between the controller and the account API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{UserId, UserRecord},
    error::ErrorDetail,
    protocol::{RegisterRequest, TokenRequest, TokenResponse, UserPatch},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn issue_token(&self, username: &str, password: &str)
        -> Result<TokenResponse, ClientError>;
    async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>, ClientError>;
    async fn current_user(&self, token: Option<&str>) -> Result<UserRecord, ClientError>;
    /// `Ok(None)` when the server accepted the user but echoed something
    /// other than a user record.
    async fn register(&self, body: &RegisterRequest) -> Result<Option<UserRecord>, ClientError>;
    async fn update_user(
        &self,
        token: Option<&str>,
        user_id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, ClientError>;
    async fn delete_user(&self, token: Option<&str>, user_id: UserId) -> Result<(), ClientError>;
}

pub struct HttpAccountApi {
    http: Client,
    base_url: Url,
}

impl HttpAccountApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url.trim())
            .map_err(|err| ClientError::InvalidInput(format!("api base url '{base_url}': {err}")))?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidInput(format!("endpoint '{path}': {err}")))
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Turns a non-2xx response into [`ClientError::Http`], carrying the
/// server's `detail` message when the body has one.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorDetail>(&body)
        .ok()
        .and_then(|detail| detail.message());
    Err(ClientError::http(status.as_u16(), detail))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode(err.to_string()))
}

/// For mutations the status decides success; the echoed body is a bonus.
async fn read_optional_json<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, ClientError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await.unwrap_or_default();
    let parsed = serde_json::from_slice(&bytes).ok();
    if parsed.is_none() {
        debug!("mutation succeeded without a decodable body");
    }
    Ok(parsed)
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        debug!(username, "requesting access token");
        let response = self
            .http
            .post(self.endpoint("token")?)
            .form(&TokenRequest::password_grant(username, password))
            .send()
            .await?;
        read_json(response).await
    }

    async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>, ClientError> {
        let response = authorize(self.http.get(self.endpoint("users/")?), token)
            .send()
            .await?;
        read_json(response).await
    }

    async fn current_user(&self, token: Option<&str>) -> Result<UserRecord, ClientError> {
        let response = authorize(self.http.get(self.endpoint("users/me")?), token)
            .send()
            .await?;
        read_json(response).await
    }

    async fn register(&self, body: &RegisterRequest) -> Result<Option<UserRecord>, ClientError> {
        debug!(username = %body.username, "registering user");
        let response = self
            .http
            .post(self.endpoint("register/")?)
            .json(body)
            .send()
            .await?;
        read_optional_json(response).await
    }

    async fn update_user(
        &self,
        token: Option<&str>,
        user_id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, ClientError> {
        debug!(%user_id, "updating user");
        let url = self.endpoint(&format!("users/{user_id}"))?;
        let response = authorize(self.http.put(url), token)
            .json(patch)
            .send()
            .await?;
        read_optional_json(response).await
    }

    async fn delete_user(&self, token: Option<&str>, user_id: UserId) -> Result<(), ClientError> {
        debug!(%user_id, "deleting user");
        let url = self.endpoint(&format!("users/{user_id}"))?;
        let response = authorize(self.http.delete(url), token).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
