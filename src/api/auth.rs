//! Auth Endpoints

use crate::error::ApiResult;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse, User};

use super::{ApiClient, Verb};

/// Exchange credentials for an access token
pub async fn login(client: &ApiClient, request: &LoginRequest) -> ApiResult<String> {
    let response: TokenResponse = client.send(Verb::Post, "/auth/login", request).await?;
    Ok(response.access_token)
}

pub async fn register(client: &ApiClient, request: &RegisterRequest) -> ApiResult<String> {
    let response: TokenResponse = client.send(Verb::Post, "/auth/register", request).await?;
    Ok(response.access_token)
}

pub async fn logout(client: &ApiClient) -> ApiResult<()> {
    client.send_unit::<()>(Verb::Delete, "/auth/logout", None).await
}

pub async fn current_user(client: &ApiClient) -> ApiResult<User> {
    client.get("/auth/me", &[]).await
}
