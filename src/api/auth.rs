//! 认证 API
//!
//! 这里只负责请求本身，会话状态的变化由 `services::AuthService` 处理。

use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{LoginResponse, RegisterResponse};
use serde_json::json;

pub async fn login(client: &ApiClient, email: &str, password: &str) -> AppResult<LoginResponse> {
    client
        .post("/auth/login", &json!({ "email": email, "password": password }))
        .await
}

/// 注册，后端返回生成的初始密码
pub async fn register(client: &ApiClient, email: &str) -> AppResult<RegisterResponse> {
    client.post("/auth/register", &json!({ "email": email })).await
}

pub async fn logout(client: &ApiClient) -> AppResult<()> {
    client.post_empty("/auth/logout").await
}

pub async fn request_password_reset(client: &ApiClient, email: &str) -> AppResult<()> {
    client
        .post_void("/auth/reset-password/request", &json!({ "email": email }))
        .await
}

pub async fn confirm_password_reset(
    client: &ApiClient,
    token: &str,
    new_password: &str,
) -> AppResult<()> {
    client
        .post_void(
            "/auth/reset-password/confirm",
            &json!({ "token": token, "newPassword": new_password }),
        )
        .await
}
