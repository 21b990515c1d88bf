//! 认证服务 - 业务能力层
//!
//! 把认证接口和会话状态连起来：登录写入令牌，登出无条件清除令牌。

use crate::api;
use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{LoginResponse, RegisterResponse};
use tracing::{info, warn};

/// 认证服务
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 登录成功后进入已认证状态
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let response = api::auth::login(&self.client, email, password).await?;
        self.client.session().login(&response.token)?;
        info!("✓ 登录成功: user {}", response.user_id);
        Ok(response)
    }

    /// 注册
    ///
    /// 后端同时签发令牌时直接进入已认证状态，否则保持匿名，等待用户用生成的密码登录。
    pub async fn register(&self, email: &str) -> AppResult<RegisterResponse> {
        let response = api::auth::register(&self.client, email).await?;
        if let Some(token) = &response.token {
            self.client.session().login(token)?;
        }
        info!("✓ 注册成功: user {}", response.user_id);
        Ok(response)
    }

    /// 登出
    ///
    /// 服务端登出是尽力而为的；无论它是否成功，本地会话都会被清除。
    ///
    /// # 返回
    /// - `Ok(bool)`：服务端是否确认了登出
    /// - `Err`：本地持久化的令牌无法清除
    pub async fn logout(&self) -> AppResult<bool> {
        let acknowledged = match api::auth::logout(&self.client).await {
            Ok(()) => true,
            Err(e) => {
                warn!("⚠️ 服务端登出失败，仍清除本地会话: {}", e);
                false
            }
        };
        self.client.session().clear()?;
        Ok(acknowledged)
    }

    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        api::auth::request_password_reset(&self.client, email).await
    }

    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> AppResult<()> {
        api::auth::confirm_password_reset(&self.client, token, new_password).await
    }
}
