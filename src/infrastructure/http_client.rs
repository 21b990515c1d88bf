//! HTTP 请求客户端 - 基础设施层
//!
//! 持有唯一的 `reqwest::Client` 和会话引用，只暴露"发请求"的能力：
//! - 会话持有令牌时附加 Bearer 凭证，否则匿名发送（由服务端决定是否拒绝）
//! - 对象请求体编码为 JSON；文件上传使用 multipart，不带 JSON content-type
//! - 2xx 且声明 JSON 时解码，否则视为空结果
//! - 非 2xx 时把错误体归一化为一条消息

use crate::error::{ApiError, AppError, AppResult};
use crate::state::SessionState;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{multipart::Form, Method, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

/// 请求体
pub enum RequestBody {
    Empty,
    Json(JsonValue),
    Multipart(Form),
}

impl RequestBody {
    /// 把任意可序列化对象编码为 JSON 请求体
    pub fn json<B: Serialize + ?Sized>(body: &B) -> AppResult<Self> {
        let value = serde_json::to_value(body).map_err(ApiError::Encode)?;
        Ok(RequestBody::Json(value))
    }
}

/// 后端 API 客户端
///
/// 职责：
/// - 拼接根地址和相对路径
/// - 附加认证头
/// - 统一的响应和错误解码
/// - 不认识任何业务实体
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionState>,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(base_url: impl Into<String>, session: Arc<SessionState>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, session)
    }

    /// 使用自定义 `reqwest::Client` 创建
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<SessionState>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// 通用请求
    ///
    /// # 返回
    /// - `Some(T)`：2xx 且响应声明了 JSON
    /// - `None`：2xx 但不是 JSON（空结果）
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> AppResult<Option<T>> {
        self.request_with_query(method, path, &[], body).await
    }

    /// 带查询参数的通用请求，参数会被正确编码
    pub async fn request_with_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
    ) -> AppResult<Option<T>> {
        let response = self.send(method, path, query, body).await?;

        if !is_json(response.headers()) {
            return Ok(None);
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::transport(path, e))?;
        let value = serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            endpoint: path.to_string(),
            source,
        })?;
        Ok(Some(value))
    }

    // ========== 需要 JSON 结果的请求 ==========

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let result = self.request(Method::GET, path, RequestBody::Empty).await?;
        require_body(path, result)
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let result = self
            .request_with_query(Method::GET, path, query, RequestBody::Empty)
            .await?;
        require_body(path, result)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let result = self
            .request(Method::POST, path, RequestBody::json(body)?)
            .await?;
        require_body(path, result)
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let result = self
            .request(Method::PUT, path, RequestBody::json(body)?)
            .await?;
        require_body(path, result)
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> AppResult<T> {
        let result = self
            .request(Method::POST, path, RequestBody::Multipart(form))
            .await?;
        require_body(path, result)
    }

    // ========== 不关心结果的请求 ==========

    pub async fn post_void<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        self.request::<IgnoredAny>(Method::POST, path, RequestBody::json(body)?)
            .await?;
        Ok(())
    }

    /// 不带请求体的 POST
    pub async fn post_empty(&self, path: &str) -> AppResult<()> {
        self.request::<IgnoredAny>(Method::POST, path, RequestBody::Empty)
            .await?;
        Ok(())
    }

    /// 不带请求体的 PUT
    pub async fn put_empty(&self, path: &str) -> AppResult<()> {
        self.request::<IgnoredAny>(Method::PUT, path, RequestBody::Empty)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.request::<IgnoredAny>(Method::DELETE, path, RequestBody::Empty)
            .await?;
        Ok(())
    }

    pub async fn post_multipart_void(&self, path: &str, form: Form) -> AppResult<()> {
        self.request::<IgnoredAny>(Method::POST, path, RequestBody::Multipart(form))
            .await?;
        Ok(())
    }

    /// 下载二进制内容（PDF、源码、导出包）
    pub async fn download(&self, path: &str) -> AppResult<Vec<u8>> {
        let response = self
            .send(Method::GET, path, &[], RequestBody::Empty)
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::transport(path, e))?;
        Ok(bytes.to_vec())
    }

    /// 发送请求并检查状态码，非 2xx 时返回归一化的错误消息
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
    ) -> AppResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("→ {} {}", method, path);

        let mut builder = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            builder = builder.query(query);
        }

        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::transport(path, e))?;

        let status = response.status();
        debug!("← {} {} {}", method, path, status);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(AppError::status(path, status, extract_error_message(status, &text)))
    }
}

/// 从错误响应体中提取一条可读消息
///
/// 规则（按优先级）：
/// 1. JSON 中 `error` 是字符串
/// 2. JSON 中 `error.message` 是字符串
/// 3. 原始响应文本
/// 4. 响应文本为空时使用 HTTP 状态短语
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<JsonValue>(body) {
        match json.get("error") {
            Some(JsonValue::String(message)) => return message.clone(),
            Some(error) => {
                if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
                    return message.to_string();
                }
            }
            None => {}
        }
    }

    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

fn require_body<T>(path: &str, result: Option<T>) -> AppResult<T> {
    result.ok_or_else(|| {
        ApiError::EmptyResponse {
            endpoint: path.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_string_field_wins() {
        let msg = extract_error_message(StatusCode::BAD_REQUEST, r#"{"error":"Email already registered"}"#);
        assert_eq!(msg, "Email already registered");
    }

    #[test]
    fn test_nested_error_message() {
        let msg = extract_error_message(
            StatusCode::NOT_FOUND,
            r#"{"error":{"code":"NOT_FOUND","message":"Experience not found"}}"#,
        );
        assert_eq!(msg, "Experience not found");
    }

    #[test]
    fn test_empty_body_uses_status_phrase() {
        assert_eq!(
            extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(extract_error_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
    }

    #[test]
    fn test_plain_text_body_is_used_as_is() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "upstream timed out"),
            "upstream timed out"
        );
    }

    #[test]
    fn test_json_without_usable_error_falls_back_to_raw_text() {
        let body = r#"{"error":{"code":42}}"#;
        assert_eq!(extract_error_message(StatusCode::BAD_REQUEST, body), body);

        let body = r#"{"detail":"nope"}"#;
        assert_eq!(extract_error_message(StatusCode::BAD_REQUEST, body), body);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let session = Arc::new(
            SessionState::load(Arc::new(crate::infrastructure::MemoryStore::new())).unwrap(),
        );
        let client = ApiClient::new("http://localhost:5000/", session);
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
