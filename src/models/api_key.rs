use serde::{Deserialize, Serialize};

/// 已保存的第三方 API 密钥（只返回元数据，不返回密钥本身）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewApiKey {
    pub name: String,
    pub provider: String,
    pub key: String,
}

/// 更新密钥；`key` 为空时只改名
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}
