use reqwest::StatusCode;
use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误最终都在用户触发的操作处被捕获，并转换为一条可显示的消息。
/// 没有任何一种错误会终止整个应用。
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error(transparent)]
    Api(#[from] ApiError),
    /// 本地持久化存储错误
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 受保护操作缺少会话令牌（在发出任何请求之前拒绝）
    #[error("Not logged in")]
    Unauthorized,
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络层失败（连接被拒、DNS、TLS 等）
    #[error("Network request failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端返回非 2xx 状态
    ///
    /// `message` 已经按错误体解析规则归一化，`Display` 只输出这一条消息。
    #[error("{message}")]
    Status {
        endpoint: String,
        status: StatusCode,
        message: String,
    },
    /// 调用方需要 JSON 结果，但响应不是 JSON
    #[error("Empty response from {endpoint}")]
    EmptyResponse { endpoint: String },
    /// 响应体不是预期的结构
    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 请求体无法编码
    #[error("Could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// 本地持久化存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取存储文件失败
    #[error("Could not read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入存储文件失败
    #[error("Could not write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 存储文件内容已损坏
    #[error("Corrupt storage file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("Environment variable {var_name} has invalid value '{value}', expected {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("Could not read config file {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("Invalid config file {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络层失败错误
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::Transport {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建 HTTP 状态错误
    pub fn status(endpoint: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Api(ApiError::Status {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        })
    }

    /// 后端返回的 HTTP 状态码（如果有）
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api(ApiError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_only_the_message() {
        let err = AppError::status("/blurbs", StatusCode::BAD_REQUEST, "content is required");
        assert_eq!(err.to_string(), "content is required");
        assert_eq!(err.http_status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_unauthorized_has_no_http_status() {
        assert_eq!(AppError::Unauthorized.http_status(), None);
    }
}
