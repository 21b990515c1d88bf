use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 本地持久化文件（保存会话令牌和主题偏好）
    pub storage_path: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 编译配置 ---
    pub compile_template: String,
    pub compile_font_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            storage_path: default_storage_path(),
            verbose_logging: false,
            compile_template: "modern-1".to_string(),
            compile_font_size: 11,
        }
    }
}

/// 配置文件中的可选字段，缺省的字段沿用默认值
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    storage_path: Option<PathBuf>,
    verbose_logging: Option<bool>,
    compile_template: Option<String>,
    compile_font_size: Option<u32>,
}

impl Config {
    /// 加载配置：默认值 → 配置文件（`CV_CONFIG_FILE`）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("CV_CONFIG_FILE") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_env()
    }

    /// 只使用环境变量覆盖默认值
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env()
    }

    /// 从 TOML 文件读取配置
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &Path) -> AppResult<Self> {
        let file: FileConfig = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;

        let default = Self::default();
        Ok(Self {
            api_base_url: file.api_base_url.unwrap_or(default.api_base_url),
            storage_path: file.storage_path.unwrap_or(default.storage_path),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            compile_template: file.compile_template.unwrap_or(default.compile_template),
            compile_font_size: file.compile_font_size.unwrap_or(default.compile_font_size),
        })
    }

    fn with_env(self) -> AppResult<Self> {
        Ok(Self {
            api_base_url: std::env::var("CV_API_URL").unwrap_or(self.api_base_url),
            storage_path: std::env::var("CV_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(self.storage_path),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            compile_template: std::env::var("CV_COMPILE_TEMPLATE").unwrap_or(self.compile_template),
            compile_font_size: parse_env("CV_COMPILE_FONT_SIZE", "u32")?
                .unwrap_or(self.compile_font_size),
        })
    }
}

/// 解析环境变量；变量不存在返回 None，值非法返回错误
fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cv-builder")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_overrides_only_given_fields() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://cv.example.com"
            compile_font_size = 12
            "#,
            Path::new("cv.toml"),
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://cv.example.com");
        assert_eq!(config.compile_font_size, 12);
        assert_eq!(config.compile_template, "modern-1");
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = Config::from_toml_str("compile_font_size = \"big\"", Path::new("cv.toml"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }
}
