use serde::{Deserialize, Serialize};
use std::fmt;

/// 段落类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurbType {
    /// 个人简介
    Summary,
    /// 技能
    Skills,
    /// 求职动机
    Motivation,
    /// 结束语
    Closing,
}

impl BlurbType {
    /// 全部类型，按页面上的显示顺序
    pub const ALL: [BlurbType; 4] = [
        BlurbType::Summary,
        BlurbType::Skills,
        BlurbType::Motivation,
        BlurbType::Closing,
    ];

    /// 线上格式的名称
    pub fn as_str(self) -> &'static str {
        match self {
            BlurbType::Summary => "summary",
            BlurbType::Skills => "skills",
            BlurbType::Motivation => "motivation",
            BlurbType::Closing => "closing",
        }
    }

    /// 显示名称
    pub fn label(self) -> &'static str {
        match self {
            BlurbType::Summary => "Summary",
            BlurbType::Skills => "Skills",
            BlurbType::Motivation => "Motivation",
            BlurbType::Closing => "Closing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Some(BlurbType::Summary),
            "skills" => Some(BlurbType::Skills),
            "motivation" => Some(BlurbType::Motivation),
            "closing" => Some(BlurbType::Closing),
            _ => None,
        }
    }
}

impl fmt::Display for BlurbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生成模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlurbMode {
    /// 从头生成
    #[default]
    Full,
    /// 改写现有内容
    Modify,
    /// 只检查语法
    DoubleCheck,
}

impl BlurbMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BlurbMode::Full => "full",
            BlurbMode::Modify => "modify",
            BlurbMode::DoubleCheck => "double-check",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" => Some(BlurbMode::Full),
            "modify" => Some(BlurbMode::Modify),
            "double-check" | "doublecheck" => Some(BlurbMode::DoubleCheck),
            _ => None,
        }
    }
}

impl fmt::Display for BlurbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已保存的段落
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blurb {
    pub id: String,
    #[serde(rename = "type")]
    pub blurb_type: BlurbType,
    pub content: String,
    #[serde(default)]
    pub job_description_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// 保存段落的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlurb {
    #[serde(rename = "type")]
    pub blurb_type: BlurbType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description_id: Option<String>,
}

/// 生成段落的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBlurbRequest {
    #[serde(rename = "type")]
    pub blurb_type: BlurbType,
    pub mode: BlurbMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_blurb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBlurbResponse {
    pub generated_blurb: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_request_omits_absent_fields() {
        let req = GenerateBlurbRequest {
            blurb_type: BlurbType::Motivation,
            mode: BlurbMode::DoubleCheck,
            previous_blurb: None,
            job_description_id: Some("job-1".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "motivation", "mode": "double-check", "jobDescriptionId": "job-1"})
        );
    }

    #[test]
    fn test_blurb_null_job_link_is_none() {
        let blurb: Blurb = serde_json::from_value(json!({
            "id": "b1",
            "type": "closing",
            "content": "Kind regards.",
            "jobDescriptionId": null
        }))
        .unwrap();
        assert_eq!(blurb.blurb_type, BlurbType::Closing);
        assert_eq!(blurb.job_description_id, None);
        // 未关联职位时显式写出 null
        assert_eq!(serde_json::to_value(&blurb).unwrap()["jobDescriptionId"], json!(null));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(BlurbType::parse(" Skills "), Some(BlurbType::Skills));
        assert_eq!(BlurbType::parse("cover"), None);
        assert_eq!(BlurbMode::parse("double-check"), Some(BlurbMode::DoubleCheck));
        assert_eq!(BlurbMode::default(), BlurbMode::Full);
    }
}
