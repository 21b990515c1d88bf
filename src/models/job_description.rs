use serde::{Deserialize, Serialize};

/// 目标职位描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: String,
    #[serde(flatten)]
    pub data: JobDescriptionData,
    /// 尚未分析时为 None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<JobAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionData {
    pub title: String,
    pub company: String,
    pub description: String,
}

/// 职位分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub seniority_level: String,
}
