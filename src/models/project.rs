use serde::{Deserialize, Serialize};

/// 项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(flatten)]
    pub data: ProjectData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}
