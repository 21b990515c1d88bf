use serde::{Deserialize, Serialize};

/// 经历类别
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceCategory {
    #[default]
    Work,
    Education,
    Hobby,
}

/// 一段经历
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    #[serde(flatten)]
    pub data: ExperienceData,
}

/// 经历的可编辑字段（新增和更新时的请求体）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceData {
    pub category: ExperienceCategory,
    pub title: String,
    pub organization: String,
    pub start_date: String,
    /// 仍在进行中时为 None，序列化为 null
    #[serde(default)]
    pub end_date: Option<String>,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ongoing_experience_keeps_null_end_date() {
        let exp: Experience = serde_json::from_value(json!({
            "id": "e1",
            "category": "education",
            "title": "MSc Computer Science",
            "organization": "ETH",
            "startDate": "2019-09",
            "endDate": null,
            "description": "",
            "keywords": ["rust"]
        }))
        .unwrap();

        assert_eq!(exp.data.category, ExperienceCategory::Education);
        assert_eq!(exp.data.end_date, None);

        let back = serde_json::to_value(&exp).unwrap();
        assert_eq!(back["endDate"], json!(null));
        assert_eq!(back["id"], "e1");
    }
}
