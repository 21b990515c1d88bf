use serde::{Deserialize, Serialize};

/// 编译请求：模板、字号和选中的条目 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    pub template: String,
    pub font_size: u32,
    pub blurb_ids: Vec<String>,
    pub experience_ids: Vec<String>,
    pub project_ids: Vec<String>,
}

/// 编译结果，`pdf_url` 是相对于 API 根地址的路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    pub pdf_url: String,
}

impl CompileResponse {
    /// 路径中的文件名部分，用于下载 PDF 和 .tex 源码
    pub fn file_name(&self) -> Option<&str> {
        self.pdf_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// 同名 .tex 源码的文件名
    pub fn tex_file_name(&self) -> Option<String> {
        let name = self.file_name()?;
        let stem = name.strip_suffix(".pdf").unwrap_or(name);
        Some(format!("{}.tex", stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_from_pdf_url() {
        let res = CompileResponse {
            pdf_url: "/latex/download/cv-42.pdf".to_string(),
        };
        assert_eq!(res.file_name(), Some("cv-42.pdf"));
        assert_eq!(res.tex_file_name().as_deref(), Some("cv-42.tex"));

        let res = CompileResponse {
            pdf_url: "/latex/download/".to_string(),
        };
        assert_eq!(res.file_name(), None);
    }

    #[test]
    fn test_request_is_camel_case() {
        let req = CompileRequest {
            template: "modern-1".to_string(),
            font_size: 11,
            blurb_ids: vec!["b1".to_string()],
            experience_ids: vec![],
            project_ids: vec![],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fontSize"], 11);
        assert_eq!(json["blurbIds"][0], "b1");
    }
}
