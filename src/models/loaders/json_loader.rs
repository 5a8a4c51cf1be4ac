use crate::error::{AppResult, SourceError};
use crate::models::work_item::WorkItemRecord;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 数据集来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// 本地 JSON 文件
    File(PathBuf),
    /// 通过 HTTP GET 获取的静态文件
    Http(String),
}

impl DataSource {
    /// 根据配置字符串判断来源类型
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Http(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Http(url) => write!(f, "{}", url),
        }
    }
}

/// 从数据源加载全部工作项
pub async fn load_work_items(source: &DataSource) -> AppResult<Vec<WorkItemRecord>> {
    match source {
        DataSource::File(path) => load_json_file(path).await,
        DataSource::Http(url) => fetch_json(url).await,
    }
}

/// 从本地 JSON 文件加载工作项列表
pub async fn load_json_file(path: &Path) -> AppResult<Vec<WorkItemRecord>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| SourceError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;

    let records = parse_work_items(&content, &path.display().to_string())?;
    tracing::debug!("从 {} 解析出 {} 条工作项", path.display(), records.len());
    Ok(records)
}

/// 通过 HTTP 获取工作项列表
pub async fn fetch_json(url: &str) -> AppResult<Vec<WorkItemRecord>> {
    let request_failed = |e: reqwest::Error| SourceError::RequestFailed {
        url: url.to_string(),
        source: e,
    };

    let body = reqwest::get(url)
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(request_failed)?
        .text()
        .await
        .map_err(request_failed)?;

    parse_work_items(&body, url)
}

/// 解析 JSON 数组
pub fn parse_work_items(content: &str, location: &str) -> AppResult<Vec<WorkItemRecord>> {
    let records = serde_json::from_str(content).map_err(|e| SourceError::ParseFailed {
        location: location.to_string(),
        source: e,
    })?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_source() {
        assert_eq!(
            DataSource::parse("https://host/assets/data/work_item_details.json"),
            DataSource::Http("https://host/assets/data/work_item_details.json".to_string())
        );
        assert_eq!(
            DataSource::parse("assets/data/work_item_details.json"),
            DataSource::File(PathBuf::from("assets/data/work_item_details.json"))
        );
    }

    #[test]
    fn test_parse_work_items_keeps_order() {
        let records = parse_work_items(
            r#"[{"CosmicWorkItem":{"ItemId":"B"}},{"CosmicWorkItem":{"ItemId":"A"}}]"#,
            "inline",
        )
        .unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.item_id()).collect();
        assert_eq!(ids, vec![Some("B"), Some("A")]);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_work_items(r#"{"CosmicWorkItem":{}}"#, "inline").unwrap_err();
        assert!(err.is_source_unavailable());
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let source = DataSource::File(PathBuf::from("definitely/not/here.json"));
        let err = load_work_items(&source).await.unwrap_err();
        assert!(err.is_source_unavailable());
    }
}
