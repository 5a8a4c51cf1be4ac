use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源错误（SourceUnavailable）
    #[error("数据源错误: {0}")]
    Source(#[from] SourceError),
    /// 查找错误（NotFound）
    #[error("{0}")]
    Lookup(#[from] LookupError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 数据源无法读取或解析
#[derive(Debug, Error)]
pub enum SourceError {
    /// 读取文件失败
    #[error("读取数据文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// HTTP 请求失败
    #[error("请求数据失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({location}): {source}")]
    ParseFailed {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 查找失败
#[derive(Debug, Error)]
pub enum LookupError {
    /// 没有匹配的 ItemId
    #[error("ItemId not found!")]
    NotFound { item_id: String },
    /// 还没有预览任何记录就尝试导出
    #[error("没有已选中的工作项，请先预览")]
    NothingSelected,
}

/// 导出 PDF 失败
#[derive(Debug, Error)]
pub enum ExportError {
    /// 找不到字体文件
    #[error("找不到可用字体，已搜索: {searched:?}")]
    FontUnavailable { searched: Vec<String> },
    /// genpdf 渲染失败
    #[error("PDF渲染失败: {message}")]
    RenderFailed { message: String },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 NotFound 错误
    pub fn not_found(item_id: impl Into<String>) -> Self {
        AppError::Lookup(LookupError::NotFound {
            item_id: item_id.into(),
        })
    }

    /// 是否为 NotFound
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Lookup(LookupError::NotFound { .. }))
    }

    /// 是否为数据源不可用
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, AppError::Source(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
