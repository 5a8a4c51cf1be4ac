use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件名（存在时自动加载）
pub const DEFAULT_CONFIG_FILE: &str = "viewer.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据源：本地 JSON 文件路径或 http(s) 地址
    pub data_source: String,
    /// PDF 输出目录
    pub output_dir: String,
    /// 字体目录（None 时搜索系统目录）
    pub font_dir: Option<String>,
    /// 是否启用分页（默认关闭，保持单页输出）
    pub paginate: bool,
    /// 导出日志文件
    pub export_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: "assets/data/work_item_details.json".to_string(),
            output_dir: ".".to_string(),
            font_dir: None,
            paginate: false,
            export_log_file: "export_log.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件 → 环境变量
    ///
    /// 未指定文件时，若当前目录下存在 `viewer.toml` 则加载它
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        base.with_env()
    }

    /// 从 TOML 文件加载，缺失的字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        let config = toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source: e,
        })?;
        Ok(config)
    }

    fn with_env(self) -> AppResult<Self> {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars(self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            data_source: lookup("WORK_ITEM_SOURCE").unwrap_or(self.data_source),
            output_dir: lookup("OUTPUT_DIR").unwrap_or(self.output_dir),
            font_dir: lookup("FONT_DIR").or(self.font_dir),
            paginate: parse_bool(&lookup, "PAGINATE_PDF")?.unwrap_or(self.paginate),
            export_log_file: lookup("EXPORT_LOG_FILE").unwrap_or(self.export_log_file),
            verbose_logging: parse_bool(&lookup, "VERBOSE_LOGGING")?
                .unwrap_or(self.verbose_logging),
        })
    }
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, var_name: &str) -> AppResult<Option<bool>> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: "bool".to_string(),
            }
            .into()),
        },
    }
}
