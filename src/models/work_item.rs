use serde::{Deserialize, Serialize};
use std::fmt;

/// 缺失字段的统一占位文本
pub const PLACEHOLDER: &str = "N/A";

/// 单条工作项记录
///
/// 对应数据文件中的一个对象，四个部分都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItemRecord {
    #[serde(rename = "CosmicWorkItem", default)]
    pub details: Option<WorkItemDetails>,
    #[serde(rename = "WorkItemNotes", default)]
    pub notes: Option<Vec<WorkItemNote>>,
    #[serde(rename = "WorkItemAttachments", default)]
    pub attachments: Option<Vec<WorkItemAttachment>>,
    #[serde(rename = "WorkItemAuditHistory", default)]
    pub audit_history: Option<Vec<AuditEvent>>,
}

impl WorkItemRecord {
    /// 用于查找的 ItemId
    ///
    /// 只有数据中的字符串 ItemId 参与匹配，数字等其他取值只用于显示
    pub fn item_id(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.item_id.as_ref())
            .and_then(ItemId::lookup_key)
    }
}

/// 工作项基本信息（CosmicWorkItem）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkItemDetails {
    #[serde(default, deserialize_with = "deserialize_item_id")]
    pub item_id: Option<ItemId>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub item_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub sending_bank: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub step: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub parent_case_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub sharing_category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub business_unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub type_of_risk: Option<String>,
}

impl WorkItemDetails {
    /// 按固定顺序返回 (标签, 值) 列表
    pub fn fields(&self) -> [(&'static str, Option<&str>); 9] {
        [
            ("ItemId", self.item_id.as_ref().map(ItemId::as_str)),
            ("ItemDate", self.item_date.as_deref()),
            ("SendingBank", self.sending_bank.as_deref()),
            ("Step", self.step.as_deref()),
            ("Owner", self.owner.as_deref()),
            ("ParentCaseId", self.parent_case_id.as_deref()),
            ("SharingCategory", self.sharing_category.as_deref()),
            ("BusinessUnit", self.business_unit.as_deref()),
            ("TypeOfRisk", self.type_of_risk.as_deref()),
        ]
    }
}

/// 工作项备注
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkItemNote {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub note_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub entered_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub related_action: Option<String>,
}

/// 工作项附件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkItemAttachment {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub attach_date: Option<String>,
    #[serde(rename = "SizeKB", default, deserialize_with = "deserialize_size")]
    pub size_kb: Option<SizeKb>,
}

/// 审计记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuditEvent {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub performed_by: Option<String>,
}

/// 数据中的 ItemId
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemId {
    /// 字符串，可以被查找
    Text(String),
    /// 数字或布尔值的显示文本，不参与查找
    Other(String),
}

impl ItemId {
    pub fn as_str(&self) -> &str {
        match self {
            ItemId::Text(s) | ItemId::Other(s) => s,
        }
    }

    pub fn lookup_key(&self) -> Option<&str> {
        match self {
            ItemId::Text(s) => Some(s),
            ItemId::Other(_) => None,
        }
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Text(value)
    }
}

/// 附件大小，数据源里既有数字也有字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeKb {
    Number(f64),
    Text(String),
}

impl SizeKb {
    /// 渲染用文本，0 / NaN / 空串视为缺失
    ///
    /// 数字用 Rust 的最短十进制形式（`245`、`88.5`），不会切换成指数形式
    pub fn display_text(&self) -> Option<String> {
        match self {
            SizeKb::Number(n) if *n == 0.0 || n.is_nan() => None,
            SizeKb::Number(n) => Some(n.to_string()),
            SizeKb::Text(s) if s.is_empty() => None,
            SizeKb::Text(s) => Some(s.clone()),
        }
    }
}

/// 取值或占位符
pub fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn deserialize_item_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    if let serde_json::Value::String(s) = value {
        return Ok((!s.is_empty()).then(|| ItemId::Text(s)));
    }
    let text = deserialize_text(value).map_err(D::Error::custom)?;
    Ok(text.map(ItemId::Other))
}

// 附件大小：数字保持数字，true 显示为 "true"，其余形状视为缺失
fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<SizeKb>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(SizeKb::Number),
        Value::String(s) => Some(SizeKb::Text(s)),
        Value::Bool(true) => Some(SizeKb::Text("true".to_string())),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

// 标量字段既可能是字符串也可能是数字/布尔值，空串、0、false 与 null 一律视为缺失
// 对象和数组不是可显示的标量，同样视为缺失，不让整个数据集解析失败
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a JSON value")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value.to_string()))
            }
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value == 0.0 || value.is_nan() {
                Ok(None)
            } else {
                Ok(Some(value.to_string()))
            }
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.then(|| "true".to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
