//! 工作项存储 - 业务能力层
//!
//! 持有最近一次成功加载的工作项集合，只提供"加载"和"按 ItemId 查找"两种能力

use crate::error::AppResult;
use crate::models::{load_work_items, DataSource, WorkItemRecord};
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作项存储
///
/// 职责：
/// - 从数据源整体加载工作项（不做增量更新）
/// - 加载失败时保留原有集合
/// - 查找时不等待加载完成
#[derive(Clone)]
pub struct WorkItemStore {
    source: DataSource,
    records: Arc<RwLock<Arc<Vec<WorkItemRecord>>>>,
}

impl WorkItemStore {
    /// 创建空的存储
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            records: Arc::new(RwLock::new(Arc::new(Vec::new()))),
        }
    }

    /// 使用已有集合创建存储
    pub fn with_records(source: DataSource, records: Vec<WorkItemRecord>) -> Self {
        Self {
            source,
            records: Arc::new(RwLock::new(Arc::new(records))),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// 从数据源读取全部工作项，成功后整体替换当前集合
    ///
    /// # 返回
    /// 返回加载到的记录数；失败时集合保持不变
    pub async fn load_all(&self) -> AppResult<usize> {
        let loaded = load_work_items(&self.source).await?;
        let count = loaded.len();
        self.replace(loaded);
        Ok(count)
    }

    /// 在后台加载，不阻塞调用方
    pub fn spawn_load(&self) -> JoinHandle<AppResult<usize>> {
        let store = self.clone();
        tokio::spawn(async move {
            match store.load_all().await {
                Ok(count) => {
                    info!("✓ 已加载 {} 条工作项 ({})", count, store.source);
                    Ok(count)
                }
                Err(e) => {
                    error!("❌ 加载工作项失败: {}", e);
                    Err(e)
                }
            }
        })
    }

    /// 当前集合的快照
    pub fn snapshot(&self) -> Arc<Vec<WorkItemRecord>> {
        let guard = self.records.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// 当前记录数
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 在当前集合中查找
    pub fn find(&self, item_id: &str) -> Option<WorkItemRecord> {
        let records = self.snapshot();
        find_by_id(item_id, &records).cloned()
    }

    fn replace(&self, records: Vec<WorkItemRecord>) {
        let mut guard = self.records.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(records);
    }
}

/// 按 ItemId 精确查找（区分大小写，不去空格），返回第一条匹配
pub fn find_by_id<'a>(item_id: &str, records: &'a [WorkItemRecord]) -> Option<&'a WorkItemRecord> {
    if item_id.is_empty() {
        return None;
    }
    records.iter().find(|r| r.item_id() == Some(item_id))
}
