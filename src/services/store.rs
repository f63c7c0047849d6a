// src/services/store.rs
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{core::error::AppError, dtos::user::UserRecord};

/// 用户记录存储能力。当前只有内存实现，后续的持久化后端实现这个 trait 即可替换。
///
/// 所有方法都必须可以被多个线程并发调用，调用方无需额外加锁。
/// 单个操作是原子的；跨操作（先查后写）不保证原子性。
pub trait UserStore: Send + Sync {
    /// 按 id 插入或覆盖。id 为空时返回 `InvalidArgument`。
    fn save(&self, record: UserRecord) -> Result<UserRecord, AppError>;

    /// id 为空或不存在时返回 `None`，不视为错误。
    fn find_by_id(&self, id: &str) -> Option<UserRecord>;

    /// 当前全部记录的快照，顺序不保证。
    fn find_all(&self) -> Vec<UserRecord>;

    /// 覆盖已存在的记录。记录不存在时返回 `InvalidArgument`。
    fn update(&self, record: UserRecord) -> Result<UserRecord, AppError>;

    /// 删除成功返回 true；id 为空或不存在返回 false。
    fn delete_by_id(&self, id: &str) -> bool;

    fn exists_by_id(&self, id: &str) -> bool;
}

/// 基于 `RwLock<HashMap>` 的内存存储，数据只在进程生命周期内有效。
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_blank(id: &str) -> bool {
    id.trim().is_empty()
}

// 每次写操作只有一次 insert / remove，持锁期间不会留下半写状态，
// 因此锁中毒后继续使用内部数据是安全的。
impl UserStore for InMemoryUserStore {
    fn save(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        if is_blank(&record.id) {
            return Err(AppError::InvalidArgument("user id must not be blank".to_string()));
        }

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        users.insert(record.id.clone(), record.clone());

        tracing::debug!(user_id = %record.id, "💾 Saved user");
        Ok(record)
    }

    fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        if is_blank(id) {
            return None;
        }
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(id).cloned()
    }

    fn find_all(&self) -> Vec<UserRecord> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.values().cloned().collect()
    }

    fn update(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);

        // 存在性检查与写入在同一把写锁内完成
        let Some(slot) = users.get_mut(&record.id) else {
            return Err(AppError::InvalidArgument(format!(
                "user with id {} does not exist",
                record.id
            )));
        };
        *slot = record.clone();

        tracing::debug!(user_id = %record.id, "🔄 Updated user");
        Ok(record)
    }

    fn delete_by_id(&self, id: &str) -> bool {
        if is_blank(id) {
            return false;
        }
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        users.remove(id).is_some()
    }

    fn exists_by_id(&self, id: &str) -> bool {
        if is_blank(id) {
            return false;
        }
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.contains_key(id)
    }
}
