use std::sync::Arc;

use crate::services::{
    store::{InMemoryUserStore, UserStore},
    user::UserManager,
};

/// 各处理器共享的状态，克隆只复制内部的 Arc。
#[derive(Clone)]
pub struct AppState {
    pub users: UserManager,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserManager::new(store),
        }
    }

    /// 使用进程内的内存存储构建状态，数据随进程退出而丢失。
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()))
    }
}
