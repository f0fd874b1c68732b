use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

/// 标识符校验结果的有界缓存。
///
/// # 教案式说明
/// - **意图 (Why)**：同一批路由名会被反复校验，缓存正则匹配结果；
/// - **契约 (What)**：
///   - 以原始字符串为键，值为校验结论；
///   - 容量由调用方在插入时给出（来自 `RuntimeOptions::max_cache_size`），
///     达到容量后淘汰最早插入的条目（插入序 FIFO，读取不会刷新顺序）；
///   - 已存在的键被再次插入时只更新值，不改变其淘汰顺序。
/// - **执行 (How)**：`HashMap` 存值、`VecDeque` 记录插入顺序，两者由同一把
///   `parking_lot::Mutex` 保护。
#[derive(Debug, Default)]
pub struct ValidationCache {
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, bool>,
    order: VecDeque<String>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.state.lock().entries.get(key).copied()
    }

    /// 写入一条结论，必要时先淘汰最早的条目，使条目数不超过 `capacity`。
    pub fn insert(&self, key: &str, valid: bool, capacity: usize) {
        if capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if let Some(slot) = state.entries.get_mut(key) {
            *slot = valid;
            return;
        }
        while state.order.len() >= capacity {
            match state.order.pop_front() {
                Some(oldest) => {
                    state.entries.remove(&oldest);
                }
                None => break,
            }
        }
        state.order.push_back(key.to_owned());
        state.entries.insert(key.to_owned(), valid);
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order.clear();
    }
}
