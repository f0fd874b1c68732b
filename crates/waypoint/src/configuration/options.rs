use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// 校验缓存的默认容量。
pub const DEFAULT_MAX_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// 运行时开关。
///
/// # 契约说明（What）
/// - 默认值：`enable_cache = true`、`max_cache_size = 100`、`enable_validation = true`，
///   `enable_dev_logs` 跟随构建模式（debug 构建开启，release 构建关闭）；
/// - `max_cache_size` 恒大于零，反序列化时拒绝 `0`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeOptions {
    pub enable_cache: bool,
    pub max_cache_size: NonZeroUsize,
    pub enable_validation: bool,
    pub enable_dev_logs: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            enable_cache: true,
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
            enable_validation: true,
            enable_dev_logs: cfg!(debug_assertions),
        }
    }
}

/// [`RuntimeOptions`] 的部分更新。
///
/// - **契约 (What)**：值为 `None` 的字段保留旧值；补丁可以从 JSON/TOML 片段反序列化。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeOptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cache_size: Option<NonZeroUsize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_validation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dev_logs: Option<bool>,
}

impl RuntimeOptionsPatch {
    pub fn enable_cache(mut self, enabled: bool) -> Self {
        self.enable_cache = Some(enabled);
        self
    }

    /// 设置缓存容量；`0` 不是合法容量，此时补丁保持不变。
    pub fn max_cache_size(mut self, size: usize) -> Self {
        if let Some(size) = NonZeroUsize::new(size) {
            self.max_cache_size = Some(size);
        }
        self
    }

    pub fn enable_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = Some(enabled);
        self
    }

    pub fn enable_dev_logs(mut self, enabled: bool) -> Self {
        self.enable_dev_logs = Some(enabled);
        self
    }

    /// 以 `base` 为底叠加补丁。
    pub fn apply(&self, base: &RuntimeOptions) -> RuntimeOptions {
        RuntimeOptions {
            enable_cache: self.enable_cache.unwrap_or(base.enable_cache),
            max_cache_size: self.max_cache_size.unwrap_or(base.max_cache_size),
            enable_validation: self.enable_validation.unwrap_or(base.enable_validation),
            enable_dev_logs: self.enable_dev_logs.unwrap_or(base.enable_dev_logs),
        }
    }
}
