//! 导航句柄注册表。
//!
//! # 设计缘起（Why）
//! - 整个应用只有一个“当前导航控制器”，它由应用根节点在挂载时创建、卸载时销毁；
//! - 分发路径上的任何调用都必须先确认句柄存活，且底层失败绝不能冒泡到调用方。
//!
//! # 契约约束（What）
//! - 注册表只持有 [`Weak`] 引用，所有者释放后句柄视为缺失；
//! - [`HandleRegistry::execute_guarded`] 在一次调用期间只升级一次弱引用，动作看到的是同一个句柄快照；
//! - 清理回调按注册顺序执行，每个回调单独隔离，单个回调 panic 不影响后续回调。

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::error::{HandleError, NavigationError};
use crate::handle::NavigationHandle;
use crate::observability::Diagnostics;

const TARGET: &str = "waypoint::registry";

type CleanupCallback = Box<dyn FnOnce() + Send + 'static>;

/// 清理回调的注册凭据，用于 [`HandleRegistry::remove_cleanup_callback`]。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CleanupCallbackId(u64);

/// 进程内唯一的导航句柄持有者。
///
/// # 教案式说明
/// - **意图 (Why)**：把“句柄是否存在”的判断与“调用失败不外泄”的边界集中在一处，
///   分发器只需提供动作闭包；
/// - **结构 (How)**：
///   - `handle`：`RwLock<Option<Weak<..>>>`，读多写少，锁只在升级期间持有，动作执行时已释放；
///   - `callbacks`：按注册顺序保存的清理回调；
///   - `diagnostics`：受 `enable_dev_logs` 门控的诊断通道。
/// - **契约 (What)**：
///   - `set_handle` 无条件替换，不触发任何回调；
///   - `cleanup` 幂等：回调执行一次后清空，句柄被清除。
pub struct HandleRegistry {
    handle: RwLock<Option<Weak<dyn NavigationHandle>>>,
    callbacks: Mutex<Vec<(CleanupCallbackId, CleanupCallback)>>,
    next_callback_id: AtomicU64,
    diagnostics: Diagnostics,
}

impl HandleRegistry {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            handle: RwLock::new(None),
            callbacks: Mutex::new(Vec::new()),
            next_callback_id: AtomicU64::new(0),
            diagnostics,
        }
    }

    /// 替换当前句柄；传入 `None` 等价于清除。
    pub fn set_handle(&self, handle: Option<&Arc<dyn NavigationHandle>>) {
        let weak = handle.map(Arc::downgrade);
        let attached = weak.is_some();
        *self.handle.write() = weak;
        self.diagnostics.info(
            TARGET,
            if attached {
                "navigation handle attached"
            } else {
                "navigation handle cleared"
            },
            &[],
        );
    }

    /// 当前存活的句柄。
    pub fn handle(&self) -> Option<Arc<dyn NavigationHandle>> {
        self.handle.read().as_ref().and_then(Weak::upgrade)
    }

    /// 是否持有存活的句柄。
    pub fn is_ready(&self) -> bool {
        self.handle().is_some()
    }

    /// 句柄存活且控制器自身报告已完成挂载。
    pub fn is_controller_ready(&self) -> bool {
        self.handle().is_some_and(|handle| handle.is_ready())
    }

    /// 受保护地对当前句柄执行一次动作。
    ///
    /// # 教案式说明
    /// - **输入 (What)**：`operation` 为日志中的操作名；`action` 接收本次调用的句柄快照；
    /// - **流程 (How)**：
    ///   1. 升级弱引用，失败则记录 `HandleUnavailable` 并返回 `None`，`action` 不会被调用；
    ///   2. 在 `catch_unwind` 中执行 `action`；
    ///   3. `Err` 与 panic 都折算为 `DispatchFailure` 记录后返回 `None`；
    /// - **契约 (What)**：本方法既不返回错误也不 panic，`Some` 表示动作成功完成。
    pub fn execute_guarded<T, F>(&self, operation: &'static str, action: F) -> Option<T>
    where
        F: FnOnce(&dyn NavigationHandle) -> Result<T, HandleError>,
    {
        let Some(handle) = self.handle() else {
            let error = NavigationError::HandleUnavailable;
            self.diagnostics.warn(
                TARGET,
                "navigation reference is not available",
                &[("operation", operation), ("code", error.code())],
            );
            return None;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| action(handle.as_ref())));
        let detail = match outcome {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(error)) => error.to_string(),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };
        let error = NavigationError::dispatch_failure(operation, detail);
        self.diagnostics.error(
            TARGET,
            "navigation action failed",
            &error,
            &[("operation", operation), ("code", error.code())],
        );
        None
    }

    /// 对当前句柄执行只读查询；无句柄或查询 panic 时返回 `None`。
    pub fn with_handle<T, F>(&self, query: F) -> Option<T>
    where
        F: FnOnce(&dyn NavigationHandle) -> T,
    {
        let handle = self.handle()?;
        match panic::catch_unwind(AssertUnwindSafe(|| query(handle.as_ref()))) {
            Ok(value) => Some(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.diagnostics.warn(
                    TARGET,
                    "navigation query panicked",
                    &[("panic", message.as_str())],
                );
                None
            }
        }
    }

    /// 注册一个在 [`Self::cleanup`] 时执行的回调。
    pub fn add_cleanup_callback<F>(&self, callback: F) -> CleanupCallbackId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = CleanupCallbackId(self.next_callback_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.lock().push((id, Box::new(callback)));
        id
    }

    /// 注销回调；返回该凭据是否仍处于注册状态。
    pub fn remove_cleanup_callback(&self, id: CleanupCallbackId) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(registered, _)| *registered != id);
        callbacks.len() != before
    }

    /// 当前已注册的回调数量。
    pub fn cleanup_callback_count(&self) -> usize {
        self.callbacks.lock().len()
    }

    /// 按注册顺序执行全部清理回调，随后清空回调列表并清除句柄。
    ///
    /// - 回调在锁外执行，回调内部可以安全地再次访问注册表；
    /// - 返回时回调列表必为空：回调执行期间新注册的回调不会执行，随列表一并丢弃。
    pub fn cleanup(&self) {
        let callbacks = std::mem::take(&mut *self.callbacks.lock());
        for (id, callback) in callbacks {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
                let message = panic_message(payload.as_ref());
                let id = id.0.to_string();
                self.diagnostics.warn(
                    TARGET,
                    "cleanup callback panicked",
                    &[("callback", id.as_str()), ("panic", message.as_str())],
                );
            }
        }
        let discarded = std::mem::take(&mut *self.callbacks.lock());
        drop(discarded);
        *self.handle.write() = None;
    }
}

impl std::fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("ready", &self.is_ready())
            .field("cleanup_callbacks", &self.cleanup_callback_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_owned()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}
