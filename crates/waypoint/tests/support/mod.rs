//! 集成测试共享的导航控制器替身。
//!
//! # 教案式说明
//! - **意图 (Why)**：分发器与外观层的行为只能通过“控制器收到了哪些调用”来观测，
//!   因此替身按顺序记录每一次调用，并允许用例注入 `can_go_back`、失败与父级导航器；
//! - **契约 (What)**：测试必须自行持有 [`RecordingHandle::as_dyn`] 返回的 `Arc`，
//!   注册表只保存弱引用，`Arc` 被释放后句柄即视为缺失。
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde_json::Value;
use waypoint::{
    CurrentRoute, HandleError, NavigationAction, NavigationContext, NavigationHandle, NoopLogger,
    RuntimeOptions,
};

/// 控制器收到的一次调用。
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Navigate { name: String, params: Option<Value> },
    Push { name: String, params: Option<Value> },
    GoBack,
    Dispatch(NavigationAction),
}

impl Call {
    pub fn navigate(name: &str, params: Option<Value>) -> Self {
        Call::Navigate {
            name: name.to_owned(),
            params,
        }
    }

    pub fn push(name: &str, params: Option<Value>) -> Self {
        Call::Push {
            name: name.to_owned(),
            params,
        }
    }
}

/// 按顺序记录调用的控制器替身。
#[derive(Default)]
pub struct RecordingHandle {
    calls: Mutex<Vec<Call>>,
    can_go_back: AtomicBool,
    fail_go_back: AtomicBool,
    fail_navigate: AtomicBool,
    panic_on_push: AtomicBool,
    parent: Mutex<Option<Arc<dyn NavigationHandle>>>,
    current: Mutex<Option<CurrentRoute>>,
}

impl RecordingHandle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn as_dyn(self: &Arc<Self>) -> Arc<dyn NavigationHandle> {
        Arc::clone(self) as Arc<dyn NavigationHandle>
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn set_can_go_back(&self, value: bool) {
        self.can_go_back.store(value, Ordering::SeqCst);
    }

    pub fn fail_go_back(&self) {
        self.fail_go_back.store(true, Ordering::SeqCst);
    }

    pub fn fail_navigate(&self) {
        self.fail_navigate.store(true, Ordering::SeqCst);
    }

    pub fn panic_on_push(&self) {
        self.panic_on_push.store(true, Ordering::SeqCst);
    }

    pub fn set_parent(&self, parent: Arc<dyn NavigationHandle>) {
        *self.parent.lock() = Some(parent);
    }

    pub fn set_current_route(&self, route: Option<CurrentRoute>) {
        *self.current.lock() = route;
    }
}

impl NavigationHandle for RecordingHandle {
    fn navigate(&self, name: &str, params: Option<&Value>) -> Result<(), HandleError> {
        self.calls.lock().push(Call::navigate(name, params.cloned()));
        if self.fail_navigate.load(Ordering::SeqCst) {
            return Err(HandleError::new("navigator rejected the route"));
        }
        Ok(())
    }

    fn push(&self, name: &str, params: Option<&Value>) -> Result<(), HandleError> {
        self.calls.lock().push(Call::push(name, params.cloned()));
        if self.panic_on_push.load(Ordering::SeqCst) {
            panic!("push exploded inside the controller");
        }
        Ok(())
    }

    fn go_back(&self) -> Result<(), HandleError> {
        self.calls.lock().push(Call::GoBack);
        if self.fail_go_back.load(Ordering::SeqCst) {
            return Err(HandleError::new("go back failed"));
        }
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.can_go_back.load(Ordering::SeqCst)
    }

    fn dispatch(&self, action: NavigationAction) -> Result<(), HandleError> {
        self.calls.lock().push(Call::Dispatch(action));
        Ok(())
    }

    fn current_route(&self) -> Option<CurrentRoute> {
        self.current.lock().clone()
    }

    fn parent(&self) -> Option<Arc<dyn NavigationHandle>> {
        self.parent.lock().clone()
    }
}

/// 构造诊断关闭的全新上下文。
pub fn quiet_context() -> NavigationContext {
    NavigationContext::with_options(
        Arc::new(NoopLogger),
        RuntimeOptions {
            enable_dev_logs: false,
            ..RuntimeOptions::default()
        },
    )
}
