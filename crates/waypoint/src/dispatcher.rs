//! 受校验、受保护的导航动作分发。
//!
//! # 设计缘起（Why）
//! - 导航对调用方而言是“尽力而为”：调用方只关心是否成功，不应为了重试而捕获异常；
//! - 每个操作先经过 [`InputValidator`] 闸门，再经过 [`HandleRegistry`] 守卫，最后才触达控制器。
//!
//! # 契约约束（What）
//! - 所有操作返回 `bool`，校验失败、句柄缺失、控制器失败都折算为 `false`；
//! - 校验失败时不会访问句柄；
//! - 依赖方向单一：分发器只依赖校验器与注册表，不依赖外观层。

use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::NavigationError;
use crate::handle::NavigationAction;
use crate::observability::Diagnostics;
use crate::registry::HandleRegistry;
use crate::validator::InputValidator;

const TARGET: &str = "waypoint::dispatcher";

/// 导航动作分发器。
///
/// # 教案式说明
/// - **流程 (How)**：`validate → execute_guarded → 控制器调用`，任一环节失败即返回 `false`；
/// - **日志 (What)**：校验失败以 `code`/`reason` 字段输出，守卫失败由注册表输出；
/// - **线程安全**：所有字段均为 `Arc` 或可克隆的门控包装，分发器本身可跨线程共享。
#[derive(Debug)]
pub struct ActionDispatcher {
    validator: Arc<InputValidator>,
    registry: Arc<HandleRegistry>,
    diagnostics: Diagnostics,
}

impl ActionDispatcher {
    pub fn new(
        validator: Arc<InputValidator>,
        registry: Arc<HandleRegistry>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            validator,
            registry,
            diagnostics,
        }
    }

    /// 在当前导航器内跳转。
    pub fn navigate(&self, route: &str, params: Option<Value>) -> bool {
        let checked = self.validator.validate(route, params.as_ref(), None, None);
        self.admit("navigate", checked)
            && self
                .registry
                .execute_guarded("navigate", |handle| handle.navigate(route, params.as_ref()))
                .is_some()
    }

    /// 在父级导航器中跳转；没有父级时退回到当前导航器。
    pub fn navigate_to_parent(&self, route: &str, params: Option<Value>) -> bool {
        let checked = self.validator.validate(route, params.as_ref(), None, None);
        self.admit("navigateToParent", checked)
            && self
                .registry
                .execute_guarded("navigateToParent", |handle| match handle.parent() {
                    Some(parent) => parent.navigate(route, params.as_ref()),
                    None => handle.navigate(route, params.as_ref()),
                })
                .is_some()
    }

    /// 跳转到指定栈中的指定屏幕。
    ///
    /// - **契约 (What)**：控制器收到 `navigate(stack, {"screen": screen, "params": params})`，
    ///   缺省参数以 `null` 传递。
    pub fn navigate_to_stack(&self, stack: &str, screen: &str, params: Option<Value>) -> bool {
        let checked = self
            .validator
            .validate_stack_target(stack, screen, params.as_ref());
        if !self.admit("navigateToStack", checked) {
            return false;
        }
        let nested = json!({ "screen": screen, "params": params });
        self.registry
            .execute_guarded("navigateToStack", |handle| handle.navigate(stack, Some(&nested)))
            .is_some()
    }

    /// 向当前栈压入新屏幕。
    pub fn push(&self, route: &str, params: Option<Value>) -> bool {
        let checked = self.validator.validate(route, params.as_ref(), None, None);
        self.admit("push", checked)
            && self
                .registry
                .execute_guarded("push", |handle| handle.push(route, params.as_ref()))
                .is_some()
    }

    /// 返回上一屏；控制器报告无法返回时不会调用 `go_back`。
    pub fn go_back(&self) -> bool {
        self.registry
            .execute_guarded("goBack", |handle| {
                if handle.can_go_back() {
                    handle.go_back().map(|()| true)
                } else {
                    Ok(false)
                }
            })
            .unwrap_or(false)
    }

    /// 把整个栈重置为单一路由。
    pub fn reset(&self, route: &str, params: Option<Value>) -> bool {
        let checked = self.validator.validate(route, params.as_ref(), None, None);
        self.admit("reset", checked)
            && self.dispatch("reset", NavigationAction::reset_to(route, params))
    }

    /// 替换当前屏幕。
    pub fn replace(&self, route: &str, params: Option<Value>) -> bool {
        let checked = self.validator.validate(route, params.as_ref(), None, None);
        self.admit("replace", checked)
            && self.dispatch("replace", NavigationAction::replace(route, params))
    }

    fn dispatch(&self, operation: &'static str, action: NavigationAction) -> bool {
        self.registry
            .execute_guarded(operation, |handle| handle.dispatch(action))
            .is_some()
    }

    fn admit(&self, operation: &'static str, checked: Result<(), NavigationError>) -> bool {
        match checked {
            Ok(()) => true,
            Err(error) => {
                let reason = error.to_string();
                self.diagnostics.warn(
                    TARGET,
                    "navigation input rejected",
                    &[
                        ("operation", operation),
                        ("code", error.code()),
                        ("reason", reason.as_str()),
                    ],
                );
                false
            }
        }
    }
}
