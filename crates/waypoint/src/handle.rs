//! 外部导航控制器的能力契约与动作对象。
//!
//! # 设计缘起（Why）
//! - 导航运行时本身（栈管理、路由匹配、动画）不属于本 crate，外观层只把它视作一个不透明能力对象；
//! - 通过对象安全的 [`NavigationHandle`] Trait 描述该能力，宿主桥接层与测试替身实现同一契约。
//!
//! # 契约约束（What）
//! - 句柄由应用根节点创建并拥有，注册表只持有弱引用（见 [`HandleRegistry`](crate::HandleRegistry)）；
//! - 可失败的方法返回 [`HandleError`]，其语义等同于“控制器抛出异常”，外观层只捕获、不解析；
//! - 结构化动作 [`NavigationAction`] 以 `type`/`payload` 形式序列化，与常见导航运行时的动作对象同构。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HandleError;

/// 导航控制器能力契约。
///
/// # 合约说明（What）
/// - `navigate`/`push`：以名称和可选参数跳转；
/// - `go_back`：弹出当前屏幕，调用方应先确认 [`NavigationHandle::can_go_back`]；
/// - `dispatch`：向动作处理入口提交结构化动作；
/// - `current_route`/`parent`：只读查询，不得产生副作用；
/// - **线程安全**：实现必须满足 `Send + Sync`，以便注册表在任意线程上发起受保护调用。
pub trait NavigationHandle: Send + Sync {
    /// 在当前导航器内跳转到 `name`。
    fn navigate(&self, name: &str, params: Option<&Value>) -> Result<(), HandleError>;

    /// 向当前栈压入 `name`。
    fn push(&self, name: &str, params: Option<&Value>) -> Result<(), HandleError>;

    /// 返回上一屏。
    fn go_back(&self) -> Result<(), HandleError>;

    /// 当前栈是否还能返回。
    fn can_go_back(&self) -> bool;

    /// 提交结构化动作。
    fn dispatch(&self, action: NavigationAction) -> Result<(), HandleError>;

    /// 当前聚焦的路由。
    fn current_route(&self) -> Option<CurrentRoute>;

    /// 父级导航器（例如从标签页跳到模态栈时使用）。
    fn parent(&self) -> Option<Arc<dyn NavigationHandle>>;

    /// 控制器自身是否完成挂载。
    fn is_ready(&self) -> bool {
        true
    }
}

/// 控制器报告的当前路由。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentRoute {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl CurrentRoute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }
}

/// 重置动作中的单条路由描述。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// 重置动作的目标栈状态。
///
/// - **契约 (What)**：外观层只构造单路由栈（`index == 0`，`routes.len() == 1`），
///   不支持多路由历史重建。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResetState {
    pub index: usize,
    pub routes: Vec<RouteDescriptor>,
}

/// 通过 [`NavigationHandle::dispatch`] 提交的结构化动作。
///
/// # 序列化形态
/// - `Reset` → `{"type":"RESET","payload":{"index":0,"routes":[...]}}`
/// - `Replace` → `{"type":"REPLACE","payload":{"name":"...","params":{...}}}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationAction {
    Reset(ResetState),
    Replace {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        params: Option<Value>,
    },
}

impl NavigationAction {
    /// 构造“把整个栈重置为单一路由”的动作，路由键与名称相同。
    pub fn reset_to(name: &str, params: Option<Value>) -> Self {
        NavigationAction::Reset(ResetState {
            index: 0,
            routes: vec![RouteDescriptor {
                key: name.to_owned(),
                name: name.to_owned(),
                params,
            }],
        })
    }

    /// 构造“替换当前屏幕”的动作。
    pub fn replace(name: &str, params: Option<Value>) -> Self {
        NavigationAction::Replace {
            name: name.to_owned(),
            params,
        }
    }

    /// 动作类型名，用于日志字段。
    pub fn kind(&self) -> &'static str {
        match self {
            NavigationAction::Reset(_) => "RESET",
            NavigationAction::Replace { .. } => "REPLACE",
        }
    }
}
