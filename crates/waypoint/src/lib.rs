#![deny(unsafe_code)]
#![doc = "waypoint: 面向移动端导航运行时的句柄注册、输入校验与受保护动作分发外观层。"]
#![doc = ""]
#![doc = "== 组件分层 =="]
#![doc = "调用方 → [`NavigationFacade`] → {[`InputValidator`]（闸门）→ [`HandleRegistry`]（守卫）→ 外部 [`NavigationHandle`]}；"]
#![doc = "基于语义键的便捷调用在进入 [`ActionDispatcher`] 之前先经由 [`ConfigurationManager`] 解析。"]
#![doc = ""]
#![doc = "== 错误策略 =="]
#![doc = "分发路径上的任何失败（校验、句柄缺失、底层控制器报错或 panic）都在边界处被吞没并折算为 `false`，"]
#![doc = "仅通过可选的诊断日志暴露原因；导航副作用永远不会让宿主调用链崩溃。"]

//! # waypoint
//!
//! ## 定位与职责（Why）
//! - 集中持有唯一的导航控制器句柄，并以“先校验、再守卫、后调用”的顺序包装外部导航运行时；
//! - 提供语义路由键到具体 `(name, params)` 的配置间接层，避免调用点硬编码屏幕名称。
//!
//! ## 架构嵌入（Where）
//! - 所有组件由 [`NavigationContext`] 显式构造并注入，不存在进程级隐式全局状态；
//! - 依赖方向单向：`dispatcher` → {`registry`, `validator`}，`facade` → {`dispatcher`, `configuration`}，
//!   没有任何组件反向依赖外观层。
//!
//! ## Feature 策略（Trade-offs）
//! - `toml`（默认开启）：允许以 TOML 文档装载路由配置；
//! - `subscriber`：提供 `tracing-subscriber` 的一键安装入口，宿主已有 Subscriber 时无需开启。

pub mod configuration;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod facade;
pub mod handle;
pub mod observability;
pub mod registry;
pub mod validator;

pub use configuration::{
    ConfigurationManager, DefaultRouteKind, DefaultRoutes, NavigationConfig, RouteConfig,
    RuntimeOptions, RuntimeOptionsPatch,
};
pub use context::NavigationContext;
pub use dispatcher::ActionDispatcher;
pub use error::{ConfigError, HandleError, NavigationError};
pub use facade::NavigationFacade;
pub use handle::{CurrentRoute, NavigationAction, NavigationHandle, ResetState, RouteDescriptor};
pub use observability::{Diagnostics, LogRecord, LogSeverity, Logger, NoopLogger, TracingLogger};
pub use registry::{CleanupCallbackId, HandleRegistry};
pub use validator::{InputValidator, ValidationCache};
