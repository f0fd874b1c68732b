//! 配置管理：语义路由表、默认路由与运行时开关。
//!
//! # 设计缘起（Why）
//! - 调用方以语义键（如 `userProfile`）寻址路由，由配置层解析为具体的 `(name, params)`，
//!   使调用点与屏幕名称解耦；
//! - 校验、缓存、诊断日志等运行时行为通过 [`RuntimeOptions`] 统一调节。
//!
//! # 更新语义（What）
//! - 路由表与默认路由是权威快照：[`ConfigurationManager::set_config`] 整表替换，不做逐键合并；
//! - 运行时开关是增量微调：[`ConfigurationManager::set_performance_config`] 只覆盖补丁中出现的字段。
//!
//! # 结构（How）
//! - `routes`：配置文档的数据模型与解析入口；
//! - `options`：运行时开关及其补丁类型；
//! - `manager`：基于 `ArcSwap` 的进程内配置持有者。

mod manager;
mod options;
mod routes;

pub use manager::ConfigurationManager;
pub use options::{DEFAULT_MAX_CACHE_SIZE, RuntimeOptions, RuntimeOptionsPatch};
pub use routes::{DefaultRouteKind, DefaultRoutes, NavigationConfig, RouteConfig};
