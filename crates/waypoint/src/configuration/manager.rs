use std::sync::Arc;

use arc_swap::ArcSwap;

use super::options::{RuntimeOptions, RuntimeOptionsPatch};
use super::routes::{DefaultRouteKind, NavigationConfig, RouteConfig};
use crate::observability::Logger;

const TARGET: &str = "waypoint::configuration";

/// 进程内导航配置的唯一持有者。
///
/// # 设计动机（Why）
/// - 配置在启动期写入、在分发路径上高频读取，使用 [`ArcSwap`] 让读路径无锁；
/// - 路由表整表替换只需一次 `store`，正在读取旧快照的调用方不受影响。
///
/// # 行为概览（How）
/// 1. `config` 持有当前的 [`NavigationConfig`] 快照，[`Self::set_config`] 整体替换；
/// 2. `options` 持有 [`RuntimeOptions`]，[`Self::set_performance_config`] 通过 `rcu` 叠加补丁；
/// 3. [`Self::reset`] 把两者恢复为空表与文档默认值。
///
/// # 使用契约（What）
/// - 单写者、多读者；并发写入时后写者胜出，不会出现撕裂的快照；
/// - 配置变更的诊断日志仅在 `enable_dev_logs` 开启时输出。
pub struct ConfigurationManager {
    config: ArcSwap<NavigationConfig>,
    options: ArcSwap<RuntimeOptions>,
    logger: Arc<dyn Logger>,
}

impl ConfigurationManager {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_options(logger, RuntimeOptions::default())
    }

    /// 以指定的初始运行时开关构造。
    pub fn with_options(logger: Arc<dyn Logger>, options: RuntimeOptions) -> Self {
        Self {
            config: ArcSwap::from_pointee(NavigationConfig::default()),
            options: ArcSwap::from_pointee(options),
            logger,
        }
    }

    /// 整表替换路由表与默认路由。
    ///
    /// # 教案级说明
    /// - **意图 (Why)**：路由表是权威快照，未出现在新配置中的键必须消失，而不是沿用旧值；
    /// - **流程 (How)**：构造新的 `Arc<NavigationConfig>` 并一次性 `store`；
    /// - **后置条件 (Contract)**：后续 [`Self::route_config`] 只能看到 `config` 中的键。
    pub fn set_config(&self, config: NavigationConfig) {
        if self.is_dev_logs_enabled() {
            let routes = config.routes.len().to_string();
            let snapshot = serde_json::to_string(&config).unwrap_or_default();
            self.logger.info(
                TARGET,
                "navigation configuration updated",
                &[("routes", routes.as_str()), ("config", snapshot.as_str())],
            );
        }
        self.config.store(Arc::new(config));
    }

    /// 当前配置快照。
    pub fn config(&self) -> Arc<NavigationConfig> {
        self.config.load_full()
    }

    /// 按语义键查询路由。
    pub fn route_config(&self, key: &str) -> Option<RouteConfig> {
        self.config.load().routes.get(key).cloned()
    }

    /// 查询默认路由名称。
    pub fn default_route(&self, kind: DefaultRouteKind) -> Option<String> {
        self.config.load().default_routes.get(kind).map(str::to_owned)
    }

    /// 叠加运行时开关补丁，未出现的字段保留旧值。
    pub fn set_performance_config(&self, patch: RuntimeOptionsPatch) {
        self.options.rcu(|current| patch.apply(current));
    }

    /// 当前运行时开关。
    pub fn performance_config(&self) -> RuntimeOptions {
        **self.options.load()
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.options.load().enable_cache
    }

    pub fn is_validation_enabled(&self) -> bool {
        self.options.load().enable_validation
    }

    pub fn is_dev_logs_enabled(&self) -> bool {
        self.options.load().enable_dev_logs
    }

    pub fn max_cache_size(&self) -> usize {
        self.options.load().max_cache_size.get()
    }

    /// 恢复默认值并清空路由表与默认路由。
    pub fn reset(&self) {
        self.config.store(Arc::new(NavigationConfig::default()));
        self.options.store(Arc::new(RuntimeOptions::default()));
        if self.is_dev_logs_enabled() {
            self.logger.info(TARGET, "navigation configuration reset to defaults", &[]);
        }
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new(Arc::new(crate::observability::TracingLogger))
    }
}

impl std::fmt::Debug for ConfigurationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationManager")
            .field("config", &self.config.load_full())
            .field("options", &self.options.load_full())
            .finish()
    }
}
