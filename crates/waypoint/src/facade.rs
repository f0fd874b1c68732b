//! 面向调用方的稳定导航入口。
//!
//! # 设计缘起（Why）
//! - 调用方不应关心校验器、注册表、分发器与配置管理器的拆分，只需要一个稳定的表面；
//! - 语义键（`"userProfile"`、默认路由 `home`）需要在分发前解析为具体路由名。
//!
//! # 契约约束（What）
//! - 直接操作与 [`ActionDispatcher`] 一一对应；
//! - 基于配置的便捷操作在键缺失时返回 `false` 并输出诊断，不会访问句柄；
//! - 查询类操作（`can_go_back`、`current_route_name`）在无句柄时给出保守结果。

use std::sync::Arc;

use serde_json::Value;

use crate::configuration::{ConfigurationManager, DefaultRouteKind, RouteConfig};
use crate::dispatcher::ActionDispatcher;
use crate::handle::NavigationHandle;
use crate::observability::Diagnostics;
use crate::registry::{CleanupCallbackId, HandleRegistry};
use crate::validator::InputValidator;

const TARGET: &str = "waypoint::facade";

/// 导航外观。
///
/// # 教案式说明
/// - **组成 (How)**：聚合 [`ActionDispatcher`]、[`HandleRegistry`]、[`ConfigurationManager`]
///   与 [`InputValidator`]，全部以 `Arc` 共享，外观本身可廉价克隆；
/// - **依赖方向 (Where)**：外观依赖分发器与配置管理器，任何组件都不反向依赖外观。
#[derive(Clone, Debug)]
pub struct NavigationFacade {
    dispatcher: Arc<ActionDispatcher>,
    registry: Arc<HandleRegistry>,
    configuration: Arc<ConfigurationManager>,
    validator: Arc<InputValidator>,
    diagnostics: Diagnostics,
}

impl NavigationFacade {
    pub fn new(
        dispatcher: Arc<ActionDispatcher>,
        registry: Arc<HandleRegistry>,
        configuration: Arc<ConfigurationManager>,
        validator: Arc<InputValidator>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            dispatcher,
            registry,
            configuration,
            validator,
            diagnostics,
        }
    }

    pub fn navigate(&self, route: &str, params: Option<Value>) -> bool {
        self.dispatcher.navigate(route, params)
    }

    pub fn navigate_to_parent(&self, route: &str, params: Option<Value>) -> bool {
        self.dispatcher.navigate_to_parent(route, params)
    }

    pub fn navigate_to_stack(&self, stack: &str, screen: &str, params: Option<Value>) -> bool {
        self.dispatcher.navigate_to_stack(stack, screen, params)
    }

    pub fn push(&self, route: &str, params: Option<Value>) -> bool {
        self.dispatcher.push(route, params)
    }

    pub fn go_back(&self) -> bool {
        self.dispatcher.go_back()
    }

    pub fn reset(&self, route: &str, params: Option<Value>) -> bool {
        self.dispatcher.reset(route, params)
    }

    pub fn replace(&self, route: &str, params: Option<Value>) -> bool {
        self.dispatcher.replace(route, params)
    }

    /// 按语义键跳转到配置中的路由。
    pub fn navigate_to_configured_route(&self, key: &str) -> bool {
        match self.configuration.route_config(key) {
            Some(route) => self.navigate_to_route_config(&route),
            None => {
                self.diagnostics
                    .warn(TARGET, "route key is not configured", &[("key", key)]);
                false
            }
        }
    }

    /// 跳转到一条已解析的路由配置。
    pub fn navigate_to_route_config(&self, route: &RouteConfig) -> bool {
        self.navigate(&route.name, route.params.clone())
    }

    pub fn go_to_home(&self) -> bool {
        self.go_to_default(DefaultRouteKind::Home)
    }

    pub fn go_to_settings(&self) -> bool {
        self.go_to_default(DefaultRouteKind::Settings)
    }

    pub fn go_to_main(&self) -> bool {
        self.go_to_default(DefaultRouteKind::Main)
    }

    /// 跳转到指定种类的默认路由；未配置时返回 `false`。
    pub fn go_to_default(&self, kind: DefaultRouteKind) -> bool {
        match self.configuration.default_route(kind) {
            Some(name) => self.navigate(&name, None),
            None => {
                self.diagnostics.warn(
                    TARGET,
                    "default route is not configured",
                    &[("kind", kind.as_str())],
                );
                false
            }
        }
    }

    /// 能返回则返回，否则（或返回失败时）跳转到兜底路由。
    ///
    /// # 教案式说明
    /// - **流程 (How)**：
    ///   1. `can_go_back()` 为真时尝试 `go_back()`，成功即返回 `true`；
    ///   2. 其余情况一律执行 `navigate(fallback, fallback_params)` 并返回其结果；
    /// - **契约 (What)**：返回值始终是最终被执行的那条路径的结果。
    pub fn back_with_fallback(&self, fallback: &str, fallback_params: Option<Value>) -> bool {
        if self.can_go_back() {
            if self.go_back() {
                return true;
            }
            self.diagnostics.info(
                TARGET,
                "go back failed, navigating to fallback",
                &[("fallback", fallback)],
            );
        }
        self.navigate(fallback, fallback_params)
    }

    /// 控制器是否还能返回；无句柄时为 `false`。
    pub fn can_go_back(&self) -> bool {
        self.registry
            .with_handle(|handle| handle.can_go_back())
            .unwrap_or(false)
    }

    /// 当前聚焦路由的名称。
    pub fn current_route_name(&self) -> Option<String> {
        self.registry
            .with_handle(|handle| handle.current_route())
            .flatten()
            .map(|route| route.name)
    }

    pub fn is_current_route(&self, name: &str) -> bool {
        self.current_route_name().as_deref() == Some(name)
    }

    pub fn set_handle(&self, handle: Option<&Arc<dyn NavigationHandle>>) {
        self.registry.set_handle(handle);
    }

    pub fn handle(&self) -> Option<Arc<dyn NavigationHandle>> {
        self.registry.handle()
    }

    pub fn is_ready(&self) -> bool {
        self.registry.is_ready()
    }

    pub fn cleanup(&self) {
        self.registry.cleanup();
    }

    pub fn add_cleanup_callback<F>(&self, callback: F) -> CleanupCallbackId
    where
        F: FnOnce() + Send + 'static,
    {
        self.registry.add_cleanup_callback(callback)
    }

    pub fn remove_cleanup_callback(&self, id: CleanupCallbackId) -> bool {
        self.registry.remove_cleanup_callback(id)
    }

    pub fn configuration(&self) -> &Arc<ConfigurationManager> {
        &self.configuration
    }

    pub fn validator(&self) -> &Arc<InputValidator> {
        &self.validator
    }

    /// 恢复配置默认值并清空标识符缓存。
    pub fn reset_configuration(&self) {
        self.configuration.reset();
        self.validator.clear_cache();
    }
}
