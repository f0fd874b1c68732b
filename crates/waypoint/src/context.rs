use std::sync::Arc;

use crate::configuration::{ConfigurationManager, RuntimeOptions};
use crate::dispatcher::ActionDispatcher;
use crate::facade::NavigationFacade;
use crate::observability::{Diagnostics, Logger, TracingLogger};
use crate::registry::HandleRegistry;
use crate::validator::InputValidator;

/// 应用根节点持有的导航上下文。
///
/// # 设计动机（Why）
/// - 注册表与配置管理器在语义上是“进程内唯一”的，但以显式构造、显式传递的对象承载，
///   测试可以为每个用例构造全新上下文，而不是重置全局状态；
///
/// # 行为概览（How）
/// 1. 以注入的 [`Logger`] 构造 [`ConfigurationManager`]；
/// 2. 以配置管理器与日志能力组装 [`Diagnostics`]；
/// 3. 依次构造校验器、注册表、分发器，最后聚合为 [`NavigationFacade`]。
///
/// # 使用契约（What）
/// - 所有组件以 `Arc` 共享，[`Self::facade`] 返回的外观克隆与上下文共享同一份状态。
#[derive(Clone, Debug)]
pub struct NavigationContext {
    configuration: Arc<ConfigurationManager>,
    registry: Arc<HandleRegistry>,
    facade: NavigationFacade,
}

impl NavigationContext {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_options(logger, RuntimeOptions::default())
    }

    /// 以指定的初始运行时开关构造上下文。
    pub fn with_options(logger: Arc<dyn Logger>, options: RuntimeOptions) -> Self {
        let configuration = Arc::new(ConfigurationManager::with_options(
            Arc::clone(&logger),
            options,
        ));
        let diagnostics = Diagnostics::new(logger, Arc::clone(&configuration));
        let validator = Arc::new(InputValidator::new(Arc::clone(&configuration)));
        let registry = Arc::new(HandleRegistry::new(diagnostics.clone()));
        let dispatcher = Arc::new(ActionDispatcher::new(
            Arc::clone(&validator),
            Arc::clone(&registry),
            diagnostics.clone(),
        ));
        let facade = NavigationFacade::new(
            dispatcher,
            Arc::clone(&registry),
            Arc::clone(&configuration),
            validator,
            diagnostics,
        );
        Self {
            configuration,
            registry,
            facade,
        }
    }

    pub fn facade(&self) -> &NavigationFacade {
        &self.facade
    }

    pub fn configuration(&self) -> &Arc<ConfigurationManager> {
        &self.configuration
    }

    pub fn registry(&self) -> &Arc<HandleRegistry> {
        &self.registry
    }
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}
