//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为导航外观层的失败语义提供集中定义：标识符非法、参数不安全、句柄缺失、底层控制器失败；
//! - 分发路径上的错误最终都会被折算为 `false`，本模块的类型主要服务于诊断日志与配置装载。
//!
//! ## 设计要求（What）
//! - 所有错误类型派生 `thiserror::Error`，兼容 `std::error::Error`；
//! - [`NavigationError::code`] 提供稳定的点分错误码，作为结构化日志字段输出。

use thiserror::Error;

/// 导航分发核心错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把校验闸门、注册表守卫与底层控制器三处的失败归入同一枚举，
///   使 [`ActionDispatcher`](crate::ActionDispatcher) 可以统一记录后折算为布尔结果。
/// - **契约 (What)**：
///   - 标识符类变体携带原始输入，便于排障；
///   - `HandleUnavailable` 从不向调用方抛出，只在日志中出现；
///   - `DispatchFailure` 中的 `detail` 对底层错误不做任何解析。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NavigationError {
    /// 路由名称不满足 `^[A-Za-z0-9_-]+$`。
    #[error("invalid route name `{name}`")]
    InvalidRouteName { name: String },

    /// 栈名称不满足标识符规则。
    #[error("invalid stack name `{name}`")]
    InvalidStackName { name: String },

    /// 屏幕名称不满足标识符规则。
    #[error("invalid screen name `{name}`")]
    InvalidScreenName { name: String },

    /// 参数对象未通过原型污染或脚本注入检查，或根本不是对象。
    #[error("invalid navigation parameters: {reason}")]
    InvalidParams { reason: String },

    /// 注册表中没有存活的导航句柄。
    #[error("navigation handle is not available")]
    HandleUnavailable,

    /// 外部导航控制器在执行 `operation` 时失败。
    #[error("navigation `{operation}` failed: {detail}")]
    DispatchFailure {
        operation: &'static str,
        detail: String,
    },
}

impl NavigationError {
    /// 返回稳定的诊断错误码。
    ///
    /// - **意图 (Why)**：日志后端按错误码聚合，而不是按自然语言消息聚合；
    /// - **契约 (What)**：返回值为 `'static` 点分字符串，跨版本保持不变。
    pub fn code(&self) -> &'static str {
        match self {
            NavigationError::InvalidRouteName { .. } => "navigation.route.invalid",
            NavigationError::InvalidStackName { .. } => "navigation.stack.invalid",
            NavigationError::InvalidScreenName { .. } => "navigation.screen.invalid",
            NavigationError::InvalidParams { .. } => "navigation.params.invalid",
            NavigationError::HandleUnavailable => "navigation.handle.unavailable",
            NavigationError::DispatchFailure { .. } => "navigation.dispatch.failure",
        }
    }

    /// 是否属于输入校验类错误。
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            NavigationError::InvalidRouteName { .. }
                | NavigationError::InvalidStackName { .. }
                | NavigationError::InvalidScreenName { .. }
                | NavigationError::InvalidParams { .. }
        )
    }

    pub(crate) fn dispatch_failure(operation: &'static str, detail: impl Into<String>) -> Self {
        NavigationError::DispatchFailure {
            operation,
            detail: detail.into(),
        }
    }
}

/// 外部导航控制器报告的不透明失败。
///
/// # 教案式说明
/// - **意图 (Why)**：[`NavigationHandle`](crate::NavigationHandle) 的实现方（通常是宿主桥接层）
///   需要一种最小的方式表达“这次调用失败了”，而外观层从不检查失败内容；
/// - **契约 (What)**：仅携带人类可读描述，可由 `&str`/`String` 直接转换。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct HandleError {
    message: String,
}

impl HandleError {
    /// 以描述文本构造错误。
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 读取描述文本。
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HandleError {
    fn from(value: &str) -> Self {
        HandleError::new(value)
    }
}

impl From<String> for HandleError {
    fn from(value: String) -> Self {
        HandleError::new(value)
    }
}

/// 配置文档装载错误。
///
/// - **意图 (Why)**：配置只在启动期装载一次，解析失败应当显式返回给宿主，而不是静默吞没；
/// - **契约 (What)**：保留底层解析器的错误信息。
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON 文档无法解析为配置结构。
    #[error("failed to parse navigation config from JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML 文档无法解析为配置结构。
    #[cfg(feature = "toml")]
    #[error("failed to parse navigation config from TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_variant() {
        let cases = [
            (
                NavigationError::InvalidRouteName { name: "a b".into() },
                "navigation.route.invalid",
            ),
            (
                NavigationError::InvalidParams {
                    reason: "array".into(),
                },
                "navigation.params.invalid",
            ),
            (
                NavigationError::HandleUnavailable,
                "navigation.handle.unavailable",
            ),
            (
                NavigationError::dispatch_failure("push", "boom"),
                "navigation.dispatch.failure",
            ),
        ];
        for (error, code) in cases {
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn only_input_errors_count_as_validation() {
        assert!(NavigationError::InvalidStackName { name: "x y".into() }.is_validation());
        assert!(!NavigationError::HandleUnavailable.is_validation());
        assert!(!NavigationError::dispatch_failure("navigate", "boom").is_validation());
    }

    #[test]
    fn dispatch_failure_message_names_operation() {
        let detail = HandleError::from("stack empty").to_string();
        let error = NavigationError::dispatch_failure("goBack", detail);
        assert_eq!(error.to_string(), "navigation `goBack` failed: stack empty");
    }
}
