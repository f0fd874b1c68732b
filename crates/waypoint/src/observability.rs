//! 诊断日志能力与 `tracing` 桥接。
//!
//! # 设计缘起（Why）
//! - 导航失败按约定只能通过诊断日志暴露原因，因此日志被建模为显式注入的 [`Logger`] 能力，
//!   而不是散落在各处的条件编译分支；
//! - “仅开发期输出”由 [`RuntimeOptions::enable_dev_logs`](crate::RuntimeOptions) 在运行时裁决，
//!   输出级别则交由 `tracing` Subscriber 的过滤器决定。
//!
//! # 总体结构（How）
//! - [`Logger`]：对象安全的日志契约，唯一必需方法为 `log`；
//! - [`TracingLogger`]：默认实现，把记录转发给 `tracing` 宏；
//! - [`NoopLogger`]：丢弃一切记录；
//! - [`Diagnostics`]：在每次输出前读取运行时开关的门控包装；
//! - `install_subscriber`（`subscriber` Feature）：安装 `fmt + EnvFilter` 的全局 Subscriber。

use std::borrow::Cow;
use std::error::Error;
use std::sync::Arc;

use crate::configuration::ConfigurationManager;

/// 日志级别。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
}

/// 结构化字段集合，键值均为借用的字符串切片。
pub type LogField<'a> = &'a [(&'a str, &'a str)];

/// 单条结构化日志记录。
///
/// # 契约说明（What）
/// - `target` 标识产生记录的组件，例如 `waypoint::registry`；
/// - `error` 以引用形式携带根因，日志实现需在返回前完成格式化；
/// - `fields` 必须在 [`Logger::log`] 返回前保持有效。
#[derive(Debug)]
pub struct LogRecord<'a> {
    pub message: Cow<'a, str>,
    pub severity: LogSeverity,
    pub target: &'a str,
    pub error: Option<&'a (dyn Error + 'static)>,
    pub fields: LogField<'a>,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        severity: LogSeverity,
        target: &'a str,
        message: impl Into<Cow<'a, str>>,
        fields: LogField<'a>,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            target,
            error: None,
            fields,
        }
    }
}

/// 日志接口的核心契约。
///
/// # 逻辑解析（How）
/// - `log` 为唯一必需方法；`info`/`warn`/`error` 构造 [`LogRecord`] 后委托给 `log`，
///   确保所有路径共享相同逻辑。
///
/// # 契约说明（What）
/// - 实现必须线程安全并尽快返回；
/// - 实现不得 panic：诊断输出位于“永不让宿主崩溃”的吞错边界之内。
pub trait Logger: Send + Sync + 'static {
    /// 提交结构化日志。
    fn log(&self, record: &LogRecord<'_>);

    /// 输出 INFO 日志。
    fn info(&self, target: &str, message: &str, fields: LogField<'_>) {
        self.log(&LogRecord::new(LogSeverity::Info, target, message, fields));
    }

    /// 输出 WARN 日志。
    fn warn(&self, target: &str, message: &str, fields: LogField<'_>) {
        self.log(&LogRecord::new(LogSeverity::Warn, target, message, fields));
    }

    /// 输出携带根因的 ERROR 日志。
    fn error(
        &self,
        target: &str,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
        fields: LogField<'_>,
    ) {
        let mut record = LogRecord::new(LogSeverity::Error, target, message, fields);
        record.error = error;
        self.log(&record);
    }
}

/// 把记录转发给 `tracing` 的默认日志实现。
///
/// - `tracing` 的 target 必须是编译期常量，因此事件统一使用 `waypoint` 作为 target，
///   组件名以 `component` 字段输出。
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, record: &LogRecord<'_>) {
        let component = record.target;
        let message = record.message.as_ref();
        let fields = FieldsDisplay(record.fields);
        match (record.severity, record.error) {
            (LogSeverity::Debug, _) => {
                tracing::debug!(target: "waypoint", component, %fields, "{message}")
            }
            (LogSeverity::Info, _) => {
                tracing::info!(target: "waypoint", component, %fields, "{message}")
            }
            (LogSeverity::Warn, None) => {
                tracing::warn!(target: "waypoint", component, %fields, "{message}")
            }
            (LogSeverity::Warn, Some(error)) => {
                tracing::warn!(target: "waypoint", component, %fields, error = %error, "{message}")
            }
            (LogSeverity::Error, None) => {
                tracing::error!(target: "waypoint", component, %fields, "{message}")
            }
            (LogSeverity::Error, Some(error)) => {
                tracing::error!(target: "waypoint", component, %fields, error = %error, "{message}")
            }
        }
    }
}

struct FieldsDisplay<'a>(LogField<'a>);

impl std::fmt::Display for FieldsDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (key, value)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// 丢弃所有记录的日志实现。
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _record: &LogRecord<'_>) {}
}

/// 受运行时开关门控的诊断通道。
///
/// # 教案式说明
/// - **意图 (Why)**：注册表、分发器与外观层都需要“仅在开启诊断时输出”的语义，
///   集中到一个可克隆的包装中，避免每个调用点重复读取配置；
/// - **契约 (What)**：每次输出前读取 [`ConfigurationManager::is_dev_logs_enabled`]，
///   因此 `set_performance_config` 的修改对后续调用立即生效；
/// - **执行 (How)**：开关关闭时直接返回，不构造 [`LogRecord`]。
#[derive(Clone)]
pub struct Diagnostics {
    logger: Arc<dyn Logger>,
    configuration: Arc<ConfigurationManager>,
}

impl Diagnostics {
    pub fn new(logger: Arc<dyn Logger>, configuration: Arc<ConfigurationManager>) -> Self {
        Self {
            logger,
            configuration,
        }
    }

    /// 当前是否输出诊断。
    pub fn enabled(&self) -> bool {
        self.configuration.is_dev_logs_enabled()
    }

    pub fn info(&self, target: &str, message: &str, fields: LogField<'_>) {
        if self.enabled() {
            self.logger.info(target, message, fields);
        }
    }

    pub fn warn(&self, target: &str, message: &str, fields: LogField<'_>) {
        if self.enabled() {
            self.logger.warn(target, message, fields);
        }
    }

    pub fn error(
        &self,
        target: &str,
        message: &str,
        error: &(dyn Error + 'static),
        fields: LogField<'_>,
    ) {
        if self.enabled() {
            self.logger.error(target, message, Some(error), fields);
        }
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled())
            .finish()
    }
}

#[cfg(feature = "subscriber")]
pub use subscriber::{InstallError, install_subscriber};

#[cfg(feature = "subscriber")]
mod subscriber {
    use std::sync::OnceLock;

    use thiserror::Error;
    use tracing::dispatcher;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

    /// 读取日志过滤规则的环境变量名。
    pub const LOG_FILTER_ENV: &str = "WAYPOINT_LOG";

    static INSTALLED: OnceLock<()> = OnceLock::new();

    /// Subscriber 安装失败的原因。
    #[derive(Debug, Error)]
    pub enum InstallError {
        /// `install_subscriber` 被重复调用。
        #[error("waypoint subscriber is already installed")]
        AlreadyInstalled,
        /// 宿主已设置其他全局 Subscriber。
        #[error("a global tracing subscriber is already set")]
        SubscriberAlreadySet,
        /// 设置全局 Subscriber 时的底层错误。
        #[error("failed to set global tracing subscriber: {0}")]
        SetGlobalSubscriber(#[from] tracing::dispatcher::SetGlobalDefaultError),
    }

    /// 安装 `fmt + EnvFilter` 全局 Subscriber。
    ///
    /// # 教案式说明
    /// - **逻辑（How）**：
    ///   1. 拒绝重复安装或覆盖宿主已有的 Subscriber；
    ///   2. 从 `WAYPOINT_LOG` 读取过滤规则，缺省为 `info`；
    ///   3. 组装 `registry + EnvFilter + fmt` 并设为全局默认。
    /// - **契约（What）**：成功后 [`TracingLogger`](super::TracingLogger) 的输出立即可见。
    pub fn install_subscriber() -> Result<(), InstallError> {
        if INSTALLED.get().is_some() {
            return Err(InstallError::AlreadyInstalled);
        }
        if dispatcher::has_been_set() {
            return Err(InstallError::SubscriberAlreadySet);
        }

        let subscriber = tracing_subscriber::registry()
            .with(build_env_filter())
            .with(tracing_subscriber::fmt::layer());
        tracing::subscriber::set_global_default(subscriber)?;
        INSTALLED.set(()).map_err(|_| InstallError::AlreadyInstalled)
    }

    fn build_env_filter() -> EnvFilter {
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
