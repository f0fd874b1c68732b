//! 输入校验与清洗。
//!
//! # 设计缘起（Why）
//! - 每一次分发在触碰导航句柄之前都必须经过同一道闸门：标识符语法、参数对象安全性；
//! - 参数最终会流入宿主导航运行时，需拒绝原型污染键与脚本类字符串载荷。
//!
//! # 契约约束（What）
//! - 路由/栈/屏幕标识符匹配 `^[A-Za-z0-9_-]+$`，不得为空；
//! - 参数为空（`None`/`null`）或非数组对象；对象的顶层键不得为 `__proto__`、`constructor`、
//!   `prototype`，顶层字符串值不得命中脚本注入模式（`<script`、`javascript:`、`on<word>=`、
//!   `data:text/html`，大小写不敏感）；
//! - `enable_validation` 关闭时标识符校验恒为真，参数安全检查仍然执行。
//!
//! # 结构（How）
//! - 纯函数：[`is_route_identifier`]、[`contains_script`]、[`check_params`]、
//!   [`is_valid_params`]、[`sanitize_route_identifier`]；
//! - [`InputValidator`]：读取运行时开关并维护 [`ValidationCache`] 的有状态闸门。

mod cache;

pub use cache::ValidationCache;

use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexSet};
use serde_json::Value;

use crate::configuration::ConfigurationManager;
use crate::error::NavigationError;

static ROUTE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("route identifier pattern is a valid regex")
});

static SCRIPT_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)on[a-z0-9_]+\s*=",
        r"(?i)data:text/html",
    ])
    .expect("script injection patterns are valid regexes")
});

const RESERVED_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// 纯语法检查：非空且只包含 `[A-Za-z0-9_-]`。
pub fn is_route_identifier(value: &str) -> bool {
    !value.is_empty() && ROUTE_IDENTIFIER.is_match(value)
}

/// 字符串是否命中任一脚本注入模式。
pub fn contains_script(value: &str) -> bool {
    SCRIPT_PATTERNS.is_match(value)
}

/// 参数安全检查，失败时给出原因。
pub fn check_params(params: Option<&Value>) -> Result<(), NavigationError> {
    let object = match params {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(object)) => object,
        Some(Value::Array(_)) => return Err(invalid_params("params must not be an array")),
        Some(_) => return Err(invalid_params("params must be an object")),
    };

    for (key, value) in object {
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(invalid_params(format!("reserved key `{key}` is not allowed")));
        }
        if let Value::String(text) = value {
            if contains_script(text) {
                return Err(invalid_params(format!(
                    "value of `{key}` looks like a script payload"
                )));
            }
        }
    }
    Ok(())
}

/// [`check_params`] 的布尔形式。
pub fn is_valid_params(params: Option<&Value>) -> bool {
    check_params(params).is_ok()
}

/// 去除首尾空白后剔除 `[A-Za-z0-9_-]` 以外的所有字符。
pub fn sanitize_route_identifier(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn invalid_params(reason: impl Into<String>) -> NavigationError {
    NavigationError::InvalidParams {
        reason: reason.into(),
    }
}

/// 有状态的校验闸门。
///
/// # 教案式说明
/// - **意图 (Why)**：标识符校验的开关与缓存都由运行时配置驱动，需要一个持有配置引用的对象；
/// - **契约 (What)**：
///   - [`Self::is_valid_route_identifier`] 在校验关闭时恒为真；缓存开启时按原始字符串查/写
///     [`ValidationCache`]，容量取自当前 `max_cache_size`；
///   - [`Self::validate`] 依次检查路由名、参数、栈名、屏幕名，返回第一个失败；
/// - **依赖方向 (Where)**：只依赖 [`ConfigurationManager`]，不反向依赖分发器或外观层。
#[derive(Debug)]
pub struct InputValidator {
    configuration: Arc<ConfigurationManager>,
    cache: ValidationCache,
}

impl InputValidator {
    pub fn new(configuration: Arc<ConfigurationManager>) -> Self {
        Self {
            configuration,
            cache: ValidationCache::new(),
        }
    }

    pub fn is_valid_route_identifier(&self, value: &str) -> bool {
        let options = self.configuration.performance_config();
        if !options.enable_validation {
            return true;
        }
        if value.is_empty() {
            return false;
        }
        if !options.enable_cache {
            return is_route_identifier(value);
        }
        if let Some(valid) = self.cache.get(value) {
            return valid;
        }
        let valid = is_route_identifier(value);
        self.cache.insert(value, valid, options.max_cache_size.get());
        valid
    }

    pub fn is_valid_stack_name(&self, value: &str) -> bool {
        self.is_valid_route_identifier(value)
    }

    pub fn is_valid_screen_name(&self, value: &str) -> bool {
        self.is_valid_route_identifier(value)
    }

    pub fn is_valid_params(&self, params: Option<&Value>) -> bool {
        is_valid_params(params)
    }

    pub fn contains_script(&self, value: &str) -> bool {
        contains_script(value)
    }

    pub fn sanitize_route_identifier(&self, value: &str) -> String {
        sanitize_route_identifier(value)
    }

    /// 分发前的统一闸门。
    ///
    /// - **输入 (What)**：`route_name` 必填；`params`、`stack_name`、`screen_name` 仅在出现时检查；
    /// - **输出 (What)**：第一个不满足规则的输入对应的 [`NavigationError`]。
    pub fn validate(
        &self,
        route_name: &str,
        params: Option<&Value>,
        stack_name: Option<&str>,
        screen_name: Option<&str>,
    ) -> Result<(), NavigationError> {
        if !self.is_valid_route_identifier(route_name) {
            return Err(NavigationError::InvalidRouteName {
                name: route_name.to_owned(),
            });
        }
        check_params(params)?;
        self.validate_names(stack_name, screen_name)
    }

    /// 栈内跳转的闸门：栈名与屏幕名都按标识符规则检查，再检查参数。
    pub fn validate_stack_target(
        &self,
        stack_name: &str,
        screen_name: &str,
        params: Option<&Value>,
    ) -> Result<(), NavigationError> {
        self.validate_names(Some(stack_name), Some(screen_name))?;
        check_params(params)
    }

    fn validate_names(
        &self,
        stack_name: Option<&str>,
        screen_name: Option<&str>,
    ) -> Result<(), NavigationError> {
        if let Some(stack) = stack_name {
            if !self.is_valid_stack_name(stack) {
                return Err(NavigationError::InvalidStackName {
                    name: stack.to_owned(),
                });
            }
        }
        if let Some(screen) = screen_name {
            if !self.is_valid_screen_name(screen) {
                return Err(NavigationError::InvalidScreenName {
                    name: screen.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// 清空标识符缓存。
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &ValidationCache {
        &self.cache
    }
}
