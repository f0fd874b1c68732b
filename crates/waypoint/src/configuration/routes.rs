use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// 语义键解析出的具体路由。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RouteConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// 默认路由的固定枚举集合。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultRouteKind {
    Home,
    Settings,
    Main,
}

impl DefaultRouteKind {
    pub const ALL: [DefaultRouteKind; 3] = [
        DefaultRouteKind::Home,
        DefaultRouteKind::Settings,
        DefaultRouteKind::Main,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DefaultRouteKind::Home => "home",
            DefaultRouteKind::Settings => "settings",
            DefaultRouteKind::Main => "main",
        }
    }
}

impl fmt::Display for DefaultRouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultRouteKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "home" => Ok(DefaultRouteKind::Home),
            "settings" => Ok(DefaultRouteKind::Settings),
            "main" => Ok(DefaultRouteKind::Main),
            other => Err(format!("unknown default route kind `{other}`")),
        }
    }
}

/// 默认路由表：`home`/`settings`/`main` 到路由名称的映射，每项可缺省。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRoutes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
}

impl DefaultRoutes {
    pub fn get(&self, kind: DefaultRouteKind) -> Option<&str> {
        match kind {
            DefaultRouteKind::Home => self.home.as_deref(),
            DefaultRouteKind::Settings => self.settings.as_deref(),
            DefaultRouteKind::Main => self.main.as_deref(),
        }
    }

    pub fn with(mut self, kind: DefaultRouteKind, name: impl Into<String>) -> Self {
        let slot = match kind {
            DefaultRouteKind::Home => &mut self.home,
            DefaultRouteKind::Settings => &mut self.settings,
            DefaultRouteKind::Main => &mut self.main,
        };
        *slot = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        DefaultRouteKind::ALL
            .iter()
            .all(|kind| self.get(*kind).is_none())
    }
}

/// 导航配置文档。
///
/// # 契约说明（What）
/// - 输入形态：`{ routes?: {key: {name, params?}}, defaultRoutes?: {home?, settings?, main?} }`；
/// - 缺省的 `routes`/`defaultRoutes` 视为空表；
/// - 路由键唯一，文档内后出现的同名键覆盖先出现的键。
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    #[serde(default)]
    pub routes: HashMap<String, RouteConfig>,
    #[serde(default)]
    pub default_routes: DefaultRoutes,
}

impl NavigationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, key: impl Into<String>, route: RouteConfig) -> Self {
        self.routes.insert(key.into(), route);
        self
    }

    pub fn with_default_route(mut self, kind: DefaultRouteKind, name: impl Into<String>) -> Self {
        self.default_routes = self.default_routes.with(kind, name);
        self
    }

    /// 从 JSON 文档解析配置。
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// 从 TOML 文档解析配置。
    ///
    /// ```toml
    /// [routes.userProfile]
    /// name = "ProfileScreen"
    /// params = { userId = 123 }
    ///
    /// [defaultRoutes]
    /// home = "HomeScreen"
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }
}
