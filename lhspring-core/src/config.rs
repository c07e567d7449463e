use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use parking_lot::RwLock;

use crate::constants::BASE_PACKAGES_KEY;

/// 容器配置 - 提供组件扫描的根路径
///
/// 返回 `None` 表示配置上没有声明扫描路径（对应缺少 `#[component_scan]`）。
/// 容器会把 `None` 和空列表都视为配置错误。
pub trait Configuration {
    fn base_packages(&self) -> Option<Vec<String>>;
}

impl<S: AsRef<str>> Configuration for [S] {
    fn base_packages(&self) -> Option<Vec<String>> {
        Some(self.iter().map(|s| s.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>, const N: usize> Configuration for [S; N] {
    fn base_packages(&self) -> Option<Vec<String>> {
        self.as_slice().base_packages()
    }
}

impl<S: AsRef<str>> Configuration for Vec<S> {
    fn base_packages(&self) -> Option<Vec<String>> {
        self.as_slice().base_packages()
    }
}

/// 配置值类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<ConfigValue>),
    Object(HashMap<String, ConfigValue>),
}

impl ConfigValue {
    /// 转换为字符串
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 转换为布尔值
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// 配置源 trait
pub trait PropertySource: Send + Sync {
    /// 获取配置源名称
    fn name(&self) -> &str;

    /// 获取配置值
    fn get(&self, key: &str) -> Option<ConfigValue>;

    /// 配置源优先级（数字越大优先级越高）
    fn priority(&self) -> i32 {
        0
    }
}

/// Environment - 配置管理器
///
/// 按优先级聚合多个配置源，同时作为容器的 `Configuration` 使用：
/// 扫描路径从 `component-scan.base-packages` 读取
pub struct Environment {
    /// 配置源列表（按优先级排序）
    sources: RwLock<Vec<Box<dyn PropertySource>>>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources = self.sources.read();
        f.debug_struct("Environment")
            .field(
                "sources",
                &sources.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Environment {
    /// 创建新的环境
    pub fn new() -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
        }
    }

    /// 添加配置源
    pub fn add_property_source(&self, source: Box<dyn PropertySource>) {
        let mut sources = self.sources.write();
        tracing::debug!(
            "Adding property source '{}' (priority: {})",
            source.name(),
            source.priority()
        );
        sources.push(source);
        // 按优先级降序排序
        sources.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// 构建器形式的 `add_property_source`
    pub fn with_property_source(self, source: Box<dyn PropertySource>) -> Self {
        self.add_property_source(source);
        self
    }

    /// 获取配置值
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        let sources = self.sources.read();
        for source in sources.iter() {
            if let Some(value) = source.get(key) {
                tracing::trace!("Config '{}' found in source '{}'", key, source.name());
                return Some(value);
            }
        }
        tracing::trace!("Config '{}' not found in any source", key);
        None
    }

    /// 获取字符串配置
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(String::from))
    }

    /// 获取布尔值配置
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// 获取字符串数组配置
    /// 支持两种格式:
    /// 1. TOML数组: key = ["a", "b", "c"]
    /// 2. 逗号分隔字符串: key = "a, b, c"
    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        match self.get(key)? {
            ConfigValue::Array(arr) => Some(
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            ),
            ConfigValue::String(s) => Some(
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration for Environment {
    fn base_packages(&self) -> Option<Vec<String>> {
        self.get_string_array(BASE_PACKAGES_KEY)
    }
}

// ========== Property Sources ==========

/// 环境变量配置源
pub struct EnvironmentPropertySource {
    prefix: String,
    priority: i32,
}

impl EnvironmentPropertySource {
    /// 创建环境变量配置源
    ///
    /// # 参数
    /// * `prefix` - 环境变量前缀，例如 "APP_"
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            priority: 100, // 环境变量优先级较高
        }
    }

    /// 将配置键转换为环境变量名
    /// 例如: component-scan.base-packages -> APP_COMPONENT_SCAN_BASE_PACKAGES
    fn key_to_env(&self, key: &str) -> String {
        format!(
            "{}{}",
            self.prefix,
            key.replace(['.', '-'], "_").to_uppercase()
        )
    }
}

impl PropertySource for EnvironmentPropertySource {
    fn name(&self) -> &str {
        "environment"
    }

    fn get(&self, key: &str) -> Option<ConfigValue> {
        std::env::var(self.key_to_env(key))
            .ok()
            .map(ConfigValue::String)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// TOML 文件配置源
pub struct TomlPropertySource {
    name: String,
    properties: HashMap<String, ConfigValue>,
    priority: i32,
}

impl TomlPropertySource {
    /// 从文件加载 TOML 配置
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        Self::parse(&content, path.to_string_lossy().to_string())
    }

    /// 从字符串解析 TOML 配置
    pub fn parse(content: &str, name: impl Into<String>) -> anyhow::Result<Self> {
        let name = name.into();
        let value: toml::Value =
            toml::from_str(content).with_context(|| format!("Failed to parse TOML '{}'", name))?;

        let mut properties = HashMap::new();
        Self::flatten_toml(&value, String::new(), &mut properties);

        Ok(Self {
            name,
            properties,
            priority: 0, // 文件配置优先级最低
        })
    }

    /// 展平 TOML 结构
    /// 例如: { component-scan: { base-packages: [...] } } -> { "component-scan.base-packages": [...] }
    fn flatten_toml(value: &toml::Value, prefix: String, result: &mut HashMap<String, ConfigValue>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    Self::flatten_toml(val, new_prefix, result);
                }
            }
            other => {
                result.insert(prefix, Self::toml_value_to_config(other));
            }
        }
    }

    /// 转换 TOML 值为 ConfigValue
    fn toml_value_to_config(value: &toml::Value) -> ConfigValue {
        match value {
            toml::Value::String(s) => ConfigValue::String(s.clone()),
            toml::Value::Integer(i) => ConfigValue::Int(*i),
            toml::Value::Float(f) => ConfigValue::Float(*f),
            toml::Value::Boolean(b) => ConfigValue::Bool(*b),
            toml::Value::Array(arr) => {
                ConfigValue::Array(arr.iter().map(Self::toml_value_to_config).collect())
            }
            toml::Value::Table(table) => ConfigValue::Object(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::toml_value_to_config(v)))
                    .collect(),
            ),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
        }
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl PropertySource for TomlPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.properties.get(key).cloned()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// 内存配置源（用于测试或运行时配置）
pub struct MapPropertySource {
    name: String,
    properties: HashMap<String, ConfigValue>,
    priority: i32,
}

impl MapPropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
            priority: 50,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.properties.get(key).cloned()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_configurations() {
        assert_eq!(
            ["pkg.mapper", "pkg.service"].base_packages(),
            Some(vec!["pkg.mapper".to_string(), "pkg.service".to_string()])
        );
        assert_eq!(Vec::<String>::new().base_packages(), Some(vec![]));
    }

    #[test]
    fn test_toml_base_packages() {
        let source = TomlPropertySource::parse(
            r#"
            [component-scan]
            base-packages = ["pkg.mapper", "pkg.service"]
            "#,
            "application.toml",
        )
        .unwrap();

        let env = Environment::new().with_property_source(Box::new(source));

        assert_eq!(
            env.base_packages(),
            Some(vec!["pkg.mapper".to_string(), "pkg.service".to_string()])
        );
    }

    #[test]
    fn test_comma_separated_base_packages() {
        let env = Environment::new().with_property_source(Box::new(
            MapPropertySource::new("inline").with_property(
                BASE_PACKAGES_KEY,
                ConfigValue::String("pkg.mapper, ,pkg.service".to_string()),
            ),
        ));

        assert_eq!(
            env.base_packages(),
            Some(vec!["pkg.mapper".to_string(), "pkg.service".to_string()])
        );
    }

    #[test]
    fn test_missing_base_packages() {
        assert_eq!(Environment::new().base_packages(), None);
    }

    #[test]
    fn test_higher_priority_source_wins() {
        let low = MapPropertySource::new("low")
            .with_property("banner", ConfigValue::Bool(true))
            .with_priority(1);
        let high = MapPropertySource::new("high")
            .with_property("banner", ConfigValue::String("no".to_string()))
            .with_priority(10);

        let env = Environment::new()
            .with_property_source(Box::new(low))
            .with_property_source(Box::new(high));

        assert_eq!(env.get_bool("banner"), Some(false));
    }

    #[test]
    fn test_env_key_mapping() {
        let source = EnvironmentPropertySource::new("APP_");
        assert_eq!(
            source.key_to_env(BASE_PACKAGES_KEY),
            "APP_COMPONENT_SCAN_BASE_PACKAGES"
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(TomlPropertySource::parse("component-scan = [", "broken.toml").is_err());
    }
}
