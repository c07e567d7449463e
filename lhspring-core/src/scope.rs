use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{SCOPE_PROTOTYPE, SCOPE_SINGLETON};

/// Bean 的作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// 单例模式 - 容器中只有一个实例
    #[default]
    Singleton,

    /// 原型模式 - 每次请求都创建新实例
    Prototype,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Singleton => SCOPE_SINGLETON,
            Scope::Prototype => SCOPE_PROTOTYPE,
        }
    }

    /// 解析 `#[scope("...")]` 上声明的值
    ///
    /// 空字符串视为未声明，返回默认的单例作用域。
    pub fn from_declared(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Scope::default());
        }
        value.parse()
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            SCOPE_SINGLETON => Ok(Scope::Singleton),
            SCOPE_PROTOTYPE => Ok(Scope::Prototype),
            _ => Err(format!(
                "Unknown scope '{}', expected '{}' or '{}'",
                s, SCOPE_SINGLETON, SCOPE_PROTOTYPE
            )),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
