use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Scope;

/// Bean 定义 - 描述一个被扫描到的组件
///
/// 在扫描阶段创建，之后只读，由定义注册表独占持有。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDefinition {
    /// Bean 的名称，也是查找的键
    id: String,

    /// Bean 的作用域
    scope: Scope,

    /// 实例化能力可以解析的完整类型路径
    type_name: String,
}

impl BeanDefinition {
    /// 创建新的 Bean 定义
    pub fn new(id: impl Into<String>, scope: Scope, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scope,
            type_name: type_name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_singleton(&self) -> bool {
        self.scope == Scope::Singleton
    }

    pub fn is_prototype(&self) -> bool {
        self.scope == Scope::Prototype
    }
}

impl fmt::Display for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] -> {}", self.id, self.scope, self.type_name)
    }
}
