use std::collections::HashMap;

use crate::bean::BeanDefinition;

/// Bean 定义注册表
///
/// 扫描阶段写入，容器构造完成后只读。同名定义直接覆盖，不做唯一性校验。
#[derive(Debug, Default, Clone)]
pub struct BeanDefinitionRegistry {
    definitions: HashMap<String, BeanDefinition>,
}

impl BeanDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册 Bean 定义，返回被覆盖的旧定义
    pub fn register(&mut self, definition: BeanDefinition) -> Option<BeanDefinition> {
        let name = definition.id().to_string();

        tracing::trace!(
            "Registering bean definition: name='{}', type='{}', scope={}",
            name,
            definition.type_name(),
            definition.scope()
        );

        let previous = self.definitions.insert(name.clone(), definition);
        if let Some(ref old) = previous {
            // 重叠的扫描根会再次发现同一个类型
            if old.type_name() == self.definitions[&name].type_name() {
                tracing::debug!("Bean definition '{}' registered again by another root", name);
                return previous;
            }
            tracing::warn!(
                "Bean definition '{}' overridden: '{}' replaced by '{}'",
                name,
                old.type_name(),
                self.definitions[&name].type_name()
            );
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&BeanDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BeanDefinition)> {
        self.definitions.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// 所有单例作用域的定义
    pub fn singletons(&self) -> impl Iterator<Item = &BeanDefinition> {
        self.definitions.values().filter(|def| def.is_singleton())
    }
}
