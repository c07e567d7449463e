//! Bean 生命周期
//!
//! 负责把 Bean 定义变成实例：单例在容器启动时统一创建并缓存，
//! 原型每次获取时重新创建。

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::bean::BeanDefinition;
use crate::class::Instantiator;
use crate::error::{ContainerError, ContainerResult};
use crate::registry::BeanDefinitionRegistry;

/// 容器交给调用方的共享实例
pub type SharedBean = Arc<dyn Any + Send + Sync>;

/// 单例缓存
///
/// 预实例化完成后不再写入，条目在容器生命周期内不会被替换
#[derive(Default)]
pub struct SingletonCache {
    instances: HashMap<String, SharedBean>,
}

impl SingletonCache {
    pub fn get(&self, name: &str) -> Option<SharedBean> {
        self.instances.get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn insert(&mut self, name: &str, bean: SharedBean) {
        self.instances.entry(name.to_string()).or_insert(bean);
    }
}

impl fmt::Debug for SingletonCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonCache")
            .field("names", &self.instances.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Bean 生命周期引擎
#[derive(Clone)]
pub struct BeanLifecycle {
    instantiator: Arc<dyn Instantiator>,
}

impl BeanLifecycle {
    pub fn new(instantiator: Arc<dyn Instantiator>) -> Self {
        Self { instantiator }
    }

    /// 解析类型并调用无参构造，失败时包装为 `ContainerError::Instantiation`
    pub fn create_bean(&self, definition: &BeanDefinition) -> ContainerResult<SharedBean> {
        let instance = self
            .instantiator
            .instantiate(definition.type_name())
            .map_err(|source| {
                tracing::error!(
                    "Failed to instantiate bean '{}' ({}): {:#}",
                    definition.id(),
                    definition.type_name(),
                    source
                );
                ContainerError::Instantiation {
                    bean: definition.id().to_string(),
                    type_name: definition.type_name().to_string(),
                    source,
                }
            })?;

        Ok(Arc::from(instance))
    }

    /// 创建注册表中所有单例，任意一个失败则整体失败
    pub fn preinstantiate_singletons(
        &self,
        registry: &BeanDefinitionRegistry,
    ) -> ContainerResult<SingletonCache> {
        let mut cache = SingletonCache::default();

        for definition in registry.singletons() {
            tracing::debug!("Creating shared instance of singleton bean '{}'", definition.id());
            let bean = self.create_bean(definition)?;
            cache.insert(definition.id(), bean);
        }

        tracing::debug!("Pre-instantiated {} singleton bean(s)", cache.len());
        Ok(cache)
    }
}

impl fmt::Debug for BeanLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanLifecycle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_index::ClassIndex;
    use crate::component::{construct_default, ClassDescriptor};
    use crate::Scope;

    #[derive(Default)]
    struct UserMapper {
        calls: u32,
    }

    fn failing() -> anyhow::Result<Box<dyn Any + Send + Sync>> {
        anyhow::bail!("connection refused")
    }

    fn lifecycle() -> BeanLifecycle {
        let index = ClassIndex::new()
            .with_class(ClassDescriptor::new(
                "pkg",
                "UserMapper",
                construct_default::<UserMapper>,
            ))
            .with_class(ClassDescriptor::new("pkg", "Broken", failing));
        BeanLifecycle::new(Arc::new(index))
    }

    #[test]
    fn test_create_bean_returns_default_instance() {
        let def = BeanDefinition::new("userMapper", Scope::Singleton, "pkg::UserMapper");
        let bean = lifecycle().create_bean(&def).unwrap();
        assert_eq!(bean.downcast_ref::<UserMapper>().unwrap().calls, 0);
    }

    #[test]
    fn test_create_bean_wraps_constructor_failure() {
        let def = BeanDefinition::new("broken", Scope::Prototype, "pkg::Broken");
        let err = lifecycle().create_bean(&def).unwrap_err();

        match err {
            ContainerError::Instantiation { bean, type_name, source } => {
                assert_eq!(bean, "broken");
                assert_eq!(type_name, "pkg::Broken");
                assert!(source.to_string().contains("connection refused"));
            }
            other => panic!("Expected Instantiation error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_bean_unknown_type() {
        let def = BeanDefinition::new("ghost", Scope::Singleton, "pkg::Ghost");
        let err = lifecycle().create_bean(&def).unwrap_err();
        assert!(matches!(err, ContainerError::Instantiation { .. }));
    }

    #[test]
    fn test_preinstantiate_only_singletons() {
        let mut registry = BeanDefinitionRegistry::new();
        registry.register(BeanDefinition::new("userMapper", Scope::Singleton, "pkg::UserMapper"));
        registry.register(BeanDefinition::new("broken", Scope::Prototype, "pkg::Broken"));

        let cache = lifecycle().preinstantiate_singletons(&registry).unwrap();

        assert_eq!(cache.len(), 1);
        assert!(cache.contains("userMapper"));
        assert!(!cache.contains("broken"));

        let first = cache.get("userMapper").unwrap();
        let second = cache.get("userMapper").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_preinstantiate_fails_on_broken_singleton() {
        let mut registry = BeanDefinitionRegistry::new();
        registry.register(BeanDefinition::new("broken", Scope::Singleton, "pkg::Broken"));

        assert!(lifecycle().preinstantiate_singletons(&registry).is_err());
    }
}
