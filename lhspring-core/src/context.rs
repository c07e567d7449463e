use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::bean::BeanDefinition;
use crate::bean_factory::{BeanFactory, ListableBeanFactory};
use crate::class::{ClassPath, Instantiator};
use crate::class_index::ClassIndex;
use crate::config::Configuration;
use crate::error::{ContainerError, ContainerResult};
use crate::lifecycle::{BeanLifecycle, SharedBean, SingletonCache};
use crate::registry::BeanDefinitionRegistry;
use crate::scanner::ComponentScanner;
use crate::utils::path::normalize_package;

/// 容器状态
///
/// 只会向前推进；扫描或预实例化失败时构造调用整体失败，
/// 调用方拿到的容器总是处于 `Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Uninitialized,
    Scanning,
    EagerInitializing,
    Ready,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerState::Uninitialized => "uninitialized",
            ContainerState::Scanning => "scanning",
            ContainerState::EagerInitializing => "eager-initializing",
            ContainerState::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// 应用上下文 - 容器的默认实现
///
/// 定义注册表和单例缓存在构造完成后不再变化，
/// 因此可以放进 `Arc` 中被多个线程并发查询而无需加锁
pub struct ApplicationContext {
    /// 扫描根路径（已规范化）
    base_packages: Vec<String>,

    /// Bean 定义存储
    registry: BeanDefinitionRegistry,

    /// 单例 Bean 缓存
    singletons: SingletonCache,

    /// 原型 Bean 按需创建
    lifecycle: BeanLifecycle,
}

impl ApplicationContext {
    /// 使用链接期注册的组件创建容器
    ///
    /// 依次完成：读取扫描路径 -> 扫描组件 -> 预实例化所有单例
    pub fn new<C>(configuration: &C) -> ContainerResult<Self>
    where
        C: Configuration + ?Sized,
    {
        Self::builder().build(configuration)
    }

    /// 构建器模式创建上下文，可替换类路径和实例化实现
    pub fn builder() -> ApplicationContextBuilder {
        ApplicationContextBuilder::new()
    }

    /// 对外可见的容器总是已就绪
    pub fn state(&self) -> ContainerState {
        ContainerState::Ready
    }

    /// 规范化后的扫描根路径
    pub fn base_packages(&self) -> &[String] {
        &self.base_packages
    }

    /// 遍历所有 Bean 定义
    pub fn bean_definitions(&self) -> impl Iterator<Item = &BeanDefinition> {
        self.registry.iter().map(|(_, def)| def)
    }

    fn definition(&self, name: &str) -> ContainerResult<&BeanDefinition> {
        self.registry.get(name).ok_or_else(|| {
            tracing::debug!("Bean '{}' not found in container", name);
            ContainerError::NotFound(name.to_string())
        })
    }
}

impl BeanFactory for ApplicationContext {
    fn get_bean(&self, name: &str) -> ContainerResult<SharedBean> {
        tracing::trace!("Requesting bean: '{}'", name);

        let definition = self.definition(name)?;

        if definition.is_singleton() {
            return self.singletons.get(name).ok_or_else(|| {
                tracing::error!("Singleton bean '{}' is missing from the cache", name);
                ContainerError::NotFound(name.to_string())
            });
        }

        tracing::debug!("Creating new instance of prototype bean '{}'", name);
        self.lifecycle.create_bean(definition)
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    fn is_singleton(&self, name: &str) -> ContainerResult<bool> {
        self.definition(name).map(BeanDefinition::is_singleton)
    }
}

impl ListableBeanFactory for ApplicationContext {
    fn get_bean_names(&self) -> Vec<String> {
        self.registry.names()
    }

    fn get_bean_definition_count(&self) -> usize {
        self.registry.len()
    }

    fn get_bean_definition(&self, name: &str) -> ContainerResult<BeanDefinition> {
        self.definition(name).cloned()
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("base_packages", &self.base_packages)
            .field("definitions", &self.registry.len())
            .field("singletons", &self.singletons)
            .finish()
    }
}

/// 应用上下文构建器
#[derive(Default)]
pub struct ApplicationContextBuilder {
    class_path: Option<Arc<dyn ClassPath>>,
    instantiator: Option<Arc<dyn Instantiator>>,
}

impl ApplicationContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同时作为类路径和实例化实现使用
    pub fn class_index(self, index: ClassIndex) -> Self {
        let index = Arc::new(index);
        self.class_path(index.clone()).instantiator(index)
    }

    /// 设置类路径
    pub fn class_path(mut self, class_path: Arc<dyn ClassPath>) -> Self {
        self.class_path = Some(class_path);
        self
    }

    /// 设置实例化实现
    pub fn instantiator(mut self, instantiator: Arc<dyn Instantiator>) -> Self {
        self.instantiator = Some(instantiator);
        self
    }

    /// 构建上下文
    ///
    /// 未设置的类路径或实例化实现使用 inventory 中收集到的类
    pub fn build<C>(self, configuration: &C) -> ContainerResult<ApplicationContext>
    where
        C: Configuration + ?Sized,
    {
        let start_time = Instant::now();

        let (class_path, instantiator) = match (self.class_path, self.instantiator) {
            (Some(class_path), Some(instantiator)) => (class_path, instantiator),
            (class_path, instantiator) => {
                let index = Arc::new(ClassIndex::from_inventory());
                let class_path: Arc<dyn ClassPath> = match class_path {
                    Some(class_path) => class_path,
                    None => index.clone(),
                };
                let instantiator: Arc<dyn Instantiator> = match instantiator {
                    Some(instantiator) => instantiator,
                    None => index,
                };
                (class_path, instantiator)
            }
        };

        let mut state = ContainerState::Uninitialized;
        let fail = |state: ContainerState, err: ContainerError| {
            tracing::error!("ApplicationContext failed while {}: {}", state, err);
            err
        };

        state = advance(state, ContainerState::Scanning);
        let base_packages = resolve_base_packages(configuration).map_err(|e| fail(state, e))?;

        let mut registry = BeanDefinitionRegistry::new();
        let scanner = ComponentScanner::new(class_path.as_ref());
        for base_package in &base_packages {
            scanner
                .scan(base_package, &mut registry)
                .map_err(|e| fail(state, e))?;
        }
        tracing::info!(
            "Component scan completed, {} bean definition(s) registered",
            registry.len()
        );

        state = advance(state, ContainerState::EagerInitializing);
        let lifecycle = BeanLifecycle::new(instantiator);
        let singletons = lifecycle
            .preinstantiate_singletons(&registry)
            .map_err(|e| fail(state, e))?;

        advance(state, ContainerState::Ready);
        tracing::info!(
            "ApplicationContext ready in {}ms: {} bean(s), {} singleton(s)",
            start_time.elapsed().as_millis(),
            registry.len(),
            singletons.len()
        );

        Ok(ApplicationContext {
            base_packages,
            registry,
            singletons,
            lifecycle,
        })
    }
}

fn advance(from: ContainerState, to: ContainerState) -> ContainerState {
    tracing::debug!("ApplicationContext state: {} -> {}", from, to);
    to
}

/// 读取并规范化扫描路径，缺失或为空都是配置错误
fn resolve_base_packages<C>(configuration: &C) -> ContainerResult<Vec<String>>
where
    C: Configuration + ?Sized,
{
    let declared = configuration.base_packages().ok_or_else(|| {
        ContainerError::Configuration(
            "no component scan base packages declared on the configuration".to_string(),
        )
    })?;

    let base_packages: Vec<String> = declared
        .iter()
        .map(|p| normalize_package(p))
        .filter(|p| !p.is_empty())
        .collect();

    if base_packages.is_empty() {
        return Err(ContainerError::Configuration(
            "component scan base package list is empty".to_string(),
        ));
    }

    tracing::info!("Component scan base packages: {:?}", base_packages);
    Ok(base_packages)
}
