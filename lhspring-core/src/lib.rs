// lhspring-core: 基于组件扫描的极简 IoC 容器
//
// 启动时从配置读取扫描根路径，递归发现带组件标记的类型并注册为 Bean 定义，
// 随后预实例化所有单例；之后按名称查询：
// - 单例：返回缓存的同一个实例
// - 原型：每次查询创建新实例

pub mod app;
pub mod bean;
pub mod bean_factory;
pub mod class;
pub mod class_index;
pub mod component;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod registry;
pub mod scanner;
pub mod scope;
pub mod utils;

// 重新导出常用类型
pub use app::LhSpringApplication;
pub use bean::BeanDefinition;
pub use bean_factory::{BeanFactory, BeanFactoryExt, ListableBeanFactory};
pub use class::{ClassPath, Instantiator, PackageEntry};
pub use class_index::ClassIndex;
pub use component::{ClassDescriptor, ComponentMarker, Constructor, ScopeMarker};
pub use config::{
    ConfigValue, Configuration, Environment, EnvironmentPropertySource, MapPropertySource,
    PropertySource, TomlPropertySource,
};
pub use constants::*;
pub use context::{ApplicationContext, ApplicationContextBuilder, ContainerState};
pub use error::{ContainerError, ContainerResult, Result};
pub use lifecycle::{BeanLifecycle, SharedBean, SingletonCache};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use registry::BeanDefinitionRegistry;
pub use scanner::ComponentScanner;
pub use scope::Scope;

// 导出 inventory，供宏使用
pub use inventory;

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::app::LhSpringApplication;
    pub use crate::bean::BeanDefinition;
    pub use crate::bean_factory::{BeanFactory, BeanFactoryExt, ListableBeanFactory};
    pub use crate::config::{Configuration, Environment};
    pub use crate::context::ApplicationContext;
    pub use crate::error::{ContainerError, ContainerResult, Result};
    pub use crate::logging::{LogFormat, LogLevel, LoggingConfig};
    pub use crate::scope::Scope;
    // Re-export anyhow for convenience
    pub use anyhow::{anyhow, Context};
}
