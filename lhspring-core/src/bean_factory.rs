//! Bean Factory - 容器的查询接口
//!
//! 参考 Spring 的 BeanFactory 分层：`BeanFactory` 可作为 trait object 使用，
//! 泛型查询放在 `BeanFactoryExt` 中，只读列举放在 `ListableBeanFactory` 中。

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::bean::BeanDefinition;
use crate::error::{ContainerError, ContainerResult};
use crate::lifecycle::SharedBean;

/// BeanFactory - 最基础的容器接口
pub trait BeanFactory: Send + Sync {
    /// 通过名称获取 Bean
    ///
    /// 单例返回缓存的实例，原型每次返回新实例
    fn get_bean(&self, name: &str) -> ContainerResult<SharedBean>;

    /// 检查是否包含指定名称的 Bean
    fn contains_bean(&self, name: &str) -> bool;

    /// 指定 Bean 是否为单例
    fn is_singleton(&self, name: &str) -> ContainerResult<bool>;

    /// 指定 Bean 是否为原型
    fn is_prototype(&self, name: &str) -> ContainerResult<bool> {
        self.is_singleton(name).map(|singleton| !singleton)
    }
}

/// BeanFactoryExt - 带类型的查询
///
/// 包含泛型方法，不能作为 trait object 使用
pub trait BeanFactoryExt: BeanFactory {
    /// 通过名称获取 Bean 并转换为具体类型
    fn get_bean_as<T: Any + Send + Sync>(&self, name: &str) -> ContainerResult<Arc<T>> {
        self.get_bean(name)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                bean: name.to_string(),
                expected: type_name::<T>().to_string(),
            })
    }
}

impl<F: BeanFactory + ?Sized> BeanFactoryExt for F {}

/// ListableBeanFactory - 可列举的 Bean 工厂
pub trait ListableBeanFactory: BeanFactory {
    /// 获取所有 Bean 的名称
    fn get_bean_names(&self) -> Vec<String>;

    /// 获取 Bean 定义的数量
    fn get_bean_definition_count(&self) -> usize;

    /// 获取单个 Bean 定义
    fn get_bean_definition(&self, name: &str) -> ContainerResult<BeanDefinition>;
}
