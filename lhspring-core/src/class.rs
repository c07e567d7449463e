//! 类路径与实例化能力
//!
//! 容器本身不关心组件元数据如何声明、类型如何加载，只通过这里的两个
//! trait 访问它们。默认实现见 [`ClassIndex`](crate::class_index::ClassIndex)。

use std::any::Any;

use crate::component::ClassDescriptor;

/// 包内的一个条目
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PackageEntry {
    /// 子包，值为完整包路径
    Package(String),

    /// 可扫描的类，值为完整类型路径
    Class(String),
}

/// 类路径 - 组件标记的读取能力
pub trait ClassPath: Send + Sync {
    /// 列出包下的直接子包和类
    ///
    /// 包不存在时返回 `None`
    fn entries(&self, package: &str) -> Option<Vec<PackageEntry>>;

    /// 按完整类型路径加载类描述符，用于读取组件标记和作用域标记
    fn load_class(&self, type_name: &str) -> Option<ClassDescriptor>;
}

/// 实例化能力 - 根据完整类型路径构造无参实例
pub trait Instantiator: Send + Sync {
    fn instantiate(&self, type_name: &str) -> anyhow::Result<Box<dyn Any + Send + Sync>>;
}
