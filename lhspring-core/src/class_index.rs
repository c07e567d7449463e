//! 基于类描述符的类路径实现
//!
//! 把扁平的描述符列表按 `module_path` 组织成包树，使扫描器可以像遍历
//! 目录一样递归遍历子包。

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::anyhow;

use crate::class::{ClassPath, Instantiator, PackageEntry};
use crate::component::{registered_classes, ClassDescriptor};
use crate::utils::path::{ancestors, qualify};

#[derive(Debug, Default)]
struct PackageNode {
    packages: BTreeSet<String>,
    classes: BTreeSet<String>,
}

/// 类索引 - `ClassPath` 和 `Instantiator` 的默认实现
#[derive(Debug, Default)]
pub struct ClassIndex {
    packages: BTreeMap<String, PackageNode>,
    classes: HashMap<String, ClassDescriptor>,
}

impl ClassIndex {
    /// 创建空的类索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 收集所有通过 `#[derive(Discoverable)]` 注册的类
    pub fn from_inventory() -> Self {
        let mut index = Self::new();
        for descriptor in registered_classes() {
            index.add_class(*descriptor);
        }
        tracing::debug!(
            "Class index built from inventory: {} class(es) in {} package(s)",
            index.class_count(),
            index.packages.len()
        );
        index
    }

    /// 添加类（构建器形式）
    pub fn with_class(mut self, descriptor: ClassDescriptor) -> Self {
        self.add_class(descriptor);
        self
    }

    /// 添加类，同名类会被替换
    pub fn add_class(&mut self, descriptor: ClassDescriptor) {
        let qualified = descriptor.qualified_name();
        self.package_node(descriptor.module_path)
            .classes
            .insert(qualified.clone());

        if self.classes.insert(qualified.clone(), descriptor).is_some() {
            tracing::warn!("Class '{}' indexed twice, keeping the latest descriptor", qualified);
        }
    }

    /// 只登记类名而不提供描述符
    ///
    /// 扫描到这样的类时无法读取其标记，用于模拟类路径上存在但无法加载的类
    pub fn add_unresolvable(&mut self, package: &str, type_name: &str) {
        let qualified = qualify(package, type_name);
        self.package_node(package).classes.insert(qualified);
    }

    /// 取得包节点，沿途补齐所有父包并建立父子关系
    fn package_node(&mut self, package: &str) -> &mut PackageNode {
        let chain = ancestors(package);
        for pair in chain.windows(2) {
            self.packages
                .entry(pair[0].clone())
                .or_default()
                .packages
                .insert(pair[1].clone());
        }
        let leaf = chain.last().cloned().unwrap_or_default();
        self.packages.entry(leaf).or_default()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }
}

impl ClassPath for ClassIndex {
    fn entries(&self, package: &str) -> Option<Vec<PackageEntry>> {
        let node = self.packages.get(package)?;
        let entries = node
            .packages
            .iter()
            .cloned()
            .map(PackageEntry::Package)
            .chain(node.classes.iter().cloned().map(PackageEntry::Class))
            .collect();
        Some(entries)
    }

    fn load_class(&self, type_name: &str) -> Option<ClassDescriptor> {
        self.classes.get(type_name).copied()
    }
}

impl Instantiator for ClassIndex {
    fn instantiate(&self, type_name: &str) -> anyhow::Result<Box<dyn Any + Send + Sync>> {
        let descriptor = self
            .classes
            .get(type_name)
            .ok_or_else(|| anyhow!("class '{}' is not present in the class index", type_name))?;
        (descriptor.constructor)()
    }
}
