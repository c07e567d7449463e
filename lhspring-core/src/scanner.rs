//! 组件扫描
//!
//! 递归遍历扫描根路径下的所有包，为带有组件标记的类生成 Bean 定义。

use crate::bean::BeanDefinition;
use crate::class::{ClassPath, PackageEntry};
use crate::error::{ContainerError, ContainerResult};
use crate::registry::BeanDefinitionRegistry;
use crate::utils::naming::bean_name_for;
use crate::utils::path::normalize_package;
use crate::Scope;

/// 组件扫描器
pub struct ComponentScanner<'a> {
    class_path: &'a dyn ClassPath,
}

impl<'a> ComponentScanner<'a> {
    pub fn new(class_path: &'a dyn ClassPath) -> Self {
        Self { class_path }
    }

    /// 扫描一个根路径，把发现的组件注册进 `registry`
    ///
    /// 根路径不存在时返回 0，不视为错误；任何一个类无法读取则整个扫描失败。
    /// 返回本次注册的 Bean 定义数量。
    pub fn scan(
        &self,
        base_package: &str,
        registry: &mut BeanDefinitionRegistry,
    ) -> ContainerResult<usize> {
        let root = normalize_package(base_package);

        if root.is_empty() || self.class_path.entries(&root).is_none() {
            tracing::warn!(
                "Base package '{}' does not resolve to any location, nothing to scan",
                base_package
            );
            return Ok(0);
        }

        tracing::info!("Scanning base package '{}'", root);

        let mut registered = 0;
        let mut pending = vec![root.clone()];

        while let Some(package) = pending.pop() {
            let entries = self.class_path.entries(&package).unwrap_or_default();

            for entry in entries {
                match entry {
                    PackageEntry::Package(sub_package) => pending.push(sub_package),
                    PackageEntry::Class(type_name) => {
                        if self.process_class(&type_name, registry)? {
                            registered += 1;
                        }
                    }
                }
            }
        }

        tracing::info!(
            "Base package '{}' scanned, registered {} bean definition(s)",
            root,
            registered
        );
        Ok(registered)
    }

    /// 读取类上的标记，带组件标记时注册 Bean 定义
    fn process_class(
        &self,
        type_name: &str,
        registry: &mut BeanDefinitionRegistry,
    ) -> ContainerResult<bool> {
        let descriptor = self.class_path.load_class(type_name).ok_or_else(|| {
            ContainerError::discovery(type_name, "class cannot be loaded from the class path")
        })?;

        let Some(component) = descriptor.component else {
            tracing::debug!("Skipping '{}': not marked as a component", type_name);
            return Ok(false);
        };

        let scope = match descriptor.scope {
            Some(marker) => Scope::from_declared(marker.value)
                .map_err(|reason| ContainerError::discovery(type_name, reason))?,
            None => Scope::default(),
        };

        let bean_name = bean_name_for(component.name, descriptor.type_name);

        tracing::debug!(
            "Found component '{}' (type='{}', scope={})",
            bean_name,
            type_name,
            scope
        );

        registry.register(BeanDefinition::new(bean_name, scope, type_name));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_index::ClassIndex;
    use crate::component::{construct_default, ClassDescriptor};

    #[derive(Default)]
    struct UserMapper;

    #[derive(Default)]
    struct OrderMapper;

    #[derive(Default)]
    struct WidgetFactoryImpl;

    #[derive(Default)]
    struct Helper;

    fn class_path() -> ClassIndex {
        ClassIndex::new()
            .with_class(
                ClassDescriptor::new("pkg::mapper", "UserMapper", construct_default::<UserMapper>)
                    .with_component(""),
            )
            .with_class(
                ClassDescriptor::new(
                    "pkg::mapper::order",
                    "OrderMapper",
                    construct_default::<OrderMapper>,
                )
                .with_component("orders"),
            )
            .with_class(
                ClassDescriptor::new(
                    "pkg::service",
                    "WidgetFactoryImpl",
                    construct_default::<WidgetFactoryImpl>,
                )
                .with_component("widgetFactory")
                .with_scope("prototype"),
            )
            .with_class(ClassDescriptor::new("pkg::mapper", "Helper", construct_default::<Helper>))
    }

    #[test]
    fn test_scan_registers_marked_classes_recursively() {
        let class_path = class_path();
        let mut registry = BeanDefinitionRegistry::new();

        let count = ComponentScanner::new(&class_path)
            .scan("pkg.mapper", &mut registry)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(registry.len(), 2);

        let user = registry.get("userMapper").unwrap();
        assert_eq!(user.scope(), Scope::Singleton);
        assert_eq!(user.type_name(), "pkg::mapper::UserMapper");

        let orders = registry.get("orders").unwrap();
        assert_eq!(orders.type_name(), "pkg::mapper::order::OrderMapper");

        assert!(!registry.contains("helper"));
    }

    #[test]
    fn test_scan_reads_scope_marker() {
        let class_path = class_path();
        let mut registry = BeanDefinitionRegistry::new();

        ComponentScanner::new(&class_path)
            .scan("pkg::service", &mut registry)
            .unwrap();

        let widget = registry.get("widgetFactory").unwrap();
        assert_eq!(widget.scope(), Scope::Prototype);
    }

    #[test]
    fn test_scan_missing_package_is_empty() {
        let class_path = class_path();
        let mut registry = BeanDefinitionRegistry::new();

        let count = ComponentScanner::new(&class_path)
            .scan("pkg.controller", &mut registry)
            .unwrap();

        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_scan_unloadable_class_aborts() {
        let mut class_path = class_path();
        class_path.add_unresolvable("pkg::mapper", "Ghost");
        let mut registry = BeanDefinitionRegistry::new();

        let err = ComponentScanner::new(&class_path)
            .scan("pkg", &mut registry)
            .unwrap_err();

        match err {
            ContainerError::Discovery { type_name, .. } => {
                assert_eq!(type_name, "pkg::mapper::Ghost")
            }
            other => panic!("Expected Discovery error, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_unknown_scope_aborts() {
        let class_path = ClassIndex::new().with_class(
            ClassDescriptor::new("pkg::odd", "Helper", construct_default::<Helper>)
                .with_component("")
                .with_scope("session"),
        );
        let mut registry = BeanDefinitionRegistry::new();

        let err = ComponentScanner::new(&class_path)
            .scan("pkg.odd", &mut registry)
            .unwrap_err();

        assert!(matches!(err, ContainerError::Discovery { .. }));
        assert!(err.is_fatal());
    }
}
