use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lhspring_core::prelude::*;
use lhspring_macros::{Configuration, Discoverable};

mod mapper {
    use super::*;

    #[derive(Debug, Default, Discoverable)]
    #[component]
    pub struct UserMapper;

    impl UserMapper {
        pub fn find_name(&self, id: u32) -> String {
            format!("user-{}", id)
        }
    }

    // 没有组件标记，不会被注册
    #[derive(Default, Discoverable)]
    pub struct RowConverter;

    pub mod nested {
        use super::*;

        #[derive(Default, Discoverable)]
        #[component(name = "orderMapper")]
        #[scope("Singleton")]
        pub struct OrderMapperImpl;
    }
}

mod factory {
    use super::*;

    pub static CREATED: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Discoverable)]
    #[component("widgetFactory")]
    #[scope("prototype")]
    pub struct WidgetFactoryImpl {
        pub serial: usize,
    }

    impl Default for WidgetFactoryImpl {
        fn default() -> Self {
            Self {
                serial: CREATED.fetch_add(1, Ordering::SeqCst),
            }
        }
    }
}

#[derive(Configuration)]
#[component_scan("component_scan.mapper")]
struct MapperConfig;

#[derive(Configuration)]
#[component_scan("component_scan::mapper", "component_scan.factory")]
struct FullConfig;

#[derive(Configuration)]
#[component_scan("component_scan.nowhere")]
struct EmptyConfig;

#[derive(Configuration)]
struct MissingScanConfig;

#[test]
fn test_scan_registers_marked_components_recursively() {
    let context = ApplicationContext::new(&MapperConfig).unwrap();

    let mut names = context.get_bean_names();
    names.sort();
    assert_eq!(names, vec!["orderMapper", "userMapper"]);
    assert!(!context.contains_bean("rowConverter"));

    let definition = context.get_bean_definition("userMapper").unwrap();
    assert_eq!(definition.scope(), Scope::Singleton);
    assert_eq!(definition.type_name(), "component_scan::mapper::UserMapper");
}

#[test]
fn test_singleton_is_shared() {
    let context = ApplicationContext::new(&MapperConfig).unwrap();

    let first = context.get_bean_as::<mapper::UserMapper>("userMapper").unwrap();
    let second = context.get_bean_as::<mapper::UserMapper>("userMapper").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.find_name(7), "user-7");
}

#[test]
fn test_prototype_is_created_per_lookup() {
    let context = ApplicationContext::new(&FullConfig).unwrap();

    let first = context
        .get_bean_as::<factory::WidgetFactoryImpl>("widgetFactory")
        .unwrap();
    let second = context
        .get_bean_as::<factory::WidgetFactoryImpl>("widgetFactory")
        .unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_ne!(first.serial, second.serial);
    assert!(context.is_prototype("widgetFactory").unwrap());
}

#[test]
fn test_unknown_name_is_not_found() {
    let context = ApplicationContext::new(&FullConfig).unwrap();

    match context.get_bean("nonexistent") {
        Err(ContainerError::NotFound(name)) => assert_eq!(name, "nonexistent"),
        other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_nonexistent_root_yields_empty_container() {
    let context = ApplicationContext::new(&EmptyConfig).unwrap();

    assert_eq!(context.get_bean_definition_count(), 0);
    assert!(context.get_bean_names().is_empty());
}

#[test]
fn test_missing_component_scan_is_fatal() {
    let err = ApplicationContext::new(&MissingScanConfig).unwrap_err();
    assert!(matches!(err, ContainerError::Configuration(_)));
}

#[test]
fn test_concurrent_lookup_shares_singleton() {
    let context = Arc::new(ApplicationContext::new(&FullConfig).unwrap());
    let expected = context.get_bean("userMapper").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let context = Arc::clone(&context);
            std::thread::spawn(move || {
                let mapper = context.get_bean("userMapper").unwrap();
                let widget = context.get_bean("widgetFactory").unwrap();
                (mapper, widget)
            })
        })
        .collect();

    let mut widgets = Vec::new();
    for handle in handles {
        let (mapper, widget) = handle.join().unwrap();
        assert!(Arc::ptr_eq(&mapper, &expected));
        widgets.push(widget);
    }

    for (i, a) in widgets.iter().enumerate() {
        for b in widgets.iter().skip(i + 1) {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}
