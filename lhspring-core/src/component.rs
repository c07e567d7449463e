use std::any::Any;

use crate::utils::path::qualify;

/// 无参构造函数类型
///
/// 构造失败通过 `anyhow::Error` 返回，由生命周期引擎包装为
/// `ContainerError::Instantiation`
pub type Constructor = fn() -> anyhow::Result<Box<dyn Any + Send + Sync>>;

/// 使用 `Default` 构造实例，`#[derive(Discoverable)]` 生成的描述符使用它
pub fn construct_default<T>() -> anyhow::Result<Box<dyn Any + Send + Sync>>
where
    T: Default + Any + Send + Sync,
{
    Ok(Box::new(T::default()))
}

/// 组件标记，对应 `#[component]` / `#[component("name")]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentMarker {
    /// 声明的 Bean 名称，可能为空
    pub name: &'static str,
}

/// 作用域标记，对应 `#[scope("prototype")]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeMarker {
    pub value: &'static str,
}

/// 类描述符 - 一个可被扫描的类型
///
/// 由 `#[derive(Discoverable)]` 通过 inventory 在链接期收集，
/// 也可以在测试中手工构造后交给 `ClassIndex`
#[derive(Debug, Clone, Copy)]
pub struct ClassDescriptor {
    /// 所在模块路径，即 `module_path!()`
    pub module_path: &'static str,

    /// 简单类型名，例如 `UserMapper`
    pub type_name: &'static str,

    /// 组件标记，没有则不会被注册为 Bean
    pub component: Option<ComponentMarker>,

    /// 作用域标记
    pub scope: Option<ScopeMarker>,

    /// 无参构造函数
    pub constructor: Constructor,
}

impl ClassDescriptor {
    /// 创建一个没有任何标记的描述符
    pub const fn new(
        module_path: &'static str,
        type_name: &'static str,
        constructor: Constructor,
    ) -> Self {
        Self {
            module_path,
            type_name,
            component: None,
            scope: None,
            constructor,
        }
    }

    /// 添加组件标记
    pub const fn with_component(self, name: &'static str) -> Self {
        Self {
            component: Some(ComponentMarker { name }),
            ..self
        }
    }

    /// 添加作用域标记
    pub const fn with_scope(self, value: &'static str) -> Self {
        Self {
            scope: Some(ScopeMarker { value }),
            ..self
        }
    }

    /// 完整类型路径，例如 `app_demo::mapper::UserMapper`
    pub fn qualified_name(&self) -> String {
        qualify(self.module_path, self.type_name)
    }

    pub fn is_component(&self) -> bool {
        self.component.is_some()
    }
}

inventory::collect!(ClassDescriptor);

/// 遍历链接进当前程序的所有类描述符
pub fn registered_classes() -> impl Iterator<Item = &'static ClassDescriptor> {
    inventory::iter::<ClassDescriptor>.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct UserMapper;

    #[test]
    fn test_descriptor_builders() {
        let plain = ClassDescriptor::new("pkg::mapper", "UserMapper", construct_default::<UserMapper>);
        assert!(!plain.is_component());
        assert_eq!(plain.qualified_name(), "pkg::mapper::UserMapper");

        let marked = plain.with_component("").with_scope("prototype");
        assert_eq!(marked.component, Some(ComponentMarker { name: "" }));
        assert_eq!(marked.scope, Some(ScopeMarker { value: "prototype" }));
    }

    #[test]
    fn test_construct_default() {
        let instance = construct_default::<UserMapper>().unwrap();
        assert!(instance.downcast_ref::<UserMapper>().is_some());
    }
}
