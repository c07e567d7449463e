mod attribute_helpers;
mod configuration_impl;
mod discoverable_impl;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;

/// Discoverable 派生宏
///
/// 把类型登记到组件扫描可见的类目录中，所在模块路径即扫描时的包路径。
/// 只有带 `#[component]` 的类型会被注册为 Bean，类型必须实现 `Default`
///
/// 用法：
/// ```ignore
/// #[derive(Default, Discoverable)]
/// #[component]                        // 名称由类型名推导：userMapper
/// // 或
/// #[component("userMapper")]          // 指定bean名称（简写形式）
/// // 或
/// #[component(name = "userMapper")]   // 指定bean名称（完整形式）
/// #[scope("prototype")]               // 可选：指定作用域 (singleton/prototype)
/// pub struct UserMapper;
/// ```
#[proc_macro_derive(Discoverable, attributes(component, scope))]
#[proc_macro_error]
pub fn derive_discoverable(input: TokenStream) -> TokenStream {
    discoverable_impl::derive_discoverable_impl(input)
}

/// Configuration 派生宏
///
/// 声明组件扫描的根路径，`.` 和 `::` 两种分隔形式都可以
///
/// # 用法
///
/// ```ignore
/// #[derive(Configuration)]
/// #[component_scan("app_demo.mapper", "app_demo::service")]
/// pub struct SpringConfig;
///
/// let context = ApplicationContext::new(&SpringConfig)?;
/// ```
#[proc_macro_derive(Configuration, attributes(component_scan))]
#[proc_macro_error]
pub fn derive_configuration(input: TokenStream) -> TokenStream {
    configuration_impl::derive_configuration_impl(input)
}
