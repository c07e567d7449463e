use proc_macro_error::abort;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, LitStr, Meta, MetaNameValue, Token};

/// 查找指定名称的属性，重复声明时报错
fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident(name));
    let first = found.next()?;
    if let Some(duplicate) = found.next() {
        abort!(duplicate, "duplicate #[{}] attribute", name);
    }
    Some(first)
}

/// 从属性中提取组件标记
///
/// 支持格式:
/// - `#[component]` - 名称由类型名推导
/// - `#[component("userService")]`
/// - `#[component(name = "userService")]`
///
/// 没有该属性时返回 None
pub(crate) fn get_component_name(attrs: &[Attribute]) -> Option<String> {
    let attr = find_attr(attrs, "component")?;

    match &attr.meta {
        Meta::Path(_) => Some(String::new()),
        Meta::List(_) => {
            if let Ok(name_lit) = attr.parse_args::<LitStr>() {
                return Some(name_lit.value());
            }
            if let Ok(name_value) = attr.parse_args::<MetaNameValue>() {
                if name_value.path.is_ident("name") {
                    if let Some(name) = lit_str(&name_value.value) {
                        return Some(name);
                    }
                }
            }
            abort!(
                attr,
                "invalid #[component] attribute";
                help = "use #[component], #[component(\"name\")] or #[component(name = \"name\")]"
            )
        }
        Meta::NameValue(_) => abort!(
            attr,
            "invalid #[component] attribute";
            help = "use #[component(name = \"name\")] instead"
        ),
    }
}

/// 从属性中提取作用域
///
/// 值原样保留，由容器在扫描时校验
pub(crate) fn get_scope(attrs: &[Attribute]) -> Option<String> {
    let attr = find_attr(attrs, "scope")?;
    match attr.parse_args::<LitStr>() {
        Ok(scope_lit) => Some(scope_lit.value()),
        Err(_) => abort!(
            attr,
            "invalid #[scope] attribute";
            help = "use #[scope(\"singleton\")] or #[scope(\"prototype\")]"
        ),
    }
}

/// 从属性中提取扫描路径
/// 支持格式: #[component_scan("app.mapper", "app.service")]
pub(crate) fn get_component_scan(attrs: &[Attribute]) -> Option<Vec<String>> {
    let attr = find_attr(attrs, "component_scan")?;

    if let Meta::Path(_) = attr.meta {
        return Some(Vec::new());
    }

    match attr.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated) {
        Ok(packages) => Some(packages.iter().map(LitStr::value).collect()),
        Err(_) => abort!(
            attr,
            "invalid #[component_scan] attribute";
            help = "use #[component_scan(\"pkg.a\", \"pkg.b\")]"
        ),
    }
}

fn lit_str(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(s) => Some(s.value()),
            _ => None,
        },
        _ => None,
    }
}
