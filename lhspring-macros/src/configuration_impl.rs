use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::attribute_helpers::get_component_scan;

pub(crate) fn derive_configuration_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // 没有 #[component_scan] 时返回 None，由容器报告配置错误
    let base_packages = match get_component_scan(&input.attrs) {
        Some(packages) => quote! {
            ::std::option::Option::Some(::std::vec![#(::std::string::String::from(#packages)),*])
        },
        None => quote! { ::std::option::Option::None },
    };

    let expanded = quote! {
        impl #impl_generics ::lhspring_core::config::Configuration for #name #ty_generics #where_clause {
            fn base_packages(&self) -> ::std::option::Option<::std::vec::Vec<::std::string::String>> {
                #base_packages
            }
        }
    };

    TokenStream::from(expanded)
}
