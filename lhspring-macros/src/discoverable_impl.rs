use proc_macro::TokenStream;
use proc_macro_error::abort;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput};

use crate::attribute_helpers::{get_component_name, get_scope};

pub(crate) fn derive_discoverable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    if let Data::Union(_) = input.data {
        abort!(name, "Discoverable cannot be derived for unions");
    }

    // 描述符是静态的，只能指向一个具体类型
    if !input.generics.params.is_empty() {
        abort!(
            input.generics,
            "Discoverable cannot be derived for generic types";
            help = "wrap the concrete type in a non-generic struct"
        );
    }

    let type_name = name.to_string();

    let component = get_component_name(&input.attrs).map(|bean_name| {
        quote! { .with_component(#bean_name) }
    });

    let scope = get_scope(&input.attrs).map(|scope| {
        quote! { .with_scope(#scope) }
    });

    let expanded = quote! {
        ::lhspring_core::inventory::submit! {
            ::lhspring_core::ClassDescriptor::new(
                module_path!(),
                #type_name,
                ::lhspring_core::component::construct_default::<#name>,
            )
            #component
            #scope
        }
    };

    TokenStream::from(expanded)
}
