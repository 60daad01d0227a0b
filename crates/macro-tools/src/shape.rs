use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput};

pub fn macro_shape(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let generics = input.generics;

    if !matches!(input.data, Data::Struct(_)) {
        return syn::Error::new(ident.span(), "Shape can only be applied to structs")
            .into_compile_error()
            .into();
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote!(
        impl #impl_generics From<#ident #ty_generics> for crate::shape::Shape #where_clause {
            fn from(value: #ident #ty_generics) -> Self {
                crate::shape::Shape::#ident(value)
            }
        }

        impl #impl_generics From<&#ident #ty_generics> for crate::shape::Shape #where_clause {
            fn from(value: &#ident #ty_generics) -> Self {
                crate::shape::Shape::#ident(value.clone())
            }
        }
    )
    .into()
}
