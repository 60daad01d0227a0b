use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field};

pub fn macro_deref(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Deref can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let marked: Vec<&Field> = data
        .fields
        .iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path().is_ident("deref")))
        .collect();

    let target = match marked.as_slice() {
        [field] => *field,
        [] => {
            return syn::Error::new(ident.span(), "Deref needs one field marked with #[deref]")
                .into_compile_error()
                .into()
        }
        _ => {
            return syn::Error::new(ident.span(), "only one field can be marked with #[deref]")
                .into_compile_error()
                .into()
        }
    };

    let Some(target_ident) = target.ident.as_ref() else {
        return syn::Error::new(ident.span(), "Deref only supports named fields")
            .into_compile_error()
            .into();
    };
    let target_ty = &target.ty;

    quote!(
        impl #impl_generics core::ops::Deref for #ident #ty_generics #where_clause {
            type Target = #target_ty;

            fn deref(&self) -> &Self::Target {
                &self.#target_ident
            }
        }

        impl #impl_generics core::ops::DerefMut for #ident #ty_generics #where_clause {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.#target_ident
            }
        }
    )
    .into()
}
