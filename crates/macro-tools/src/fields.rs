use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parenthesized, spanned::Spanned, Attribute, Data, DeriveInput, Field, Ident, Type, Visibility,
};

/// types returned by value even without `#[r(copy)]`
const COPY_TYPES: &[&str] = &[
    "bool", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "f32",
    "f64", "FloatNum", "ObjectId", "ColliderId", "Layer",
];

#[derive(Clone)]
struct ReadOptions {
    vis: Visibility,
    copy: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum WriteKind {
    /// `xxx_mut(&mut self) -> &mut T`
    Mut,
    /// `set_xxx(&mut self, impl Into<T>)`
    Set,
    /// `set_xxx(&mut self, impl FnOnce(T) -> T)`
    Reducer,
}

#[derive(Clone)]
struct WriteOptions {
    vis: Visibility,
    kind: WriteKind,
}

fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

fn is_skipped(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| ["shared", "r", "w"].iter().any(|k| attr.path().is_ident(k)))
        .any(|attr| {
            let mut skip = false;
            let _ = attr.parse_nested_meta(|meta| {
                skip |= meta.path.is_ident("skip");
                Ok(())
            });
            skip
        })
}

fn read_options(attrs: &[Attribute], default_vis: &Visibility) -> Option<ReadOptions> {
    let attr = find_attr(attrs, "r")?;
    let mut options = ReadOptions {
        vis: default_vis.clone(),
        copy: false,
    };
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("vis") {
            let content;
            parenthesized!(content in meta.input);
            options.vis = content.parse()?;
        } else if meta.path.is_ident("copy") {
            options.copy = true;
        }
        Ok(())
    });
    Some(options)
}

fn write_options(attrs: &[Attribute], default_vis: &Visibility) -> Option<WriteOptions> {
    let attr = find_attr(attrs, "w")?;
    let mut options = WriteOptions {
        vis: default_vis.clone(),
        kind: WriteKind::Mut,
    };
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("reducer") {
            options.kind = WriteKind::Reducer;
        } else if meta.path.is_ident("set") && options.kind != WriteKind::Reducer {
            options.kind = WriteKind::Set;
        } else if meta.path.is_ident("vis") {
            let content;
            parenthesized!(content in meta.input);
            options.vis = content.parse()?;
        }
        Ok(())
    });
    Some(options)
}

fn is_copy_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => {
            let name = path.into_token_stream().to_string();
            COPY_TYPES.iter().any(|copy_type| *copy_type == name)
        }
        _ => false,
    }
}

fn getter(field: &Field, ident: &Ident, options: &ReadOptions) -> impl ToTokens {
    let ReadOptions { vis, copy } = options;
    let ty = &field.ty;
    if *copy || is_copy_type(ty) {
        quote!(
            #vis fn #ident(&self) -> #ty {
                self.#ident
            }
        )
    } else {
        quote!(
            #vis fn #ident(&self) -> &#ty {
                &self.#ident
            }
        )
    }
}

fn setter(field: &Field, ident: &Ident, options: &WriteOptions) -> impl ToTokens {
    let vis = &options.vis;
    let ty = &field.ty;
    match options.kind {
        WriteKind::Mut => {
            let method = Ident::new(&format!("{}_mut", ident), ident.span());
            quote!(
                #vis fn #method(&mut self) -> &mut #ty {
                    &mut self.#ident
                }
            )
        }
        WriteKind::Set => {
            let method = Ident::new(&format!("set_{}", ident), ident.span());
            quote!(
                #vis fn #method(&mut self, value: impl Into<#ty>) -> &mut Self {
                    self.#ident = value.into();
                    self
                }
            )
        }
        WriteKind::Reducer => {
            let method = Ident::new(&format!("set_{}", ident), ident.span());
            quote!(
                #vis fn #method(&mut self, reducer: impl FnOnce(#ty) -> #ty) -> &mut Self {
                    self.#ident = reducer(core::mem::take(&mut self.#ident));
                    self
                }
            )
        }
    }
}

pub fn macro_fields(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Fields can only be applied to structs")
            .into_compile_error()
            .into();
    };

    // struct level attributes apply to every field without its own
    let struct_read = read_options(&input.attrs, &input.vis);
    let struct_write = write_options(&input.attrs, &input.vis);

    let methods = data
        .fields
        .iter()
        .filter(|field| !is_skipped(&field.attrs))
        .map(|field| {
            let Some(field_ident) = field.ident.as_ref() else {
                return syn::Error::new(field.span(), "Fields only supports named fields")
                    .into_compile_error();
            };

            let read = read_options(&field.attrs, &input.vis)
                .or_else(|| struct_read.clone())
                .map(|options| getter(field, field_ident, &options));
            let write = write_options(&field.attrs, &input.vis)
                .or_else(|| struct_write.clone())
                .map(|options| setter(field, field_ident, &options));

            quote!(
                #read

                #write
            )
        });

    quote!(
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    )
    .into()
}
