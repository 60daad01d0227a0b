use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod builder;
mod deref;
mod fields;
mod shape;

/// impl `From<T> for crate::shape::Shape`, the variant must share the struct name
#[proc_macro_derive(Shape)]
pub fn shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    shape::macro_shape(input)
}

/// forward `Deref` and `DerefMut` to the field marked with `#[deref]`
#[proc_macro_derive(Deref, attributes(deref))]
pub fn deref(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    deref::macro_deref(input)
}

/// generate `XxxBuilder` plus `Default` for the origin struct,
/// field defaults come from `#[default = literal]` or `#[default(expr)]`
#[proc_macro_derive(Builder, attributes(default, builder, shared))]
pub fn builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder::macro_builder(input)
}

/// generate getters with `#[r]` and setters with `#[w]`
///
/// `#[r(copy)]` returns by value, `#[r(vis(pub(crate)))]` changes visibility,
/// `#[w(set)]` generates `set_xxx`, `#[w(reducer)]` takes a closure,
/// `#[r(skip)]` ignores the field
#[proc_macro_derive(Fields, attributes(shared, r, w))]
pub fn fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::macro_fields(input)
}
