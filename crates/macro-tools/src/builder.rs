use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Field, Ident, Meta};

/// `#[builder(skip)]` or `#[shared(skip)]` hides the field from the builder setters
fn has_setter(field: &Field) -> bool {
    let Some(attr) = field
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("builder") || attr.path().is_ident("shared"))
    else {
        return true;
    };

    let mut skip = false;
    let _ = attr.parse_nested_meta(|meta| {
        skip |= meta.path.is_ident("skip");
        Ok(())
    });
    !skip
}

/// `#[default = literal]` or `#[default(expr)]`
fn default_expr(attrs: &[Attribute]) -> Option<Expr> {
    let attr = attrs.iter().find(|attr| attr.path().is_ident("default"))?;
    match &attr.meta {
        Meta::Path(_) => None,
        Meta::NameValue(meta) => Some(meta.value.clone()),
        Meta::List(list) => list.parse_args().ok(),
    }
}

pub fn macro_builder(input: DeriveInput) -> TokenStream {
    let origin_ident = input.ident;
    let vis = input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = input.data else {
        return syn::Error::new(origin_ident.span(), "Builder can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let ident = Ident::new(&format!("{}Builder", origin_ident), origin_ident.span());

    let mut declarations = vec![];
    let mut defaults = vec![];
    let mut moves = vec![];
    let mut setters = vec![];

    for field in data.fields.iter() {
        let field_ident = &field.ident;
        let ty = &field.ty;

        declarations.push(quote!(#field_ident: #ty,));
        moves.push(quote!(#field_ident: value.#field_ident,));
        defaults.push(match default_expr(&field.attrs) {
            Some(expr) => quote!(#field_ident: #expr,),
            None => quote!(#field_ident: Default::default(),),
        });

        if has_setter(field) {
            setters.push(quote!(
                pub fn #field_ident(mut self, value: impl Into<#ty>) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            ));
        }
    }

    quote!(
        #[derive(Clone, Debug)]
        #vis struct #ident {
            #(#declarations)*
        }

        impl #impl_generics Default for #ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#defaults)*
                }
            }
        }

        impl #impl_generics Default for #origin_ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#defaults)*
                }
            }
        }

        impl #impl_generics From<#ident #ty_generics> for #origin_ident #ty_generics #where_clause {
            fn from(value: #ident #ty_generics) -> Self {
                Self {
                    #(#moves)*
                }
            }
        }

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new() -> Self {
                Self::default()
            }

            #(#setters)*
        }
    )
    .into()
}
