use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro for the `FromConfiguration` trait on structs with named fields.
///
/// Generates an implementation of `quasisweep::FromConfiguration` that reads
/// every field from the configuration dimension of the same name, narrowing
/// the stored value into the field type.
///
/// # Example
///
/// ```ignore
/// use quasisweep::FromConfiguration;
///
/// #[derive(Debug, FromConfiguration)]
/// struct Hyper {
///     learning_rate: f64,
///     layers: i64,
///     optimizer: String,
/// }
/// ```
#[proc_macro_derive(FromConfiguration)]
pub fn derive_from_configuration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(&input, "FromConfiguration can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new_spanned(
            &input,
            "FromConfiguration can only be derived for structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let field_idents: Vec<_> = fields.named.iter().filter_map(|f| f.ident.as_ref()).collect();
    let field_types: Vec<_> = fields.named.iter().map(|f| &f.ty).collect();
    let dimension_names: Vec<String> = field_idents
        .iter()
        .map(|ident| ident.to_string().trim_start_matches("r#").to_owned())
        .collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics quasisweep::FromConfiguration for #name #ty_generics #where_clause {
            fn from_configuration(
                configuration: &quasisweep::Configuration,
            ) -> quasisweep::Result<Self> {
                Ok(Self {
                    #(#field_idents: configuration.get_as::<#field_types>(#dimension_names)?,)*
                })
            }
        }
    };

    expanded.into()
}
