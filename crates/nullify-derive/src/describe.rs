//! `Describe` derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, Generics, ext::IdentExt, parse_quote, spanned::Spanned};

use crate::utils::{DescribedField, DescribedStruct};

impl DescribedField {
    fn describe(&self, cr: &proc_macro2::TokenStream) -> proc_macro2::TokenStream {
        let name = self.name_str();
        let ty = &self.ty;
        let tags = self.attrs.tags.iter().map(|tag| {
            let key = &tag.key;
            let value = &tag.value;
            quote_spanned!(value.span()=> .with(#key, #value))
        });
        let with_tags = (!self.attrs.tags.is_empty())
            .then(|| quote!(.with_tags(#cr::metadata::Tags::new() #(#tags)*)));

        quote_spanned! {ty.span()=>
            #cr::metadata::Field::new(#name, <#ty as #cr::Describe>::describe()) #with_tags
        }
    }
}

struct DescribeImpl {
    inner: DescribedStruct,
    name: Ident,
    generics: Generics,
}

impl DescribeImpl {
    fn new(raw: &DeriveInput) -> syn::Result<Self> {
        Ok(Self {
            inner: DescribedStruct::new(raw)?,
            name: raw.ident.clone(),
            generics: raw.generics.clone(),
        })
    }

    fn cr(&self) -> proc_macro2::TokenStream {
        if let Some(cr) = &self.inner.attrs.cr {
            quote!(#cr)
        } else {
            let name = &self.name;
            quote_spanned!(name.span()=> ::nullify)
        }
    }

    /// Adds a `Describe` bound to each type param.
    fn bounded_generics(&self, cr: &proc_macro2::TokenStream) -> Generics {
        let mut generics = self.generics.clone();
        let type_params: Vec<_> = generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect();
        let where_clause = generics.make_where_clause();
        for param in type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: #cr::Describe));
        }
        generics
    }

    fn derive_describe(&self) -> proc_macro2::TokenStream {
        let cr = self.cr();
        let name = &self.name;
        let struct_name = if let Some(rename) = &self.inner.attrs.rename {
            quote!(#rename)
        } else {
            let name = name.unraw().to_string();
            quote!(#name)
        };
        let fields = self
            .inner
            .fields
            .iter()
            .filter(|field| !field.attrs.skip)
            .map(|field| field.describe(&cr));

        let generics = self.bounded_generics(&cr);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        quote! {
            impl #impl_generics #cr::Describe for #name #ty_generics #where_clause {
                fn describe() -> #cr::metadata::TypeDescriptor {
                    #cr::metadata::TypeDescriptor::Struct(#cr::metadata::StructType::new(
                        #struct_name,
                        ::std::vec![#(#fields,)*],
                    ))
                }
            }
        }
    }
}

pub(crate) fn impl_describe(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    let trait_impl = match DescribeImpl::new(&input) {
        Ok(trait_impl) => trait_impl,
        Err(err) => return err.into_compile_error().into(),
    };
    trait_impl.derive_describe().into()
}
