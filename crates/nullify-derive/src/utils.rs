//! Attribute parsing.

use proc_macro2::Ident;
use syn::{Attribute, Data, DeriveInput, Field, Fields, LitStr, Path, Type, ext::IdentExt};

/// Container attributes, e.g. `#[describe(crate = crate, rename = "Name")]`.
#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub cr: Option<Path>,
    pub rename: Option<LitStr>,
}

impl ContainerAttrs {
    fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let describe_attrs = attrs.iter().filter(|attr| attr.path().is_ident("describe"));

        let mut this = Self::default();
        for attr in describe_attrs {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    this.cr = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "struct name cannot be empty"));
                    }
                    this.rename = Some(name);
                    Ok(())
                } else {
                    Err(meta.error("Unsupported attribute; only `crate` and `rename` are supported"))
                }
            })?;
        }
        Ok(this)
    }
}

/// Single field tag, e.g. `json = "name"`.
pub(crate) struct FieldTag {
    pub key: String,
    pub value: LitStr,
}

/// Field attributes, e.g. `#[describe(tag(json = "name"), skip)]`.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub tags: Vec<FieldTag>,
    pub skip: bool,
}

impl FieldAttrs {
    fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let describe_attrs = attrs.iter().filter(|attr| attr.path().is_ident("describe"));

        let mut this = Self::default();
        for attr in describe_attrs {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                    Ok(())
                } else if meta.path.is_ident("tag") {
                    meta.parse_nested_meta(|tag| {
                        let Some(key) = tag.path.get_ident() else {
                            return Err(tag.error("tag key must be an identifier"));
                        };
                        let key = key.unraw().to_string();
                        let value: LitStr = tag.value()?.parse()?;
                        this.set_tag(key, value);
                        Ok(())
                    })
                } else {
                    Err(meta.error("Unsupported attribute; only `tag` and `skip` are supported"))
                }
            })?;
        }

        if this.skip && !this.tags.is_empty() {
            let message = "tags have no effect on skipped fields";
            return Err(syn::Error::new(this.tags[0].value.span(), message));
        }
        Ok(this)
    }

    /// Later values for the same key override earlier ones, keeping the original position.
    fn set_tag(&mut self, key: String, value: LitStr) {
        if let Some(existing) = self.tags.iter_mut().find(|tag| tag.key == key) {
            existing.value = value;
        } else {
            self.tags.push(FieldTag { key, value });
        }
    }
}

pub(crate) struct DescribedField {
    pub attrs: FieldAttrs,
    pub name: Ident,
    pub ty: Type,
}

impl DescribedField {
    fn new(raw: &Field) -> syn::Result<Self> {
        let Some(name) = raw.ident.clone() else {
            let message = "only named fields are supported";
            return Err(syn::Error::new_spanned(raw, message));
        };
        Ok(Self {
            attrs: FieldAttrs::new(&raw.attrs)?,
            name,
            ty: raw.ty.clone(),
        })
    }

    /// Returns the field name without the raw identifier prefix.
    pub fn name_str(&self) -> String {
        self.name.unraw().to_string()
    }
}

/// Struct deriving `Describe`.
pub(crate) struct DescribedStruct {
    pub attrs: ContainerAttrs,
    pub fields: Vec<DescribedField>,
}

impl DescribedStruct {
    pub fn new(raw: &DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &raw.data else {
            let message = "#[derive(Describe)] can only be placed on structs";
            return Err(syn::Error::new_spanned(&raw.ident, message));
        };
        if matches!(data.fields, Fields::Unnamed(_)) {
            let message = "#[derive(Describe)] is not supported for tuple structs";
            return Err(syn::Error::new_spanned(&raw.ident, message));
        }

        let attrs = ContainerAttrs::new(&raw.attrs)?;
        let fields = data
            .fields
            .iter()
            .map(DescribedField::new)
            .collect::<syn::Result<_>>()?;
        Ok(Self { attrs, fields })
    }
}
