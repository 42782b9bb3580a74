//! Emits Rust source (as [`proc_macro2::TokenStream`]) for every domain in a
//! loaded [`Schema`], following the emission contract: data containers with
//! required-first-optional-last fields, `to_wire`/`from_wire`, command
//! structs implementing [`wharf_transport::Command`], and an event registry.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::error::SchemaError;
use crate::loader::Schema;
use crate::names::{module_name, pascal_case, snake_case, type_name, upper_snake_case};
use crate::resolve::{self, parse_ref, ResolvedRef};
use crate::schema::{CdpCommand, CdpDomain, CdpEvent, CdpItems, CdpProperty, CdpType};

/// One generated domain module, plus the event identifiers it registers.
pub struct DomainModule {
    pub module_name: String,
    pub code: TokenStream,
    /// Wire method names (`Domain.eventName`) this domain's events register
    /// under, paired with their generated type identifier.
    pub events: Vec<(String, String)>,
}

/// Generate one module per domain, sorted by domain name (schema order is
/// already domain-sorted by [`crate::loader::load`]; items within a domain
/// are emitted in their original schema order).
///
/// # Errors
///
/// Returns a [`SchemaError`] if the schema's reference closure is broken.
pub fn generate(schema: &Schema) -> Result<Vec<DomainModule>, SchemaError> {
    resolve::check_reference_closure(schema)?;

    Ok(schema.domains.iter().map(generate_domain).collect())
}

fn generate_domain(domain: &CdpDomain) -> DomainModule {
    let deps = resolve::referenced_domains(domain);
    let imports = generate_imports(&deps);

    let types: Vec<TokenStream> = domain.types.iter().map(|t| generate_type(domain, t)).collect();
    let commands: Vec<TokenStream> = domain
        .commands
        .iter()
        .map(|c| generate_command(domain, c))
        .collect();
    let (event_defs, event_ids): (Vec<TokenStream>, Vec<(String, String)>) = domain
        .events
        .iter()
        .map(|e| {
            let code = generate_event(domain, e);
            let type_id = format!("{}{}", domain.domain, pascal_case(&e.name));
            (code, (format!("{}.{}", domain.domain, e.name), type_id))
        })
        .unzip();

    let code = quote! {
        #imports

        #(#types)*

        #(#commands)*

        #(#event_defs)*
    };

    DomainModule {
        module_name: module_name(&domain.domain),
        code,
        events: event_ids,
    }
}

fn generate_imports(deps: &BTreeSet<String>) -> TokenStream {
    let idents = deps.iter().map(|d| format_ident!("{}", module_name(d)));
    quote! {
        #(use crate::#idents;)*
    }
}

fn doc_attr(description: Option<&str>, deprecated: bool, experimental: bool) -> TokenStream {
    let mut attrs = TokenStream::new();
    if let Some(desc) = description {
        attrs.extend(quote! { #[doc = #desc] });
    }
    if deprecated {
        attrs.extend(quote! { #[deprecated] });
    }
    if experimental {
        attrs.extend(quote! { #[doc = "Experimental."] });
    }
    attrs
}

/// Sort properties required-first, optional-last, stable otherwise (this
/// ordering is binding on positional constructors).
fn ordered_properties(properties: &[CdpProperty]) -> Vec<&CdpProperty> {
    let mut required: Vec<&CdpProperty> = properties.iter().filter(|p| !p.optional).collect();
    let optional: Vec<&CdpProperty> = properties.iter().filter(|p| p.optional).collect();
    required.extend(optional);
    required
}

fn base_type_tokens(base: &str) -> TokenStream {
    match base {
        "boolean" => quote! { bool },
        "integer" => quote! { i64 },
        "number" => quote! { f64 },
        "string" => quote! { String },
        "object" => quote! { ::std::collections::BTreeMap<String, ::serde_json::Value> },
        "any" => quote! { ::serde_json::Value },
        other => {
            let ident = format_ident!("{}", other);
            quote! { #ident }
        }
    }
}

fn ref_type_tokens(current_domain: &str, resolved: &ResolvedRef) -> TokenStream {
    let type_ident = format_ident!("{}", type_name(&resolved.type_id));
    match &resolved.domain {
        Some(d) if d != current_domain => {
            let module = format_ident!("{}", module_name(d));
            quote! { crate::#module::#type_ident }
        }
        _ => quote! { #type_ident },
    }
}

fn items_type_tokens(current_domain: &str, items: &CdpItems) -> TokenStream {
    if let Some(r) = &items.r#ref {
        ref_type_tokens(current_domain, &parse_ref(r))
    } else if let Some(base) = &items.base_type {
        base_type_tokens(base)
    } else {
        quote! { ::serde_json::Value }
    }
}

/// `self_type_id` is the id of the object type currently being generated, if
/// any; a direct (non-list) `$ref` back to it is boxed to break the
/// otherwise-infinite-size cycle (e.g. `DOM.Node.contentDocument: Node`).
fn property_type_tokens(current_domain: &str, prop: &CdpProperty, self_type_id: Option<&str>) -> TokenStream {
    let inner = if let Some(r) = &prop.r#ref {
        let resolved = parse_ref(r);
        let is_direct_self_ref =
            resolved.domain.is_none() && self_type_id.is_some_and(|id| id == resolved.type_id);
        let ty = ref_type_tokens(current_domain, &resolved);
        if is_direct_self_ref {
            quote! { Box<#ty> }
        } else {
            ty
        }
    } else if let Some(items) = &prop.items {
        let item_ty = items_type_tokens(current_domain, items);
        quote! { Vec<#item_ty> }
    } else if let Some(base) = &prop.base_type {
        base_type_tokens(base)
    } else {
        quote! { ::serde_json::Value }
    };

    if prop.optional {
        quote! { Option<#inner> }
    } else {
        inner
    }
}

fn generate_field(current_domain: &str, prop: &CdpProperty, self_type_id: Option<&str>) -> TokenStream {
    let field_name = snake_case(&prop.name);
    let field_ident = format_ident!("{}", field_name);
    let wire_name = &prop.name;
    let ty = property_type_tokens(current_domain, prop, self_type_id);
    let doc = doc_attr(prop.description.as_deref(), prop.deprecated, prop.experimental);

    let rename_attr = if field_name == *wire_name {
        quote! {}
    } else {
        quote! { #[serde(rename = #wire_name)] }
    };

    if prop.optional {
        quote! {
            #doc
            #rename_attr
            #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "crate::support::deserialize_present")]
            pub #field_ident: #ty,
        }
    } else {
        quote! {
            #doc
            #rename_attr
            pub #field_ident: #ty,
        }
    }
}

fn generate_struct_body(current_domain: &str, properties: &[CdpProperty], self_type_id: Option<&str>) -> TokenStream {
    let ordered = ordered_properties(properties);
    let fields: Vec<TokenStream> = ordered
        .iter()
        .map(|p| generate_field(current_domain, p, self_type_id))
        .collect();
    quote! { #(#fields)* }
}

fn generate_type(domain: &CdpDomain, t: &CdpType) -> TokenStream {
    let type_ident = format_ident!("{}", type_name(&t.id));
    let doc = doc_attr(t.description.as_deref(), t.deprecated, t.experimental);

    if t.is_enum() {
        let values = t.enum_values.as_ref().expect("checked by is_enum");
        let variants: Vec<TokenStream> = values
            .iter()
            .map(|v| {
                let variant_ident = format_ident!("{}", upper_snake_case(v));
                quote! {
                    #[serde(rename = #v)]
                    #variant_ident,
                }
            })
            .collect();
        return quote! {
            #doc
            #[allow(non_camel_case_types)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
            pub enum #type_ident {
                #(#variants)*
            }
        };
    }

    if t.is_object() {
        let props = t.properties.as_ref().expect("checked by is_object");
        let body = generate_struct_body(&domain.domain, props, Some(&t.id));
        return quote! {
            #doc
            #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
            pub struct #type_ident {
                #body
            }
        };
    }

    // Primitive alias, possibly list-valued.
    let aliased = if let Some(items) = &t.items {
        let item_ty = items_type_tokens(&domain.domain, items);
        quote! { Vec<#item_ty> }
    } else {
        base_type_tokens(&t.base_type)
    };
    quote! {
        #doc
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct #type_ident(pub #aliased);
    }
}

fn generate_command(domain: &CdpDomain, cmd: &CdpCommand) -> TokenStream {
    let command_ident = format_ident!("{}", format!("{}{}", domain.domain, pascal_case(&cmd.name)));
    let wire_method = format!("{}.{}", domain.domain, cmd.name);
    let doc = doc_attr(cmd.description.as_deref(), cmd.deprecated, cmd.experimental);

    let params_body = generate_struct_body(&domain.domain, &cmd.parameters, None);
    let params_expr = if cmd.parameters.is_empty() {
        quote! { None }
    } else {
        quote! { ::serde_json::to_value(self).ok() }
    };

    let return_decode = generate_return_decode(&domain.domain, &command_ident, &cmd.returns);
    let return_type = &return_decode.return_type;
    let decode_body = &return_decode.decode_body;
    let result_item = &return_decode.result_item;

    quote! {
        #doc
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct #command_ident {
            #params_body
        }

        #result_item

        impl ::wharf_transport::Command for #command_ident {
            type Return = #return_type;

            fn request(&self) -> ::wharf_transport::CdpRequestBody {
                ::wharf_transport::CdpRequestBody {
                    method: #wire_method,
                    params: #params_expr,
                }
            }

            fn decode(&self, value: ::serde_json::Value) -> Result<Self::Return, ::wharf_transport::CdpError> {
                #decode_body
            }
        }
    }
}

struct ReturnDecode {
    return_type: TokenStream,
    decode_body: TokenStream,
    /// A sibling `{Command}Result` struct definition, emitted at module
    /// scope when a command has more than one return field. Empty otherwise.
    result_item: TokenStream,
}

fn generate_return_decode(
    current_domain: &str,
    command_ident: &proc_macro2::Ident,
    returns: &[CdpProperty],
) -> ReturnDecode {
    match returns.len() {
        0 => ReturnDecode {
            return_type: quote! { () },
            decode_body: quote! { Ok(()) },
            result_item: quote! {},
        },
        1 => {
            let prop = &returns[0];
            let ty = property_type_tokens(current_domain, prop, None);
            let wire_name = &prop.name;
            ReturnDecode {
                return_type: ty.clone(),
                decode_body: quote! {
                    let field = value.get(#wire_name).cloned().unwrap_or(::serde_json::Value::Null);
                    ::serde_json::from_value::<#ty>(field).map_err(::wharf_transport::CdpError::from)
                },
                result_item: quote! {},
            }
        }
        _ => {
            let body = generate_struct_body(current_domain, returns, None);
            let result_ident = format_ident!("{}Result", command_ident);
            ReturnDecode {
                return_type: quote! { #result_ident },
                decode_body: quote! {
                    ::serde_json::from_value::<#result_ident>(value).map_err(::wharf_transport::CdpError::from)
                },
                result_item: quote! {
                    #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
                    pub struct #result_ident {
                        #body
                    }
                },
            }
        }
    }
}

fn generate_event(domain: &CdpDomain, event: &CdpEvent) -> TokenStream {
    let event_ident = format_ident!("{}", format!("{}{}", domain.domain, pascal_case(&event.name)));
    let doc = doc_attr(event.description.as_deref(), event.deprecated, event.experimental);
    let body = generate_struct_body(&domain.domain, &event.parameters, None);

    quote! {
        #doc
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct #event_ident {
            #body
        }
    }
}
