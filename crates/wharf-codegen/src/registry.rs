//! Generates the cross-domain event registry: a flat enum with one variant
//! per event type across every generated domain, plus a `parse_event`
//! dispatcher keyed by wire method name.
//!
//! This realizes the "shared utilities module" from the generated binding
//! layout: the event-class registration mechanism and the `parse_event(json)`
//! helper that looks up the class by `method` and decodes `params`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::generate::DomainModule;

/// Build the `Event` enum and `parse_event` dispatcher from every domain
/// module's registered `(wire_method, type_id)` pairs.
#[must_use]
pub fn generate_event_registry(modules: &[DomainModule]) -> TokenStream {
    let mut variants = Vec::new();
    let mut arms = Vec::new();

    for module in modules {
        let module_ident = format_ident!("{}", module.module_name);
        for (wire_method, type_id) in &module.events {
            let variant_ident = format_ident!("{}", type_id);
            let type_ident = format_ident!("{}", type_id);
            variants.push(quote! {
                #variant_ident(crate::#module_ident::#type_ident),
            });
            arms.push(quote! {
                #wire_method => {
                    let decoded: crate::#module_ident::#type_ident = ::serde_json::from_value(params)?;
                    Ok(Some(Event::#variant_ident(decoded)))
                }
            });
        }
    }

    quote! {
        /// A decoded CDP event, tagged by its originating domain and name.
        #[derive(Debug, Clone)]
        #[allow(clippy::large_enum_variant)]
        pub enum Event {
            #(#variants)*
        }

        /// Look up an event's wire method in the registry and decode its
        /// `params` against the matching generated type. Returns `Ok(None)`
        /// for an unregistered method rather than an error: an unknown event
        /// is logged and dropped by the session, not treated as fatal.
        ///
        /// # Errors
        ///
        /// Returns a JSON error if `params` does not match the registered
        /// type's shape.
        pub fn parse_event(
            method: &str,
            params: ::serde_json::Value,
        ) -> Result<Option<Event>, ::serde_json::Error> {
            match method {
                #(#arms)*
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::DomainModule;

    #[test]
    fn registry_dispatches_by_wire_method_and_is_none_for_unknown() {
        let module = DomainModule {
            module_name: "page".to_string(),
            code: quote! {
                #[derive(Debug, Clone, serde::Deserialize)]
                pub struct PageLoadEventFired {
                    pub timestamp: f64,
                }
            },
            events: vec![("Page.loadEventFired".to_string(), "PageLoadEventFired".to_string())],
        };
        let registry = generate_event_registry(std::slice::from_ref(&module));
        let src = registry.to_string();
        assert!(src.contains("\"Page.loadEventFired\""));
        assert!(src.contains("PageLoadEventFired"));
        assert!(src.contains("_ => Ok (None)"));
    }

    #[test]
    fn empty_module_list_still_emits_a_valid_enum_and_catchall() {
        let registry = generate_event_registry(&[]);
        syn::parse2::<syn::File>(registry).expect("registry should parse even with no events");
    }
}
