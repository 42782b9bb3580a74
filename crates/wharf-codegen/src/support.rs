//! Emits the small hand-written runtime support module included once at the
//! root of the generated bindings crate (alongside the per-domain modules and
//! the event registry from [`crate::registry`]).
//!
//! Its one job: let an optional field reject a present-and-null value
//! instead of silently collapsing it into the same `None` as an absent
//! field. Serde's built-in `Option<T>` deserialization treats `null` and
//! absence identically; CDP's optional properties are present-or-absent,
//! not nullable, and a present `null` should fail to deserialize rather
//! than round-trip as if the field were missing.

use proc_macro2::TokenStream;
use quote::quote;

/// Build the `support` module shared by every generated domain.
#[must_use]
pub fn generate_support() -> TokenStream {
    quote! {
        /// Runtime helpers used by generated field attributes.
        pub mod support {
            /// `deserialize_with` for an `Option<T>` field combined with
            /// `#[serde(default)]`: absence of the field never calls this (the
            /// `default` attribute supplies `None` directly), so reaching this
            /// function means the field was present on the wire. Deserializing
            /// `T` directly, rather than `Option<T>`, means a JSON `null` is
            /// rejected by `T`'s own `Deserialize` impl instead of being
            /// accepted as `None`.
            pub fn deserialize_present<'de, D, T>(deserializer: D) -> ::std::result::Result<Option<T>, D::Error>
            where
                D: ::serde::Deserializer<'de>,
                T: ::serde::Deserialize<'de>,
            {
                T::deserialize(deserializer).map(Some)
            }
        }
    }
}
