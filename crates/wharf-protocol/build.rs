//! Loads the embedded CDP schema, generates one Rust module per domain plus
//! the cross-domain event registry, and writes the result to
//! `OUT_DIR/generated.rs` for inclusion by `src/lib.rs`.

use std::env;
use std::fs;
use std::path::PathBuf;

const BROWSER_PROTOCOL: &str = include_str!("resources/browser_protocol.json");
const JS_PROTOCOL: &str = include_str!("resources/js_protocol.json");

fn main() {
    println!("cargo::rerun-if-changed=resources/browser_protocol.json");
    println!("cargo::rerun-if-changed=resources/js_protocol.json");

    let schema = wharf_codegen::load(BROWSER_PROTOCOL, JS_PROTOCOL)
        .unwrap_or_else(|e| panic!("failed to load embedded CDP schema: {e}"));
    let modules = wharf_codegen::generate(&schema)
        .unwrap_or_else(|e| panic!("failed to generate CDP bindings: {e}"));
    let registry = wharf_codegen::generate_event_registry(&modules);
    let support = wharf_codegen::generate_support();

    let mut out = proc_macro2::TokenStream::new();
    out.extend(support);
    for module in &modules {
        let ident = quote::format_ident!("{}", module.module_name);
        let code = &module.code;
        out.extend(quote::quote! {
            pub mod #ident {
                #code
            }
        });
    }
    out.extend(registry);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR set by cargo"));
    fs::write(out_dir.join("generated.rs"), out.to_string()).expect("failed to write generated.rs");
}
