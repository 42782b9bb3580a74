//! Converts between CDP's flat `[name, value, name, value, ...]` attribute
//! array and an ordered name/value list, renaming the reserved `class`
//! attribute to `class_` on the way in (it would otherwise collide with
//! Rust's `class` keyword-adjacent field conventions) and back on display.

const CLASS_ATTR: &str = "class";
const CLASS_FIELD: &str = "class_";

/// Parse CDP's flat attribute array into an ordered list of (name, value)
/// pairs, renaming `class` to `class_`. A trailing unpaired entry (a
/// malformed array) is dropped rather than panicking.
#[must_use]
pub fn flatten_attributes(flat: &[String]) -> Vec<(String, String)> {
    flat.chunks_exact(2)
        .map(|pair| {
            let name = if pair[0] == CLASS_ATTR {
                CLASS_FIELD.to_string()
            } else {
                pair[0].clone()
            };
            (name, pair[1].clone())
        })
        .collect()
}

/// Render attributes for display, renaming `class_` back to `class`.
#[must_use]
pub fn display_attributes(attrs: &[(String, String)]) -> Vec<(String, String)> {
    attrs
        .iter()
        .map(|(name, value)| {
            let name = if name == CLASS_FIELD {
                CLASS_ATTR.to_string()
            } else {
                name.clone()
            };
            (name, value.clone())
        })
        .collect()
}

/// Look up an attribute by its Rust-side name (post `class` -> `class_` rename).
#[must_use]
pub fn get<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
}
