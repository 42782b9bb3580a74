//! Name mapping between the CDP schema's camelCase/PascalCase identifiers and
//! idiomatic Rust identifiers.

/// Rust keywords and other identifiers that cannot be used verbatim.
///
/// `type` is the one that actually occurs in the CDP schema (e.g.
/// `Runtime.RemoteObject.type`); the rest are carried for completeness since
/// the schema evolves.
const RESERVED: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

/// Convert a camelCase or PascalCase schema identifier to `lower_snake_case`,
/// appending a trailing underscore if the result collides with a Rust
/// keyword (e.g. `type` -> `type_`).
#[must_use]
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary_after_lower = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            let boundary_before_new_word =
                prev.is_some_and(char::is_ascii_uppercase) && next.is_some_and(|n| n.is_ascii_lowercase());
            if i > 0 && (boundary_after_lower || boundary_before_new_word) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    escape_reserved(out)
}

/// Append a trailing underscore if `name` collides with a reserved identifier.
#[must_use]
pub fn escape_reserved(name: String) -> String {
    if RESERVED.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Convert a camelCase/PascalCase enum member value to `UPPER_SNAKE_CASE`.
#[must_use]
pub fn upper_snake_case(value: &str) -> String {
    let snake = snake_case(value);
    snake.trim_end_matches('_').to_ascii_uppercase()
}

/// Convert a domain name (e.g. `DOM`, `Network`) to its lower_snake module
/// identifier (e.g. `dom`, `network`).
#[must_use]
pub fn module_name(domain: &str) -> String {
    snake_case(domain)
}

/// Convert a camelCase command/event name to `PascalCase` for use as a
/// generated struct identifier (e.g. `resolveNode` -> `ResolveNode`).
#[must_use]
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for c in name.chars() {
        if c == '_' {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Type identifiers keep their original schema casing (e.g. `NodeId`,
/// `BackendNodeId`); only reserved-word escaping applies, and type ids never
/// collide with Rust keywords in practice so this is effectively identity.
#[must_use]
pub fn type_name(id: &str) -> String {
    id.to_string()
}
