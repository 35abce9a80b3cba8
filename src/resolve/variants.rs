// src/resolve/variants.rs

use crate::core::sanitize::{
    normalize_name, strip_apostrophes, strip_parenthesized, strip_trailing_number,
};

/// Generic words wikis tack onto file names and captions.
pub const QUALIFIERS: &[&str] = &["icon", "img", "image", "item", "weapon", "tome", "char", "character"];

/// Type words some wikis put in front of file names (`Item_Anvil.png`).
pub const TYPE_PREFIXES: &[&str] = &["item", "weapon", "tome", "character"];

/// Plausible spellings of `name`, de-duplicated, in generation order:
/// normalized, qualifier-stripped, identifier form, no parentheses,
/// no apostrophes, no trailing number.
///
/// Never empty for a non-empty `name`.
pub fn variants(name: &str) -> Vec<String> {
    let norm = normalize_name(name);
    let mut out: Vec<String> = Vec::new();
    let mut push = |v: &str| {
        let v = v.trim_matches(|c: char| c == '_' || c == ' ');
        if !v.is_empty() && !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    };

    push(&norm);
    for q in QUALIFIERS {
        if let Some(head) = norm.strip_suffix(q).and_then(|h| h.strip_suffix(' ')) {
            push(head);
        }
    }
    for p in TYPE_PREFIXES {
        if let Some(tail) = norm.strip_prefix(p).and_then(|t| t.strip_prefix(' ')) {
            push(tail);
        }
    }
    push(&norm.replace(' ', "_"));
    push(&normalize_name(&strip_parenthesized(name)));
    push(&normalize_name(&strip_apostrophes(name)));
    push(strip_trailing_number(&norm));

    if out.is_empty() && !name.is_empty() {
        out.push(name.to_lowercase());
    }
    out
}
