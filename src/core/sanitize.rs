// src/core/sanitize.rs

/// Canonical matching form of a name: lowercase `[a-z0-9 ]`, single spaces, trimmed.
///
/// Every whitespace character becomes a space before collapsing; everything else
/// outside the alphabet is dropped without leaving a gap, so `Joe's` → `joes`.
pub fn normalize_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = true; // swallows leading whitespace
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            prev_space = false;
        }
    }
    if out.ends_with(' ') { out.pop(); }
    out
}

/// Wiki page title for an identifier: `joes_dagger` → `Joes_Dagger`.
pub fn title_case_id(id: &str) -> String {
    id.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut w = first.to_uppercase().collect::<String>();
                    w.push_str(&chars.as_str().to_lowercase());
                    w
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Drop every `( ... )` group together with the whitespace in front of it.
/// Unbalanced `(` swallows the rest of the string.
pub fn strip_parenthesized(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for ch in s.chars() {
        match ch {
            '(' => {
                if depth == 0 {
                    let kept = out.trim_end().len();
                    out.truncate(kept);
                }
                depth += 1;
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// `Joe's` → `Joes`, then any remaining straight or curly apostrophe is dropped.
pub fn strip_apostrophes(s: &str) -> String {
    s.replace("'s", "s")
        .replace("\u{2019}s", "s")
        .replace(['\'', '\u{2019}'], "")
}

/// Trailing standalone number of an already normalized name: `sword 2` → `sword`.
pub fn strip_trailing_number(normalized: &str) -> &str {
    match normalized.rsplit_once(' ') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        None if !normalized.is_empty() && normalized.bytes().all(|b| b.is_ascii_digit()) => "",
        _ => normalized,
    }
}
