//! Inline `style="a: b; c: d;"` declaration helpers.

/// Parse declarations in order. Malformed entries are skipped.
pub(crate) fn declarations(style: &str) -> Vec<(String, String)> {
    split_declarations(style)
        .into_iter()
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

/// Split on `;` outside quotes and parentheses, so `url('data:a;b')` stays whole.
fn split_declarations(style: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in style.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                out.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&style[start..]);
    out
}

/// Value of the last declaration of `property`.
pub(crate) fn property(style: &str, property: &str) -> Option<String> {
    declarations(style)
        .into_iter()
        .rev()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
        .map(|(_, value)| value)
}

/// Return `style` with `property` replaced (or appended) by `value`.
pub(crate) fn with_property(style: &str, property: &str, value: &str) -> String {
    let property = property.to_ascii_lowercase();
    let mut decls = declarations(style);
    decls.retain(|(name, _)| *name != property);
    decls.push((property, value.to_string()));
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/document/style.rs"]
mod tests;
