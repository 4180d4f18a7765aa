//! Number formatting and parsing shared by value, transform and timing code.

/// Format a number the way it is written back into SVG markup: at most six decimals,
/// trailing zeros trimmed, never `-0`.
pub(crate) fn fmt_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{rounded:.6}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Parse an SVG number list. Separators are optional where the grammar allows it, so
/// `"10-5"` and `".5.5"` read as two numbers.
pub(crate) fn parse_number_list(s: &str) -> Option<Vec<f64>> {
    let mut out = Vec::new();
    for v in svgtypes::NumberListParser::from(s) {
        match v {
            Ok(v) if v.is_finite() => out.push(v),
            Ok(_) => return None,
            Err(e) => {
                tracing::trace!(value = s, error = %e, "not a number list");
                return None;
            }
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Split `"12.5px"` into `(12.5, "px")`. The unit may be empty or `%`.
pub(crate) fn split_number_unit(s: &str) -> Option<(f64, &str)> {
    let s = s.trim();
    let end = numeric_prefix_len(s);
    if end == 0 {
        return None;
    }
    let v: f64 = s[..end].parse().ok()?;
    let unit = &s[end..];
    if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return None;
    }
    Some((v, unit))
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i == digits_start || (i == digits_start + 1 && bytes[digits_start] == b'.') {
        return 0;
    }
    // Exponent, only when followed by digits so units like "em"/"ex" survive.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/number.rs"]
mod tests;
