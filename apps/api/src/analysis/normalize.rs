/// Canonicalizes text for comparison.
///
/// Anything outside printable ASCII (newlines, tabs, control bytes, non-ASCII) becomes a
/// space, whitespace runs collapse to a single space, and the result is trimmed and
/// lowercased. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if !c.is_ascii() || c.is_ascii_control() || c == ' ' {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c.to_ascii_lowercase());
    }

    out
}
