/// Escape a string for an attribute value or a `<textarea>`.
///
/// Unlike the sanitizer's text escaping, every `&` is encoded, so the
/// browser hands back exactly `input` when a form is submitted.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
///
/// Meant for plain text. Escape the result before putting it in a page.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
