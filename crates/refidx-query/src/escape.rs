//! Escaping of clause values.

/// Characters with a meaning in the query syntax.
pub const SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&',
    ';', '/',
];

/// Escapes `text` so it is read back as one literal term.
///
/// Every special character and every whitespace character is prefixed with `\`.
pub fn escape_query_chars(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if SPECIAL_CHARS.contains(&ch) || ch.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
