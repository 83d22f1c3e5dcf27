//! List-value splitting for query parameters.
//!
//! A list parameter may arrive as repeated keys (`childIds=a&childIds=b`) or as
//! one comma-separated occurrence (`childIds=a,b`). A backslash escapes the
//! next character, so `\,` keeps a literal comma inside a single entry.

pub(crate) fn split_unescaped(input: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    let bytes = input.as_bytes();
    while i < bytes.len() {
        match bytes[i] as char {
            '\\' => {
                i += 1;
                if i < bytes.len() {
                    i += 1;
                }
            }
            c if c == sep => {
                out.push(&input[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    out.push(&input[start..]);
    out
}

/// Drops escaping backslashes. A trailing lone backslash is kept verbatim.
pub(crate) fn unescape_list_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => out.push(next),
            None => out.push('\\'),
        }
    }
    out
}
