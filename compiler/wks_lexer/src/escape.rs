//! String literal escape decoding.
//!
//! Escapes are decoded in three ordered passes over the literal body:
//!
//! 1. `\UXXXXXXXX` long-form unicode escapes
//! 2. `\uXXXX` short-form unicode escapes
//! 3. character escapes `\n` `\t` `\r` `\"` `\'` `\\`
//!
//! Each pass sees the output of the previous one. A sequence that is not a
//! valid escape for the current pass is copied through unchanged, so
//! `"\q"` keeps its backslash.

/// Decode the body of a string literal (the text between the quotes).
pub fn unescape(body: &str) -> String {
    if !body.contains('\\') {
        return body.to_string();
    }
    let long = unescape_unicode(body, 'U', 8);
    let short = unescape_unicode(&long, 'u', 4);
    unescape_chars(&short)
}

/// Replace `\<marker>` followed by exactly `width` hex digits with the
/// corresponding scalar value. Invalid code points are left as written.
fn unescape_unicode(input: &str, marker: char, width: usize) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(digits) = after.strip_prefix(marker) {
            let hex = digits.get(..width).filter(|h| {
                h.len() == width && h.chars().all(|c| c.is_ascii_hexdigit())
            });
            if let Some(ch) = hex
                .and_then(|h| u32::from_str_radix(h, 16).ok())
                .and_then(char::from_u32)
            {
                out.push(ch);
                rest = &digits[width..];
                continue;
            }
        }
        out.push('\\');
        rest = after;
    }
    out.push_str(rest);
    out
}

fn unescape_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
