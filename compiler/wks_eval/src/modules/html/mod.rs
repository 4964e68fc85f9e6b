//! `html`: escaping, plus the `entities` and `parser` sub-modules.

pub(super) mod entities;
pub(super) mod parser;

use crate::errors::EvalResult;
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "html",
    members: &[
        Member::function("escape", escape),
        Member::function("unescape", unescape),
        Member::submodule("entities", "html.entities"),
        Member::submodule("parser", "html.parser"),
    ],
};

/// `escape(s, quote=true)`.
fn escape(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("escape", 1, 2)?;
    args.only_named("escape", &["quote"])?;
    let text = args.str("escape", 0)?;
    let quote = args.param(1, "quote").map_or(true, Value::is_truthy);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            '\'' if quote => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    Ok(Value::str(out))
}

fn unescape(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("unescape", 1)?;
    Ok(Value::str(unescape_text(args.str("unescape", 0)?)))
}

/// Numeric character reference body (after `&#`), if well formed.
fn numeric_reference(body: &str) -> Option<char> {
    let code = match body.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => body.parse::<u32>().ok()?,
    };
    Some(match code {
        0 => '\u{FFFD}',
        code => char::from_u32(code).unwrap_or('\u{FFFD}'),
    })
}

/// Replace named and numeric character references. Unknown or
/// unterminated references are left as written.
pub(super) fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let reference = tail
            .find(';')
            .filter(|end| *end > 0 && *end <= 32)
            .and_then(|end| {
                let body = &tail[..end];
                let c = match body.strip_prefix('#') {
                    Some(numeric) => numeric_reference(numeric)?,
                    None => char::from_u32(entities::lookup(body)?)?,
                };
                Some((c, end))
            });
        match reference {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::unescape_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn references_are_decoded() {
        assert_eq!(unescape_text("a &lt; b &amp;&amp; c"), "a < b && c");
        assert_eq!(unescape_text("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(unescape_text("caf&eacute;"), "café");
    }

    #[test]
    fn unknown_references_are_kept() {
        assert_eq!(unescape_text("&bogus; & &amp"), "&bogus; & &amp");
        assert_eq!(unescape_text("&#0;"), "\u{FFFD}");
    }
}
