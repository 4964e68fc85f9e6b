//! `html.parser`: a forgiving tokenizer.
//!
//! `tokenize(text)` returns tuples: `("starttag", tag, attrs)`,
//! `("endtag", tag)`, `("data", text)`, `("comment", text)` and
//! `("decl", text)` for `<!DOCTYPE ...>`. Tag and attribute names are
//! lower-cased; attribute values and data have references decoded.
//! `script` and `style` contents are passed through as raw data.

use super::unescape_text;
use crate::errors::EvalResult;
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(in crate::modules) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "html.parser",
    members: &[Member::function("tokenize", tokenize)],
};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    StartTag {
        name: String,
        attrs: Vec<(String, Option<String>)>,
    },
    EndTag(String),
    Data(String),
    Comment(String),
    Decl(String),
}

impl Token {
    fn into_value(self) -> Value {
        let tag = |kind: &str| Value::str(kind);
        match self {
            Token::StartTag { name, attrs } => Value::tuple(vec![
                tag("starttag"),
                Value::str(name),
                Value::list(
                    attrs
                        .into_iter()
                        .map(|(name, value)| {
                            Value::tuple(vec![Value::str(name), value.map_or(Value::Null, Value::str)])
                        })
                        .collect(),
                ),
            ]),
            Token::EndTag(name) => Value::tuple(vec![tag("endtag"), Value::str(name)]),
            Token::Data(text) => Value::tuple(vec![tag("data"), Value::str(text)]),
            Token::Comment(text) => Value::tuple(vec![tag("comment"), Value::str(text)]),
            Token::Decl(text) => Value::tuple(vec![tag("decl"), Value::str(text)]),
        }
    }
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    pending: String,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Tokenizer {
            src,
            pos: 0,
            tokens: Vec::new(),
            pending: String::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn flush_data(&mut self) {
        if !self.pending.is_empty() {
            let text = unescape_text(&std::mem::take(&mut self.pending));
            self.tokens.push(Token::Data(text));
        }
    }

    fn push(&mut self, token: Token) {
        self.flush_data();
        self.tokens.push(token);
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(lt) = self.rest().find('<') {
            let before = &self.rest()[..lt];
            self.pending.push_str(before);
            self.pos += lt;
            if !self.markup() {
                self.pending.push('<');
                self.pos += 1;
            }
        }
        let rest = self.rest();
        self.pending.push_str(rest);
        self.pos = self.src.len();
        self.flush_data();
        self.tokens
    }

    /// Consume one piece of markup at `<`; false if it is not markup.
    fn markup(&mut self) -> bool {
        let rest = self.rest();
        if let Some(body) = rest.strip_prefix("<!--") {
            let (comment, consumed) = match body.find("-->") {
                Some(end) => (&body[..end], 4 + end + 3),
                None => (body, rest.len()),
            };
            self.push(Token::Comment(comment.to_string()));
            self.pos += consumed;
            return true;
        }
        if let Some(body) = rest.strip_prefix("<!") {
            let end = body.find('>').unwrap_or(body.len());
            self.push(Token::Decl(body[..end].to_string()));
            self.pos += (2 + end + 1).min(rest.len());
            return true;
        }
        if let Some(body) = rest.strip_prefix("</") {
            if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return false;
            }
            let end = body.find('>').unwrap_or(body.len());
            let name = tag_name(&body[..end]);
            self.push(Token::EndTag(name));
            self.pos += (2 + end + 1).min(rest.len());
            return true;
        }
        let body = &rest[1..];
        if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return false;
        }
        let Some(end) = tag_end(body) else {
            return false;
        };
        let inner = body[..end].trim_end_matches('/');
        let name = tag_name(inner);
        let attrs = parse_attrs(&inner[name.len()..]);
        self.push(Token::StartTag {
            name: name.clone(),
            attrs,
        });
        self.pos += 1 + end + 1;
        if name == "script" || name == "style" {
            self.raw_text(&name);
        }
        true
    }

    /// Pass everything up to `</name` through as data.
    fn raw_text(&mut self, name: &str) {
        let rest = self.rest();
        let closing = format!("</{name}");
        let end = rest
            .to_ascii_lowercase()
            .find(&closing)
            .unwrap_or(rest.len());
        if end > 0 {
            self.flush_data();
            self.tokens.push(Token::Data(rest[..end].to_string()));
        }
        self.pos += end;
    }
}

fn tag_name(inner: &str) -> String {
    inner
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Index of the `>` closing a start tag, skipping quoted values.
fn tag_end(body: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_attrs(text: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    let mut rest = text.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();
        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(q) {
                        Some(close) => (&body[..close], &body[close + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            rest = remaining;
            Some(unescape_text(value))
        } else {
            None
        };
        if !name.is_empty() {
            attrs.push((name, value));
        }
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
    }
    attrs
}

/// `tokenize(text)`.
fn tokenize(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("tokenize", 1)?;
    let tokens = Tokenizer::new(args.str("tokenize", 0)?).run();
    Ok(Value::list(tokens.into_iter().map(Token::into_value).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn start(name: &str, attrs: &[(&str, Option<&str>)]) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(n, v)| ((*n).to_string(), v.map(str::to_string)))
                .collect(),
        }
    }

    #[test]
    fn tags_data_and_comments() {
        let tokens = Tokenizer::new("<P class='x' hidden>a &amp; b</p><!-- note -->").run();
        assert_eq!(
            tokens,
            vec![
                start("p", &[("class", Some("x")), ("hidden", None)]),
                Token::Data("a & b".into()),
                Token::EndTag("p".into()),
                Token::Comment(" note ".into()),
            ]
        );
    }

    #[test]
    fn self_closing_and_quoted_gt() {
        let tokens = Tokenizer::new(r#"<img alt="a>b" src=x.png/>"#).run();
        assert_eq!(
            tokens,
            vec![start("img", &[("alt", Some("a>b")), ("src", Some("x.png"))])]
        );
    }

    #[test]
    fn stray_angle_brackets_are_data() {
        let tokens = Tokenizer::new("1 < 2 <3").run();
        assert_eq!(tokens, vec![Token::Data("1 < 2 <3".into())]);
    }

    #[test]
    fn script_bodies_are_raw() {
        let tokens = Tokenizer::new("<script>if (a<b) x = '&amp;';</SCRIPT>").run();
        assert_eq!(
            tokens,
            vec![
                start("script", &[]),
                Token::Data("if (a<b) x = '&amp;';".into()),
                Token::EndTag("script".into()),
            ]
        );
    }

    #[test]
    fn doctype_is_a_declaration() {
        let tokens = Tokenizer::new("<!DOCTYPE html><br>").run();
        assert_eq!(
            tokens,
            vec![Token::Decl("DOCTYPE html".into()), start("br", &[])]
        );
    }
}
