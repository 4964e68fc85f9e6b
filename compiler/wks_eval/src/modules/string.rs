//! `string`: character-class constants and `capwords`.

use crate::errors::{wrong_arg_type, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::split;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;
const WHITESPACE: &str = " \t\n\r\x0b\x0c";

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "string",
    members: &[
        Member::constant("ascii_letters", || Value::str(format!("{LOWERCASE}{UPPERCASE}"))),
        Member::constant("ascii_lowercase", || Value::str(LOWERCASE)),
        Member::constant("ascii_uppercase", || Value::str(UPPERCASE)),
        Member::constant("digits", || Value::str(DIGITS)),
        Member::constant("hexdigits", || Value::str("0123456789abcdefABCDEF")),
        Member::constant("octdigits", || Value::str("01234567")),
        Member::constant("punctuation", || Value::str(PUNCTUATION)),
        Member::constant("whitespace", || Value::str(WHITESPACE)),
        Member::constant("printable", || {
            Value::str(format!(
                "{DIGITS}{LOWERCASE}{UPPERCASE}{PUNCTUATION}{WHITESPACE}"
            ))
        }),
        Member::function("capwords", capwords),
    ],
};

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `capwords(s, sep=null)`: capitalise each word and rejoin.
fn capwords(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("capwords", 1, 2)?;
    args.only_named("capwords", &["sep"])?;
    let text = args.str("capwords", 0)?;
    let sep = match args.param(1, "sep") {
        None | Some(Value::Null) => None,
        Some(Value::Str(s)) => Some(s.to_string()),
        Some(other) => return Err(wrong_arg_type("capwords", "str", other.type_name())),
    };
    let words = split(text, sep.as_deref(), -1)?;
    let joined = words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(sep.as_deref().unwrap_or(" "));
    Ok(Value::str(joined))
}
