//! `textwrap`: greedy paragraph wrapping and indentation helpers.

use crate::errors::{value_error, EvalResult};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "textwrap",
    members: &[
        Member::function("wrap", wrap),
        Member::function("fill", fill),
        Member::function("shorten", shorten),
        Member::function("dedent", dedent),
        Member::function("indent", indent),
    ],
};

const DEFAULT_WIDTH: i64 = 70;

fn width_param(func: &str, args: &Args) -> EvalResult<usize> {
    let width = match args.param(1, "width") {
        None => DEFAULT_WIDTH,
        Some(value) => value.as_int(func)?,
    };
    usize::try_from(width)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| value_error(format!("invalid width {width} (must be > 0)")))
}

/// Greedy line filling; words wider than `width` are split across lines.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let room = if line_len == 0 { width } else { width.saturating_sub(line_len + 1) };
            if word.len() <= room {
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.extend(word.iter());
                line_len += word.len();
                break;
            }
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
                continue;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// `wrap(text, width=70)`: a list of lines.
fn wrap(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("wrap", 1, 2)?;
    args.only_named("wrap", &["width"])?;
    let width = width_param("wrap", &args)?;
    let lines = wrap_lines(args.str("wrap", 0)?, width);
    Ok(Value::list(lines.into_iter().map(Value::str).collect()))
}

/// `fill(text, width=70)`: wrapped lines joined by newlines.
fn fill(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("fill", 1, 2)?;
    args.only_named("fill", &["width"])?;
    let width = width_param("fill", &args)?;
    Ok(Value::str(wrap_lines(args.str("fill", 0)?, width).join("\n")))
}

/// `shorten(text, width, placeholder=" [...]")`: collapse whitespace and
/// truncate at a word boundary.
fn shorten(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("shorten", 2, 3)?;
    args.only_named("shorten", &["placeholder"])?;
    let width = width_param("shorten", &args)?;
    let placeholder = match args.param(2, "placeholder") {
        None => " [...]".to_string(),
        Some(value) => value.to_str(),
    };
    let words: Vec<&str> = args.str("shorten", 0)?.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return Ok(Value::str(collapsed));
    }
    let placeholder_len = placeholder.chars().count();
    if placeholder.trim_start().chars().count() > width {
        return Err(value_error("placeholder too large for max width"));
    }
    let mut kept = String::new();
    for word in words {
        let candidate = if kept.is_empty() {
            word.chars().count()
        } else {
            kept.chars().count() + 1 + word.chars().count()
        };
        if candidate + placeholder_len > width {
            break;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(word);
    }
    if kept.is_empty() {
        return Ok(Value::str(placeholder.trim_start()));
    }
    kept.push_str(&placeholder);
    Ok(Value::str(kept))
}

/// `dedent(text)`: strip the longest common leading whitespace.
fn dedent(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("dedent", 1)?;
    let text = args.str("dedent", 0)?;
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .reduce(|common, indent| {
            let shared = common
                .char_indices()
                .zip(indent.chars())
                .find(|((_, a), b)| a != b)
                .map_or(common.len().min(indent.len()), |((i, _), _)| i);
            &common[..shared]
        })
        .unwrap_or("");
    let dedented: Vec<&str> = text
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect();
    Ok(Value::str(dedented.join("\n")))
}

/// `indent(text, prefix)`: prefix every line that is not blank.
fn indent(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("indent", 2)?;
    let text = args.str("indent", 0)?;
    let prefix = args.str("indent", 1)?;
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    Ok(Value::str(out))
}
