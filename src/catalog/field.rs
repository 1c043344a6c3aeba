use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::Chars;

/// Ingredient or direction cell, either a parsed list of items or the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Field {
    Structured { items: Vec<String> },
    Raw { text: String },
}

impl Field {
    /// Parse a serialized list literal such as `['2 eggs', "1 cup milk"]`.
    /// Input that is not a list of quoted strings is kept as `Raw`.
    pub fn parse(raw: &str) -> Self {
        match parse_string_list(raw) {
            Some(items) => Field::Structured { items },
            None => Field::Raw {
                text: raw.to_string(),
            },
        }
    }

    /// Items for display; raw text is a single item
    pub fn items(&self) -> Vec<&str> {
        match self {
            Field::Structured { items } => items.iter().map(String::as_str).collect(),
            Field::Raw { text } => vec![text.as_str()],
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Field::Structured { .. })
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

/// `[ item, item, ... ]` or `( item, ... )` where each item is one or more
/// adjacent quoted string literals
fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let mut chars = raw.chars().peekable();
    skip_whitespace(&mut chars);

    let close = match chars.next()? {
        '[' => ']',
        '(' => ')',
        _ => return None,
    };

    let mut items = Vec::new();
    let mut tuple_has_comma = false;

    loop {
        skip_whitespace(&mut chars);
        match *chars.peek()? {
            c if c == close => {
                chars.next();
                break;
            }
            '\'' | '"' => {
                let mut item = String::new();
                while let Some(&(quote @ ('\'' | '"'))) = chars.peek() {
                    chars.next();
                    item.push_str(&parse_quoted(&mut chars, quote)?);
                    skip_whitespace(&mut chars);
                }
                items.push(item);

                match chars.next()? {
                    ',' => tuple_has_comma = true,
                    c if c == close => break,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    skip_whitespace(&mut chars);
    if chars.next().is_some() {
        return None;
    }

    // `('a')` is a parenthesized string, not a tuple
    if close == ')' && items.len() == 1 && !tuple_has_comma {
        return None;
    }

    Some(items)
}

/// Body of a string literal after its opening quote, up to and including the closing quote
fn parse_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut out = String::new();

    loop {
        match chars.next()? {
            c if c == quote => return Some(out),
            '\n' => return None,
            '\\' => parse_escape(chars, &mut out)?,
            c => out.push(c),
        }
    }
}

fn parse_escape(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Option<()> {
    let c = chars.next()?;
    match c {
        '\n' => {}
        '\\' | '\'' | '"' => out.push(c),
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'a' => out.push('\u{07}'),
        'b' => out.push('\u{08}'),
        'f' => out.push('\u{0c}'),
        'v' => out.push('\u{0b}'),
        'x' => out.push(parse_hex(chars, 2)?),
        'u' => out.push(parse_hex(chars, 4)?),
        'U' => out.push(parse_hex(chars, 8)?),
        '0'..='7' => {
            let mut value = c.to_digit(8)?;
            for _ in 0..2 {
                match chars.peek().and_then(|d| d.to_digit(8)) {
                    Some(d) => {
                        value = value * 8 + d;
                        chars.next();
                    }
                    None => break,
                }
            }
            out.push(char::from_u32(value)?);
        }
        // Unknown escapes keep their backslash
        other => {
            out.push('\\');
            out.push(other);
        }
    }
    Some(())
}

fn parse_hex(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
