//! Lexical layer of the INI inventory format.
//!
//! Host lines are split shell-style: whitespace separates tokens, quotes
//! group them, and an unquoted `#` starts a comment. Quotes are kept in the
//! token so [`literal`] can tell `port=22` from `port="22"`.

use serde_json::{Number, Value};

use crate::error::DocumentError;

pub fn tokenize(line: &str) -> Result<Vec<String>, DocumentError> {
    let mut tokens: Vec<String> = Vec::new();
    let mut current: String = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                current.push(c);
            }
            None if c == '#' && current.is_empty() => break,
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if quote.is_some() {
        return Err(DocumentError::UnterminatedQuote);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Splits a `key=value` token. The value is interpreted by [`literal`].
pub fn key_value(token: &str) -> Option<(String, Value)> {
    let (key, value) = token.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), literal(value.trim())))
}

/// Interprets an inventory value.
///
/// Quoted text stays a string. `true`/`false` (either capitalisation) become
/// booleans, numbers become numbers, and `[...]`/`{...}` become lists and
/// mappings when they are valid JSON. Everything else is a string.
pub fn literal(raw: &str) -> Value {
    if let Some(inner) = unquote(raw) {
        return Value::String(inner.to_string());
    }

    match raw {
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }

    if let Some(digits) = integer_digits(raw) {
        if digits.len() > 1 && digits.starts_with('0') {
            return Value::String(raw.to_string());
        }
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n.into());
        }
        if let Ok(n) = raw.trim_start_matches('+').parse::<u64>() {
            return Value::Number(n.into());
        }
        return Value::String(raw.to_string());
    }
    if looks_like_float(raw) {
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    if raw.starts_with('[') || raw.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(raw) {
            return value;
        }
    }

    Value::String(raw.to_string())
}

fn unquote(raw: &str) -> Option<&str> {
    let first = raw.chars().next()?;
    if raw.len() >= 2 && (first == '"' || first == '\'') && raw.ends_with(first) {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// The digits of an optionally signed integer token.
fn integer_digits(raw: &str) -> Option<&str> {
    let digits: &str = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// Needs a fraction or an exponent; bare digits are handled as integers.
fn looks_like_float(raw: &str) -> bool {
    raw.contains(['.', 'e', 'E'])
        && raw.chars().any(|c| c.is_ascii_digit())
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
