//! # Host Range Model
//!
//! Expands the compact bracket notation used when declaring hosts.
//!
//! Supported forms, one bracket expression per token:
//! * **Numeric**: `web[01-03].example.com` (zero-padded when a bound is).
//! * **Alphabetic**: `host[a-c].local`.
//! * **Stepped**: `node[1-9:2]`.
//! * **Colon form**: `db[01:03]` or `db[1:9:2]`.

use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("unmatched bracket in host pattern '{0}'")]
    Unmatched(String),
    #[error("only one range expression is allowed in '{0}'")]
    Multiple(String),
    #[error("invalid range bounds '{0}'")]
    InvalidBounds(String),
    #[error("range start '{start}' is greater than end '{end}'")]
    Descending { start: String, end: String },
    #[error("invalid range step '{0}'")]
    InvalidStep(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBounds {
    Numeric { start: u64, end: u64, width: usize },
    Alpha { start: char, end: char },
}

/// A host token with exactly one bracket expression, e.g. `web[01-03].local`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRange {
    pub head: String,
    pub bounds: RangeBounds,
    pub step: usize,
    pub tail: String,
}

impl HostRange {
    /// Concrete host names, ascending.
    pub fn iter(&self) -> Box<dyn Iterator<Item = String> + '_> {
        match self.bounds {
            RangeBounds::Numeric { start, end, width } => Box::new(
                (start..=end)
                    .step_by(self.step)
                    .map(move |n| format!("{}{:0width$}{}", self.head, n, self.tail)),
            ),
            RangeBounds::Alpha { start, end } => Box::new(
                (start..=end)
                    .step_by(self.step)
                    .map(move |c| format!("{}{}{}", self.head, c, self.tail)),
            ),
        }
    }
}

impl FromStr for HostRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, body, tail) = split_brackets(s)?
            .ok_or_else(|| RangeError::InvalidBounds(s.to_string()))?;
        let (bounds, step) = parse_body(body)?;

        Ok(Self {
            head: head.to_string(),
            bounds,
            step,
            tail: tail.to_string(),
        })
    }
}

/// Expands one host token. Tokens without brackets come back unchanged.
pub fn expand(token: &str) -> Result<Vec<String>, RangeError> {
    if split_brackets(token)?.is_none() {
        return Ok(vec![token.to_string()]);
    }
    let range: HostRange = token.parse()?;
    Ok(range.iter().collect())
}

/// Splits `head[body]tail`. `None` when the token has no brackets at all.
fn split_brackets(s: &str) -> Result<Option<(&str, &str, &str)>, RangeError> {
    let opens: usize = s.matches('[').count();
    let closes: usize = s.matches(']').count();

    if opens == 0 && closes == 0 {
        return Ok(None);
    }
    if opens != closes {
        return Err(RangeError::Unmatched(s.to_string()));
    }
    if opens > 1 {
        return Err(RangeError::Multiple(s.to_string()));
    }

    let (head, rest) = s
        .split_once('[')
        .ok_or_else(|| RangeError::Unmatched(s.to_string()))?;
    let (body, tail) = rest
        .split_once(']')
        .ok_or_else(|| RangeError::Unmatched(s.to_string()))?;

    Ok(Some((head, body, tail)))
}

/// Parses `start-end`, `start-end:step`, `start:end` or `start:end:step`.
fn parse_body(body: &str) -> Result<(RangeBounds, usize), RangeError> {
    let (start, end, step) = if let Some((range, step)) = dash_form(body) {
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| RangeError::InvalidBounds(body.to_string()))?;
        (start, end, step)
    } else {
        let parts: Vec<&str> = body.split(':').collect();
        match parts.as_slice() {
            [start, end] => (*start, *end, None),
            [start, end, step] => (*start, *end, Some(*step)),
            _ => return Err(RangeError::InvalidBounds(body.to_string())),
        }
    };

    let bounds = parse_bounds(start.trim(), end.trim())?;
    let step = parse_step(step)?;
    Ok((bounds, step))
}

fn dash_form(body: &str) -> Option<(&str, Option<&str>)> {
    if !body.contains('-') {
        return None;
    }
    match body.split_once(':') {
        Some((range, step)) => Some((range, Some(step))),
        None => Some((body, None)),
    }
}

fn parse_bounds(start: &str, end: &str) -> Result<RangeBounds, RangeError> {
    if let (Ok(first), Ok(last)) = (start.parse::<u64>(), end.parse::<u64>()) {
        if first > last {
            return Err(RangeError::Descending {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let width: usize = if is_padded(start) || is_padded(end) {
            start.len().max(end.len())
        } else {
            0
        };
        return Ok(RangeBounds::Numeric {
            start: first,
            end: last,
            width,
        });
    }

    match (single_letter(start), single_letter(end)) {
        (Some(first), Some(last)) if first.is_ascii_lowercase() == last.is_ascii_lowercase() => {
            if first > last {
                return Err(RangeError::Descending {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            Ok(RangeBounds::Alpha {
                start: first,
                end: last,
            })
        }
        _ => Err(RangeError::InvalidBounds(format!("{start}-{end}"))),
    }
}

fn parse_step(step: Option<&str>) -> Result<usize, RangeError> {
    let Some(step) = step else {
        return Ok(1);
    };
    match step.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(RangeError::InvalidStep(step.to_string())),
        Ok(n) => Ok(n),
    }
}

fn is_padded(bound: &str) -> bool {
    bound.len() > 1 && bound.starts_with('0')
}

fn single_letter(bound: &str) -> Option<char> {
    let mut chars = bound.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
