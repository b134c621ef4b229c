//! `MatcherInvocation` — Parsing of `%name(arg, ...)%` placeholders
//!
//! Only strings in the **expected** tree are ever parsed. A string is treated
//! as an invocation candidate when it starts and ends with `%` and the text
//! after the opening `%` is an identifier immediately followed by `(`.
//! Everything else (`"100%"`, `"%"`, `"%d items%"`) is an ordinary literal.
//!
//! Once a string is a candidate it must parse cleanly; a malformed candidate
//! is reported rather than silently compared as a literal.
//!
//! # Argument syntax
//!
//! - Arguments are separated by top-level commas and trimmed.
//! - `'...'` or `"..."` quote an argument so it can contain commas,
//!   parentheses or surrounding whitespace. Quotes are stripped.
//! - Parentheses outside quotes must balance, so `%regExp(^(a|b)$)%` works
//!   without quoting.
//! - `()` is the empty argument list.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::INVOCATION_DELIMITER;

/// A parsed matcher placeholder.
///
/// ```
/// use jsoncontain::MatcherInvocation;
///
/// let inv = MatcherInvocation::parse("%arrayLength(3)%").unwrap();
/// assert_eq!(inv.name(), "arrayLength");
/// assert_eq!(inv.args(), ["3"]);
///
/// let inv = MatcherInvocation::parse("%oneOf('a, b', c)%").unwrap();
/// assert_eq!(inv.args(), ["a, b", "c"]);
///
/// assert!(!MatcherInvocation::is_candidate("100%"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherInvocation {
    name: String,
    args: Vec<String>,
}

/// Why a candidate placeholder failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The input is not a `%name(...)%` candidate at all.
    #[error("\"{input}\" is not a matcher invocation")]
    NotAnInvocation {
        /// The rejected input.
        input: String,
    },
    /// The argument list never reaches its closing `)`.
    #[error("unterminated argument list in \"{input}\"")]
    UnterminatedArguments {
        /// The rejected input.
        input: String,
    },
    /// Parentheses inside the argument list do not balance.
    #[error("unbalanced parentheses in \"{input}\"")]
    UnbalancedParentheses {
        /// The rejected input.
        input: String,
    },
    /// A quoted argument is never closed.
    #[error("unterminated quote in \"{input}\"")]
    UnterminatedQuote {
        /// The rejected input.
        input: String,
    },
    /// Text follows a closing quote before the next comma.
    #[error("unexpected text after quoted argument {position} in \"{input}\"")]
    TrailingAfterQuote {
        /// The rejected input.
        input: String,
        /// 0-based argument position.
        position: usize,
    },
    /// Two commas with nothing between them, or a trailing comma.
    #[error("empty argument at position {position} in \"{input}\"")]
    EmptyArgument {
        /// The rejected input.
        input: String,
        /// 0-based argument position.
        position: usize,
    },
}

fn candidate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Infallible: the pattern is a compile-time constant.
        Regex::new(r"(?s)^%([A-Za-z_][A-Za-z0-9_]*)\((.*)%$").unwrap_or_else(|e| {
            unreachable!("invocation pattern is valid: {e}")
        })
    })
}

impl MatcherInvocation {
    /// Build an invocation directly (no parsing).
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` when `s` has the `%name(...%` shape and must be parsed.
    #[must_use]
    pub fn is_candidate(s: &str) -> bool {
        s.len() >= 2
            && s.starts_with(INVOCATION_DELIMITER)
            && s.ends_with(INVOCATION_DELIMITER)
            && candidate_pattern().is_match(s)
    }

    /// Parse a `%name(args)%` string.
    ///
    /// # Errors
    ///
    /// [`InvocationError::NotAnInvocation`] when `s` is not a candidate (see
    /// [`is_candidate`](Self::is_candidate)); any other variant when the
    /// candidate is malformed.
    pub fn parse(s: &str) -> Result<Self, InvocationError> {
        let caps = candidate_pattern()
            .captures(s)
            .ok_or_else(|| InvocationError::NotAnInvocation {
                input: s.to_owned(),
            })?;
        let name = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());

        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| InvocationError::UnterminatedArguments {
                input: s.to_owned(),
            })?;

        Ok(Self {
            name: name.to_owned(),
            args: split_args(inner, s)?,
        })
    }

    /// Returns the matcher name (registry lookup key).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for MatcherInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(arg)?;
        }
        f.write_str(")%")
    }
}

/// Split the text between the outer parentheses into arguments.
fn split_args(inner: &str, input: &str) -> Result<Vec<String>, InvocationError> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted: Option<String> = None;
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    let finish = |current: &mut String,
                  quoted: &mut Option<String>,
                  args: &mut Vec<String>|
     -> Result<(), InvocationError> {
        let position = args.len();
        let arg = match quoted.take() {
            Some(q) => {
                if !current.trim().is_empty() {
                    return Err(InvocationError::TrailingAfterQuote {
                        input: input.to_owned(),
                        position,
                    });
                }
                q
            }
            None => {
                let trimmed = current.trim();
                if trimmed.is_empty() {
                    return Err(InvocationError::EmptyArgument {
                        input: input.to_owned(),
                        position,
                    });
                }
                trimmed.to_owned()
            }
        };
        current.clear();
        args.push(arg);
        Ok(())
    };

    for c in inner.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            } else if let Some(buf) = quoted.as_mut() {
                buf.push(c);
            }
            continue;
        }
        match c {
            '\'' | '"' if current.trim().is_empty() && quoted.is_none() => {
                quote = Some(c);
                quoted = Some(String::new());
                current.clear();
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| InvocationError::UnbalancedParentheses {
                        input: input.to_owned(),
                    })?;
                current.push(c);
            }
            ',' if depth == 0 => finish(&mut current, &mut quoted, &mut args)?,
            _ => current.push(c),
        }
    }

    if quote.is_some() {
        return Err(InvocationError::UnterminatedQuote {
            input: input.to_owned(),
        });
    }
    if depth != 0 {
        return Err(InvocationError::UnbalancedParentheses {
            input: input.to_owned(),
        });
    }
    finish(&mut current, &mut quoted, &mut args)?;
    Ok(args)
}
