//! Primitive parsing building blocks.
//!
//! A parser is a function from input text to one of three outcomes:
//!
//! - `Ok(Some((value, rest)))` - a match, with the remaining input
//! - `Ok(None)` - an ordinary no-match; alternation backtracks on it
//! - `Err(..)` - a hard failure from a must-match boundary; it
//!   propagates through every combinator and aborts the parse
//!
//! Remainders are owned strings because `indent` hands back a remainder
//! it stitched together itself (the inner parser's leftover followed by
//! the non-dedented tail), which borrows from no single input.

use std::cell::OnceCell;
use std::rc::Rc;

use regex::Regex;

use crate::errors::errors::Error;

pub type ParseOutcome<T> = Result<Option<(T, String)>, Error>;

/// A composable parser producing values of type `T`.
pub struct Parser<T> {
    run: Rc<dyn Fn(&str) -> ParseOutcome<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: 'static> Parser<T> {
    pub fn new(run: impl Fn(&str) -> ParseOutcome<T> + 'static) -> Self {
        Parser { run: Rc::new(run) }
    }

    /// Runs the parser against `input`.
    pub fn parse(&self, input: &str) -> ParseOutcome<T> {
        (self.run)(input)
    }

    /// Transforms a matched value, leaving the remainder untouched.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U> {
        Parser::new(move |input| Ok(self.parse(input)?.map(|(value, rest)| (f(value), rest))))
    }

    /// Runs `self`, then `next` on the remainder, pairing the results.
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |input| {
            let Some((first, rest)) = self.parse(input)? else {
                return Ok(None);
            };
            let Some((second, rest)) = next.parse(&rest)? else {
                return Ok(None);
            };
            Ok(Some(((first, second), rest)))
        })
    }

    /// Like `then`, but discards `next`'s value.
    pub fn skip<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        self.then(next).map(|(value, _)| value)
    }

    /// Like `then`, but discards `self`'s value.
    pub fn ignore_then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        self.then(next).map(|(_, value)| value)
    }

    /// Ordered alternation of two parsers; `choice` generalizes this to
    /// any number of alternatives.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |input| match self.parse(input)? {
            Some(hit) => Ok(Some(hit)),
            None => other.parse(input),
        })
    }

    /// Converts a no-match into a hard syntax error naming `rule`.
    ///
    /// Used only at rule boundaries that cannot fail softly, so that a
    /// malformed definition produces a report instead of silently
    /// backtracking into nonsense.
    pub fn must(self, rule: &'static str) -> Parser<T> {
        Parser::new(move |input| match self.parse(input)? {
            Some(hit) => Ok(Some(hit)),
            None => {
                log::error!("syntax error, expected {}, got: {:?}", rule, input);
                Err(Error::Syntax {
                    expected: rule.to_string(),
                    rest: input.to_string(),
                })
            }
        })
    }
}

/// Matches iff the input starts with `expected`, consuming it.
pub fn lit(expected: &'static str) -> Parser<String> {
    Parser::new(move |input| {
        if let Some(rest) = input.strip_prefix(expected) {
            Ok(Some((expected.to_string(), rest.to_string())))
        } else {
            Ok(None)
        }
    })
}

/// Matches iff `pattern` matches at the very start of the input,
/// consuming the matched span.
pub fn regex(pattern: &str) -> Parser<String> {
    let pattern = Regex::new(pattern).unwrap();
    Parser::new(move |input| match pattern.find(input) {
        Some(found) if found.start() == 0 => Ok(Some((
            found.as_str().to_string(),
            input[found.end()..].to_string(),
        ))),
        _ => Ok(None),
    })
}

/// Greedily repeats `p` one or more times; zero matches is a no-match.
pub fn many1<T: 'static>(p: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |input| {
        let mut out = vec![];
        let mut text = input.to_string();
        while let Some((value, rest)) = p.parse(&text)? {
            out.push(value);
            // a zero-width match would repeat forever
            if rest.len() == text.len() {
                text = rest;
                break;
            }
            text = rest;
        }
        if out.is_empty() {
            Ok(None)
        } else {
            Ok(Some((out, text)))
        }
    })
}

/// Ordered alternation: the first matching alternative wins, so callers
/// order alternatives from most to least specific.
pub fn choice<T: 'static>(options: Vec<Parser<T>>) -> Parser<T> {
    Parser::new(move |input| {
        for option in &options {
            if let Some(hit) = option.parse(input)? {
                return Ok(Some(hit));
            }
        }
        Ok(None)
    })
}

/// Alternation over literal tokens.
pub fn oneof(options: &'static [&'static str]) -> Parser<String> {
    choice(options.iter().copied().map(lit).collect())
}

/// Matches `pre`, `inner`, `post` in order, keeping only `inner`'s value.
pub fn wrapped<A: 'static, T: 'static, B: 'static>(
    pre: Parser<A>,
    inner: Parser<T>,
    post: Parser<B>,
) -> Parser<T> {
    pre.ignore_then(inner).skip(post)
}

/// Skips trailing whitespace (newlines included) after `p`.
pub fn rstrip<T: 'static>(p: Parser<T>) -> Parser<T> {
    p.skip(regex("\\s*"))
}

/// Skips whitespace (newlines included) on both sides of `p`.
pub fn strip<T: 'static>(p: Parser<T>) -> Parser<T> {
    wrapped(regex("\\s*"), p, regex("\\s*"))
}

/// Matches an alternating item/separator sequence, returning every
/// matched token, separators included. A trailing separator with no
/// item after it is consumed from the input but dropped from the output.
pub fn joined<T: 'static>(separator: Parser<T>, item: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |input| {
        let Some((first, mut text)) = item.parse(input)? else {
            return Ok(None);
        };
        let mut out = vec![first];
        let mut want_separator = true;
        loop {
            let next = if want_separator { &separator } else { &item };
            match next.parse(&text)? {
                Some((value, rest)) => {
                    out.push(value);
                    text = rest;
                    want_separator = !want_separator;
                }
                None => {
                    if !want_separator {
                        // the element before this failed item is a separator
                        out.pop();
                    }
                    break;
                }
            }
        }
        Ok(Some((out, text)))
    })
}

/// Like `joined`, but returns only the items, and an empty match is
/// valid (yielding an empty list instead of a no-match).
pub fn joined_skip<S: 'static, T: 'static>(
    separator: Parser<S>,
    item: Parser<T>,
) -> Parser<Vec<T>> {
    Parser::new(move |input| {
        let Some((first, mut text)) = item.parse(input)? else {
            return Ok(Some((vec![], input.to_string())));
        };
        let mut out = vec![first];
        while let Some((_, after_separator)) = separator.parse(&text)? {
            text = after_separator;
            let Some((value, rest)) = item.parse(&text)? else {
                break;
            };
            out.push(value);
            text = rest;
        }
        Ok(Some((out, text)))
    })
}

/// Concatenates a sequence-of-strings result into a single string.
pub fn flat(p: Parser<Vec<String>>) -> Parser<String> {
    p.map(|parts| parts.concat())
}

/// The off-side rule: collects the run of lines carrying the exact
/// one-level indentation prefix (blank lines are skipped), de-indents
/// them, and parses the accumulated block with `p`.
///
/// The scan stops at the first non-blank, non-indented line; the
/// returned remainder is `p`'s leftover followed by the original,
/// non-dedented text from that line onward. A block with zero properly
/// indented lines is a no-match.
pub fn indent<T: 'static>(p: Parser<T>) -> Parser<T> {
    Parser::new(move |input| {
        let lines: Vec<&str> = input.split('\n').collect();
        let mut matched: Vec<&str> = vec![];
        let mut stop = lines.len();
        for (i, line) in lines.iter().enumerate() {
            if let Some(dedented) = line.strip_prefix("    ") {
                matched.push(dedented);
            } else if !line.is_empty() {
                stop = i;
                break;
            }
        }

        if matched.is_empty() {
            return Ok(None);
        }

        match p.parse(&matched.join("\n"))? {
            Some((value, leftover)) => {
                let tail = lines[stop..].join("\n");
                Ok(Some((value, leftover + &tail)))
            }
            None => Ok(None),
        }
    })
}

/// Defers construction of a parser until it is first used, caching the
/// built parser afterwards.
///
/// Mutually-recursive grammar rules are ordinary functions calling each
/// other; placing `lazy` on a recursive edge breaks the otherwise
/// infinite eager construction. The cache holds the constructed parser,
/// not parse results.
pub fn lazy<T: 'static>(build: impl Fn() -> Parser<T> + 'static) -> Parser<T> {
    let built: OnceCell<Parser<T>> = OnceCell::new();
    Parser::new(move |input| built.get_or_init(&build).parse(input))
}
