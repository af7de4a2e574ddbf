//! Restricted literal parser for normalized payloads.
//!
//! The grammar is deliberately tiny: bracketed sequences, numbers, and the
//! three neutral tokens `true` / `false` / `null`. Channel content is
//! untrusted text, so nothing is ever evaluated; the parser walks the bytes
//! once and produces a flat vector of floats.
//!
//! # Grammar
//!
//! ```text
//! payload  := sequence
//! sequence := '[' ( value ( ',' value )* ','? )? ']'
//! value    := sequence | number | 'true' | 'false' | 'null'
//! ```
//!
//! Nested sequences flatten depth-first into the output, so
//! `[1.0, [2.0, [3.0]]]` decodes to `[1.0, 2.0, 3.0]`. Integers widen to
//! floats. `inf` and `nan` spellings are accepted as numbers.

use crate::error::{Error, Result};
use crate::normalize::normalize;

/// How boolean and null leaves decode.
///
/// Such leaves have no well-defined numeric meaning; the default refuses to
/// guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafPolicy {
    /// Reject `true` / `false` / `null` leaves as malformed. The default.
    #[default]
    Strict,
    /// Coerce `true` to 1.0 and `false` / `null` to 0.0.
    Coerce,
}

/// Decode a raw payload into a flat numeric sequence.
///
/// Normalizes first (see [`normalize`]), then parses the remaining text as a
/// bracketed literal under [`LeafPolicy::Strict`]. Pure: no side effects, no
/// I/O.
///
/// # Errors
///
/// Any [`Error`] variant means the payload is malformed: the top level is
/// not a bracketed sequence, a bracket never closes, a leaf is not numeric,
/// or text trails the closing bracket.
pub fn decode(raw: &str) -> Result<Vec<f64>> {
    decode_with_policy(raw, LeafPolicy::Strict)
}

/// Decode a raw payload, choosing how boolean/null leaves are handled.
pub fn decode_with_policy(raw: &str, policy: LeafPolicy) -> Result<Vec<f64>> {
    let text = normalize(raw);
    let mut parser = Parser::new(&text);
    parser.skip_ws();
    if parser.peek() != Some(b'[') {
        return Err(Error::NotASequence);
    }
    let mut values = Vec::new();
    parser.parse_sequence(&mut values, policy)?;
    parser.skip_ws();
    if parser.pos < parser.text.len() {
        return Err(Error::TrailingContent { at: parser.pos });
    }
    Ok(values)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> Error {
        match self.text[self.pos..].chars().next() {
            Some(found) => Error::UnexpectedChar {
                found,
                at: self.pos,
            },
            None => Error::UnexpectedEnd,
        }
    }

    /// Parse one `[...]`, appending every numeric leaf to `out`.
    ///
    /// The caller has already verified the opening bracket.
    fn parse_sequence(&mut self, out: &mut Vec<f64>, policy: LeafPolicy) -> Result<()> {
        self.pos += 1;
        self.skip_ws();
        if self.eat(b']') {
            return Ok(());
        }
        loop {
            self.parse_value(out, policy)?;
            self.skip_ws();
            if self.eat(b',') {
                self.skip_ws();
                // trailing comma before the close is tolerated
                if self.eat(b']') {
                    return Ok(());
                }
                continue;
            }
            if self.eat(b']') {
                return Ok(());
            }
            return Err(self.unexpected());
        }
    }

    fn parse_value(&mut self, out: &mut Vec<f64>, policy: LeafPolicy) -> Result<()> {
        match self.peek() {
            Some(b'[') => self.parse_sequence(out, policy),
            Some(_) => self.parse_leaf(out, policy),
            None => Err(Error::UnexpectedEnd),
        }
    }

    /// Parse one leaf token: the maximal run up to a delimiter.
    fn parse_leaf(&mut self, out: &mut Vec<f64>, policy: LeafPolicy) -> Result<()> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b',' || b == b'[' || b == b']' || b.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        let token = &self.text[start..self.pos];
        let coerced = match token {
            "true" => Some(1.0),
            "false" | "null" => Some(0.0),
            _ => None,
        };
        if let Some(value) = coerced {
            return match policy {
                LeafPolicy::Coerce => {
                    out.push(value);
                    Ok(())
                }
                LeafPolicy::Strict => Err(Error::StrictLeaf {
                    token: token.to_string(),
                    at: start,
                }),
            };
        }
        match token.parse::<f64>() {
            Ok(value) => {
                out.push(value);
                Ok(())
            }
            Err(_) => Err(Error::NonNumericLeaf {
                token: token.to_string(),
                at: start,
            }),
        }
    }
}
