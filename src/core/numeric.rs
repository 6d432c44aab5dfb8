//! Numeric gateway for user-entered invoice figures.
//!
//! Invoice fields arrive as JSON numbers, blanks, numeric strings, or short
//! arithmetic such as `"40*25"`. Every calculation reads its inputs through
//! [`numeric_value`], which always yields a finite [`Decimal`] and never
//! fails: anything malformed degrades to zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Nesting limit for parenthesised and unary sub-expressions
const MAX_EXPRESSION_DEPTH: usize = 64;

/// A numeric field as submitted, before coercion
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Absent or JSON `null`
    #[default]
    Missing,
    /// Exact decimal value
    Number(Decimal),
    /// Binary float, possibly NaN or infinite
    Float(f64),
    /// Free text: a number, an arithmetic expression, or junk
    Text(String),
}

impl RawValue {
    /// Coerce to a finite decimal, see [`numeric_value`]
    pub fn value(&self) -> Decimal {
        numeric_value(self)
    }

    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Missing,
            serde_json::Value::Number(n) => match parse_plain_number(&n.to_string()) {
                Some(decimal) => RawValue::Number(decimal),
                None => n.as_f64().map(RawValue::Float).unwrap_or_default(),
            },
            serde_json::Value::String(s) => RawValue::Text(s),
            serde_json::Value::Bool(b) => RawValue::Text(b.to_string()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => RawValue::Missing,
        }
    }
}

/// Coerce a raw field into a finite decimal.
///
/// - numbers are returned unchanged; non-finite floats become zero
/// - blank text and missing values become zero
/// - text that reads as a plain number (sign, decimal point, exponent) is parsed
/// - text made only of digits, `.`, `+ - * / ( )` and whitespace is evaluated
///   as arithmetic; parse errors, division by zero and overflow give zero
/// - any other text gives zero
pub fn numeric_value(raw: &RawValue) -> Decimal {
    match raw {
        RawValue::Missing => Decimal::ZERO,
        RawValue::Number(value) => *value,
        RawValue::Float(value) => {
            if value.is_finite() {
                Decimal::from_f64(*value).unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            }
        }
        RawValue::Text(text) => numeric_text(text),
    }
}

/// Coerce free text, same rules as [`numeric_value`]
pub fn numeric_text(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    if let Some(value) = parse_plain_number(trimmed) {
        return value;
    }

    if !is_arithmetic(trimmed) {
        return Decimal::ZERO;
    }

    match ExpressionParser::evaluate(trimmed) {
        Some(value) => value,
        None => {
            tracing::debug!(expression = %trimmed, "Unevaluable numeric expression, using 0");
            Decimal::ZERO
        }
    }
}

/// Plain decimal or scientific notation, nothing else
fn parse_plain_number(text: &str) -> Option<Decimal> {
    let plausible = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plausible || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn is_arithmetic(text: &str) -> bool {
    text.bytes().all(|b| {
        b.is_ascii_digit()
            || b.is_ascii_whitespace()
            || matches!(b, b'+' | b'-' | b'*' | b'/' | b'(' | b')' | b'.')
    })
}

/// Recursive-descent evaluator for `+ - * / ( )` over decimals.
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := factor (('*' | '/') factor)*
/// factor     := ('+' | '-') factor | '(' expression ')' | number
/// number     := digits ['.' digits] | '.' digits | digits '.'
/// ```
struct ExpressionParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ExpressionParser<'a> {
    fn evaluate(source: &'a str) -> Option<Decimal> {
        let mut parser = Self {
            bytes: source.as_bytes(),
            pos: 0,
        };
        let value = parser.expression(0)?;
        match parser.peek() {
            None => Some(value),
            Some(_) => None,
        }
    }

    fn expression(&mut self, depth: usize) -> Option<Decimal> {
        let mut value = self.term(depth)?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    value = value.checked_add(self.term(depth)?)?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    value = value.checked_sub(self.term(depth)?)?;
                }
                _ => return Some(value),
            }
        }
    }

    fn term(&mut self, depth: usize) -> Option<Decimal> {
        let mut value = self.factor(depth)?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    value = value.checked_mul(self.factor(depth)?)?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    // checked_div yields None for a zero divisor
                    value = value.checked_div(self.factor(depth)?)?;
                }
                _ => return Some(value),
            }
        }
    }

    fn factor(&mut self, depth: usize) -> Option<Decimal> {
        if depth > MAX_EXPRESSION_DEPTH {
            return None;
        }

        match self.peek()? {
            b'+' => {
                self.pos += 1;
                self.factor(depth + 1)
            }
            b'-' => {
                self.pos += 1;
                self.factor(depth + 1).map(|v| -v)
            }
            b'(' => {
                self.pos += 1;
                let value = self.expression(depth + 1)?;
                if self.peek()? != b')' {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            b'0'..=b'9' | b'.' => self.number(),
            _ => None,
        }
    }

    fn number(&mut self) -> Option<Decimal> {
        let start = self.pos;
        let mut dots = 0;
        let mut digits = 0;
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' => dots += 1,
                _ => break,
            }
            self.pos += 1;
        }

        if digits == 0 || dots > 1 {
            return None;
        }

        let literal = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        let literal = literal.trim_end_matches('.');
        if let Some(fraction) = literal.strip_prefix('.') {
            Decimal::from_str(&format!("0.{}", fraction)).ok()
        } else {
            Decimal::from_str(literal).ok()
        }
    }

    /// Next significant byte, skipping whitespace
    fn peek(&mut self) -> Option<u8> {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                return Some(b);
            }
        }
        None
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Missing => serializer.serialize_none(),
            RawValue::Number(value) => Serialize::serialize(value, serializer),
            RawValue::Float(value) => serializer.serialize_f64(*value),
            RawValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(RawValue::from_json)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Number(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(Decimal::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(Decimal::from(value))
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(Decimal::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
