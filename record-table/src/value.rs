//! Cell values and their coercion rules.
//!
//! Every attribute a table can read is reduced to a [`CellValue`]. The
//! value knows how to turn itself into display text and how to compare
//! itself against another value with loose relational semantics: values
//! that cannot be ordered against each other report `None` instead of
//! forcing an order.

use std::cmp::Ordering;
use std::fmt;

/// A single attribute value read from a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Missing or null attribute. Renders as an empty string.
    #[default]
    Empty,
    /// Free text.
    Text(String),
    /// Any numeric attribute.
    Number(f64),
    /// A list of strings (tags, segments, ...).
    List(Vec<String>),
    /// A reference to another record, shown by its label.
    Ref { id: String, label: String },
}

impl CellValue {
    /// Create a reference value.
    pub fn reference(id: impl Into<String>, label: impl Into<String>) -> Self {
        CellValue::Ref {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Check if this value is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text used by the global filter and by the default cell renderer.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Compare two values the way a loose `<` / `>` would.
    ///
    /// Returns `None` when the pair is incomparable: either side is empty,
    /// a number is `NaN`, or a number is compared against text that does
    /// not parse as a number.
    pub fn compare(&self, other: &CellValue) -> Option<Ordering> {
        match (self, other) {
            (CellValue::Empty, _) | (_, CellValue::Empty) => None,
            (CellValue::Number(a), CellValue::Number(b)) => a.partial_cmp(b),
            (CellValue::Number(a), b) => {
                let b = parse_number(&b.as_text())?;
                a.partial_cmp(&b)
            }
            (a, CellValue::Number(b)) => {
                let a = parse_number(&a.as_text())?;
                a.partial_cmp(b)
            }
            (a, b) => Some(a.as_text().cmp(&b.as_text())),
        }
    }
}

/// Parse text as a number with loose numeric conversion rules.
///
/// Surrounding whitespace is ignored and blank text is zero. Anything that
/// is not a plain decimal or `Infinity` yields `None`.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust accepts "inf" and "nan", which are not numbers here.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) => {
                if n.is_nan() {
                    f.write_str("NaN")
                } else if n.is_infinite() {
                    f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else if *n == 0.0 {
                    // Covers negative zero.
                    f.write_str("0")
                } else {
                    write_number(f, *n)
                }
            }
            CellValue::List(items) => f.write_str(&items.join(",")),
            CellValue::Ref { label, .. } => f.write_str(label),
        }
    }
}

/// Plain decimal between 1e-6 and 1e21, exponent form (`1e+21`, `1e-7`)
/// outside that range.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => f.write_str(&exp),
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        CellValue::List(value)
    }
}

impl From<&[String]> for CellValue {
    fn from(value: &[String]) -> Self {
        CellValue::List(value.to_vec())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
