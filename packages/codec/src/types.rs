//! Core value types for the jobfile codec

use serde::Serialize;
use std::fmt;

/// A single value held by an element.
///
/// Jobfile fields only ever carry integers, floats and quoted text; multiline
/// fields are text as well, split over several physical lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value (string and multiline fields)
    Text(String),
}

impl Scalar {
    /// Name of the dynamic type, as used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "string",
        }
    }

    /// Try to get value as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get value as f64
    ///
    /// Integers are widened so that numeric bounds can be compared across
    /// both numeric types.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Text(_) => None,
        }
    }

    /// Try to get value as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check whether a numeric value lies within `[low, high]` (inclusive).
    ///
    /// Integers compare exactly against integer bounds. Any other numeric
    /// combination compares as f64. Text never lies within a range.
    pub fn within(&self, low: &Scalar, high: &Scalar) -> bool {
        if let (Scalar::Int(v), Scalar::Int(lo), Scalar::Int(hi)) = (self, low, high) {
            return lo <= v && v <= hi;
        }
        match (self.as_float(), low.as_float(), high.as_float()) {
            (Some(v), Some(lo), Some(hi)) => lo <= v && v <= hi,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Int(i as i64)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

/// Input accepted by element setters: one scalar or an ordered list.
///
/// A single scalar is treated as a list of length one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A lone scalar
    One(Scalar),
    /// An ordered list of scalars
    Many(Vec<Scalar>),
}

impl Value {
    /// Flatten into the ordered list of scalars the element will store.
    #[must_use]
    pub fn into_scalars(self) -> Vec<Scalar> {
        match self {
            Value::One(scalar) => vec![scalar],
            Value::Many(scalars) => scalars,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::One(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::One(i.into())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::One(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::One(f.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::One(s.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::One(s.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Many(v.into_iter().map(Into::into).collect())
    }
}

impl From<&[Scalar]> for Value {
    fn from(v: &[Scalar]) -> Self {
        Value::Many(v.to_vec())
    }
}

/// Declared scalar type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    /// Plain decimal integer
    Int,
    /// Float rendered with a fixed number of decimals
    Float,
    /// Double-quoted text on one line
    String,
    /// Double-quoted text, one value per physical line
    Multiline,
}

impl ScalarType {
    /// Get the string value used in error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Multiline => "multiline",
        }
    }

    /// Whether a scalar's dynamic type satisfies this declared type.
    #[must_use]
    pub fn accepts(&self, scalar: &Scalar) -> bool {
        matches!(
            (self, scalar),
            (Self::Int, Scalar::Int(_))
                | (Self::Float, Scalar::Float(_))
                | (Self::String | Self::Multiline, Scalar::Text(_))
        )
    }

    /// Whether values of this type are written between double quotes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::Multiline)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic constraint on the values of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Every value must be one of the listed scalars.
    List(Vec<Scalar>),
    /// Every value must lie within the inclusive bounds.
    Range(Scalar, Scalar),
}

impl Validator {
    /// Check a single value against the constraint.
    #[must_use]
    pub fn allows(&self, value: &Scalar) -> bool {
        match self {
            Validator::List(allowed) => allowed.contains(value),
            Validator::Range(low, high) => value.within(low, high),
        }
    }
}
