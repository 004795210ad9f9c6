//! Single jobfile field: typed, fixed-arity, validated.
//!
//! Validation is split in two tiers:
//! - [`Element::check_structure`] rejects wrong arity or scalar type with an
//!   error. These are defects in the caller or the input shape.
//! - [`Element::check_constraint`] reports list/range violations as a plain
//!   `bool`, so interactive callers can try values without error handling.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{self, FLOAT_PRECISION};
use crate::error::{JobfileError, Result};
use crate::schema::SchemaEntry;
use crate::types::{Scalar, ScalarType, Value};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FLOAT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9.]+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUOTED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

/// One field instance bound to its schema entry.
///
/// The value is either unset or holds exactly `arity` scalars of the
/// declared type. It only changes through [`Element::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    schema: &'static SchemaEntry,
    value: Option<Vec<Scalar>>,
}

impl Element {
    /// Create an element initialised to its schema default.
    pub fn new(schema: &'static SchemaEntry) -> Result<Self> {
        let mut element = Self::unset(schema);
        if let Some(default) = &schema.default {
            element.set(default.as_slice())?;
        }
        Ok(element)
    }

    /// Create an element with no value, ignoring any default.
    #[must_use]
    pub fn unset(schema: &'static SchemaEntry) -> Self {
        Self {
            schema,
            value: None,
        }
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    /// Schema entry the element is bound to.
    #[must_use]
    pub fn schema(&self) -> &'static SchemaEntry {
        self.schema
    }

    /// Declared number of values.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.schema.arity
    }

    /// Declared scalar type.
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        self.schema.scalar_type
    }

    /// Whether the element currently holds a value.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Current value, if any.
    #[must_use]
    pub fn get(&self) -> Option<&[Scalar]> {
        self.value.as_deref()
    }

    /// Set the value.
    ///
    /// # Returns
    /// * `Ok(true)` - the value was stored
    /// * `Ok(false)` - the value failed the list/range constraint; the
    ///   previous value is kept
    /// * `Err(_)` - arity or scalar type mismatch
    pub fn set(&mut self, value: impl Into<Value>) -> Result<bool> {
        let values = value.into().into_scalars();
        self.check_structure(&values)?;
        if !self.check_constraint(&values) {
            tracing::debug!(element = self.name(), ?values, "Value rejected by validator");
            return Ok(false);
        }
        self.value = Some(values);
        Ok(true)
    }

    /// Probe a candidate value without storing it.
    ///
    /// Structural mismatches are errors; constraint failures return `false`.
    pub fn validate(&self, value: impl Into<Value>) -> Result<bool> {
        let values = value.into().into_scalars();
        self.check_structure(&values)?;
        Ok(self.check_constraint(&values))
    }

    /// Check arity and scalar types.
    pub fn check_structure(&self, values: &[Scalar]) -> Result<()> {
        if values.len() != self.schema.arity {
            return Err(JobfileError::ArityMismatch {
                element: self.name().to_string(),
                expected: self.schema.arity,
                actual: values.len(),
            });
        }
        if let Some(wrong) = values
            .iter()
            .find(|v| !self.schema.scalar_type.accepts(v))
        {
            return Err(JobfileError::TypeMismatch {
                element: self.name().to_string(),
                expected: self.schema.scalar_type.as_str().to_string(),
                actual: wrong.type_name().to_string(),
            });
        }
        Ok(())
    }

    /// Check the list/range constraint. Elements without one accept anything.
    #[must_use]
    pub fn check_constraint(&self, values: &[Scalar]) -> bool {
        match &self.schema.validator {
            Some(validator) => values.iter().all(|v| validator.allows(v)),
            None => true,
        }
    }

    /// Render the element as jobfile text, or `None` when unset.
    ///
    /// Multiline values go one per physical line; continuation lines are
    /// padded to the alignment column without repeating the name.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let values = self.value.as_ref()?;
        let mut out = config::element_prefix(self.name());
        if self.schema.scalar_type == ScalarType::Multiline {
            let continuation = config::continuation_prefix();
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push_str(&continuation);
                }
                out.push_str(&render_scalar(value));
            }
        } else {
            let rendered: Vec<String> = values.iter().map(render_scalar).collect();
            out.push_str(&rendered.join(" "));
        }
        Some(out.trim_end().to_string())
    }

    /// Read the value part of an element line (everything after the
    /// alignment column, continuation lines joined with `\n`) and set it.
    ///
    /// Returns the result of [`Element::set`].
    pub fn parse(&mut self, text: &str) -> Result<bool> {
        let values = self.extract(text)?;
        self.set(values)
    }

    fn extract(&self, text: &str) -> Result<Vec<Scalar>> {
        let malformed = || JobfileError::MalformedValue {
            element: self.name().to_string(),
            text: text.to_string(),
        };
        match self.schema.scalar_type {
            ScalarType::Int => INT_TOKEN
                .find_iter(text)
                .map(|m| m.as_str().parse::<i64>().map(Scalar::Int).map_err(|_| malformed()))
                .collect(),
            ScalarType::Float => FLOAT_TOKEN
                .find_iter(text)
                .map(|m| {
                    m.as_str()
                        .parse::<f64>()
                        .map(Scalar::Float)
                        .map_err(|_| malformed())
                })
                .collect(),
            ScalarType::String | ScalarType::Multiline => {
                if text.matches('"').count() % 2 != 0 {
                    return Err(malformed());
                }
                Ok(QUOTED_TOKEN
                    .captures_iter(text)
                    .map(|c| Scalar::Text(c[1].to_string()))
                    .collect())
            }
        }
    }

    /// Strip one pair of wrapping angle brackets from every text value.
    ///
    /// Only values that both start with `<` and end with `>` are touched.
    /// Returns whether the value changed.
    pub(crate) fn strip_angle_delimiters(&mut self) -> bool {
        let Some(values) = &self.value else {
            return false;
        };
        let mut changed = false;
        let stripped: Vec<Scalar> = values
            .iter()
            .map(|v| match v {
                Scalar::Text(s) if s.len() >= 2 && s.starts_with('<') && s.ends_with('>') => {
                    changed = true;
                    Scalar::Text(s[1..s.len() - 1].to_string())
                }
                other => other.clone(),
            })
            .collect();
        if changed && self.check_constraint(&stripped) {
            self.value = Some(stripped);
            return true;
        }
        false
    }
}

fn render_scalar(value: &Scalar) -> String {
    match value {
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => format!("{:.*}", FLOAT_PRECISION, f),
        Scalar::Text(s) => format!("\"{s}\""),
    }
}
