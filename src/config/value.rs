//! Typed configuration values and text coercion.
//!
//! Override rows arrive from the data source as raw text; the field's
//! declared type decides how that text is read. Coercion never truncates or
//! zero-values: text that does not parse as the declared type is a type
//! mismatch, surfaced to the caller.

use std::fmt;

/// The declared value type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Str,
    I64,
    F64,
    Bool,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "string",
            Self::I64 => "int",
            Self::F64 => "float",
            Self::Bool => "bool",
        })
    }
}

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    I64(i64),
    F64(f64),
    Bool(bool),
}

impl Value {
    /// The type this value carries.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Str(_) => FieldType::Str,
            Self::I64(_) => FieldType::I64,
            Self::F64(_) => FieldType::F64,
            Self::Bool(_) => FieldType::Bool,
        }
    }

    /// Coerce raw override text into a value of the given type.
    ///
    /// Booleans accept `1`/`0`/`true`/`false`, matching how the override
    /// table records flags. Returns `None` when the text does not parse;
    /// the caller turns that into a type-mismatch error with the path.
    pub fn coerce(raw: &str, ty: FieldType) -> Option<Self> {
        match ty {
            FieldType::Str => Some(Self::Str(raw.to_string())),
            FieldType::I64 => raw.trim().parse::<i64>().ok().map(Self::I64),
            FieldType::F64 => raw.trim().parse::<f64>().ok().map(Self::F64),
            FieldType::Bool => match raw.trim() {
                "1" | "true" => Some(Self::Bool(true)),
                "0" | "false" => Some(Self::Bool(false)),
                _ => None,
            },
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_int() {
        assert_eq!(Value::coerce("42", FieldType::I64), Some(Value::I64(42)));
        assert_eq!(Value::coerce(" 42 ", FieldType::I64), Some(Value::I64(42)));
        assert_eq!(Value::coerce("42.5", FieldType::I64), None);
        assert_eq!(Value::coerce("forty-two", FieldType::I64), None);
    }

    #[test]
    fn test_coerce_bool_accepts_flag_spellings() {
        assert_eq!(Value::coerce("1", FieldType::Bool), Some(Value::Bool(true)));
        assert_eq!(
            Value::coerce("false", FieldType::Bool),
            Some(Value::Bool(false))
        );
        assert_eq!(Value::coerce("yes", FieldType::Bool), None);
    }

    #[test]
    fn test_coerce_float_and_string() {
        assert_eq!(
            Value::coerce("2.718", FieldType::F64),
            Some(Value::F64(2.718))
        );
        assert_eq!(
            Value::coerce("hello@example.com", FieldType::Str),
            Some(Value::Str("hello@example.com".into()))
        );
    }

    #[test]
    fn test_accessors_reject_other_types() {
        let v = Value::I64(7);
        assert_eq!(v.as_i64(), Some(7));
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.field_type(), FieldType::I64);
    }
}
