use std::fmt;

use serde::Serialize;

/// A scalar produced by the parser. These are the only value kinds the source
/// language can express.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
	Integer(i64),
	Float(f64),
	String(String),
}

impl Value {
	/// Human readable name of the variant, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Integer(_) => "int",
			Self::Float(_) => "float",
			Self::String(_) => "str",
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Self::Integer(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(f) => Some(*f),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s.as_str()),
			_ => None,
		}
	}

	/// Numeric view of the value with integers widened to `f64`.
	pub(crate) fn to_f64(&self) -> Option<f64> {
		match self {
			Self::Integer(n) => Some(*n as f64),
			Self::Float(f) => Some(*f),
			Self::String(_) => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Integer(n) => write!(f, "{n}"),
			// `{:?}` keeps the trailing `.0` on whole floats.
			Self::Float(x) => write!(f, "{x:?}"),
			Self::String(s) => write!(f, "{s}"),
		}
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}
