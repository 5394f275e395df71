use std::collections::HashMap;

use crate::Value;

/// Constants declared with `def` during a single parse.
///
/// Redeclaring a name replaces the stored value. Values are copied out on
/// lookup, so a later redeclaration never changes entries that already
/// referenced the constant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantTable {
	values: HashMap<String, Value>,
}

impl ConstantTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `value` under `name`, returning the value it replaced.
	pub fn define(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
		self.values.insert(name.into(), value)
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(name, value)| (name.as_str(), value))
	}
}
