use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::Value;

/// Prefix used for generated block names when none is configured.
pub const DEFAULT_BLOCK_PREFIX: &str = "dict";

/// The key-value pairs collected between `@{` and `}`. Keys keep the order
/// they were first written in; writing a key again replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockBody {
	entries: Vec<(String, Value)>,
}

impl BlockBody {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert an entry, returning the value previously stored under `key`.
	pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
		let key = key.into();

		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => Some(std::mem::replace(slot, value)),
			None => {
				self.entries.push((key, value));
				None
			}
		}
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == key)
			.map(|(_, value)| value)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}
}

impl<K: Into<String>> FromIterator<(K, Value)> for BlockBody {
	fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
		let mut body = Self::new();
		for (key, value) in iter {
			body.insert(key, value);
		}
		body
	}
}

impl Serialize for BlockBody {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (key, value) in &self.entries {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

/// A closed block together with its generated name.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
	pub name: String,
	pub body: BlockBody,
}

/// The parsed output: named blocks in the order they were closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
	blocks: Vec<Block>,
}

impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	/// The first name in `<prefix>1`, `<prefix>2`, ... that is not yet used by
	/// a block in this document.
	pub fn next_block_name(&self, prefix: &str) -> String {
		(1_usize..)
			.map(|index| format!("{prefix}{index}"))
			.find(|name| !self.contains(name))
			.unwrap_or_default()
	}

	/// Add a closed block. Blocks are never modified once inserted.
	pub fn insert(&mut self, name: impl Into<String>, body: BlockBody) {
		self.blocks.push(Block {
			name: name.into(),
			body,
		});
	}

	pub fn get(&self, name: &str) -> Option<&BlockBody> {
		self.blocks
			.iter()
			.find(|block| block.name == name)
			.map(|block| &block.body)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.blocks.iter().any(|block| block.name == name)
	}

	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.blocks.iter().map(|block| block.name.as_str())
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}
}

impl Serialize for Document {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.blocks.len()))?;
		for block in &self.blocks {
			map.serialize_entry(&block.name, &block.body)?;
		}
		map.end()
	}
}
