use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_BLOCK_PREFIX;
use crate::DeftomlError;
use crate::DeftomlResult;
use crate::RenderFormat;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["deftoml.toml", ".deftoml.toml", ".config/deftoml.toml"];

/// Configuration loaded from a `deftoml.toml` file.
///
/// ```toml
/// [parser]
/// block_prefix = "dict"
/// reject_unclosed_blocks = false
///
/// [output]
/// format = "toml"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeftomlConfig {
	#[serde(default)]
	pub parser: ParserConfig,
	#[serde(default)]
	pub output: OutputConfig,
}

/// Options that change how source text is turned into a document.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
	/// Generated block names are `<block_prefix>1`, `<block_prefix>2`, ...
	#[serde(default = "default_block_prefix")]
	pub block_prefix: String,
	/// When true, input that ends while a block is still open fails instead of
	/// silently dropping the block.
	#[serde(default)]
	pub reject_unclosed_blocks: bool,
}

impl Default for ParserConfig {
	fn default() -> Self {
		Self {
			block_prefix: default_block_prefix(),
			reject_unclosed_blocks: false,
		}
	}
}

fn default_block_prefix() -> String {
	DEFAULT_BLOCK_PREFIX.to_string()
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
	#[serde(default)]
	pub format: RenderFormat,
}

impl DeftomlConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> DeftomlResult<Option<DeftomlConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_from(path: &Path) -> DeftomlResult<DeftomlConfig> {
		tracing::debug!(path = %path.display(), "loading config");
		let content = std::fs::read_to_string(path)?;

		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> DeftomlResult<DeftomlConfig> {
		toml::from_str(content).map_err(|e| DeftomlError::ConfigParse(e.to_string()))
	}
}
