use serde::Deserialize;

use crate::DeftomlError;
use crate::DeftomlResult;
use crate::Document;
use crate::ParserConfig;
use crate::parser::Parser;

/// Text formats a [`Document`] can be rendered into.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum RenderFormat {
	/// One `[name]` table per block.
	#[default]
	Toml,
	/// A pretty printed object of objects.
	Json,
}

/// Serialize a document. Blocks and keys keep their source order.
pub fn render(document: &Document, format: RenderFormat) -> DeftomlResult<String> {
	match format {
		RenderFormat::Toml => {
			toml::to_string(document).map_err(|e| DeftomlError::Serialize(e.to_string()))
		}
		RenderFormat::Json => {
			serde_json::to_string_pretty(document).map_err(|e| DeftomlError::Serialize(e.to_string()))
		}
	}
}

/// Parse `input` with a fresh parser and render the resulting document.
pub fn convert(input: &str, config: &ParserConfig, format: RenderFormat) -> DeftomlResult<String> {
	let document = Parser::with_config(config.clone()).parse(input)?;
	render(&document, format)
}
