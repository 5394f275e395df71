use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use deftoml_core::DeftomlConfig;
use deftoml_core::DeftomlError;
use deftoml_core::DeftomlResult;
use deftoml_core::ErrorCategory;
use deftoml_core::RenderFormat;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Convert a deftoml configuration file to TOML.",
	long_about = "deftoml reads a small configuration language made of constant declarations \
	              (`def name := expression`) and anonymous blocks (`@{ ... }`) of `key = \
	              value;` entries, and prints the result as TOML.\n\nBlocks are named dict1, \
	              dict2, ... in the order they close. Expressions support integers, `chr(n)` \
	              and the prefix forms `#(op a b)` and `#(op expression)`."
)]
pub struct DeftomlCli {
	/// Path to the input file.
	pub input_file: PathBuf,

	/// Output format. Defaults to the config file setting, then `toml`.
	#[arg(long, short, value_enum)]
	pub format: Option<OutputFormat>,

	/// Path to a config file. When omitted, `deftoml.toml`, `.deftoml.toml`
	/// and `.config/deftoml.toml` are searched in the working directory.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Treat a block that is still open at the end of the input as a syntax
	/// error instead of discarding it.
	#[arg(long, default_value_t = false)]
	pub strict: bool,

	/// Exit with a non-zero status when conversion fails: 1 for syntax errors,
	/// 2 for a missing input file and 3 for anything else. Without this flag
	/// the exit status is always 0.
	#[arg(long, default_value_t = false)]
	pub exit_code: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// One `[dictN]` table per block.
	Toml,
	/// A pretty printed JSON object of objects.
	Json,
}

impl From<OutputFormat> for RenderFormat {
	fn from(value: OutputFormat) -> Self {
		match value {
			OutputFormat::Toml => Self::Toml,
			OutputFormat::Json => Self::Json,
		}
	}
}

/// Load the config named on the command line, or discover one in `root`.
pub fn resolve_config(args: &DeftomlCli, root: &Path) -> DeftomlResult<DeftomlConfig> {
	let mut config = match &args.config {
		Some(path) => DeftomlConfig::load_from(path)?,
		None => DeftomlConfig::load(root)?.unwrap_or_default(),
	};

	if args.strict {
		config.parser.reject_unclosed_blocks = true;
	}

	if let Some(format) = args.format {
		config.output.format = format.into();
	}

	Ok(config)
}

/// Read the whole input file, reporting a missing file as a resource error.
pub fn read_input(path: &Path) -> DeftomlResult<String> {
	std::fs::read_to_string(path).map_err(|e| {
		if e.kind() == ErrorKind::NotFound {
			DeftomlError::InputNotFound(path.to_path_buf())
		} else {
			DeftomlError::Io(e)
		}
	})
}

/// The single line printed to stdout when conversion fails.
pub fn failure_message(error: &DeftomlError) -> String {
	match error.category() {
		ErrorCategory::Syntax => format!("Syntax Error: {error}"),
		ErrorCategory::Resource => "Error: Input file not found.".to_string(),
		ErrorCategory::Unexpected => format!("Unexpected error: {error}"),
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::syntax(
		DeftomlError::InvalidValue("abc".into()),
		"Syntax Error: Invalid value: abc"
	)]
	#[case::structural(
		DeftomlError::NestedBlock { line: 3 },
		"Syntax Error: Nested dictionaries are not allowed."
	)]
	#[case::resource(
		DeftomlError::InputNotFound("missing.conf".into()),
		"Error: Input file not found."
	)]
	#[case::unexpected(DeftomlError::DivisionByZero, "Unexpected error: division by zero")]
	fn failure_messages(#[case] error: DeftomlError, #[case] expected: &str) {
		assert_eq!(failure_message(&error), expected);
	}

	#[test]
	fn missing_input_is_a_resource_error() {
		let result = read_input(Path::new("definitely/not/here.conf"));
		assert!(matches!(result, Err(DeftomlError::InputNotFound(_))));
	}

	#[test]
	fn flags_override_config() -> DeftomlResult<()> {
		let tmp = tempfile::tempdir()?;
		std::fs::write(
			tmp.path().join("deftoml.toml"),
			"[parser]\nblock_prefix = \"cfg\"\n\n[output]\nformat = \"json\"\n",
		)?;

		let args = DeftomlCli::parse_from(["deftoml", "input.conf", "--format", "toml", "--strict"]);
		let config = resolve_config(&args, tmp.path())?;

		assert_eq!(config.parser.block_prefix, "cfg");
		assert!(config.parser.reject_unclosed_blocks);
		assert_eq!(config.output.format, RenderFormat::Toml);

		Ok(())
	}

	#[test]
	fn defaults_without_config() -> DeftomlResult<()> {
		let tmp = tempfile::tempdir()?;
		let args = DeftomlCli::parse_from(["deftoml", "input.conf"]);
		let config = resolve_config(&args, tmp.path())?;

		assert_eq!(config, DeftomlConfig::default());

		Ok(())
	}
}
