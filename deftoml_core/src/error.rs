use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// How a failure is reported to the user of the command line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	/// The source text is malformed or structurally invalid.
	Syntax,
	/// The input could not be located.
	Resource,
	/// Anything else, including arithmetic failures during evaluation.
	Unexpected,
}

impl ErrorCategory {
	/// Process exit code used when the caller opts into distinguished exit
	/// codes.
	pub fn exit_code(self) -> i32 {
		match self {
			Self::Syntax => 1,
			Self::Resource => 2,
			Self::Unexpected => 3,
		}
	}
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DeftomlError {
	#[error("Invalid constant definition: {text}")]
	#[diagnostic(
		code(deftoml::invalid_constant),
		help("constants are declared as `def name := expression`")
	)]
	InvalidConstant { line: usize, text: String },

	#[error("Invalid key-value pair: {text}")]
	#[diagnostic(
		code(deftoml::invalid_key_value),
		help("entries are written as `key = value;` with single spaces around `=`")
	)]
	InvalidKeyValue { line: usize, text: String },

	#[error("Invalid value: {0}")]
	#[diagnostic(
		code(deftoml::invalid_value),
		help("values are integers, decimals, `[[strings]]` or declared constant names")
	)]
	InvalidValue(String),

	#[error("Invalid expression: {0}")]
	#[diagnostic(
		code(deftoml::invalid_expression),
		help("expressions are digits, `chr(n)`, `#(op left right)` or `#(op expression)`")
	)]
	InvalidExpression(String),

	#[error("Unsupported operation: {0}")]
	#[diagnostic(
		code(deftoml::unsupported_operation),
		help("supported operators: +, -, *, /")
	)]
	UnsupportedOperation(String),

	#[error("Unknown variable or value: {0}")]
	#[diagnostic(
		code(deftoml::unknown_operand),
		help("binary operands must be digits or a constant declared earlier in the file")
	)]
	UnknownOperand(String),

	#[error("Nested dictionaries are not allowed.")]
	#[diagnostic(
		code(deftoml::nested_block),
		help("close the current block with `}}` before opening another")
	)]
	NestedBlock { line: usize },

	#[error("Unexpected line: {text}")]
	#[diagnostic(
		code(deftoml::unexpected_line),
		help("entries are only allowed between `@{{` and `}}`")
	)]
	UnexpectedLine { line: usize, text: String },

	#[error("Unclosed dictionary opened on line {line}.")]
	#[diagnostic(code(deftoml::unclosed_block), help("add a `}}` line to close the block"))]
	UnclosedBlock { line: usize },

	#[error("division by zero")]
	#[diagnostic(code(deftoml::division_by_zero))]
	DivisionByZero,

	#[error("integer overflow evaluating `{0}`")]
	#[diagnostic(code(deftoml::overflow))]
	Overflow(String),

	#[error("unsupported operand type(s) for {op}: {operands}")]
	#[diagnostic(
		code(deftoml::type_mismatch),
		help("strings support `+` with another string and `*` with an integer")
	)]
	TypeMismatch { op: char, operands: String },

	#[error("bad operand type for unary {op}: '{kind}'")]
	#[diagnostic(
		code(deftoml::unary_type_mismatch),
		help("unary `-` and `/` need a number")
	)]
	UnaryTypeMismatch { op: char, kind: &'static str },

	#[error("chr() arg not in range(0x110000): {0}")]
	#[diagnostic(code(deftoml::invalid_code_point))]
	InvalidCodePoint(String),

	#[error("integer literal out of range: {0}")]
	#[diagnostic(code(deftoml::integer_out_of_range))]
	IntegerOutOfRange(String),

	#[error("float literal out of range: {0}")]
	#[diagnostic(code(deftoml::float_out_of_range))]
	FloatOutOfRange(String),

	#[error("input file not found: `{}`", .0.display())]
	#[diagnostic(code(deftoml::input_not_found))]
	InputNotFound(PathBuf),

	#[error(transparent)]
	#[diagnostic(code(deftoml::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(deftoml::config_parse),
		help("check that the config is valid TOML with [parser] and/or [output] sections")
	)]
	ConfigParse(String),

	#[error("failed to serialize document: {0}")]
	#[diagnostic(code(deftoml::serialize))]
	Serialize(String),
}

impl DeftomlError {
	pub fn category(&self) -> ErrorCategory {
		match self {
			Self::InvalidConstant { .. }
			| Self::InvalidKeyValue { .. }
			| Self::InvalidValue(_)
			| Self::InvalidExpression(_)
			| Self::UnsupportedOperation(_)
			| Self::UnknownOperand(_)
			| Self::NestedBlock { .. }
			| Self::UnexpectedLine { .. }
			| Self::UnclosedBlock { .. } => ErrorCategory::Syntax,
			Self::InputNotFound(_) => ErrorCategory::Resource,
			Self::DivisionByZero
			| Self::Overflow(_)
			| Self::TypeMismatch { .. }
			| Self::UnaryTypeMismatch { .. }
			| Self::InvalidCodePoint(_)
			| Self::IntegerOutOfRange(_)
			| Self::FloatOutOfRange(_)
			| Self::Io(_)
			| Self::ConfigParse(_)
			| Self::Serialize(_) => ErrorCategory::Unexpected,
		}
	}

	/// The 1-based source line the error was raised on, when known.
	pub fn line(&self) -> Option<usize> {
		match self {
			Self::InvalidConstant { line, .. }
			| Self::InvalidKeyValue { line, .. }
			| Self::NestedBlock { line }
			| Self::UnexpectedLine { line, .. }
			| Self::UnclosedBlock { line } => Some(*line),
			_ => None,
		}
	}

	pub fn is_syntax(&self) -> bool {
		self.category() == ErrorCategory::Syntax
	}
}

pub type DeftomlResult<T> = Result<T, DeftomlError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
