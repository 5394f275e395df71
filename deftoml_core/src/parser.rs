use std::fmt;

use crate::BlockBody;
use crate::ConstantTable;
use crate::DeftomlError;
use crate::DeftomlResult;
use crate::Document;
use crate::ParserConfig;
use crate::Value;
use crate::evaluate;
use crate::lexer::Atom;
use crate::lexer::classify_atom;
use crate::lexer::leading_identifier;
use crate::line::LineKind;
use crate::line::classify_line;

/// A diagnostic produced during parsing. These are issues that don't prevent
/// parsing from completing but usually point at a mistake in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseDiagnostic {
	/// The input ended while a block was open. The block was discarded.
	UnclosedBlock { line: usize },
	/// A `def` replaced the value of an existing constant.
	ConstantRedefined { name: String, line: usize },
	/// A key was written twice in the same block. The later value was kept.
	DuplicateKey { key: String, line: usize },
}

impl ParseDiagnostic {
	pub fn line(&self) -> usize {
		match self {
			Self::UnclosedBlock { line }
			| Self::ConstantRedefined { line, .. }
			| Self::DuplicateKey { line, .. } => *line,
		}
	}
}

impl fmt::Display for ParseDiagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnclosedBlock { line } => {
				write!(f, "block opened on line {line} is never closed and was discarded")
			}
			Self::ConstantRedefined { name, line } => {
				write!(f, "constant `{name}` is redefined on line {line}")
			}
			Self::DuplicateKey { key, line } => {
				write!(f, "key `{key}` is repeated on line {line}, the later value wins")
			}
		}
	}
}

/// Everything a single parse produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
	pub document: Document,
	/// The constant table as it stood at the end of the input.
	pub constants: ConstantTable,
	pub diagnostics: Vec<ParseDiagnostic>,
}

/// Turns source text into a [`Document`].
///
/// The parser itself only holds configuration. Every call to [`Parser::parse`]
/// starts with an empty constant table and an empty document, so one parser
/// can be reused for any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Parser {
	config: ParserConfig,
}

impl Parser {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: ParserConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ParserConfig {
		&self.config
	}

	/// Parse `input` and return the assembled document. The first malformed
	/// line aborts the parse.
	pub fn parse(&self, input: &str) -> DeftomlResult<Document> {
		self.parse_with_diagnostics(input).map(|output| output.document)
	}

	/// Parse `input` and return the document together with the final constant
	/// table and any diagnostics.
	pub fn parse_with_diagnostics(&self, input: &str) -> DeftomlResult<ParseOutput> {
		let mut session = ParseSession::new(&self.config);

		for (index, line) in input.lines().enumerate() {
			session.process_line(index + 1, line)?;
		}

		session.finish()
	}
}

/// Parse `input` with the default configuration.
pub fn parse(input: &str) -> DeftomlResult<Document> {
	Parser::new().parse(input)
}

enum BlockState {
	Idle,
	Open { opened_at: usize, body: BlockBody },
}

/// Mutable state for one call to [`Parser::parse_with_diagnostics`].
struct ParseSession<'a> {
	config: &'a ParserConfig,
	constants: ConstantTable,
	document: Document,
	diagnostics: Vec<ParseDiagnostic>,
	state: BlockState,
}

impl<'a> ParseSession<'a> {
	fn new(config: &'a ParserConfig) -> Self {
		Self {
			config,
			constants: ConstantTable::new(),
			document: Document::new(),
			diagnostics: vec![],
			state: BlockState::Idle,
		}
	}

	fn process_line(&mut self, number: usize, line: &str) -> DeftomlResult<()> {
		let kind = classify_line(line);
		tracing::trace!(line = number, ?kind, "classified line");

		match kind {
			LineKind::Skip => Ok(()),
			LineKind::Declaration(text) => self.declare(number, text),
			LineKind::BlockOpen => self.open_block(number),
			LineKind::BlockClose => self.close_block(number, line.trim()),
			LineKind::Other(text) => self.push_entry(number, text),
		}
	}

	fn declare(&mut self, number: usize, text: &str) -> DeftomlResult<()> {
		let (name, expr) = split_declaration(text).ok_or_else(|| {
			DeftomlError::InvalidConstant {
				line: number,
				text: text.to_string(),
			}
		})?;

		let expr = expr.replace(['\r', '\n'], " ");
		let value = evaluate(expr.trim(), &self.constants)?;
		tracing::debug!(name, %value, "defined constant");

		if self.constants.define(name, value).is_some() {
			self.diagnostics.push(ParseDiagnostic::ConstantRedefined {
				name: name.to_string(),
				line: number,
			});
		}

		Ok(())
	}

	fn open_block(&mut self, number: usize) -> DeftomlResult<()> {
		if matches!(self.state, BlockState::Open { .. }) {
			return Err(DeftomlError::NestedBlock { line: number });
		}

		self.state = BlockState::Open {
			opened_at: number,
			body: BlockBody::new(),
		};

		Ok(())
	}

	fn close_block(&mut self, number: usize, text: &str) -> DeftomlResult<()> {
		match std::mem::replace(&mut self.state, BlockState::Idle) {
			BlockState::Open { body, .. } => {
				let name = self.document.next_block_name(&self.config.block_prefix);
				tracing::debug!(name = %name, entries = body.len(), "closed block");
				self.document.insert(name, body);
				Ok(())
			}
			BlockState::Idle => {
				Err(DeftomlError::UnexpectedLine {
					line: number,
					text: text.to_string(),
				})
			}
		}
	}

	fn push_entry(&mut self, number: usize, text: &str) -> DeftomlResult<()> {
		let BlockState::Open { body, .. } = &mut self.state else {
			return Err(DeftomlError::UnexpectedLine {
				line: number,
				text: text.to_string(),
			});
		};

		let (key, raw) = split_entry(text).ok_or_else(|| {
			DeftomlError::InvalidKeyValue {
				line: number,
				text: text.to_string(),
			}
		})?;

		let value = resolve_value(raw, &self.constants)?;
		if body.insert(key, value).is_some() {
			self.diagnostics.push(ParseDiagnostic::DuplicateKey {
				key: key.to_string(),
				line: number,
			});
		}

		Ok(())
	}

	fn finish(self) -> DeftomlResult<ParseOutput> {
		let mut diagnostics = self.diagnostics;

		if let BlockState::Open { opened_at, body } = self.state {
			if self.config.reject_unclosed_blocks {
				return Err(DeftomlError::UnclosedBlock { line: opened_at });
			}

			tracing::debug!(line = opened_at, entries = body.len(), "discarding unclosed block");
			diagnostics.push(ParseDiagnostic::UnclosedBlock { line: opened_at });
		}

		Ok(ParseOutput {
			document: self.document,
			constants: self.constants,
			diagnostics,
		})
	}
}

/// Split `def <name> := <expression>` into its name and expression.
fn split_declaration(text: &str) -> Option<(&str, &str)> {
	let rest = text.strip_prefix("def")?.trim_start();
	let (name, rest) = leading_identifier(rest)?;
	let expr = rest.trim_start().strip_prefix(":=")?.trim();

	(!expr.is_empty()).then_some((name, expr))
}

/// Split `<key> = <value>;` into its key and raw value. The value ends at the
/// last `;` on the line.
fn split_entry(text: &str) -> Option<(&str, &str)> {
	let (key, rest) = leading_identifier(text)?;
	let rest = rest.strip_prefix(" = ")?;
	let value = &rest[..rest.rfind(';')?];

	(!value.is_empty()).then_some((key, value))
}

/// Resolve the right-hand side of a block entry. Constants are copied by
/// value at the point of use.
pub(crate) fn resolve_value(raw: &str, constants: &ConstantTable) -> DeftomlResult<Value> {
	if let Some(text) = raw.strip_prefix("[[").and_then(|rest| rest.strip_suffix("]]")) {
		return Ok(Value::String(text.to_string()));
	}

	match classify_atom(raw) {
		Some(Atom::Integer(digits)) => Atom::parse_integer(digits).map(Value::Integer),
		Some(Atom::Float(text)) => Atom::parse_float(text).map(Value::Float),
		Some(Atom::Ident(name)) => {
			constants
				.get(name)
				.cloned()
				.ok_or_else(|| DeftomlError::InvalidValue(raw.to_string()))
		}
		None => Err(DeftomlError::InvalidValue(raw.to_string())),
	}
}
