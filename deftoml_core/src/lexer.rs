use logos::Logos;

use crate::DeftomlError;
use crate::DeftomlResult;

/// Raw tokens recognized inside a single value or operand.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
	#[regex(r"[0-9]+\.[0-9]+")]
	Float,
	#[regex(r"[0-9]+")]
	Integer,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
	Ident,
}

/// A token that is exactly one literal or identifier with nothing around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Atom<'a> {
	/// A run of ASCII decimal digits.
	Integer(&'a str),
	/// `<digits>.<digits>`.
	Float(&'a str),
	/// A name that may refer to a constant.
	Ident(&'a str),
}

impl Atom<'_> {
	/// Convert an integer atom to its value.
	pub(crate) fn parse_integer(text: &str) -> DeftomlResult<i64> {
		text.parse::<i64>()
			.map_err(|_| DeftomlError::IntegerOutOfRange(text.to_string()))
	}

	/// Convert a float atom to its value. Literals that round to infinity are
	/// rejected since neither output format can carry them back.
	pub(crate) fn parse_float(text: &str) -> DeftomlResult<f64> {
		text.parse::<f64>()
			.ok()
			.filter(|value| value.is_finite())
			.ok_or_else(|| DeftomlError::FloatOutOfRange(text.to_string()))
	}
}

/// Classify `text` as a single atom. Returns `None` when the text is empty,
/// has surrounding whitespace, or contains more than one token.
pub(crate) fn classify_atom(text: &str) -> Option<Atom<'_>> {
	let mut lexer = RawToken::lexer(text);
	let token = lexer.next()?.ok()?;

	if lexer.span() != (0..text.len()) {
		return None;
	}

	Some(match token {
		RawToken::Integer => Atom::Integer(text),
		RawToken::Float => Atom::Float(text),
		RawToken::Ident => Atom::Ident(text),
	})
}

/// Split a leading identifier off `text`, returning it together with the rest
/// of the input.
pub(crate) fn leading_identifier(text: &str) -> Option<(&str, &str)> {
	let mut lexer = RawToken::lexer(text);

	match lexer.next() {
		Some(Ok(RawToken::Ident)) if lexer.span().start == 0 => Some(text.split_at(lexer.span().end)),
		_ => None,
	}
}

/// Whether `text` is a non-empty run of ASCII digits.
pub(crate) fn is_digits(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
