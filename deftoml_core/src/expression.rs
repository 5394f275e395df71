use crate::ConstantTable;
use crate::DeftomlError;
use crate::DeftomlResult;
use crate::Value;
use crate::lexer::Atom;
use crate::lexer::is_digits;

/// The four prefix operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	Add,
	Subtract,
	Multiply,
	Divide,
}

impl Operator {
	pub fn from_symbol(symbol: char) -> Option<Self> {
		match symbol {
			'+' => Some(Self::Add),
			'-' => Some(Self::Subtract),
			'*' => Some(Self::Multiply),
			'/' => Some(Self::Divide),
			_ => None,
		}
	}

	pub fn symbol(self) -> char {
		match self {
			Self::Add => '+',
			Self::Subtract => '-',
			Self::Multiply => '*',
			Self::Divide => '/',
		}
	}
}

/// Evaluate a constant expression against the constants declared so far.
///
/// Forms are tried in order:
///
/// 1. a run of digits is an integer;
/// 2. `chr(<digits>)` is the one character string with that code point;
/// 3. `#(<op> <left> <right>)` where each operand is digits or a constant
///    name. Operands are never evaluated as expressions;
/// 4. `#(<op> <expression>)` where the single operand is evaluated
///    recursively. `+` and `*` return it unchanged, `-` negates it and `/`
///    takes the reciprocal.
///
/// Division always produces a float. Strings take part in two binary forms:
/// `+` joins two strings and `*` repeats a string an integer number of times.
///
/// ```
/// use deftoml_core::ConstantTable;
/// use deftoml_core::Value;
/// use deftoml_core::evaluate;
///
/// let mut constants = ConstantTable::new();
/// constants.define("width", Value::Integer(4));
///
/// assert_eq!(evaluate("#(* width 3)", &constants).unwrap(), Value::Integer(12));
/// assert_eq!(evaluate("#(/ 1 2)", &constants).unwrap(), Value::Float(0.5));
/// assert_eq!(evaluate("#(- #(+ 1 2))", &constants).unwrap(), Value::Integer(-3));
/// assert_eq!(evaluate("chr(65)", &constants).unwrap(), Value::from("A"));
///
/// constants.define("letter", Value::from("A"));
/// assert_eq!(evaluate("#(* letter 3)", &constants).unwrap(), Value::from("AAA"));
/// ```
pub fn evaluate(expr: &str, constants: &ConstantTable) -> DeftomlResult<Value> {
	tracing::trace!(expr, "evaluating expression");

	if is_digits(expr) {
		return Atom::parse_integer(expr).map(Value::Integer);
	}

	if let Some(code) = chr_argument(expr) {
		return char_from_code(code);
	}

	if let Some(body) = expr.strip_prefix("#(").and_then(|rest| rest.strip_suffix(')')) {
		return evaluate_operation(expr, body, constants);
	}

	Err(DeftomlError::InvalidExpression(expr.to_string()))
}

fn chr_argument(expr: &str) -> Option<&str> {
	expr.strip_prefix("chr(")
		.and_then(|rest| rest.strip_suffix(')'))
		.filter(|inner| is_digits(inner))
}

fn char_from_code(code: &str) -> DeftomlResult<Value> {
	code.parse::<u32>()
		.ok()
		.and_then(char::from_u32)
		.map(|c| Value::String(c.to_string()))
		.ok_or_else(|| DeftomlError::InvalidCodePoint(code.to_string()))
}

/// `body` is the text between `#(` and the final `)`.
fn evaluate_operation(expr: &str, body: &str, constants: &ConstantTable) -> DeftomlResult<Value> {
	let mut chars = body.chars();
	let Some(symbol) = chars.next() else {
		return Err(DeftomlError::InvalidExpression(expr.to_string()));
	};

	let Some(op) = Operator::from_symbol(symbol) else {
		return Err(if symbol.is_ascii_punctuation() {
			DeftomlError::UnsupportedOperation(symbol.to_string())
		} else {
			DeftomlError::InvalidExpression(expr.to_string())
		});
	};

	let operands = chars.as_str().trim();
	if operands.is_empty() {
		return Err(DeftomlError::InvalidExpression(expr.to_string()));
	}

	// Exactly two plain tokens is the binary form. Anything else, including a
	// parenthesized operand, is a single operand evaluated recursively.
	let tokens: Vec<&str> = operands.split_whitespace().collect();
	if let [left, right] = tokens.as_slice() {
		if !is_group(left) && !is_group(right) {
			let lhs = resolve_operand(left, constants)?;
			let rhs = resolve_operand(right, constants)?;
			return apply_binary(op, &lhs, &rhs, expr);
		}
	}

	let inner = evaluate(operands, constants)?;
	apply_unary(op, inner, expr)
}

fn is_group(token: &str) -> bool {
	token.contains(['(', ')'])
}

fn resolve_operand(token: &str, constants: &ConstantTable) -> DeftomlResult<Value> {
	if is_digits(token) {
		return Atom::parse_integer(token).map(Value::Integer);
	}

	constants
		.get(token)
		.cloned()
		.ok_or_else(|| DeftomlError::UnknownOperand(token.to_string()))
}

fn apply_binary(op: Operator, lhs: &Value, rhs: &Value, expr: &str) -> DeftomlResult<Value> {
	match (op, lhs, rhs) {
		(Operator::Add, Value::String(left), Value::String(right)) => {
			return Ok(Value::String(format!("{left}{right}")));
		}
		(Operator::Multiply, Value::String(text), Value::Integer(count))
		| (Operator::Multiply, Value::Integer(count), Value::String(text)) => {
			return repeat(text, *count, expr);
		}
		_ => {}
	}

	let (Some(a), Some(b)) = (lhs.to_f64(), rhs.to_f64()) else {
		return Err(DeftomlError::TypeMismatch {
			op: op.symbol(),
			operands: format!("'{}' and '{}'", lhs.kind(), rhs.kind()),
		});
	};

	match (op, lhs, rhs) {
		(Operator::Divide, ..) => divide(a, b, expr),
		(_, Value::Integer(x), Value::Integer(y)) => {
			let result = match op {
				Operator::Add => x.checked_add(*y),
				Operator::Subtract => x.checked_sub(*y),
				_ => x.checked_mul(*y),
			};

			result
				.map(Value::Integer)
				.ok_or_else(|| DeftomlError::Overflow(expr.to_string()))
		}
		_ => {
			let result = match op {
				Operator::Add => a + b,
				Operator::Subtract => a - b,
				_ => a * b,
			};

			if !result.is_finite() {
				return Err(DeftomlError::Overflow(expr.to_string()));
			}

			Ok(Value::Float(result))
		}
	}
}

/// A negative count repeats zero times.
fn repeat(text: &str, count: i64, expr: &str) -> DeftomlResult<Value> {
	let count = usize::try_from(count).unwrap_or(0);
	text.len()
		.checked_mul(count)
		.filter(|len| isize::try_from(*len).is_ok())
		.map(|_| Value::String(text.repeat(count)))
		.ok_or_else(|| DeftomlError::Overflow(expr.to_string()))
}

fn apply_unary(op: Operator, value: Value, expr: &str) -> DeftomlResult<Value> {
	match (op, value) {
		(Operator::Add | Operator::Multiply, value) => Ok(value),
		(Operator::Subtract, Value::Integer(n)) => n
			.checked_neg()
			.map(Value::Integer)
			.ok_or_else(|| DeftomlError::Overflow(expr.to_string())),
		(Operator::Subtract, Value::Float(f)) => Ok(Value::Float(-f)),
		(Operator::Divide, Value::Integer(n)) => divide(1.0, n as f64, expr),
		(Operator::Divide, Value::Float(f)) => divide(1.0, f, expr),
		(op, value @ Value::String(_)) => Err(DeftomlError::UnaryTypeMismatch {
			op: op.symbol(),
			kind: value.kind(),
		}),
	}
}

#[allow(clippy::float_cmp)]
fn divide(numerator: f64, denominator: f64, expr: &str) -> DeftomlResult<Value> {
	if denominator == 0.0 {
		return Err(DeftomlError::DivisionByZero);
	}

	let result = numerator / denominator;
	if !result.is_finite() {
		return Err(DeftomlError::Overflow(expr.to_string()));
	}

	Ok(Value::Float(result))
}
