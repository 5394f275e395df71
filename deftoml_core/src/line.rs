/// The shape of one trimmed source line. Classification only looks at the
/// line prefix; the payloads are validated by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
	/// Empty line or a `#` comment.
	Skip,
	/// `def <name> := <expression>`, carrying the whole line.
	Declaration(&'a str),
	/// `@{`, anything after the marker is ignored.
	BlockOpen,
	/// `}`, anything after the marker is ignored.
	BlockClose,
	/// Any other line. Only valid as a `key = value;` entry inside a block.
	Other(&'a str),
}

/// Classify a physical line after trimming surrounding whitespace.
pub(crate) fn classify_line(line: &str) -> LineKind<'_> {
	let line = line.trim();

	if line.is_empty() || line.starts_with('#') {
		LineKind::Skip
	} else if line.starts_with("def ") {
		LineKind::Declaration(line)
	} else if line.starts_with("@{") {
		LineKind::BlockOpen
	} else if line.starts_with('}') {
		LineKind::BlockClose
	} else {
		LineKind::Other(line)
	}
}
