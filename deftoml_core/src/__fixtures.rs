use crate::BlockBody;
use crate::Value;

/// A source file exercising every line kind and value form.
pub(crate) fn full_source() -> &'static str {
	"# window settings
def width := 80
def half := #(/ width 2)
def letter := chr(65)
def neg := #(- #(+ width 20))

@{
columns = width;
ratio = 0.75;
title = [[Main window]];
initial = letter;
}

# a second block
@{
half_width = half;
offset = neg;
}
"
}

pub(crate) fn single_block_source() -> &'static str {
	"@{\nkey = 3;\n}"
}

pub(crate) fn two_block_source() -> &'static str {
	"@{\nfirst = 1;\n}\n@{\nsecond = 2;\n}\n"
}

pub(crate) fn full_source_first_block() -> BlockBody {
	[
		("columns", Value::Integer(80)),
		("ratio", Value::Float(0.75)),
		("title", Value::from("Main window")),
		("initial", Value::from("A")),
	]
	.into_iter()
	.collect()
}

pub(crate) fn full_source_second_block() -> BlockBody {
	[
		("half_width", Value::Float(40.0)),
		("offset", Value::Integer(-100)),
	]
	.into_iter()
	.collect()
}
