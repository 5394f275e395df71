//! `deftoml_core` is the core library for the [deftoml](https://github.com/ifiokjr/deftoml)
//! converter. It reads a small line oriented configuration language with
//! constants, prefix arithmetic and anonymous key-value blocks, and produces
//! a document that can be rendered as TOML or JSON.
//!
//! ## Source Language
//!
//! ```text
//! # comments start with a hash
//! def width := 80
//! def half := #(/ width 2)
//! def letter := chr(65)
//!
//! @{
//! columns = width;
//! ratio = 0.75;
//! title = [[Main window]];
//! }
//! ```
//!
//! Every closed block becomes a table named `dict1`, `dict2`, ... in the
//! order the blocks close.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → Line classifier (blank/comment, declaration, block open/close, entry)
//!   → Parser (block state machine, constant table, value resolution)
//!   → Expression evaluator (integers, chr(n), #(op a b), #(op expr))
//!   → Document (generated block names → ordered key/value bodies)
//!   → Renderer (TOML or JSON)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `deftoml.toml`.
//!
//! ## Key Types
//!
//! - [`Parser`] — Parses source text. Each call starts from a fresh constant
//!   table.
//! - [`Document`] — The parsed blocks in encounter order.
//! - [`Value`] — An integer, float or string scalar.
//! - [`DeftomlError`] — Every failure, grouped by [`ErrorCategory`].
//!
//! ## Quick Start
//!
//! ```rust
//! use deftoml_core::RenderFormat;
//! use deftoml_core::Value;
//! use deftoml_core::parse;
//! use deftoml_core::render;
//!
//! let document = parse("def answer := 42\n@{\nkey = answer;\n}\n").unwrap();
//! let block = document.get("dict1").unwrap();
//! assert_eq!(block.get("key"), Some(&Value::Integer(42)));
//!
//! let toml = render(&document, RenderFormat::Toml).unwrap();
//! assert!(toml.contains("[dict1]"));
//! ```

pub use config::*;
pub use constants::*;
pub use document::*;
pub use error::*;
pub use expression::*;
pub use parser::*;
pub use render::*;
pub use value::*;

pub mod config;
mod constants;
mod document;
#[allow(unused_assignments)]
mod error;
mod expression;
pub(crate) mod lexer;
pub(crate) mod line;
mod parser;
mod render;
mod value;

#[cfg(test)]
mod __fixtures;
