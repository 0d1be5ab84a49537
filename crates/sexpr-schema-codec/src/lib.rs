//! # sexpr-schema-codec
//!
//! The textual engine for schema-driven S-expressions.
//!
//! This crate provides:
//! - A lexer and raw tree reader for parenthesized text
//! - A typed decoder that matches raw trees against a
//!   [`Schema`](sexpr_schema_core::types::Schema)
//! - A printer that serializes typed nodes back to canonical text
//! - Round-trip fidelity: `parse(print(node))` reproduces the node
//!
//! # Example
//!
//! ```
//! use sexpr_schema_codec::{parse, print};
//! use sexpr_schema_core::types::{Codec, FieldSpec, Schema};
//!
//! let schema = Schema::new(
//!     "size",
//!     vec![
//!         FieldSpec::positional(0, "width", Codec::Number),
//!         FieldSpec::positional(1, "height", Codec::Number),
//!     ],
//! )
//! .unwrap();
//!
//! let node = parse("(size 10 20)", &schema).expect("parse failed");
//! assert_eq!(node.number("width"), Some(10.0));
//! assert_eq!(print(&node, &schema).unwrap(), "(size 10 20)");
//! ```

pub mod decode;
pub mod error;
mod lexer;
pub mod printer;
pub mod raw;
pub mod reader;
pub mod token;

pub use decode::decode;
pub use error::{EncodeError, ParseError, Span};
pub use printer::{encode, encode_pretty};
pub use raw::{Atom, RawNode};
pub use reader::read;

use sexpr_schema_core::types::{Schema, TypedNode};

/// Parses source text into a typed node under `schema`.
///
/// # Errors
///
/// Any lexing, structure, or decode failure surfaces as a
/// [`ParseError`]; see the error type for the full taxonomy.
pub fn parse(source: &str, schema: &Schema) -> Result<TypedNode, ParseError> {
    let raw = read(source)?;
    decode(&raw, schema)
}

/// Prints a typed node as canonical single-line text.
///
/// # Errors
///
/// Returns an [`EncodeError`] when the node does not conform to the
/// schema; this indicates a node-construction bug, not bad input.
pub fn print(node: &TypedNode, schema: &Schema) -> Result<String, EncodeError> {
    encode(node, schema)
}

/// Prints a typed node with keyword fields on indented lines.
pub fn print_pretty(node: &TypedNode, schema: &Schema) -> Result<String, EncodeError> {
    encode_pretty(node, schema, 0)
}
