//! # sexpr-schema-core
//!
//! The declarative schema model for the S-expression engine.
//!
//! A [`types::Schema`] describes one node type of a nested-parenthesized
//! format: its tag, its positional and keyword fields, and the codec each
//! field decodes and prints through. The same schema value drives both
//! directions in the companion codec crate, so parse and print stay exact
//! inverses by construction.
//!
//! # Example
//!
//! ```
//! use sexpr_schema_core::types::{Codec, FieldKey, FieldSpec, Schema};
//!
//! let paper = Schema::new(
//!     "paper",
//!     vec![FieldSpec::positional(0, "psize", Codec::QuotedText)],
//! )
//! .unwrap();
//!
//! // Derive a sibling node type without touching the base.
//! let page = paper
//!     .extend_renamed(
//!         Some("page"),
//!         vec![FieldSpec::positional(0, "page", Codec::QuotedText)],
//!         &[FieldKey::Position(0)],
//!     )
//!     .unwrap();
//!
//! assert_eq!(paper.tag(), Some("paper"));
//! assert_eq!(page.tag(), Some("page"));
//! ```

pub mod error;
pub mod types;

pub use error::SchemaError;
