use std::fmt;

/// Errors that occur when constructing or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Positional field keys must form a contiguous run starting at 0.
    PositionalGap { index: usize },
    /// Two positional fields share the same index.
    DuplicatePositional { index: usize },
    /// A positional field carries a rule other than exactly-one.
    PositionalNotRequired { index: usize },
    /// Two keyword fields share the same name.
    DuplicateKeyword { name: String },
    /// A keyword field's nested schema carries a different tag than the key.
    NestedTagMismatch { key: String, tag: String },
    /// A tuple codec has no elements.
    EmptyTuple { key: String },
    /// A tuple codec contains a nested or tuple element.
    TupleElementNotPrimitive { key: String },
    /// A tuple codec appears under a zero-or-more rule.
    RepeatedTuple { key: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionalGap { index } => {
                write!(
                    f,
                    "positional fields must form a contiguous run from 0: missing index {index}"
                )
            }
            Self::DuplicatePositional { index } => {
                write!(f, "duplicate positional field at index {index}")
            }
            Self::PositionalNotRequired { index } => {
                write!(
                    f,
                    "positional field at index {index} must be an exactly-one value field"
                )
            }
            Self::DuplicateKeyword { name } => {
                write!(f, "duplicate keyword field '{name}'")
            }
            Self::NestedTagMismatch { key, tag } => {
                write!(
                    f,
                    "keyword field '{key}' has a nested schema tagged '{tag}': the tags must match"
                )
            }
            Self::EmptyTuple { key } => {
                write!(f, "field '{key}' has an empty tuple codec")
            }
            Self::TupleElementNotPrimitive { key } => {
                write!(
                    f,
                    "field '{key}' has a tuple codec with a non-primitive element"
                )
            }
            Self::RepeatedTuple { key } => {
                write!(f, "field '{key}' repeats a tuple codec; tuples cannot be zero-or-more")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
