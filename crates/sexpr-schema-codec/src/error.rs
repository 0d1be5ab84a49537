use std::fmt;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors that occur while parsing text into a typed node.
///
/// The lexing and structure variants carry byte offsets into the source;
/// the decode variants carry the enclosing tag and field name instead,
/// since they fault on the raw tree rather than the text.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// A quoted atom was opened but never closed.
    UnterminatedString { offset: usize },
    /// The lexer encountered bytes that match no token rule.
    InvalidToken { span: Span },
    /// A `)` with no matching open parenthesis.
    UnmatchedCloseParen { offset: usize },
    /// The input ended with this list still open.
    UnclosedList { offset: usize },
    /// The input contains no top-level form.
    EmptyDocument,
    /// A second top-level form begins at this offset.
    TrailingContent { offset: usize },
    /// A list's leading symbol does not match the schema's tag.
    TagMismatch { expected: String, found: String },
    /// A required field has no matching input.
    MissingField { tag: String, field: String },
    /// A non-repeatable field matched more than once.
    DuplicateField { tag: String, field: String },
    /// A field's body has the wrong number of elements.
    FieldArity {
        tag: String,
        field: String,
        expected: usize,
        found: usize,
    },
    /// A primitive coercion received a list where an atom was expected.
    ExpectedAtom { tag: String, field: String },
    /// An atom could not be coerced to a number.
    InvalidNumber { text: String },
    /// An atom could not be coerced to an integer.
    InvalidInteger { text: String },
    /// An atom is neither `yes` nor `no`.
    InvalidYesNo { text: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString { offset } => {
                write!(f, "unterminated quoted atom starting at byte {offset}")
            }
            Self::InvalidToken { span } => {
                write!(f, "invalid token at {span}")
            }
            Self::UnmatchedCloseParen { offset } => {
                write!(f, "unmatched ')' at byte {offset}")
            }
            Self::UnclosedList { offset } => {
                write!(f, "unclosed list opened at byte {offset}")
            }
            Self::EmptyDocument => {
                write!(f, "empty document: expected exactly one top-level form")
            }
            Self::TrailingContent { offset } => {
                write!(
                    f,
                    "trailing content at byte {offset}: expected exactly one top-level form"
                )
            }
            Self::TagMismatch { expected, found } => {
                write!(f, "expected a '{expected}' node, found {found}")
            }
            Self::MissingField { tag, field } => {
                write!(f, "missing required field '{field}' in '{tag}'")
            }
            Self::DuplicateField { tag, field } => {
                write!(f, "duplicate field '{field}' in '{tag}'")
            }
            Self::FieldArity {
                tag,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field '{field}' in '{tag}' takes {expected} element(s), found {found}"
                )
            }
            Self::ExpectedAtom { tag, field } => {
                write!(f, "field '{field}' in '{tag}' expects an atom, found a list")
            }
            Self::InvalidNumber { text } => {
                write!(f, "'{text}' is not a valid number")
            }
            Self::InvalidInteger { text } => {
                write!(f, "'{text}' is not a valid integer")
            }
            Self::InvalidYesNo { text } => {
                write!(f, "'{text}' is not 'yes' or 'no'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised when encoding a typed node that does not conform to its
/// schema. These indicate a programming mistake in node construction, not
/// malformed user input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The node's tag does not match the schema's tag.
    NodeTagMismatch { expected: String, found: String },
    /// A required attribute is missing from the node.
    MissingAttribute { tag: String, attr: String },
    /// An attribute holds a value of the wrong kind for its codec.
    WrongValueKind {
        tag: String,
        attr: String,
        expected: String,
        found: String,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeTagMismatch { expected, found } => {
                write!(f, "node tagged '{found}' does not match schema tag '{expected}'")
            }
            Self::MissingAttribute { tag, attr } => {
                write!(f, "node '{tag}' is missing required attribute '{attr}'")
            }
            Self::WrongValueKind {
                tag,
                attr,
                expected,
                found,
            } => {
                write!(
                    f,
                    "attribute '{attr}' of '{tag}' holds {found}, expected {expected}"
                )
            }
        }
    }
}

impl std::error::Error for EncodeError {}
