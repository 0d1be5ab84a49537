use std::fmt;
use std::sync::Arc;

use super::schema::Schema;

/// How a matched raw element maps to a typed value, and back to text.
///
/// The primitive variants coerce a single atom; `Nested` recurses into a
/// sub-schema; `Tuple` consumes a fixed sequence of primitive atoms, e.g.
/// three numbers for a placement triple.
#[derive(Debug, Clone, PartialEq)]
pub enum Codec {
    /// A decimal numeral, decoded to f64. Prints in shortest decimal form.
    Number,
    /// A decimal numeral without a fractional part, decoded to i64.
    Integer,
    /// Free text. Prints bare, quoting only when the value would not
    /// survive as a bare symbol.
    Text,
    /// Free text that always prints quoted, with `"` escaped as `\"`.
    QuotedText,
    /// The symbols `yes` and `no`, decoded to a boolean.
    YesNo,
    /// A value decoded through another schema.
    Nested(Arc<Schema>),
    /// A fixed sequence of primitive coercions.
    Tuple(Vec<Codec>),
}

impl Codec {
    /// Wraps a schema as a nested codec.
    pub fn nested(schema: Schema) -> Self {
        Self::Nested(Arc::new(schema))
    }

    /// Returns true for the single-atom variants.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Nested(_) | Self::Tuple(_))
    }

    /// Returns a human-readable description of this codec kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::QuotedText => "quoted text",
            Self::YesNo => "yes/no",
            Self::Nested(_) => "nested node",
            Self::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::field_spec::FieldSpec;

    #[test]
    fn primitives() {
        assert!(Codec::Number.is_primitive());
        assert!(Codec::Integer.is_primitive());
        assert!(Codec::Text.is_primitive());
        assert!(Codec::QuotedText.is_primitive());
        assert!(Codec::YesNo.is_primitive());
    }

    #[test]
    fn composites_are_not_primitive() {
        let schema = Schema::new(
            "size",
            vec![
                FieldSpec::positional(0, "width", Codec::Number),
                FieldSpec::positional(1, "height", Codec::Number),
            ],
        )
        .unwrap();
        assert!(!Codec::nested(schema).is_primitive());
        assert!(!Codec::Tuple(vec![Codec::Number, Codec::Number]).is_primitive());
    }

    #[test]
    fn display() {
        assert_eq!(Codec::Number.to_string(), "number");
        assert_eq!(Codec::QuotedText.to_string(), "quoted text");
        assert_eq!(Codec::Tuple(vec![Codec::Number]).to_string(), "tuple");
    }
}
