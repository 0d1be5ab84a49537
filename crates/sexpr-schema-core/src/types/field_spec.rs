use std::fmt;

use super::codec::Codec;
use super::field_key::FieldKey;
use super::field_rule::FieldRule;

/// One field of a schema: where it is found, the attribute it decodes to,
/// and the rule that decodes and re-encodes it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub attr: String,
    pub rule: FieldRule,
}

impl FieldSpec {
    /// A required positional field at `index`, decoded to `attr`.
    pub fn positional(index: usize, attr: &str, codec: Codec) -> Self {
        Self {
            key: FieldKey::Position(index),
            attr: attr.to_string(),
            rule: FieldRule::One(codec),
        }
    }

    /// A required keyword field; the attribute takes the key's name.
    pub fn required(name: &str, codec: Codec) -> Self {
        Self {
            key: FieldKey::keyword(name),
            attr: name.to_string(),
            rule: FieldRule::One(codec),
        }
    }

    /// An optional keyword field; the attribute takes the key's name.
    pub fn optional(name: &str, codec: Codec) -> Self {
        Self {
            key: FieldKey::keyword(name),
            attr: name.to_string(),
            rule: FieldRule::Optional(codec),
        }
    }

    /// A zero-or-more keyword field decoding to an ordered list.
    pub fn repeated(name: &str, codec: Codec) -> Self {
        Self {
            key: FieldKey::keyword(name),
            attr: name.to_string(),
            rule: FieldRule::Many(codec),
        }
    }

    /// A presence-flag field: `(name)` decodes to true, absence to false.
    pub fn flag(name: &str) -> Self {
        Self {
            key: FieldKey::keyword(name),
            attr: name.to_string(),
            rule: FieldRule::Flag,
        }
    }

    /// An optional keyword field holding a `yes`/`no` boolean.
    pub fn yes_no(name: &str) -> Self {
        Self::optional(name, Codec::YesNo)
    }

    /// Replaces the target attribute name, keeping key and rule.
    pub fn with_attr(mut self, attr: &str) -> Self {
        self.attr = attr.to_string();
        self
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.key, self.attr, self.rule)
    }
}
