use std::fmt;

use super::codec::Codec;

/// A field's multiplicity, with the presence-flag kind as its own variant.
///
/// A `Flag` field decodes to a boolean from the mere presence or absence
/// of an empty tagged sub-list; it has no codec of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Exactly one occurrence; absence is a decode error.
    One(Codec),
    /// At most one occurrence; absence leaves the attribute unset.
    Optional(Codec),
    /// Any number of occurrences, decoded to an ordered list.
    Many(Codec),
    /// Presence of `(key)` decodes to true, absence to false.
    Flag,
}

impl FieldRule {
    /// Returns the codec carried by a value rule, or `None` for flags.
    pub fn codec(&self) -> Option<&Codec> {
        match self {
            Self::One(codec) | Self::Optional(codec) | Self::Many(codec) => Some(codec),
            Self::Flag => None,
        }
    }

    /// Returns true if absence of this field is a decode error.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::One(_))
    }

    /// Returns true if this field may occur more than once.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(codec) => write!(f, "one {codec}"),
            Self::Optional(codec) => write!(f, "optional {codec}"),
            Self::Many(codec) => write!(f, "zero-or-more {codec}"),
            Self::Flag => write!(f, "flag"),
        }
    }
}
