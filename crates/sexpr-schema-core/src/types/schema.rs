use std::collections::HashSet;

use crate::error::SchemaError;

use super::codec::Codec;
use super::field_key::FieldKey;
use super::field_spec::FieldSpec;

/// The declarative description of one node type: its tag and its fields,
/// in declaration order.
///
/// Declaration order is significant: the printer emits positional fields
/// first, then keyword fields in the order they were declared, regardless
/// of how the typed node was built. Schemas are immutable once
/// constructed; `extend` derives a new schema without touching the base.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    tag: Option<String>,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a schema whose nodes print as `(tag ...)`.
    ///
    /// # Errors
    ///
    /// Validates that positional keys form a contiguous `0..k` run of
    /// exactly-one fields, keyword keys are unique, a keyword field's
    /// tagged nested schema matches its key, and tuple codecs are
    /// non-empty, primitive-only, and not zero-or-more.
    pub fn new(tag: &str, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Self::build(Some(tag.to_string()), fields)
    }

    /// Creates a schema whose nodes print as a bare body, without a
    /// wrapping tag. Used for inline composites such as a coordinate
    /// pair written directly inside its parent.
    pub fn tagless(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Self::build(None, fields)
    }

    fn build(tag: Option<String>, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Self::validate(&fields)?;
        Ok(Self { tag, fields })
    }

    fn validate(fields: &[FieldSpec]) -> Result<(), SchemaError> {
        let mut indices = Vec::new();
        let mut keywords: HashSet<&str> = HashSet::new();

        for spec in fields {
            match &spec.key {
                FieldKey::Position(index) => {
                    if indices.contains(index) {
                        return Err(SchemaError::DuplicatePositional { index: *index });
                    }
                    if !spec.rule.is_required() {
                        return Err(SchemaError::PositionalNotRequired { index: *index });
                    }
                    indices.push(*index);
                }
                FieldKey::Keyword(name) => {
                    if !keywords.insert(name) {
                        return Err(SchemaError::DuplicateKeyword { name: name.clone() });
                    }
                }
            }
            Self::check_codec(spec)?;
        }

        indices.sort_unstable();
        for (expected, actual) in indices.iter().enumerate() {
            if expected != *actual {
                return Err(SchemaError::PositionalGap { index: expected });
            }
        }
        Ok(())
    }

    fn check_codec(spec: &FieldSpec) -> Result<(), SchemaError> {
        let Some(codec) = spec.rule.codec() else {
            return Ok(());
        };
        match codec {
            Codec::Nested(nested) => {
                if let (Some(key), Some(tag)) = (spec.key.as_keyword(), nested.tag()) {
                    if key != tag {
                        return Err(SchemaError::NestedTagMismatch {
                            key: key.to_string(),
                            tag: tag.to_string(),
                        });
                    }
                }
            }
            Codec::Tuple(elements) => {
                let key = spec.key.to_string();
                if spec.rule.is_repeatable() {
                    return Err(SchemaError::RepeatedTuple { key });
                }
                if elements.is_empty() {
                    return Err(SchemaError::EmptyTuple { key });
                }
                if elements.iter().any(|c| !c.is_primitive()) {
                    return Err(SchemaError::TupleElementNotPrimitive { key });
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns the leading symbol printed for nodes of this schema.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns all fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the number of positional fields.
    pub fn positional_count(&self) -> usize {
        self.fields.iter().filter(|f| f.key.is_position()).count()
    }

    /// Returns the positional field at `index`.
    pub fn positional(&self, index: usize) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.key == FieldKey::Position(index))
    }

    /// Returns the keyword field named `name`.
    pub fn keyword(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.key.as_keyword() == Some(name))
    }

    /// Returns the keyword fields in declaration order.
    pub fn keyword_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| !f.key.is_position())
    }

    /// Derives a new schema with the same tag: `removed` keys are deleted,
    /// then each `added` spec replaces the existing spec with the same key
    /// in place, or appends after the existing fields.
    ///
    /// The base schema is untouched and the result is revalidated.
    pub fn extend(
        &self,
        added: Vec<FieldSpec>,
        removed: &[FieldKey],
    ) -> Result<Self, SchemaError> {
        self.extend_renamed(self.tag(), added, removed)
    }

    /// Like `extend`, but the derived schema takes the given tag.
    pub fn extend_renamed(
        &self,
        tag: Option<&str>,
        added: Vec<FieldSpec>,
        removed: &[FieldKey],
    ) -> Result<Self, SchemaError> {
        let mut fields: Vec<FieldSpec> = self
            .fields
            .iter()
            .filter(|f| !removed.contains(&f.key))
            .cloned()
            .collect();
        for spec in added {
            match fields.iter_mut().find(|f| f.key == spec.key) {
                Some(slot) => *slot = spec,
                None => fields.push(spec),
            }
        }
        Self::build(tag.map(str::to_string), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::field_rule::FieldRule;

    fn size_schema() -> Schema {
        Schema::new(
            "size",
            vec![
                FieldSpec::positional(0, "width", Codec::Number),
                FieldSpec::positional(1, "height", Codec::Number),
            ],
        )
        .unwrap()
    }

    #[test]
    fn valid_schema() {
        let schema = size_schema();
        assert_eq!(schema.tag(), Some("size"));
        assert_eq!(schema.positional_count(), 2);
        assert_eq!(schema.positional(0).unwrap().attr, "width");
        assert!(schema.positional(2).is_none());
    }

    #[test]
    fn tagless_schema() {
        let schema =
            Schema::tagless(vec![FieldSpec::positional(0, "x", Codec::Number)]).unwrap();
        assert_eq!(schema.tag(), None);
    }

    #[test]
    fn positional_gap() {
        let result = Schema::new(
            "s",
            vec![
                FieldSpec::positional(0, "a", Codec::Number),
                FieldSpec::positional(2, "c", Codec::Number),
            ],
        );
        assert_eq!(result, Err(SchemaError::PositionalGap { index: 1 }));
    }

    #[test]
    fn duplicate_positional() {
        let result = Schema::new(
            "s",
            vec![
                FieldSpec::positional(0, "a", Codec::Number),
                FieldSpec::positional(0, "b", Codec::Number),
            ],
        );
        assert_eq!(result, Err(SchemaError::DuplicatePositional { index: 0 }));
    }

    #[test]
    fn positional_must_be_required() {
        let spec = FieldSpec {
            key: FieldKey::Position(0),
            attr: "a".into(),
            rule: FieldRule::Optional(Codec::Number),
        };
        let result = Schema::new("s", vec![spec]);
        assert_eq!(result, Err(SchemaError::PositionalNotRequired { index: 0 }));
    }

    #[test]
    fn duplicate_keyword() {
        let result = Schema::new(
            "s",
            vec![
                FieldSpec::optional("offset", Codec::Number),
                FieldSpec::flag("offset"),
            ],
        );
        assert_eq!(
            result,
            Err(SchemaError::DuplicateKeyword {
                name: "offset".into()
            })
        );
    }

    #[test]
    fn nested_tag_must_match_key() {
        let result = Schema::new(
            "effects",
            vec![FieldSpec::optional("font", Codec::nested(size_schema()))],
        );
        assert_eq!(
            result,
            Err(SchemaError::NestedTagMismatch {
                key: "font".into(),
                tag: "size".into()
            })
        );
    }

    #[test]
    fn nested_tag_matching_key_is_accepted() {
        let schema = Schema::new(
            "font",
            vec![FieldSpec::optional("size", Codec::nested(size_schema()))],
        )
        .unwrap();
        assert!(schema.keyword("size").is_some());
    }

    #[test]
    fn tagless_nested_is_accepted_under_any_key() {
        let pair = Schema::tagless(vec![
            FieldSpec::positional(0, "x", Codec::Number),
            FieldSpec::positional(1, "y", Codec::Number),
        ])
        .unwrap();
        let schema = Schema::new(
            "s",
            vec![FieldSpec::optional("origin", Codec::nested(pair))],
        );
        assert!(schema.is_ok());
    }

    #[test]
    fn empty_tuple() {
        let result = Schema::new("s", vec![FieldSpec::optional("at", Codec::Tuple(vec![]))]);
        assert_eq!(result, Err(SchemaError::EmptyTuple { key: "at".into() }));
    }

    #[test]
    fn tuple_elements_must_be_primitive() {
        let result = Schema::new(
            "s",
            vec![FieldSpec::optional(
                "at",
                Codec::Tuple(vec![Codec::Number, Codec::nested(size_schema())]),
            )],
        );
        assert_eq!(
            result,
            Err(SchemaError::TupleElementNotPrimitive { key: "at".into() })
        );
    }

    #[test]
    fn tuple_cannot_repeat() {
        let result = Schema::new(
            "s",
            vec![FieldSpec::repeated("at", Codec::Tuple(vec![Codec::Number]))],
        );
        assert_eq!(result, Err(SchemaError::RepeatedTuple { key: "at".into() }));
    }

    #[test]
    fn keyword_lookup() {
        let schema = Schema::new(
            "pin_names",
            vec![
                FieldSpec::optional("offset", Codec::Number),
                FieldSpec::flag("hide"),
            ],
        )
        .unwrap();
        assert!(schema.keyword("offset").is_some());
        assert!(schema.keyword("hide").is_some());
        assert!(schema.keyword("show").is_none());
        assert_eq!(schema.keyword_fields().count(), 2);
    }

    #[test]
    fn extend_appends_new_fields() {
        let base = size_schema();
        let extended = base
            .extend(vec![FieldSpec::flag("locked")], &[])
            .unwrap();
        assert_eq!(extended.fields().len(), 3);
        assert_eq!(extended.fields()[2].attr, "locked");
        // Base untouched
        assert_eq!(base.fields().len(), 2);
    }

    #[test]
    fn extend_overrides_in_place() {
        let base = Schema::new(
            "s",
            vec![
                FieldSpec::optional("a", Codec::Number),
                FieldSpec::optional("b", Codec::Number),
                FieldSpec::optional("c", Codec::Number),
            ],
        )
        .unwrap();
        let extended = base
            .extend(vec![FieldSpec::required("b", Codec::Integer)], &[])
            .unwrap();
        assert_eq!(extended.fields().len(), 3);
        assert_eq!(extended.fields()[1].attr, "b");
        assert!(extended.fields()[1].rule.is_required());
        assert!(!base.fields()[1].rule.is_required());
    }

    #[test]
    fn extend_removes_fields() {
        let base = Schema::new(
            "paper",
            vec![FieldSpec::positional(0, "psize", Codec::QuotedText)],
        )
        .unwrap();
        let derived = base
            .extend_renamed(
                Some("page"),
                vec![FieldSpec::positional(0, "page", Codec::QuotedText)],
                &[FieldKey::Position(0)],
            )
            .unwrap();
        assert_eq!(derived.tag(), Some("page"));
        assert_eq!(derived.positional(0).unwrap().attr, "page");
        assert_eq!(base.tag(), Some("paper"));
        assert_eq!(base.positional(0).unwrap().attr, "psize");
    }

    #[test]
    fn extend_revalidates() {
        let base = size_schema();
        // Removing index 0 leaves a gap at 0
        let result = base.extend(vec![], &[FieldKey::Position(0)]);
        assert_eq!(result, Err(SchemaError::PositionalGap { index: 0 }));
    }
}
