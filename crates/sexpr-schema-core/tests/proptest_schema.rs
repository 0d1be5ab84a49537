use proptest::prelude::*;
use sexpr_schema_core::types::{Codec, FieldKey, FieldSpec, Schema};

/// Strategy for generating valid keyword field names.
fn keyword_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

fn primitive_codec() -> impl Strategy<Value = Codec> {
    prop_oneof![
        Just(Codec::Number),
        Just(Codec::Integer),
        Just(Codec::Text),
        Just(Codec::QuotedText),
        Just(Codec::YesNo),
    ]
}

/// A schema with distinct keyword fields, one per generated name.
fn keyword_schema(names: &[String], codecs: &[Codec]) -> Schema {
    let fields = names
        .iter()
        .zip(codecs.iter().cycle())
        .map(|(name, codec)| FieldSpec::optional(name, codec.clone()))
        .collect();
    Schema::new("node", fields).unwrap()
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut unique = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for n in names {
        if seen.insert(n.clone()) {
            unique.push(n);
        }
    }
    unique
}

proptest! {
    #[test]
    fn contiguous_positionals_always_validate(count in 1usize..=8) {
        let fields = (0..count)
            .map(|i| FieldSpec::positional(i, &format!("f{i}"), Codec::Number))
            .collect();
        prop_assert!(Schema::new("s", fields).is_ok());
    }

    #[test]
    fn positional_gap_always_rejected(count in 2usize..=8, skip in 0usize..8) {
        let skip = skip % count;
        if skip == count - 1 {
            // Dropping the last index leaves a valid shorter run
            return Ok(());
        }
        let fields = (0..count)
            .filter(|i| *i != skip)
            .map(|i| FieldSpec::positional(i, &format!("f{i}"), Codec::Number))
            .collect::<Vec<_>>();
        prop_assert!(Schema::new("s", fields).is_err());
    }

    #[test]
    fn extend_preserves_untouched_fields(
        names in prop::collection::vec(keyword_name(), 2..=8),
        codecs in prop::collection::vec(primitive_codec(), 1..=3),
        extra in "[a-z][a-z0-9]{0,8}_z",
    ) {
        let names = dedup(names);
        let base = keyword_schema(&names, &codecs);
        let extended = base.extend(vec![FieldSpec::flag(&extra)], &[]).unwrap();

        // Every base field survives at the same relative position
        for (i, name) in names.iter().enumerate() {
            if *name == extra {
                continue;
            }
            prop_assert_eq!(&extended.fields()[i].attr, name);
        }
        prop_assert!(extended.keyword(&extra).is_some());
    }

    #[test]
    fn extend_never_mutates_base(
        names in prop::collection::vec(keyword_name(), 1..=6),
        codecs in prop::collection::vec(primitive_codec(), 1..=3),
    ) {
        let names = dedup(names);
        let base = keyword_schema(&names, &codecs);
        let snapshot = base.clone();

        let removed = FieldKey::keyword(&names[0]);
        let _ = base.extend(vec![FieldSpec::flag("added_marker")], &[removed]);

        prop_assert_eq!(base, snapshot);
    }

    #[test]
    fn extend_remove_then_lookup_fails(
        names in prop::collection::vec(keyword_name(), 1..=6),
        codecs in prop::collection::vec(primitive_codec(), 1..=3),
    ) {
        let names = dedup(names);
        let base = keyword_schema(&names, &codecs);
        let target = names[0].clone();
        let derived = base
            .extend(vec![], &[FieldKey::keyword(&target)])
            .unwrap();
        prop_assert!(derived.keyword(&target).is_none());
        prop_assert_eq!(derived.fields().len(), names.len() - 1);
    }

    #[test]
    fn extend_override_replaces_in_place(
        names in prop::collection::vec(keyword_name(), 2..=6),
    ) {
        let names = dedup(names);
        if names.len() < 2 {
            return Ok(());
        }
        let base = keyword_schema(&names, &[Codec::Number]);
        let target = names[1].clone();
        let derived = base
            .extend(vec![FieldSpec::required(&target, Codec::Integer)], &[])
            .unwrap();
        prop_assert_eq!(derived.fields().len(), names.len());
        prop_assert!(derived.keyword(&target).unwrap().rule.is_required());
        // Relative order unchanged
        prop_assert_eq!(&derived.fields()[1].attr, &target);
    }

    #[test]
    fn duplicate_keyword_always_rejected(name in keyword_name()) {
        let result = Schema::new(
            "s",
            vec![
                FieldSpec::optional(&name, Codec::Number),
                FieldSpec::flag(&name),
            ],
        );
        prop_assert!(result.is_err());
    }
}
