use std::collections::{BTreeMap, HashSet};

use sexpr_schema_core::types::{Codec, FieldKey, FieldRule, Schema, TypedNode, Value};

use crate::error::ParseError;
use crate::raw::{Atom, RawNode};

/// Decodes a raw tree into a typed node under `schema`.
///
/// Positional fields consume the leading body elements by index; the
/// remaining elements are tagged sub-lists matched against keyword
/// fields. A sub-list whose tag matches no field is skipped: unknown
/// fields are tolerated for forward compatibility, not treated as
/// errors.
pub fn decode(raw: &RawNode, schema: &Schema) -> Result<TypedNode, ParseError> {
    match schema.tag() {
        Some(tag) => {
            let items = raw.as_list().ok_or_else(|| ParseError::TagMismatch {
                expected: tag.to_string(),
                found: "a bare atom".to_string(),
            })?;
            match raw.head_symbol() {
                Some(head) if head == tag => decode_body(&items[1..], schema),
                Some(head) => Err(ParseError::TagMismatch {
                    expected: tag.to_string(),
                    found: format!("'{head}'"),
                }),
                None => Err(ParseError::TagMismatch {
                    expected: tag.to_string(),
                    found: "an untagged list".to_string(),
                }),
            }
        }
        None => match raw {
            RawNode::List(items) => decode_body(items, schema),
            RawNode::Atom(_) => decode_body(std::slice::from_ref(raw), schema),
        },
    }
}

/// Splits a keyword-region element into its leading tag and body.
fn split_keyword(item: &RawNode) -> Option<(&str, &[RawNode])> {
    match item.as_list()?.split_first()? {
        (RawNode::Atom(Atom::Symbol(key)), rest) => Some((key, rest)),
        _ => None,
    }
}

fn decode_body(body: &[RawNode], schema: &Schema) -> Result<TypedNode, ParseError> {
    let tag = schema.tag().unwrap_or("<untagged>").to_string();
    let mut node = match schema.tag() {
        Some(t) => TypedNode::new(t),
        None => TypedNode::tagless(),
    };

    let positional_count = schema.positional_count();
    for spec in schema.fields() {
        let FieldKey::Position(index) = &spec.key else {
            continue;
        };
        let element = body.get(*index).ok_or_else(|| ParseError::MissingField {
            tag: tag.clone(),
            field: spec.attr.clone(),
        })?;
        // Validated schemas only carry exactly-one positional fields.
        let FieldRule::One(codec) = &spec.rule else {
            continue;
        };
        let value = decode_element(element, codec, &tag, &spec.attr)?;
        node.set(&spec.attr, value);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut repeats: BTreeMap<String, Vec<Value>> = BTreeMap::new();

    for item in &body[positional_count.min(body.len())..] {
        let Some((key, rest)) = split_keyword(item) else {
            tracing::debug!(tag = %tag, "skipping stray element in keyword position");
            continue;
        };
        let Some(spec) = schema.keyword(key) else {
            tracing::debug!(tag = %tag, key, "skipping unknown field");
            continue;
        };

        match &spec.rule {
            FieldRule::Flag => {
                if !rest.is_empty() {
                    return Err(ParseError::FieldArity {
                        tag: tag.clone(),
                        field: key.to_string(),
                        expected: 0,
                        found: rest.len(),
                    });
                }
                if !seen.insert(key.to_string()) {
                    return Err(ParseError::DuplicateField {
                        tag: tag.clone(),
                        field: key.to_string(),
                    });
                }
                node.set(&spec.attr, Value::Boolean(true));
            }
            FieldRule::Many(codec) => {
                let value = decode_occurrence(item, rest, codec, &tag, key)?;
                repeats.entry(spec.attr.clone()).or_default().push(value);
            }
            FieldRule::One(codec) | FieldRule::Optional(codec) => {
                if !seen.insert(key.to_string()) {
                    return Err(ParseError::DuplicateField {
                        tag: tag.clone(),
                        field: key.to_string(),
                    });
                }
                let value = decode_occurrence(item, rest, codec, &tag, key)?;
                node.set(&spec.attr, value);
            }
        }
    }

    for spec in schema.keyword_fields() {
        let key = spec.key.as_keyword().unwrap_or(&spec.attr);
        match &spec.rule {
            FieldRule::One(_) if !seen.contains(key) => {
                return Err(ParseError::MissingField {
                    tag: tag.clone(),
                    field: key.to_string(),
                });
            }
            FieldRule::Flag if !seen.contains(key) => {
                node.set(&spec.attr, Value::Boolean(false));
            }
            FieldRule::Many(_) => {
                let items = repeats.remove(&spec.attr).unwrap_or_default();
                node.set(&spec.attr, Value::List(items));
            }
            _ => {}
        }
    }

    Ok(node)
}

/// Decodes one keyword occurrence: the full sub-list for a tagged nested
/// schema, the elements after the key otherwise.
fn decode_occurrence(
    item: &RawNode,
    rest: &[RawNode],
    codec: &Codec,
    tag: &str,
    key: &str,
) -> Result<Value, ParseError> {
    match codec {
        Codec::Nested(nested) if nested.tag().is_some() => {
            Ok(Value::Node(decode(item, nested)?))
        }
        Codec::Nested(nested) => {
            Ok(Value::Node(decode_body(rest, nested)?))
        }
        Codec::Tuple(elements) => decode_tuple(rest, elements, tag, key),
        primitive => {
            if rest.len() != 1 {
                return Err(ParseError::FieldArity {
                    tag: tag.to_string(),
                    field: key.to_string(),
                    expected: 1,
                    found: rest.len(),
                });
            }
            coerce_atom(&rest[0], primitive, tag, key)
        }
    }
}

/// Decodes one positional element.
fn decode_element(
    element: &RawNode,
    codec: &Codec,
    tag: &str,
    attr: &str,
) -> Result<Value, ParseError> {
    match codec {
        Codec::Nested(nested) => Ok(Value::Node(decode(element, nested)?)),
        Codec::Tuple(elements) => {
            let items = element.as_list().ok_or_else(|| ParseError::FieldArity {
                tag: tag.to_string(),
                field: attr.to_string(),
                expected: elements.len(),
                found: 1,
            })?;
            decode_tuple(items, elements, tag, attr)
        }
        primitive => coerce_atom(element, primitive, tag, attr),
    }
}

fn decode_tuple(
    items: &[RawNode],
    elements: &[Codec],
    tag: &str,
    field: &str,
) -> Result<Value, ParseError> {
    if items.len() != elements.len() {
        return Err(ParseError::FieldArity {
            tag: tag.to_string(),
            field: field.to_string(),
            expected: elements.len(),
            found: items.len(),
        });
    }
    let values = items
        .iter()
        .zip(elements)
        .map(|(item, codec)| coerce_atom(item, codec, tag, field))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Tuple(values))
}

/// Coerces a single atom through a primitive codec.
fn coerce_atom(
    element: &RawNode,
    codec: &Codec,
    tag: &str,
    field: &str,
) -> Result<Value, ParseError> {
    let atom = element.as_atom().ok_or_else(|| ParseError::ExpectedAtom {
        tag: tag.to_string(),
        field: field.to_string(),
    })?;
    match codec {
        Codec::Number => match atom {
            Atom::Number(text) => text
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| ParseError::InvalidNumber { text: text.clone() }),
            other => Err(ParseError::InvalidNumber {
                text: other.text().to_string(),
            }),
        },
        Codec::Integer => match atom {
            Atom::Number(text) if !text.contains('.') => text
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| ParseError::InvalidInteger { text: text.clone() }),
            other => Err(ParseError::InvalidInteger {
                text: other.text().to_string(),
            }),
        },
        Codec::Text | Codec::QuotedText => Ok(Value::Text(atom.text().to_string())),
        Codec::YesNo => match atom {
            Atom::Symbol(s) if s == "yes" => Ok(Value::Boolean(true)),
            Atom::Symbol(s) if s == "no" => Ok(Value::Boolean(false)),
            other => Err(ParseError::InvalidYesNo {
                text: other.text().to_string(),
            }),
        },
        Codec::Nested(_) | Codec::Tuple(_) => Err(ParseError::ExpectedAtom {
            tag: tag.to_string(),
            field: field.to_string(),
        }),
    }
}
