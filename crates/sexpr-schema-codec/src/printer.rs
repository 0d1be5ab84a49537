use sexpr_schema_core::types::{Codec, FieldRule, Schema, TypedNode, Value};

use crate::error::EncodeError;

/// Forms longer than this break across lines when pretty-printing.
const FLAT_WIDTH: usize = 60;

/// Encodes a typed node as canonical single-line text.
///
/// Positional fields print first in key order, then keyword fields in
/// schema declaration order, regardless of how the node was built.
/// Absent optional fields and false flags print nothing.
pub fn encode(node: &TypedNode, schema: &Schema) -> Result<String, EncodeError> {
    let (positional, keyword) = body_parts(node, schema, None)?;
    let mut parts = positional;
    parts.extend(keyword);
    Ok(wrap(schema.tag(), &parts))
}

/// Encodes a typed node with keyword fields broken across indented
/// lines. Short forms stay flat. The output parses back to the same
/// typed node as the flat form.
pub fn encode_pretty(
    node: &TypedNode,
    schema: &Schema,
    indent: usize,
) -> Result<String, EncodeError> {
    let flat = encode(node, schema)?;
    if flat.len() <= FLAT_WIDTH || schema.tag().is_none() {
        return Ok(flat);
    }

    let (positional, keyword) = body_parts(node, schema, Some(indent))?;
    let mut out = String::new();
    out.push('(');
    out.push_str(schema.tag().unwrap_or_default());
    for part in &positional {
        out.push(' ');
        out.push_str(part);
    }
    let pad = "  ".repeat(indent + 1);
    for part in &keyword {
        out.push('\n');
        out.push_str(&pad);
        out.push_str(part);
    }
    out.push(')');
    Ok(out)
}

fn wrap(tag: Option<&str>, parts: &[String]) -> String {
    match tag {
        Some(tag) if parts.is_empty() => format!("({tag})"),
        Some(tag) => format!("({tag} {})", parts.join(" ")),
        None => parts.join(" "),
    }
}

/// Renders a node's positional and keyword pieces. With `pretty` set,
/// keyword fields holding tagged nested nodes recurse through the
/// pretty printer at the next depth.
fn body_parts(
    node: &TypedNode,
    schema: &Schema,
    pretty: Option<usize>,
) -> Result<(Vec<String>, Vec<String>), EncodeError> {
    if node.tag_str() != schema.tag() {
        return Err(EncodeError::NodeTagMismatch {
            expected: schema.tag().unwrap_or("<untagged>").to_string(),
            found: node.tag_str().unwrap_or("<untagged>").to_string(),
        });
    }
    let tag = schema.tag().unwrap_or("<untagged>");

    // Key order, not declaration order: positional output is indexed.
    let mut positional = Vec::new();
    for index in 0..schema.positional_count() {
        let Some(spec) = schema.positional(index) else {
            continue;
        };
        let FieldRule::One(codec) = &spec.rule else {
            continue;
        };
        let value = node.get(&spec.attr).ok_or_else(|| EncodeError::MissingAttribute {
            tag: tag.to_string(),
            attr: spec.attr.clone(),
        })?;
        positional.push(positional_text(value, codec, tag, &spec.attr)?);
    }

    let mut keyword = Vec::new();
    for spec in schema.keyword_fields() {
        let key = spec.key.as_keyword().unwrap_or(&spec.attr);
        match &spec.rule {
            FieldRule::Flag => match node.get(&spec.attr) {
                None | Some(Value::Boolean(false)) => {}
                Some(Value::Boolean(true)) => keyword.push(format!("({key})")),
                Some(other) => {
                    return Err(wrong_kind(tag, &spec.attr, "boolean", other));
                }
            },
            FieldRule::Optional(codec) => {
                if let Some(value) = node.get(&spec.attr) {
                    keyword.push(keyword_form(key, value, codec, tag, &spec.attr, pretty)?);
                }
            }
            FieldRule::One(codec) => {
                let value =
                    node.get(&spec.attr)
                        .ok_or_else(|| EncodeError::MissingAttribute {
                            tag: tag.to_string(),
                            attr: spec.attr.clone(),
                        })?;
                keyword.push(keyword_form(key, value, codec, tag, &spec.attr, pretty)?);
            }
            FieldRule::Many(codec) => match node.get(&spec.attr) {
                None => {}
                Some(Value::List(items)) => {
                    for item in items {
                        keyword.push(keyword_form(key, item, codec, tag, &spec.attr, pretty)?);
                    }
                }
                Some(other) => {
                    return Err(wrong_kind(tag, &spec.attr, "list", other));
                }
            },
        }
    }

    Ok((positional, keyword))
}

/// Renders one keyword occurrence as a `(key ...)` form. Tagged nested
/// values print themselves: their tag equals the key by construction.
fn keyword_form(
    key: &str,
    value: &Value,
    codec: &Codec,
    tag: &str,
    attr: &str,
    pretty: Option<usize>,
) -> Result<String, EncodeError> {
    match codec {
        Codec::Nested(nested) if nested.tag().is_some() => {
            let inner = value
                .as_node()
                .ok_or_else(|| wrong_kind(tag, attr, "node", value))?;
            match pretty {
                Some(indent) => encode_pretty(inner, nested, indent + 1),
                None => encode(inner, nested),
            }
        }
        Codec::Nested(nested) => {
            let inner = value
                .as_node()
                .ok_or_else(|| wrong_kind(tag, attr, "node", value))?;
            let (positional, kw) = body_parts(inner, nested, None)?;
            let mut parts = positional;
            parts.extend(kw);
            if parts.is_empty() {
                Ok(format!("({key})"))
            } else {
                Ok(format!("({key} {})", parts.join(" ")))
            }
        }
        Codec::Tuple(elements) => {
            let joined = tuple_text(value, elements, tag, attr)?;
            Ok(format!("({key} {joined})"))
        }
        primitive => {
            let text = primitive_text(value, primitive, tag, attr)?;
            Ok(format!("({key} {text})"))
        }
    }
}

/// Renders one positional element, without a field-name wrapper.
fn positional_text(
    value: &Value,
    codec: &Codec,
    tag: &str,
    attr: &str,
) -> Result<String, EncodeError> {
    match codec {
        Codec::Nested(nested) if nested.tag().is_some() => {
            let inner = value
                .as_node()
                .ok_or_else(|| wrong_kind(tag, attr, "node", value))?;
            encode(inner, nested)
        }
        Codec::Nested(nested) => {
            let inner = value
                .as_node()
                .ok_or_else(|| wrong_kind(tag, attr, "node", value))?;
            let (positional, kw) = body_parts(inner, nested, None)?;
            let mut parts = positional;
            parts.extend(kw);
            Ok(format!("({})", parts.join(" ")))
        }
        Codec::Tuple(elements) => {
            let joined = tuple_text(value, elements, tag, attr)?;
            Ok(format!("({joined})"))
        }
        primitive => primitive_text(value, primitive, tag, attr),
    }
}

fn tuple_text(
    value: &Value,
    elements: &[Codec],
    tag: &str,
    attr: &str,
) -> Result<String, EncodeError> {
    let items = value
        .as_tuple()
        .ok_or_else(|| wrong_kind(tag, attr, "tuple", value))?;
    if items.len() != elements.len() {
        return Err(EncodeError::WrongValueKind {
            tag: tag.to_string(),
            attr: attr.to_string(),
            expected: format!("tuple of {}", elements.len()),
            found: format!("tuple of {}", items.len()),
        });
    }
    let parts = items
        .iter()
        .zip(elements)
        .map(|(item, codec)| primitive_text(item, codec, tag, attr))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(" "))
}

/// Renders a primitive value in the codec's atom form.
fn primitive_text(
    value: &Value,
    codec: &Codec,
    tag: &str,
    attr: &str,
) -> Result<String, EncodeError> {
    match codec {
        Codec::Number => match value {
            Value::Number(n) => Ok(format!("{n}")),
            Value::Integer(i) => Ok(i.to_string()),
            other => Err(wrong_kind(tag, attr, "number", other)),
        },
        Codec::Integer => match value {
            Value::Integer(i) => Ok(i.to_string()),
            other => Err(wrong_kind(tag, attr, "integer", other)),
        },
        Codec::Text => match value {
            Value::Text(s) if needs_quoting(s) => Ok(quote(s)),
            Value::Text(s) => Ok(s.clone()),
            other => Err(wrong_kind(tag, attr, "text", other)),
        },
        Codec::QuotedText => match value {
            Value::Text(s) => Ok(quote(s)),
            other => Err(wrong_kind(tag, attr, "text", other)),
        },
        Codec::YesNo => match value {
            Value::Boolean(true) => Ok("yes".to_string()),
            Value::Boolean(false) => Ok("no".to_string()),
            other => Err(wrong_kind(tag, attr, "boolean", other)),
        },
        Codec::Nested(_) | Codec::Tuple(_) => Err(wrong_kind(tag, attr, "atom", value)),
    }
}

fn wrong_kind(tag: &str, attr: &str, expected: &str, found: &Value) -> EncodeError {
    EncodeError::WrongValueKind {
        tag: tag.to_string(),
        attr: attr.to_string(),
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

/// A text value survives as a bare symbol only if it is non-empty and
/// free of whitespace, parentheses, and quotes.
fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"'))
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}
