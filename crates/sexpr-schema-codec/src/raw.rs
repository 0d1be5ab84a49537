use std::fmt;

/// A leaf token with its lexical class.
///
/// Numeric spellings are kept verbatim; parsing to f64/i64 happens at
/// coercion time so the raw tree stays schema-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// A bare symbol, e.g. `hide` or `kicad_sch`.
    Symbol(String),
    /// A numeric spelling, e.g. `-0.5`.
    Number(String),
    /// A quoted value with the quotes stripped and `\"` unescaped.
    Quoted(String),
}

impl Atom {
    /// The atom's text value, independent of lexical class.
    pub fn text(&self) -> &str {
        match self {
            Self::Symbol(s) | Self::Number(s) | Self::Quoted(s) => s,
        }
    }
}

/// An untyped S-expression tree: an atom or an ordered list of children.
///
/// Raw trees are transient intermediates, discarded once decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Atom(Atom),
    List(Vec<RawNode>),
}

impl RawNode {
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RawNode]> {
        match self {
            Self::List(items) => Some(items),
            Self::Atom(_) => None,
        }
    }

    /// The leading symbol of a list, if it has one.
    pub fn head_symbol(&self) -> Option<&str> {
        match self.as_list()?.first()? {
            RawNode::Atom(Atom::Symbol(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RawNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(Atom::Symbol(s)) | Self::Atom(Atom::Number(s)) => write!(f, "{s}"),
            Self::Atom(Atom::Quoted(s)) => {
                write!(f, "\"{}\"", s.replace('"', "\\\""))
            }
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Strips the surrounding quotes from a quoted token's text and unescapes
/// `\"`. No other escape sequences are interpreted.
pub(crate) fn unquote(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
