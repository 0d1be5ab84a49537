use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::raw::{unquote, Atom, RawNode};
use crate::token::Token;

/// Reads source text into the document's single raw tree.
///
/// Lists are built by a stack-based reduction: `(` pushes an empty frame,
/// an atom appends to the current frame, `)` pops the frame into its
/// parent. Exactly one top-level form is accepted per document.
///
/// # Errors
///
/// Lexing failures propagate unchanged; structure failures are
/// `UnmatchedCloseParen`, `UnclosedList`, `EmptyDocument`, and
/// `TrailingContent`, each carrying the offending byte offset.
pub fn read(source: &str) -> Result<RawNode, ParseError> {
    let tokens = tokenize(source)?;

    // Each frame records the offset of its open paren for error reporting.
    let mut stack: Vec<(usize, Vec<RawNode>)> = Vec::new();
    let mut root: Option<RawNode> = None;

    for spanned in tokens {
        let node = match spanned.token {
            Token::LParen => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::TrailingContent {
                        offset: spanned.span.start,
                    });
                }
                stack.push((spanned.span.start, Vec::new()));
                continue;
            }
            Token::RParen => match stack.pop() {
                Some((_, children)) => RawNode::List(children),
                None => {
                    return Err(ParseError::UnmatchedCloseParen {
                        offset: spanned.span.start,
                    })
                }
            },
            Token::Quoted => RawNode::Atom(Atom::Quoted(unquote(&spanned.text))),
            Token::Number => RawNode::Atom(Atom::Number(spanned.text)),
            Token::Symbol => RawNode::Atom(Atom::Symbol(spanned.text)),
        };

        match stack.last_mut() {
            Some((_, frame)) => frame.push(node),
            None => {
                if root.is_some() {
                    return Err(ParseError::TrailingContent {
                        offset: spanned.span.start,
                    });
                }
                root = Some(node);
            }
        }
    }

    if let Some((offset, _)) = stack.first() {
        return Err(ParseError::UnclosedList { offset: *offset });
    }
    root.ok_or(ParseError::EmptyDocument)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_flat_list() {
        let node = read("(size 10 20)").unwrap();
        assert_eq!(
            node,
            RawNode::List(vec![
                RawNode::Atom(Atom::Symbol("size".into())),
                RawNode::Atom(Atom::Number("10".into())),
                RawNode::Atom(Atom::Number("20".into())),
            ])
        );
    }

    #[test]
    fn read_nested_lists() {
        let node = read("(a (b (c)) d)").unwrap();
        let list = node.as_list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].head_symbol(), Some("b"));
        assert_eq!(list[1].as_list().unwrap()[1].head_symbol(), Some("c"));
    }

    #[test]
    fn read_bare_atom_root() {
        let node = read("yes").unwrap();
        assert_eq!(node, RawNode::Atom(Atom::Symbol("yes".into())));
    }

    #[test]
    fn read_quoted_atoms_are_unescaped() {
        let node = read(r#"(paper "A\"4")"#).unwrap();
        let list = node.as_list().unwrap();
        assert_eq!(list[1], RawNode::Atom(Atom::Quoted("A\"4".into())));
    }

    #[test]
    fn read_empty_list() {
        assert_eq!(read("()").unwrap(), RawNode::List(vec![]));
    }

    #[test]
    fn unmatched_close_paren() {
        assert!(matches!(
            read("(a))"),
            Err(ParseError::UnmatchedCloseParen { offset: 3 })
        ));
    }

    #[test]
    fn unclosed_list_reports_opening_offset() {
        assert!(matches!(
            read("(a (b"),
            Err(ParseError::UnclosedList { offset: 0 })
        ));
    }

    #[test]
    fn empty_document() {
        assert!(matches!(read(""), Err(ParseError::EmptyDocument)));
        assert!(matches!(read("  \n "), Err(ParseError::EmptyDocument)));
    }

    #[test]
    fn multiple_top_level_forms() {
        assert!(matches!(
            read("(a) (b)"),
            Err(ParseError::TrailingContent { offset: 4 })
        ));
        assert!(matches!(
            read("x y"),
            Err(ParseError::TrailingContent { offset: 2 })
        ));
    }

    #[test]
    fn lex_errors_propagate() {
        assert!(matches!(
            read("(paper \"A4"),
            Err(ParseError::UnterminatedString { offset: 7 })
        ));
    }
}
