use logos::Logos;

use crate::error::{ParseError, Span};
use crate::token::Token;

/// A token paired with its source span and text.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// Tokenizes source text into a sequence of spanned tokens.
///
/// # Errors
///
/// Returns `ParseError::UnterminatedString` when a `"` opens a quoted
/// atom that never closes, and `ParseError::InvalidToken` for any other
/// bytes the lexer cannot match.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut tokens = Vec::new();

    let lexer = Token::lexer(source);
    for (result, range) in lexer.spanned() {
        let span = Span::new(range.start, range.end);
        match result {
            Ok(token) => {
                tokens.push(SpannedToken {
                    token,
                    span,
                    text: source[range].to_string(),
                });
            }
            Err(()) => {
                // The only unmatched byte in this token set is a quote
                // that opens an atom running off the end of the input.
                if source[range.start..].starts_with('"') {
                    return Err(ParseError::UnterminatedString { offset: range.start });
                }
                return Err(ParseError::InvalidToken { span });
            }
        }
    }

    Ok(tokens)
}
