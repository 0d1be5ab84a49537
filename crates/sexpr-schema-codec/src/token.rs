use logos::Logos;

/// Tokens produced by the S-expression lexer.
///
/// Whitespace, including newlines, is skipped automatically by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    /// A double-quoted atom, e.g. `"A4"`, with `\"` as the only escape.
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    /// A decimal numeral, optionally negative, e.g. `20` or `-0.5`.
    /// This must outrank `Symbol` so numerals keep their lexical class.
    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 3)]
    Number,

    /// A bare symbol: a maximal run of non-whitespace, non-parenthesis,
    /// non-quote characters.
    #[regex(r#"[^ \t\r\n\f()"]+"#)]
    Symbol,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Quoted => "quoted atom",
            Self::Number => "number",
            Self::Symbol => "symbol",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
