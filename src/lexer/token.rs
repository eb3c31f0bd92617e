//! Token types produced by the lexer.

use std::fmt;

/// The classification of a finished lexeme.
///
/// Only terminal classifications appear here.
/// States that are valid partway through a lexeme, but not at its end,
/// are [`Pending`] markers and never reach a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenType {
    /// Any run of non-reserved, non-whitespace characters.
    Name,
    /// An apostrophe followed by a name.
    Symbol,
    /// Characters enclosed in `"`.
    String,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// An integer, e.g. `42`.
    Number,
    /// A decimal, e.g. `3.14`.
    Real,
    /// A number or decimal with a trailing `i`, e.g. `2i` or `3.14i`.
    Imaginary,
}

/// Characters that split lexemes and form tokens of their own.
pub const DELIMITERS: [(char, TokenType); 4] = [
    ('(', TokenType::LParen),
    (')', TokenType::RParen),
    ('[', TokenType::LBracket),
    (']', TokenType::RBracket),
];

impl TokenType {
    /// The bracket type for a delimiter character, if it is one.
    pub fn from_delimiter(c: char) -> Option<TokenType> {
        DELIMITERS
            .iter()
            .find(|(d, _)| *d == c)
            .map(|(_, token_type)| *token_type)
    }

    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            TokenType::LParen | TokenType::RParen | TokenType::LBracket | TokenType::RBracket
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Intermediate states of the automaton.
///
/// Reaching the end of a lexeme in one of these states means the lexeme is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pending {
    /// Inside a string, waiting for the closing quote.
    UnmatchedString,
    /// Inside a string, right after a backslash.
    StringEscape,
    /// After a leading apostrophe, waiting for the symbol's name.
    UnfinishedSymbol,
    /// After the `.` of a number, waiting for the fractional digits.
    DecimalPoint,
}

impl Pending {
    /// Human-readable description of what was left unfinished.
    pub fn reason(self) -> &'static str {
        match self {
            Pending::UnmatchedString | Pending::StringEscape => "unterminated string",
            Pending::UnfinishedSymbol => "unfinished symbol",
            Pending::DecimalPoint => "dangling decimal point",
        }
    }
}

/// The classification held by an automaton node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Token(TokenType),
    Pending(Pending),
}

impl From<TokenType> for Marker {
    fn from(value: TokenType) -> Self {
        Marker::Token(value)
    }
}

impl From<Pending> for Marker {
    fn from(value: Pending) -> Self {
        Marker::Pending(value)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Token(t) => write!(f, "{t}"),
            Marker::Pending(p) => write!(f, "{p:?}"),
        }
    }
}

/// A classified lexeme.
///
/// `text` is the resolved value: escapes expanded, and the quotes of a string
/// or the apostrophe of a symbol removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>) -> Self {
        Token {
            token_type,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.token_type, self.text)
    }
}
