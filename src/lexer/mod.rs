//! Lexical analysis for a Scheme-like expression language.
//!
//! A line of input goes through three stages:
//! -   The [splitter](split) breaks it into lexemes at whitespace and delimiters,
//!     keeping quoted strings whole.
//! -   The [`Lexer`] classifies each lexeme by walking it through the
//!     [automaton](automaton), which grows as new prefixes are seen.
//! -   The [token stream](stream) strings the two together, lazily.

use std::io::ErrorKind;

pub mod automaton;
mod classify;
pub mod split;
pub mod stream;
mod token;

pub use classify::{Lexer, LexerStats};
pub use stream::{SharedLexer, Tokens};
pub use token::{Marker, Pending, Token, TokenType, DELIMITERS};

/// Error type if a lexeme cannot be classified.
///
/// Like a reader, the lexer distinguishes input that is wrong from input that is unfinished:
/// `"abc` may become a string once more input arrives, `"\q"` never will.
/// Either way the whole line is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErr {
    /// The lexeme stopped in a pending state: unterminated string,
    /// lone apostrophe, or a number ending in `.`.
    Incomplete { lexeme: String, reason: String },
    /// The lexeme contains a transition the automaton refuses.
    Error { lexeme: String, reason: String },
}

impl std::fmt::Display for LexErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            LexErr::Error { lexeme, reason } => write!(f, "error in lexeme {lexeme:?}: {reason}"),
            LexErr::Incomplete { lexeme, reason } => {
                write!(f, "incomplete lexeme {lexeme:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for LexErr {}

impl LexErr {
    /// The offending lexeme, as it appeared in the input.
    pub fn lexeme(&self) -> &str {
        match self {
            LexErr::Error { lexeme, .. } | LexErr::Incomplete { lexeme, .. } => lexeme,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            LexErr::Error { reason, .. } | LexErr::Incomplete { reason, .. } => reason,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, LexErr::Incomplete { .. })
    }

    /// Add additional context to an error.
    pub fn annotate(self, more: impl AsRef<str>) -> Self {
        match self {
            LexErr::Error { lexeme, reason } => LexErr::Error {
                lexeme,
                reason: format!("{}: {}", more.as_ref(), reason),
            },
            LexErr::Incomplete { lexeme, reason } => LexErr::Incomplete {
                lexeme,
                reason: format!("{}: {}", more.as_ref(), reason),
            },
        }
    }
}

/// The main result type for this module.
pub type LexResult<T> = Result<T, LexErr>;

impl From<LexErr> for std::io::Error {
    fn from(value: LexErr) -> Self {
        let kind = if value.is_incomplete() {
            ErrorKind::UnexpectedEof
        } else {
            ErrorKind::InvalidInput
        };
        std::io::Error::new(kind, value)
    }
}

/// Tokenize a single line with a fresh lexer.
///
/// Callers tokenizing many lines should keep a [`Lexer`] around instead,
/// so the automaton and lexeme cache carry over.
pub fn tokenize(line: &str) -> LexResult<Vec<Token>> {
    Lexer::new().tokenize_line(line)
}
