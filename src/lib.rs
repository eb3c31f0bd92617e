//! Lexer for a Scheme-like expression language.
//!
//! Lines of input become streams of [`Token`](lexer::Token)s,
//! classified by a character automaton that grows as it sees new input.

pub mod lexer;

mod repl;
pub use repl::{repl, repl_with};

pub use lexer::{tokenize, LexErr, LexResult, Lexer, SharedLexer, Token, TokenType};

#[cfg(feature = "render")]
mod render;
#[cfg(feature = "render")]
pub use render::{render_automaton, save_graph};
