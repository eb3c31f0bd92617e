//! Classification of single lexemes.

use std::collections::HashMap;

use string_interner::{DefaultStringInterner, DefaultSymbol};

use super::automaton::{Automaton, AutomatonStats};
use super::token::{Marker, Token};
use super::{LexErr, LexResult};

/// The lexing engine: the automaton, plus a cache of lexemes already classified.
///
/// Both only grow. One `Lexer` is meant to be reused for every line in a session;
/// see [`SharedLexer`](super::SharedLexer) for sharing one across threads.
#[derive(Default)]
pub struct Lexer {
    automaton: Automaton,

    // Lexeme text is interned; the cache is keyed by the interned symbol.
    lexemes: DefaultStringInterner,
    cache: HashMap<DefaultSymbol, Token>,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct LexerStats {
    pub automaton: AutomatonStats,
    pub cached_lexemes: usize,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lexer over a custom-seeded automaton.
    pub fn with_automaton(automaton: Automaton) -> Self {
        Lexer {
            automaton,
            ..Default::default()
        }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn stats(&self) -> LexerStats {
        LexerStats {
            automaton: self.automaton.stats(),
            cached_lexemes: self.cache.len(),
        }
    }

    /// Classify one lexeme.
    ///
    /// The lexeme should be a single unit from the splitter;
    /// a delimiter in the middle of one is rejected.
    pub fn classify(&mut self, lexeme: &str) -> LexResult<Token> {
        if let Some(token) = self.lexemes.get(lexeme).and_then(|sym| self.cache.get(&sym)) {
            tracing::trace!("cached lexeme {:?}", lexeme);
            return Ok(token.clone());
        }

        let token = self.walk(lexeme)?;
        tracing::debug!("classified {:?} as {}", lexeme, token);
        let sym = self.lexemes.get_or_intern(lexeme);
        self.cache.insert(sym, token.clone());
        Ok(token)
    }

    fn walk(&mut self, lexeme: &str) -> LexResult<Token> {
        let mut state = Automaton::ROOT;
        let mut text = String::with_capacity(lexeme.len());
        for c in lexeme.chars() {
            state = self
                .automaton
                .advance(state, c)
                .map_err(|rejection| LexErr::Error {
                    lexeme: lexeme.to_owned(),
                    reason: rejection.reason(),
                })?;
            text.extend(self.automaton.node(state).display);
        }

        match self.automaton.node(state).marker {
            Some(Marker::Token(token_type)) => Ok(Token { token_type, text }),
            Some(Marker::Pending(pending)) => Err(LexErr::Incomplete {
                lexeme: lexeme.to_owned(),
                reason: pending.reason().to_owned(),
            }),
            None => Err(LexErr::Error {
                lexeme: lexeme.to_owned(),
                reason: "empty lexeme".to_owned(),
            }),
        }
    }
}
