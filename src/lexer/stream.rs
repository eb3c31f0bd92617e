//! The token stream: lexemes from the splitter, classified in order.

use std::sync::{Arc, Mutex, PoisonError};

use super::split::{split, Lexemes};
use super::{Lexer, LexerStats, LexResult, Token};

/// Lazy sequence of the tokens in a line.
///
/// Yields `Err` for the first lexeme that does not classify, and nothing after it.
pub struct Tokens<'l, 'a> {
    lexer: &'l mut Lexer,
    lexemes: Lexemes<'a>,
    failed: bool,
}

impl<'l, 'a> Iterator for Tokens<'l, 'a> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let lexeme = self.lexemes.next()?;
        let result = self.lexer.classify(lexeme);
        self.failed = result.is_err();
        Some(result)
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}

impl Lexer {
    /// Tokenize a line, lazily.
    pub fn tokenize<'l, 'a>(&'l mut self, line: &'a str) -> Tokens<'l, 'a> {
        Tokens {
            lexer: self,
            lexemes: split(line),
            failed: false,
        }
    }

    /// Tokenize a whole line; any unclassifiable lexeme rejects the line.
    pub fn tokenize_line(&mut self, line: &str) -> LexResult<Vec<Token>> {
        self.tokenize(line).collect()
    }
}

/// A handle to one [`Lexer`], shareable across threads.
///
/// The lexer grows as it classifies, so every call holds the lock for the whole line.
#[derive(Clone, Default)]
pub struct SharedLexer {
    lexer: Arc<Mutex<Lexer>>,
}

impl SharedLexer {
    pub fn new(lexer: Lexer) -> Self {
        SharedLexer {
            lexer: Arc::new(Mutex::new(lexer)),
        }
    }

    pub fn tokenize_line(&self, line: &str) -> LexResult<Vec<Token>> {
        // A panic mid-classification leaves at most a fully-built node in the arena,
        // so a poisoned lock is still usable.
        let mut lexer = self.lexer.lock().unwrap_or_else(PoisonError::into_inner);
        lexer.tokenize_line(line)
    }

    pub fn stats(&self) -> LexerStats {
        self.lexer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{LexErr, TokenType};

    #[test]
    fn tokenize_expression() -> LexResult<()> {
        let mut lexer = Lexer::new();
        let output = lexer.tokenize_line("(define (f x) [list 'a \"b c\" 1.5 2i])")?;

        let want = &[
            Token::new(TokenType::LParen, "("),
            Token::new(TokenType::Name, "define"),
            Token::new(TokenType::LParen, "("),
            Token::new(TokenType::Name, "f"),
            Token::new(TokenType::Name, "x"),
            Token::new(TokenType::RParen, ")"),
            Token::new(TokenType::LBracket, "["),
            Token::new(TokenType::Name, "list"),
            Token::new(TokenType::Symbol, "a"),
            Token::new(TokenType::String, "b c"),
            Token::new(TokenType::Real, "1.5"),
            Token::new(TokenType::Imaginary, "2i"),
            Token::new(TokenType::RBracket, "]"),
            Token::new(TokenType::RParen, ")"),
        ];

        assert_eq!(output.len(), want.len());

        for ((i, got), want) in output.iter().enumerate().zip(want.iter()) {
            assert_eq!(got, want, "unexpected token in case {}", i);
        }
        Ok(())
    }

    #[test]
    fn single_delimiters() -> LexResult<()> {
        let mut lexer = Lexer::new();
        for (c, t) in crate::lexer::DELIMITERS {
            let output = lexer.tokenize_line(&c.to_string())?;
            assert_eq!(output, [Token::new(t, c.to_string())]);
        }
        Ok(())
    }

    #[test]
    fn stops_after_first_error() {
        let mut lexer = Lexer::new();
        let output: Vec<_> = lexer.tokenize("a 12. b \"c").collect();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0], Ok(Token::new(TokenType::Name, "a")));
        match &output[1] {
            Err(LexErr::Incomplete { lexeme, .. }) => assert_eq!(lexeme, "12."),
            other => panic!("expected incomplete error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_whole_line() {
        let mut lexer = Lexer::new();
        let err = lexer
            .tokenize_line("(print \"unterminated)")
            .expect_err("no error for unmatched end-quote");
        assert!(err.is_incomplete());
        assert_eq!(err.lexeme(), "\"unterminated)");
    }

    #[test]
    fn lexer_reused_across_lines() -> LexResult<()> {
        let mut lexer = Lexer::new();
        let first = lexer.tokenize_line("(+ 1 2)")?;
        let stats = lexer.stats();
        let second = lexer.tokenize_line("(+  1\t2 )")?;
        assert_eq!(first, second);
        assert_eq!(lexer.stats(), stats);
        Ok(())
    }

    #[test]
    fn shared_across_threads() {
        let shared = SharedLexer::default();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.tokenize_line(&format!("(f {i} \"s{i}\")")))
            })
            .collect();
        for handle in handles {
            let tokens = handle.join().unwrap().unwrap();
            assert_eq!(tokens.len(), 5);
        }
        // Four distinct numbers and strings, plus "(", "f", ")".
        assert_eq!(shared.stats().cached_lexemes, 11);
    }
}
