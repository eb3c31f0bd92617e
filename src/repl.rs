//! Line-at-a-time tokenizer loop.

use std::io::{BufRead, Write};

use crate::lexer::Lexer;

/// Tokenize each line of `input`.
///
/// Tokens go to `output`, one per line, followed by a blank line.
/// Rejected lines are reported on `errors` and skipped.
pub fn repl(
    input: &mut impl BufRead,
    output: &mut impl Write,
    errors: &mut impl Write,
) -> std::io::Result<()> {
    repl_with(&mut Lexer::new(), input, output, errors)
}

/// As [`repl`], with a caller-provided lexer; its automaton keeps whatever the lines taught it.
pub fn repl_with(
    lexer: &mut Lexer,
    input: &mut impl BufRead,
    output: &mut impl Write,
    errors: &mut impl Write,
) -> std::io::Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match lexer.tokenize_line(&line) {
            Ok(tokens) => {
                for token in tokens {
                    writeln!(output, "{token}")?;
                }
                writeln!(output)?;
            }
            Err(err) => {
                // In useful output, lines are 1-indexed
                let err = err.annotate(format!("line {}", number + 1));
                tracing::debug!("rejected line: {}", err);
                writeln!(errors, "{err}")?;
            }
        }
    }
    tracing::debug!("lexer stats: {:?}", lexer.stats());
    Ok(())
}
