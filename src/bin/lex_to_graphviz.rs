//! Render the lexer's automaton as Graphviz, after it has tokenized stdin.
//!
//! Usage:
//!
//! ```ignore
//! <input.lisp lex_to_graphviz | dot -T png >output.png
//! ```
//!
//! Set `LISPLEX_SAVE_GRAPH` to also keep a copy of the DOT source in a temporary file.

use std::io::{stdout, Write};

use lisplex::{render_automaton, repl_with, save_graph, Lexer};

pub fn main() -> std::io::Result<()> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut lexer = Lexer::new();
    repl_with(
        &mut lexer,
        &mut std::io::stdin().lock(),
        &mut std::io::sink(),
        &mut std::io::stderr().lock(),
    )?;

    let gv = render_automaton(lexer.automaton());
    if std::env::var_os("LISPLEX_SAVE_GRAPH").is_some() {
        save_graph(&gv)?;
    }
    stdout().write_all(&gv)
}
