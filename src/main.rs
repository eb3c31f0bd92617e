//! Tokenize lines from stdin.
//!
//! Each accepted line prints its tokens on stdout;
//! each rejected line prints the lexing error on stderr.
//!
//! ```ignore
//! <input.lisp lisplex
//! ```

fn main() -> std::io::Result<()> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    lisplex::repl(&mut stdin, &mut stdout, &mut stderr)
}
