//! Splitting a line into lexemes.

use std::str::CharIndices;

use super::token::TokenType;

/// Iterator over the lexemes of a line, as slices of it.
///
/// Outside a string, whitespace (any Unicode whitespace) separates lexemes and is dropped,
/// and each delimiter is a lexeme of its own.
/// Inside a string, everything up to the unescaped closing quote belongs to the lexeme.
///
/// A string may start partway through a lexeme (`ab"c d"`);
/// the whole run is a single lexeme, and the classifier decides what it is.
pub struct Lexemes<'a> {
    input: &'a str,
    chars: CharIndices<'a>,

    /// A delimiter found while finishing the previous lexeme, to be yielded next.
    delimiter: Option<&'a str>,
    in_string: bool,
    escaped: bool,
}

/// Split the line into lexemes.
pub fn split(input: &str) -> Lexemes<'_> {
    Lexemes {
        input,
        chars: input.char_indices(),
        delimiter: None,
        in_string: false,
        escaped: false,
    }
}

impl<'a> Iterator for Lexemes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(delimiter) = self.delimiter.take() {
            return Some(delimiter);
        }

        let mut start = None;
        for (i, ch) in self.chars.by_ref() {
            if self.in_string {
                // Mini-language for strings:
                // a backslash escapes exactly the next character,
                // an unescaped double-quote terminates the string.
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if ch == '"' {
                    self.in_string = false;
                }
                continue;
            }

            if ch.is_whitespace() {
                if let Some(start) = start {
                    return Some(&self.input[start..i]);
                }
            } else if TokenType::from_delimiter(ch).is_some() {
                let delimiter = &self.input[i..i + ch.len_utf8()];
                match start {
                    Some(start) => {
                        self.delimiter = Some(delimiter);
                        return Some(&self.input[start..i]);
                    }
                    None => return Some(delimiter),
                }
            } else {
                start.get_or_insert(i);
                if ch == '"' {
                    self.in_string = true;
                }
            }
        }

        // End of input; an unterminated string runs to the end.
        start.map(|start| &self.input[start..])
    }
}
