//! The character-transition automaton.
//!
//! The automaton is a tree of states, one per distinct prefix ever classified.
//! States live in an arena (a `Vec`) and are addressed by [`StateId`];
//! transitions are a table from (state, character) to the child state.
//!
//! The tree starts out with only the seed words (the delimiters, by default).
//! Any transition that is missing is synthesized from the parent's marker and
//! the incoming character, then kept: the automaton only ever grows.

use std::collections::HashMap;

use super::token::{Marker, Pending, TokenType, DELIMITERS};

/// Index of a state in the automaton's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn idx(self) -> usize {
        self.0
    }
}

/// A state of the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The character consumed to reach this state; `None` for the root.
    pub via: Option<char>,
    /// What to append to the resolved text when entering this state.
    /// `None` for characters that are syntax, not content (quotes, apostrophe, backslash).
    pub display: Option<char>,
    /// Classification of the prefix ending here; `None` only for the root.
    pub marker: Option<Marker>,
}

/// Why the automaton refused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The parent state does not accept any further characters.
    UnknownTransition,
    /// A backslash inside a string was followed by something other than `"`, `n`, `t`, `\`.
    UnsupportedEscape(char),
}

impl Rejection {
    pub fn reason(self) -> String {
        match self {
            Rejection::UnknownTransition => "unknown transition".to_owned(),
            Rejection::UnsupportedEscape(c) => format!("unsupported escape \\{}", c.escape_default()),
        }
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct AutomatonStats {
    pub nodes: usize,
    pub transitions: usize,
}

pub struct Automaton {
    nodes: Vec<Node>,
    transitions: HashMap<(StateId, char), StateId>,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// The root state: nothing consumed yet.
    pub const ROOT: StateId = StateId(0);

    /// An automaton seeded with the single-character delimiters.
    pub fn new() -> Self {
        Self::with_words(DELIMITERS.iter().map(|(c, t)| (c.to_string(), *t)))
    }

    /// An automaton seeded with a table of words.
    ///
    /// Each word is walked from the root, deriving states as needed;
    /// its final state is then marked with the word's token type.
    pub fn with_words<S: AsRef<str>>(words: impl IntoIterator<Item = (S, TokenType)>) -> Self {
        let mut automaton = Automaton {
            nodes: vec![Node {
                via: None,
                display: None,
                marker: None,
            }],
            transitions: HashMap::new(),
        };
        for (word, token_type) in words {
            let mut state = Self::ROOT;
            for c in word.as_ref().chars() {
                state = match automaton.advance(state, c) {
                    Ok(next) => next,
                    // Seeds may extend each other, e.g. "(" and "()".
                    Err(_) => {
                        let marker = automaton.nodes[state.0].marker;
                        automaton.insert(
                            state,
                            c,
                            Node {
                                via: Some(c),
                                display: Some(c),
                                marker,
                            },
                        )
                    }
                };
            }
            if state != Self::ROOT {
                automaton.nodes[state.0].marker = Some(token_type.into());
            }
        }
        automaton
    }

    pub fn node(&self, state: StateId) -> &Node {
        &self.nodes[state.0]
    }

    /// The existing transition from `state` on `c`, without synthesizing one.
    pub fn get(&self, state: StateId, c: char) -> Option<StateId> {
        self.transitions.get(&(state, c)).copied()
    }

    /// Follow the transition from `state` on `c`, creating it if it does not exist yet.
    pub fn advance(&mut self, state: StateId, c: char) -> Result<StateId, Rejection> {
        if let Some(next) = self.get(state, c) {
            return Ok(next);
        }
        let node = derive(self.nodes[state.0].marker, c)?;
        tracing::trace!(
            "new state {} from {} on {:?}: {:?}",
            self.nodes.len(),
            state.0,
            c,
            node.marker
        );
        Ok(self.insert(state, c, node))
    }

    /// All states, with their ids, in creation order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (StateId(i), n))
    }

    /// All transitions, as (from, character, to).
    pub fn edges(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(from, c), &to)| (from, c, to))
    }

    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            nodes: self.nodes.len(),
            transitions: self.transitions.len(),
        }
    }

    fn insert(&mut self, parent: StateId, c: char, node: Node) -> StateId {
        let id = StateId(self.nodes.len());
        self.nodes.push(node);
        self.transitions.insert((parent, c), id);
        id
    }
}

/// Build the state reached from a state marked `parent` on character `c`.
fn derive(parent: Option<Marker>, c: char) -> Result<Node, Rejection> {
    use Marker::Pending as P;
    use Marker::Token as T;

    let node = |marker: Option<Marker>, display: Option<char>| Node {
        via: Some(c),
        display,
        marker,
    };
    // Unless a rule below says otherwise, the character is content
    // and the classification carries over.
    let inherit = node(parent, Some(c));

    let derived = match (parent, c) {
        (Some(T(t)), _) if t.is_delimiter() => return Err(Rejection::UnknownTransition),

        // Strings.
        (Some(P(Pending::StringEscape)), _) => {
            let expanded = match c {
                '"' => '"',
                'n' => '\n',
                't' => '\t',
                '\\' => '\\',
                _ => return Err(Rejection::UnsupportedEscape(c)),
            };
            node(Some(Pending::UnmatchedString.into()), Some(expanded))
        }
        (None, '"') => node(Some(Pending::UnmatchedString.into()), None),
        (Some(P(Pending::UnmatchedString)), '"') => node(Some(TokenType::String.into()), None),
        (Some(P(Pending::UnmatchedString)), '\\') => node(Some(Pending::StringEscape.into()), None),

        // Symbols: the first character after the apostrophe completes one, whatever it is.
        (None, '\'') => node(Some(Pending::UnfinishedSymbol.into()), None),
        (Some(P(Pending::UnfinishedSymbol)), _) => node(Some(TokenType::Symbol.into()), Some(c)),

        // Numbers.
        (None, '0'..='9') => node(Some(TokenType::Number.into()), Some(c)),
        (Some(P(Pending::DecimalPoint)), '0'..='9') => node(Some(TokenType::Real.into()), Some(c)),
        (Some(T(TokenType::Number | TokenType::Real)), '0'..='9') => inherit,
        (Some(T(TokenType::Number | TokenType::Real)), 'i') => {
            node(Some(TokenType::Imaginary.into()), Some(c))
        }
        (Some(T(TokenType::Number)), '.') => node(Some(Pending::DecimalPoint.into()), Some(c)),
        (None | Some(P(Pending::DecimalPoint)), _)
        | (Some(T(TokenType::Number | TokenType::Real | TokenType::Imaginary)), _) => {
            node(Some(TokenType::Name.into()), Some(c))
        }

        _ => inherit,
    };
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(automaton: &mut Automaton, s: &str) -> Result<StateId, Rejection> {
        s.chars()
            .try_fold(Automaton::ROOT, |state, c| automaton.advance(state, c))
    }

    fn marker(automaton: &mut Automaton, s: &str) -> Option<Marker> {
        let state = walk(automaton, s).unwrap();
        automaton.node(state).marker
    }

    #[test]
    fn seeded_delimiters() {
        let automaton = Automaton::new();
        assert_eq!(automaton.stats().nodes, 5);
        for (c, t) in DELIMITERS {
            let state = automaton.get(Automaton::ROOT, c).expect("missing seed");
            assert_eq!(automaton.node(state).marker, Some(Marker::Token(t)));
            assert_eq!(automaton.node(state).display, Some(c));
        }
    }

    #[test]
    fn delimiters_are_not_extended() {
        let mut automaton = Automaton::new();
        let before = automaton.stats();
        assert_eq!(walk(&mut automaton, "(a"), Err(Rejection::UnknownTransition));
        assert_eq!(automaton.stats(), before);
    }

    #[test]
    fn markers() {
        let mut automaton = Automaton::new();
        let cases: &[(&str, Marker)] = &[
            ("a", TokenType::Name.into()),
            ("+", TokenType::Name.into()),
            ("1", TokenType::Number.into()),
            ("123", TokenType::Number.into()),
            ("1.", Pending::DecimalPoint.into()),
            ("1.5", TokenType::Real.into()),
            ("1.55", TokenType::Real.into()),
            ("1i", TokenType::Imaginary.into()),
            ("1.5i", TokenType::Imaginary.into()),
            ("1.5i2", TokenType::Name.into()),
            ("1x", TokenType::Name.into()),
            ("1.x", TokenType::Name.into()),
            ("1.5.", TokenType::Name.into()),
            (".5", TokenType::Name.into()),
            ("\"", Pending::UnmatchedString.into()),
            ("\"a b", Pending::UnmatchedString.into()),
            ("\"a\\", Pending::StringEscape.into()),
            ("\"a\\n", Pending::UnmatchedString.into()),
            ("\"a\"", TokenType::String.into()),
            ("'", Pending::UnfinishedSymbol.into()),
            ("'a", TokenType::Symbol.into()),
            ("'abc", TokenType::Symbol.into()),
            ("''", TokenType::Symbol.into()),
            ("'\"", TokenType::Symbol.into()),
            ("'(", TokenType::Symbol.into()),
            ("1'", TokenType::Name.into()),
            ("1\"", TokenType::Name.into()),
            ("3.14'", TokenType::Name.into()),
            ("3.14\"", TokenType::Name.into()),
            ("1.'", TokenType::Name.into()),
            ("2i'", TokenType::Name.into()),
            ("\"a\"'", TokenType::String.into()),
            ("\"a 'b'\"", TokenType::String.into()),
            ("a'b", TokenType::Name.into()),
            ("a\"b", TokenType::Name.into()),
        ];
        for (i, (input, want)) in cases.iter().enumerate() {
            let got = marker(&mut automaton, input);
            assert_eq!(got, Some(*want), "unexpected marker in case {} ({:?})", i, input);
        }
    }

    #[test]
    fn escapes_display_expanded() {
        let mut automaton = Automaton::new();
        for (escape, want) in [('"', '"'), ('n', '\n'), ('t', '\t'), ('\\', '\\')] {
            let input = format!("\"\\{escape}");
            let state = walk(&mut automaton, &input).unwrap();
            let node = automaton.node(state);
            assert_eq!(node.display, Some(want));
            assert_eq!(node.via, Some(escape));
            assert_eq!(node.marker, Some(Pending::UnmatchedString.into()));
        }
    }

    #[test]
    fn unsupported_escape() {
        let mut automaton = Automaton::new();
        assert_eq!(
            walk(&mut automaton, "\"\\q"),
            Err(Rejection::UnsupportedEscape('q'))
        );
    }

    #[test]
    fn transitions_are_reused() {
        let mut automaton = Automaton::new();
        let first = walk(&mut automaton, "abc").unwrap();
        let stats = automaton.stats();
        let second = walk(&mut automaton, "abc").unwrap();
        assert_eq!(first, second);
        assert_eq!(automaton.stats(), stats);
        assert_eq!(stats.nodes, stats.transitions + 1);
    }

    #[test]
    fn custom_words() {
        let mut automaton = Automaton::with_words([("nil", TokenType::Symbol)]);
        assert_eq!(marker(&mut automaton, "nil"), Some(TokenType::Symbol.into()));
        assert_eq!(marker(&mut automaton, "ni"), Some(TokenType::Name.into()));
        assert_eq!(marker(&mut automaton, "nil?"), Some(TokenType::Symbol.into()));
        // No delimiters in this table: "(" is just a name.
        assert_eq!(marker(&mut automaton, "("), Some(TokenType::Name.into()));
    }
}
