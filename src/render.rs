use std::io::Write;
use std::path::PathBuf;

use dot_writer::Attributes;
use dot_writer::DotWriter;

use crate::lexer::automaton::{Automaton, StateId};
use crate::lexer::Marker;

fn node_for_state(state: StateId) -> String {
    format!("state{}", state.idx())
}

/// Escape a character for use inside a quoted record label.
fn escape_label(c: char) -> String {
    let mut out = String::new();
    for e in c.escape_default() {
        if matches!(e, '{' | '}' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(e);
    }
    out
}

/// Render the automaton's states and transitions into a Graphviz graph.
///
/// Terminal states are plain records, pending states rounded ones.
/// Edges are labeled with the character consumed.
pub fn render_automaton(automaton: &Automaton) -> Vec<u8> {
    let mut outbuf = Vec::new();
    {
        let mut writer = DotWriter::from(&mut outbuf);
        let mut graph = writer.digraph();
        graph.node_attributes().set_font("monospace");

        for (state, node) in automaton.states() {
            let mut gv_node = graph.node_named(node_for_state(state));
            let (shape, marker) = match node.marker {
                None => (dot_writer::Shape::Mrecord, "start".to_owned()),
                Some(m @ Marker::Pending(_)) => (dot_writer::Shape::Mrecord, m.to_string()),
                Some(m @ Marker::Token(_)) => (dot_writer::Shape::Record, m.to_string()),
            };
            gv_node.set_shape(shape);
            let display = node.display.map(escape_label).unwrap_or_default();
            gv_node.set_label(&format!("{{{}|{marker}|{display}}}", state.idx()));
        }

        let mut edges: Vec<_> = automaton.edges().collect();
        edges.sort();
        for (from, c, to) in edges {
            graph
                .edge(node_for_state(from), node_for_state(to))
                .attributes()
                .set_label(&escape_label(c));
        }
    }
    outbuf
}

/// Keep a copy of DOT source in a temporary file, and return its path.
pub fn save_graph(gv: &[u8]) -> std::io::Result<PathBuf> {
    let mut f = tempfile::NamedTempFile::new()?;
    f.write_all(gv)?;
    let (_, pathbuf) = f.keep()?;
    tracing::info!("DOT source in {}", pathbuf.display());
    Ok(pathbuf)
}
