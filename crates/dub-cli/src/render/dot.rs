use std::collections::BTreeSet;
use std::io::{self, Write};

use dub_map::CalleeRecord;
use dub_syntax::CallGraph;

use super::sorted_callers;

/// Graphviz digraph. Nodes are keyed by name and labelled with their
/// signature; edges carry the call count.
pub(super) fn write_digraph<W: Write>(graph: &CallGraph, out: &mut W) -> io::Result<()> {
    let callers = sorted_callers(graph);
    let nodes: BTreeSet<&str> = callers
        .iter()
        .flat_map(|&(caller, record)| {
            std::iter::once(caller).chain(record.callees().iter().map(CalleeRecord::name))
        })
        .collect();

    writeln!(out, "digraph calls {{")?;
    writeln!(out, "    node [shape=box];")?;
    for name in nodes {
        writeln!(
            out,
            "    \"{}\" [label=\"{}\"];",
            quote(name),
            quote(graph.signature_of(name))
        )?;
    }
    for (caller, record) in callers {
        for callee in record.callees() {
            writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                quote(caller),
                quote(callee.name()),
                callee.count()
            )?;
        }
    }
    writeln!(out, "}}")
}

/// Escapes text for a double-quoted DOT identifier.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted
}
