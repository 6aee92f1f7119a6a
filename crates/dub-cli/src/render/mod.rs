//! Writers for the aggregated call graph.
//!
//! Every renderer lists callers sorted by name and callees in the order
//! they were first called.

mod dot;
mod edges;
mod html;

use std::io::{self, Write};

use dub_config::OutputFormat;
use dub_map::CallerRecord;
use dub_syntax::CallGraph;

/// Writes `graph` to `out` as `format`.
pub(crate) fn render<W: Write>(format: OutputFormat, graph: &CallGraph, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Html => html::write_page(graph, out),
        OutputFormat::Edges => edges::write_edges(graph, out),
        OutputFormat::Dot => dot::write_digraph(graph, out),
    }
}

/// Callers of `graph` sorted by name.
fn sorted_callers(graph: &CallGraph) -> Vec<(&str, &CallerRecord)> {
    let mut callers: Vec<_> = graph.calls().callers().collect();
    callers.sort_unstable_by_key(|&(name, _)| name);
    callers
}
