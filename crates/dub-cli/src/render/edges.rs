use std::io::{self, Write};

use dub_syntax::CallGraph;

use super::sorted_callers;

/// One `caller -> callee (count)` line per distinct pair.
pub(super) fn write_edges<W: Write>(graph: &CallGraph, out: &mut W) -> io::Result<()> {
    for (caller, record) in sorted_callers(graph) {
        for callee in record.callees() {
            writeln!(out, "{caller} -> {} ({})", callee.name(), callee.count())?;
        }
    }
    Ok(())
}
