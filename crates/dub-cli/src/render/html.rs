use std::io::{self, Write};

use dub_syntax::CallGraph;

use super::sorted_callers;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const STYLE: &str = "\
ul.tree li { list-style-type: none; position: relative; }
ul.tree li ul { display: none; }
ul.tree li.open > ul { display: block; }
ul.tree li a { text-decoration: none; }
ul.tree li > a:not(:last-child):before { content: '+'; }
ul.tree li.open > a:not(:last-child):before { content: '-'; }
";

const SCRIPT: &str = "\
for (const link of document.querySelectorAll(\"ul.tree a:not(:last-child)\")) {
  link.addEventListener(\"click\", (event) => {
    const item = event.target.parentElement;
    if (item.classList.contains(\"open\")) {
      item.classList.remove(\"open\");
      for (const open of item.querySelectorAll(\":scope .open\")) {
        open.classList.remove(\"open\");
      }
    } else {
      item.classList.add(\"open\");
    }
    event.preventDefault();
  });
}
";

/// Standalone page with one expandable entry per caller.
pub(super) fn write_page<W: Write>(graph: &CallGraph, out: &mut W) -> io::Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"UTF-8\">")?;
    writeln!(out, "<title>dub {VERSION} callmap</title>")?;
    writeln!(out, "<style>\n{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "This file was generated by <i>dub {VERSION}</i>.<br>")?;
    write_tree(graph, out)?;
    writeln!(out, "<script type=\"text/javascript\">\n{SCRIPT}</script>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

/// The `ul.tree` list. Each caller anchor is the link target of every
/// callee entry that names it.
pub(super) fn write_tree<W: Write>(graph: &CallGraph, out: &mut W) -> io::Result<()> {
    writeln!(out, "<ul class=\"tree\">")?;
    for (caller, record) in sorted_callers(graph) {
        let signature = escape(graph.signature_of(caller));
        write!(out, "<li><a id=\"{signature}\" href=\"#\">{signature}</a><ul>")?;
        for callee in record.callees() {
            let target = escape(graph.signature_of(callee.name()));
            write!(
                out,
                "<li><a href=\"#{target}\" data-count=\"{}\">{target}</a></li>",
                callee.count()
            )?;
        }
        writeln!(out, "</ul></li>")?;
    }
    writeln!(out, "</ul>")
}

/// Escapes text for HTML element content and quoted attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
