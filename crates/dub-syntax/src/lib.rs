//! Tree-sitter front end for the dub call mapper.
//!
//! Source files are parsed with Tree-sitter and walked depth first. Each
//! function definition opens a caller context for its body, and every call
//! expression inside that body is reported as a (caller, callee) pair.
//! [`CallGraph`] collects those pairs into a [`dub_map::CallMap`] and keeps
//! each function's display signature in a [`dub_map::SignatureMap`].
//!
//! # Supported Languages
//!
//! - C (`.c`, `.h`)
//! - C++ (`.cpp`, `.cc`, `.cxx`, `.hpp`, `.hh`, `.hxx`)
//! - Rust (`.rs`)
//! - Python (`.py`, `.pyi`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use dub_syntax::CallGraph;
//!
//! let mut graph = CallGraph::new();
//! graph.index_source(
//!     Path::new("demo.c"),
//!     "int helper(int x) { return x; }\nint main(void) { return helper(1); }\n",
//! )?;
//!
//! let main = graph.calls().caller("main").map(|record| record.count_of("helper"));
//! assert_eq!(main, Some(Some(1)));
//! assert_eq!(graph.signature_of("helper"), "helper(int x)");
//! # Ok::<(), dub_syntax::SyntaxError>(())
//! ```
//!
//! Callees are identified by their spelling at the call site; overloads and
//! imports are not resolved.

mod error;
mod graph;
mod language;
mod parser;
mod rules;
mod walker;

pub use error::SyntaxError;
pub use graph::CallGraph;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{CONTEXT_CHARS, ParseResult, Parser, SyntaxErrorInfo};
pub use walker::{CallSink, WalkSummary, walk_calls};
