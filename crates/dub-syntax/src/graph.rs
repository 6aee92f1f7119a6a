//! Accumulates call edges and signatures across many source files.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use dub_map::{CallMap, SignatureMap};
use tracing::{debug, warn};

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::Parser;
use crate::walker::{CallSink, WalkSummary, walk_calls};

/// Call index and signature table fed by the syntax walker.
///
/// Files are indexed one after another into the same maps. One parser per
/// language is created on first use and reused for later files.
#[derive(Default)]
pub struct CallGraph {
    calls: CallMap,
    signatures: SignatureMap,
    parsers: HashMap<SupportedLanguage, Parser>,
    files_indexed: usize,
}

impl CallGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` as the language implied by `path` and indexes it.
    ///
    /// Syntax errors are logged and the recovered tree is still walked.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownLanguage`] when the extension of `path`
    /// is not supported, or a parser error from [`Parser`].
    pub fn index_source(
        &mut self,
        path: &Path,
        source: &str,
    ) -> Result<WalkSummary, SyntaxError> {
        let language = SupportedLanguage::from_path(path)
            .ok_or_else(|| SyntaxError::unknown_language(path.to_path_buf()))?;
        let summary = self.index_source_as(language, source)?;
        debug!(
            path = %path.display(),
            definitions = summary.definitions,
            calls = summary.calls,
            suppressed = summary.suppressed,
            "indexed file"
        );
        Ok(summary)
    }

    /// Parses `source` as `language` and indexes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser cannot be created or yields no tree.
    pub fn index_source_as(
        &mut self,
        language: SupportedLanguage,
        source: &str,
    ) -> Result<WalkSummary, SyntaxError> {
        let parser = match self.parsers.entry(language) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => slot.insert(Parser::new(language)?),
        };
        let parsed = parser.parse(source)?;
        if parsed.has_errors() {
            for error in parsed.errors() {
                warn!(
                    %language,
                    line = error.line,
                    column = error.column,
                    context = %error.context,
                    "{}",
                    error.message
                );
            }
        }
        let summary = walk_calls(&parsed, self);
        self.files_indexed = self.files_indexed.saturating_add(1);
        Ok(summary)
    }

    /// Returns the call index.
    #[must_use]
    pub const fn calls(&self) -> &CallMap {
        &self.calls
    }

    /// Returns the name to signature table.
    #[must_use]
    pub const fn signatures(&self) -> &SignatureMap {
        &self.signatures
    }

    /// Returns the display signature of `name`, or `name` itself when no
    /// definition or prototype was seen.
    #[must_use]
    pub fn signature_of<'a>(&'a self, name: &'a str) -> &'a str {
        self.signatures.get(name).map_or(name, String::as_str)
    }

    /// Returns how many sources were indexed.
    #[must_use]
    pub const fn files_indexed(&self) -> usize {
        self.files_indexed
    }

    /// Splits the graph into its call index and signature table.
    #[must_use]
    pub fn into_parts(self) -> (CallMap, SignatureMap) {
        (self.calls, self.signatures)
    }
}

impl CallSink for CallGraph {
    fn define(&mut self, name: &str, signature: &str) {
        // Last declaration seen wins.
        self.signatures.insert(name, signature.to_owned());
    }

    fn call(&mut self, caller: &str, callee: &str) {
        self.calls.record(caller, callee);
    }
}
