//! Thin wrapper over the Tree-sitter parser.
//!
//! A [`Parser`] is bound to one [`SupportedLanguage`]. Parsing never fails on
//! malformed input: Tree-sitter recovers, and the damaged regions are
//! reported through [`ParseResult::errors`].

use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;

/// A syntax tree together with the text it was parsed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Returns the syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the parsed source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language the source was parsed as.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns whether recovery inserted any error or missing node.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Lists every error and missing node, in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut found = Vec::new();
        let mut pending = vec![self.tree.root_node()];
        while let Some(node) = pending.pop() {
            if node.is_error() || node.is_missing() {
                found.push(SyntaxErrorInfo::from_node(node, &self.source));
                continue;
            }
            if !node.has_error() {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            pending.extend(children.into_iter().rev());
        }
        found
    }

    /// Returns the source text covered by `node`.
    ///
    /// Yields an empty string when the node's range does not fall on
    /// character boundaries of the stored source.
    #[must_use]
    pub fn text_of(&self, node: tree_sitter::Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }
}

/// Location of a region that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the damaged region.
    pub byte_range: Range<usize>,
    /// One-based line of the first byte.
    pub line: u32,
    /// One-based column of the first byte.
    pub column: u32,
    /// First line of the damaged text, at most [`CONTEXT_CHARS`] characters.
    pub context: String,
    /// `syntax error` or `missing <kind>`.
    pub message: String,
}

/// Longest excerpt kept in [`SyntaxErrorInfo::context`].
pub const CONTEXT_CHARS: usize = 40;

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let context = source
            .get(byte_range.clone())
            .and_then(|text| text.lines().next())
            .map(|line| line.chars().take(CONTEXT_CHARS).collect())
            .unwrap_or_default();
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            String::from("syntax error")
        };
        Self {
            byte_range,
            line,
            column,
            context,
            message,
        }
    }
}

fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}

/// Tree-sitter parser configured for a single language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] if the grammar was built
    /// against an incompatible Tree-sitter ABI.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|err| SyntaxError::parser_init(language, err.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Returns the configured language.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] when Tree-sitter produces no tree
    /// at all, which only happens if parsing was cancelled.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parser returned no tree"))?;
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}
