use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rendering of the aggregated call graph written to standard output.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Standalone page with a collapsible caller tree.
    #[default]
    Html,
    /// One `caller -> callee (count)` line per edge.
    Edges,
    /// Graphviz digraph with counts as edge labels.
    Dot,
}

/// Errors encountered while parsing an [`OutputFormat`] from text.
pub type OutputFormatParseError = strum::ParseError;
