//! Depth-first extraction of definitions and call sites.
//!
//! The walker never recurses: pending nodes sit on an explicit stack, each
//! tagged with the function whose body it belongs to. Children are pushed in
//! reverse so that events reach the sink in source order.

use tree_sitter::Node;

use crate::parser::ParseResult;
use crate::rules::LanguageRules;

/// Receives the events produced by [`walk_calls`].
pub trait CallSink {
    /// A function named `name` was defined or declared with `signature`.
    fn define(&mut self, name: &str, signature: &str);

    /// The body of `caller` contains a call to `callee`.
    fn call(&mut self, caller: &str, callee: &str);
}

/// Event totals of one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Definitions and prototypes reported to the sink.
    pub definitions: usize,
    /// Calls reported to the sink.
    pub calls: usize,
    /// Named calls dropped because no function encloses them.
    pub suppressed: usize,
}

struct Frame<'tree> {
    node: Node<'tree>,
    caller: Option<usize>,
}

/// Walks `parsed` and reports every definition and attributed call to
/// `sink`.
///
/// A function definition becomes the caller for every call in its subtree
/// until a nested definition takes over for its own subtree. Calls outside
/// any definition are counted in [`WalkSummary::suppressed`] and not
/// reported. Prototypes are reported through [`CallSink::define`] but open
/// no caller context.
pub fn walk_calls<S: CallSink + ?Sized>(parsed: &ParseResult, sink: &mut S) -> WalkSummary {
    let rules = parsed.language().rules();
    let mut summary = WalkSummary::default();
    let mut callers: Vec<String> = Vec::new();
    let mut stack = vec![Frame {
        node: parsed.root_node(),
        caller: None,
    }];

    while let Some(Frame { node, mut caller }) = stack.pop() {
        let kind = node.kind();
        if rules.is_definition(kind) {
            if let Some(found) = definition(parsed, rules, node) {
                sink.define(&found.name, &found.signature);
                summary.definitions += 1;
                caller = Some(callers.len());
                callers.push(found.name);
            }
        } else if rules.is_prototype(kind) {
            for found in prototypes(parsed, rules, node) {
                sink.define(&found.name, &found.signature);
                summary.definitions += 1;
            }
        } else if rules.is_call(kind) {
            let callee = node
                .child_by_field_name("function")
                .and_then(|target| callee_name(parsed, target));
            match (caller.and_then(|index| callers.get(index)), callee) {
                (Some(name), Some(callee_label)) => {
                    sink.call(name, callee_label);
                    summary.calls += 1;
                }
                (None, Some(_)) => summary.suppressed += 1,
                (_, None) => {}
            }
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        stack.extend(
            children
                .into_iter()
                .rev()
                .map(|child| Frame { node: child, caller }),
        );
    }

    summary
}

struct Definition {
    name: String,
    signature: String,
}

fn definition(parsed: &ParseResult, rules: &LanguageRules, node: Node<'_>) -> Option<Definition> {
    if rules.c_declarators {
        return node
            .child_by_field_name("declarator")
            .and_then(|declarator| c_function(parsed, declarator));
    }
    named_function(parsed, node)
}

fn prototypes(parsed: &ParseResult, rules: &LanguageRules, node: Node<'_>) -> Vec<Definition> {
    if !rules.c_declarators {
        return named_function(parsed, node).into_iter().collect();
    }
    let mut cursor = node.walk();
    node.children_by_field_name("declarator", &mut cursor)
        .filter_map(|declarator| c_function(parsed, declarator))
        .collect()
}

/// Finds the function declarator under pointer, parenthesis and attribute
/// wrappers and reads the name it declares.
///
/// A declarator whose own name is another declarator (a function returning a
/// function pointer) is looked through until the declared name is reached.
fn c_function(parsed: &ParseResult, declarator: Node<'_>) -> Option<Definition> {
    let mut current = declarator;
    loop {
        if current.kind() == "function_declarator" {
            let inner = current.child_by_field_name("declarator")?;
            if let Some(name) = declared_name(inner) {
                return Some(Definition {
                    name: parsed.text_of(name).to_owned(),
                    signature: collapse_whitespace(parsed.text_of(current)),
                });
            }
            current = inner;
        } else {
            current = current
                .child_by_field_name("declarator")
                .or_else(|| current.named_child(0))?;
        }
    }
}

/// Last segment of a declarator name; `Table::insert` declares `insert`.
fn declared_name(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "identifier" | "field_identifier" | "destructor_name" | "operator_name" => Some(node),
        "qualified_identifier" | "template_function" => {
            declared_name(node.child_by_field_name("name")?)
        }
        _ => None,
    }
}

fn named_function(parsed: &ParseResult, node: Node<'_>) -> Option<Definition> {
    let name = parsed.text_of(node.child_by_field_name("name")?);
    if name.is_empty() {
        return None;
    }
    let parameters = node
        .child_by_field_name("parameters")
        .map_or("", |params| parsed.text_of(params));
    Some(Definition {
        name: name.to_owned(),
        signature: collapse_whitespace(&format!("{name}{parameters}")),
    })
}

/// Spelled name of the function being called, taking the last segment of
/// paths and member accesses.
fn callee_name<'a>(parsed: &'a ParseResult, node: Node<'_>) -> Option<&'a str> {
    let field = match node.kind() {
        "identifier" | "field_identifier" | "property_identifier" => {
            let text = parsed.text_of(node);
            return (!text.is_empty()).then_some(text);
        }
        "scoped_identifier" | "qualified_identifier" | "template_function"
        | "template_method" => "name",
        "field_expression" => "field",
        "member_expression" => "property",
        "attribute" => "attribute",
        "generic_function" => "function",
        _ => return None,
    };
    callee_name(parsed, node.child_by_field_name(field)?)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
