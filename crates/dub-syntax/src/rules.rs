//! Grammar node kinds that matter for call extraction.

/// How a grammar spells the constructs the walker reacts to.
#[derive(Debug)]
pub(crate) struct LanguageRules {
    /// Kinds that define a function with a body.
    pub definitions: &'static [&'static str],
    /// Kinds that may declare a function without a body.
    pub prototypes: &'static [&'static str],
    /// Kinds of call sites.
    pub calls: &'static [&'static str],
    /// Whether names live in nested C or C++ declarators rather than a
    /// `name` field.
    pub c_declarators: bool,
}

impl LanguageRules {
    pub(crate) fn is_definition(&self, kind: &str) -> bool {
        self.definitions.contains(&kind)
    }

    pub(crate) fn is_prototype(&self, kind: &str) -> bool {
        self.prototypes.contains(&kind)
    }

    pub(crate) fn is_call(&self, kind: &str) -> bool {
        self.calls.contains(&kind)
    }
}

pub(crate) const C_RULES: LanguageRules = LanguageRules {
    definitions: &["function_definition"],
    prototypes: &["declaration"],
    calls: &["call_expression"],
    c_declarators: true,
};

pub(crate) const CPP_RULES: LanguageRules = LanguageRules {
    definitions: &["function_definition"],
    prototypes: &["declaration", "field_declaration"],
    calls: &["call_expression"],
    c_declarators: true,
};

pub(crate) const RUST_RULES: LanguageRules = LanguageRules {
    definitions: &["function_item"],
    prototypes: &["function_signature_item"],
    calls: &["call_expression"],
    c_declarators: false,
};

pub(crate) const PYTHON_RULES: LanguageRules = LanguageRules {
    definitions: &["function_definition"],
    prototypes: &[],
    calls: &["call"],
    c_declarators: false,
};

pub(crate) const TYPESCRIPT_RULES: LanguageRules = LanguageRules {
    definitions: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
    ],
    prototypes: &["function_signature"],
    calls: &["call_expression"],
    c_declarators: false,
};
