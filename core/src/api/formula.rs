//! Result of a successful validation.

use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ast::Sum;

/// A formula that parsed, used only whitelisted functions, and is ready to
/// be stored or evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedFormula {
    source: String,
    ast: Sum,
    free_variables: BTreeSet<String>,
}

impl ValidatedFormula {
    pub(crate) fn new(source: &str, ast: Sum, free_variables: BTreeSet<String>) -> Self {
        Self {
            source: source.to_string(),
            ast,
            free_variables,
        }
    }

    /// The formula text as it was validated.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Sum {
        &self.ast
    }

    /// Every variable name the caller must supply to evaluate the formula.
    pub fn free_variables(&self) -> &BTreeSet<String> {
        &self.free_variables
    }

    pub fn into_parts(self) -> (Sum, BTreeSet<String>) {
        (self.ast, self.free_variables)
    }
}

/// Renders the normalized formula, not the original source.
impl fmt::Display for ValidatedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ast)
    }
}
