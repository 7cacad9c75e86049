//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::parser::DEFAULT_MAX_PARSE_DEPTH;

/// Function names whitelisted when no other set is configured.
pub const DEFAULT_FUNCTIONS: &[&str] = &["norm"];

/// Configuration shared by every call made through an [`Engine`](super::Engine).
///
/// Deserializing fills missing fields from [`EngineOptions::default`], so a
/// host can keep only the overrides in its own configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum nesting of parentheses and function arguments.
    pub max_depth: usize,

    /// Function names validation accepts.
    pub functions: BTreeSet<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_PARSE_DEPTH,
            functions: DEFAULT_FUNCTIONS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl EngineOptions {
    /// Replaces the function whitelist.
    pub fn with_functions<I, F>(mut self, functions: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.max_depth, 100);
        assert_eq!(options.functions, BTreeSet::from(["norm".to_string()]));
    }

    #[test]
    fn test_builders() {
        let options = EngineOptions::default()
            .with_functions(["max", "min"])
            .with_max_depth(8);
        assert_eq!(options.max_depth, 8);
        assert!(options.functions.contains("min"));
        assert!(!options.functions.contains("norm"));
    }
}
