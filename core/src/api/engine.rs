//! The formula engine.

use super::{EngineOptions, Error, ValidatedFormula};
use crate::parser;
use crate::semantics::{EvaluationSemantics, SyntaxSemantics, ValidationSemantics};
use crate::series::{Series, Variables};

/// Validates and evaluates formulas under one configuration.
///
/// The engine holds no per-call state: every call builds its own semantics
/// instance, so one engine can be shared across threads.
///
/// # Example
///
/// ```
/// use formula_core::{Engine, EngineOptions};
/// use std::collections::HashMap;
///
/// let engine = Engine::new(EngineOptions::default());
///
/// let formula = engine.validate("norm(gdp) / population").unwrap();
/// assert_eq!(formula.free_variables().len(), 2);
///
/// let variables = HashMap::from([("a", 6.0), ("b", 2.0), ("c", 3.0)]);
/// let result: f64 = engine.evaluate("a * b / c", &variables).unwrap();
/// assert_eq!(result, 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Checks that `source` matches the grammar, without a function whitelist.
    pub fn check_syntax(&self, source: &str) -> Result<(), Error> {
        let mut semantics = SyntaxSemantics;
        parser::parse_with_max_depth(source, &mut semantics, self.options.max_depth)
    }

    /// Parses `source` into an AST, rejecting functions outside the
    /// whitelist, and reports the free variables it references.
    pub fn validate(&self, source: &str) -> Result<ValidatedFormula, Error> {
        let mut semantics = ValidationSemantics::new(&self.options.functions);
        let result = parser::parse_with_max_depth(source, &mut semantics, self.options.max_depth);
        match result {
            Ok(ast) => {
                let free_variables = semantics.into_free_variables();
                tracing::debug!(
                    formula = source,
                    free_variables = free_variables.len(),
                    "validated formula"
                );
                Ok(ValidatedFormula::new(source, ast, free_variables))
            }
            Err(e) => {
                tracing::debug!(formula = source, error = %e, "formula failed validation");
                Err(e)
            }
        }
    }

    /// Computes `source` over the series in `variables`.
    ///
    /// Fails on function applications, which have no numeric meaning here.
    pub fn evaluate<S, V>(&self, source: &str, variables: &V) -> Result<S, Error>
    where
        S: Series,
        V: Variables<S> + ?Sized,
    {
        let mut semantics = EvaluationSemantics::new(variables);
        let result = parser::parse_with_max_depth(source, &mut semantics, self.options.max_depth);
        if let Err(e) = &result {
            tracing::debug!(formula = source, error = %e, "formula failed evaluation");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_validate_uses_configured_functions() {
        init_test_logging();
        let engine = Engine::new(EngineOptions::default().with_functions(["avg"]));
        assert!(engine.validate("avg(x)").is_ok());
        assert!(matches!(
            engine.validate("norm(x)"),
            Err(Error::UnknownFunction { name, .. }) if name == "norm"
        ));
    }

    #[test]
    fn test_validate_reports_free_variables() {
        let engine = Engine::default();
        let formula = engine.validate("norm(a) * b - a / 2").unwrap();
        assert_eq!(
            formula.free_variables(),
            &BTreeSet::from(["a".to_string(), "b".to_string()])
        );
        assert_eq!(formula.source(), "norm(a) * b - a / 2");
        assert_eq!(formula.to_string(), "norm(a) * b - a / 2.0");
    }

    #[test]
    fn test_free_variables_do_not_leak_between_calls() {
        let engine = Engine::default();
        engine.validate("a + b").unwrap();
        let formula = engine.validate("c").unwrap();
        assert_eq!(
            formula.free_variables(),
            &BTreeSet::from(["c".to_string()])
        );
    }

    #[test]
    fn test_check_syntax_ignores_whitelist() {
        let engine = Engine::default();
        assert!(engine.check_syntax("anything(x, y)").is_ok());
        assert!(engine.check_syntax("x +").is_err());
    }

    #[test]
    fn test_max_depth_is_configurable() {
        let engine = Engine::new(EngineOptions::default().with_max_depth(2));
        assert!(engine.check_syntax("(x)").is_ok());
        assert!(matches!(
            engine.check_syntax("((x))"),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn test_evaluate_with_btree_map() {
        init_test_logging();
        let engine = Engine::default();
        let variables = BTreeMap::from([("x".to_string(), 5.0)]);
        let result: Result<f64, _> = engine.evaluate("x / 0", &variables);
        assert!(matches!(result, Err(Error::DivisionByZero { .. })));
    }
}
