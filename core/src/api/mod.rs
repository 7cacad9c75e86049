//! Public API for the formula language.
//!
//! Formulas are validated against a function whitelist (producing an AST
//! and the set of free variables) or evaluated directly over caller-supplied
//! series.
//!
//! # Example
//!
//! ```
//! use formula_core::api::{evaluate, validate};
//! use std::collections::HashMap;
//!
//! let formula = validate("norm(x) + y", ["norm"]).unwrap();
//! assert!(formula.free_variables().contains("y"));
//!
//! let variables: HashMap<&str, f64> = HashMap::new();
//! let result: f64 = evaluate("2 + 3 - 1", &variables).unwrap();
//! assert_eq!(result, 4.0);
//! ```

pub mod engine;
pub mod error;
pub mod formula;
pub mod options;

pub use engine::Engine;
pub use error::{Diagnostic, Error};
pub use formula::ValidatedFormula;
pub use options::{DEFAULT_FUNCTIONS, EngineOptions};

use crate::series::{Series, Variables};

/// Validates `source`, accepting only calls to `allowed_functions`.
pub fn validate<I, F>(source: &str, allowed_functions: I) -> Result<ValidatedFormula, Error>
where
    I: IntoIterator<Item = F>,
    F: Into<String>,
{
    Engine::new(EngineOptions::default().with_functions(allowed_functions)).validate(source)
}

/// Evaluates `source` over `variables` with default options.
pub fn evaluate<S, V>(source: &str, variables: &V) -> Result<S, Error>
where
    S: Series,
    V: Variables<S> + ?Sized,
{
    Engine::default().evaluate(source, variables)
}

/// Checks `source` against the grammar only.
pub fn check_syntax(source: &str) -> Result<(), Error> {
    Engine::default().check_syntax(source)
}
