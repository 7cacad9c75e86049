//! Formula - A small arithmetic language for metrics
//!
//! # Overview
//!
//! A formula combines named series with `+`, `-`, `*`, `/`, numeric
//! constants, parentheses and calls to whitelisted functions:
//!
//! ```text
//! norm(errors) / (requests + 1) - 0.5 * baseline
//! ```
//!
//! Formulas go through one of two passes over the same grammar:
//!
//! 1. **Validation** (`validate`): checks the function whitelist and
//!    returns the AST together with every free variable the formula uses.
//! 2. **Evaluation** (`evaluate`): reduces the formula over caller-supplied
//!    series. Sums are correctly rounded, so their result does not depend
//!    on the order of the addends.
//!
//! # Quick Start
//!
//! ```
//! use formula::{evaluate, validate};
//! use std::collections::HashMap;
//!
//! let formula = validate("hits / (hits + misses)", ["norm"]).unwrap();
//! assert_eq!(formula.free_variables().len(), 2);
//!
//! let variables = HashMap::from([("hits", 3.0), ("misses", 1.0)]);
//! let ratio: f64 = evaluate(formula.source(), &variables).unwrap();
//! assert_eq!(ratio, 0.75);
//! ```
//!
//! # Series
//!
//! Evaluation is generic over [`Series`]. `f64` evaluates a single sample;
//! [`Column`] evaluates many samples at once and broadcasts constants:
//!
//! ```
//! use formula::{Column, evaluate};
//! use std::collections::HashMap;
//!
//! let variables = HashMap::from([("x", Column::from(vec![1.0, 2.0, 3.0]))]);
//! let doubled: Column = evaluate("x * 2", &variables).unwrap();
//! assert_eq!(doubled, Column::from(vec![2.0, 4.0, 6.0]));
//! ```

// Error rendering utilities
pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_error, render_error_to};

// Re-export public API from formula_core
pub use formula_core::api::{
    DEFAULT_FUNCTIONS, Diagnostic, Engine, EngineOptions, Error, ValidatedFormula, check_syntax,
    evaluate, validate,
};

pub use formula_core::ast::{self, Application, Factor, Product, Sum};
pub use formula_core::series::{Column, Series, SeriesError, Variables, fsum};
