//! Core of the formula language: grammar, AST, semantics passes and the
//! series abstraction that evaluation reduces to.

pub mod api;
pub mod ast;
pub mod parser;
pub mod semantics;
pub mod series;

pub use api::{
    Diagnostic, Engine, EngineOptions, Error, ValidatedFormula, check_syntax, evaluate, validate,
};
pub use series::{Column, Series, SeriesError, Variables};
