//! Interpretations of the formula grammar.
//!
//! The parser walks the grammar once and hands every reduced rule to a
//! [`Semantics`] implementation. Each implementation picks its own output
//! type per rule level, so the same grammar can build a typed AST
//! ([`ValidationSemantics`]), reduce straight to a numeric series
//! ([`EvaluationSemantics`]) or only check the input ([`SyntaxSemantics`]).

mod evaluate;
mod syntax;
mod validate;

pub use evaluate::EvaluationSemantics;
pub use syntax::SyntaxSemantics;
pub use validate::ValidationSemantics;

use crate::api::Error;
use crate::parser::Span;

/// A factor handed to [`Semantics::term`].
///
/// Variable leaves are passed through unresolved: each interpretation
/// decides how a term consumes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'i, F> {
    Value(F),
    Variable { name: &'i str, span: Span },
}

/// One method per grammar rule.
///
/// `'i` is the lifetime of the formula source; names passed to the rules
/// borrow from it.
pub trait Semantics<'i> {
    /// Output of the `expression` rule.
    type Expression;
    /// Output of the `term` rule.
    type Term;
    /// Output of the `application`, `variable`, `constant` and grouping rules.
    type Factor;

    /// `positive` is never empty: the first term of an expression is always
    /// positive.
    fn expression(
        &mut self,
        positive: Vec<Self::Term>,
        negative: Vec<Self::Term>,
        span: Span,
    ) -> Result<Self::Expression, Error>;

    /// `numerator` is never empty.
    fn term(
        &mut self,
        numerator: Vec<Operand<'i, Self::Factor>>,
        denominator: Vec<Operand<'i, Self::Factor>>,
        span: Span,
    ) -> Result<Self::Term, Error>;

    /// Called before the arguments of an application are reduced.
    fn enter_application(&mut self, _name: &'i str, _span: &Span) -> Result<(), Error> {
        Ok(())
    }

    /// `arguments` is never empty and is in source order.
    fn application(
        &mut self,
        name: &'i str,
        arguments: Vec<Self::Expression>,
        span: Span,
    ) -> Result<Self::Factor, Error>;

    fn variable(&mut self, name: &'i str, span: Span) -> Result<Self::Factor, Error>;

    /// `literal` is the numeric literal exactly as written.
    fn constant(&mut self, literal: &'i str, span: Span) -> Result<Self::Factor, Error>;

    /// A parenthesised expression used as a factor.
    fn group(&mut self, expression: Self::Expression, span: Span) -> Result<Self::Factor, Error>;
}
