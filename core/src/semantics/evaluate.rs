use core::marker::PhantomData;

use super::{Operand, Semantics};
use crate::api::Error;
use crate::parser::{Rule, Span, literal_value};
use crate::series::{Series, Variables};

/// Reduces the grammar straight to a series, without building an AST.
///
/// Variable leaves are looked up in the mapping when the enclosing term
/// consumes them. Function applications cannot be evaluated: they fail with
/// [`Error::UnsupportedOperation`] before their arguments are reduced.
pub struct EvaluationSemantics<'v, S, V: ?Sized> {
    variables: &'v V,
    _series: PhantomData<fn() -> S>,
}

impl<'v, S, V> EvaluationSemantics<'v, S, V>
where
    S: Series,
    V: Variables<S> + ?Sized,
{
    pub fn new(variables: &'v V) -> Self {
        Self {
            variables,
            _series: PhantomData,
        }
    }

    fn resolve(&self, operand: Operand<'_, S>) -> Result<S, Error> {
        match operand {
            Operand::Value(value) => Ok(value),
            Operand::Variable { name, span } => match self.variables.lookup(name) {
                Some(value) => Ok(value.clone()),
                None => Err(Error::UnboundVariable {
                    name: name.to_string(),
                    span,
                }),
            },
        }
    }

    fn resolve_all(&self, operands: Vec<Operand<'_, S>>) -> Result<Vec<S>, Error> {
        operands
            .into_iter()
            .map(|operand| self.resolve(operand))
            .collect()
    }
}

impl<'i, S, V> Semantics<'i> for EvaluationSemantics<'_, S, V>
where
    S: Series,
    V: Variables<S> + ?Sized,
{
    type Expression = S;
    type Term = S;
    type Factor = S;

    fn expression(&mut self, positive: Vec<S>, negative: Vec<S>, _span: Span) -> Result<S, Error> {
        tracing::trace!(
            positive = positive.len(),
            negative = negative.len(),
            "reducing expression"
        );
        let total = S::sum(&positive)?;
        if negative.is_empty() {
            return Ok(total);
        }
        let subtrahend = S::sum(&negative)?;
        Ok(total.try_sub(&subtrahend)?)
    }

    fn term(
        &mut self,
        numerator: Vec<Operand<'i, S>>,
        denominator: Vec<Operand<'i, S>>,
        span: Span,
    ) -> Result<S, Error> {
        tracing::trace!(
            numerator = numerator.len(),
            denominator = denominator.len(),
            "reducing term"
        );
        let numerator = S::product(&self.resolve_all(numerator)?)?;
        if denominator.is_empty() {
            return Ok(numerator);
        }
        let denominator = S::product(&self.resolve_all(denominator)?)?;
        if denominator.contains_zero() {
            return Err(Error::DivisionByZero { span });
        }
        Ok(numerator.try_div(&denominator)?)
    }

    fn enter_application(&mut self, _name: &'i str, span: &Span) -> Result<(), Error> {
        Err(Error::UnsupportedOperation {
            rule: Rule::application,
            span: span.clone(),
        })
    }

    fn application(&mut self, _name: &'i str, _arguments: Vec<S>, span: Span) -> Result<S, Error> {
        Err(Error::UnsupportedOperation {
            rule: Rule::application,
            span,
        })
    }

    fn variable(&mut self, _name: &'i str, span: Span) -> Result<S, Error> {
        Err(Error::UnsupportedOperation {
            rule: Rule::variable,
            span,
        })
    }

    fn constant(&mut self, literal: &'i str, span: Span) -> Result<S, Error> {
        literal_value(literal, &span).map(S::broadcast)
    }

    fn group(&mut self, expression: S, _span: Span) -> Result<S, Error> {
        Ok(expression)
    }
}
