use super::{Operand, Semantics};
use crate::api::Error;
use crate::parser::{Span, literal_value};

/// Accepts every grammatical formula; builds nothing.
///
/// Function names are not checked against any whitelist.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntaxSemantics;

impl<'i> Semantics<'i> for SyntaxSemantics {
    type Expression = ();
    type Term = ();
    type Factor = ();

    fn expression(&mut self, _: Vec<()>, _: Vec<()>, _: Span) -> Result<(), Error> {
        Ok(())
    }

    fn term(
        &mut self,
        _: Vec<Operand<'i, ()>>,
        _: Vec<Operand<'i, ()>>,
        _: Span,
    ) -> Result<(), Error> {
        Ok(())
    }

    fn application(&mut self, _: &'i str, _: Vec<()>, _: Span) -> Result<(), Error> {
        Ok(())
    }

    fn variable(&mut self, _: &'i str, _: Span) -> Result<(), Error> {
        Ok(())
    }

    fn constant(&mut self, literal: &'i str, span: Span) -> Result<(), Error> {
        literal_value(literal, &span).map(|_| ())
    }

    fn group(&mut self, _: (), _: Span) -> Result<(), Error> {
        Ok(())
    }
}
