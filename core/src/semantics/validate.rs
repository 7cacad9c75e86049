use std::collections::BTreeSet;

use super::{Operand, Semantics};
use crate::api::Error;
use crate::ast::{Application, Factor, Product, Sum};
use crate::parser::{Span, literal_value};

/// Builds the typed AST, rejecting functions outside the whitelist and
/// recording every free variable it meets.
///
/// Create one instance per parse: the free-variable set accumulates.
#[derive(Debug)]
pub struct ValidationSemantics<'f> {
    functions: &'f BTreeSet<String>,
    free_variables: BTreeSet<String>,
}

impl<'f> ValidationSemantics<'f> {
    pub fn new(functions: &'f BTreeSet<String>) -> Self {
        Self {
            functions,
            free_variables: BTreeSet::new(),
        }
    }

    pub fn free_variables(&self) -> &BTreeSet<String> {
        &self.free_variables
    }

    pub fn into_free_variables(self) -> BTreeSet<String> {
        self.free_variables
    }

    fn factor<'i>(&mut self, operand: Operand<'i, Factor>) -> Result<Factor, Error> {
        match operand {
            Operand::Value(factor) => Ok(factor),
            Operand::Variable { name, span } => self.variable(name, span),
        }
    }

    fn factors<'i>(&mut self, operands: Vec<Operand<'i, Factor>>) -> Result<Vec<Factor>, Error> {
        operands
            .into_iter()
            .map(|operand| self.factor(operand))
            .collect()
    }
}

impl<'i> Semantics<'i> for ValidationSemantics<'_> {
    type Expression = Sum;
    type Term = Product;
    type Factor = Factor;

    fn expression(
        &mut self,
        positive: Vec<Product>,
        negative: Vec<Product>,
        _span: Span,
    ) -> Result<Sum, Error> {
        Ok(Sum::new(positive, negative))
    }

    fn term(
        &mut self,
        numerator: Vec<Operand<'i, Factor>>,
        denominator: Vec<Operand<'i, Factor>>,
        _span: Span,
    ) -> Result<Product, Error> {
        let numerator = self.factors(numerator)?;
        let denominator = self.factors(denominator)?;
        Ok(Product::new(numerator, denominator))
    }

    fn application(
        &mut self,
        name: &'i str,
        arguments: Vec<Sum>,
        span: Span,
    ) -> Result<Factor, Error> {
        if !self.functions.contains(name) {
            tracing::debug!(function = name, "rejecting unknown function");
            return Err(Error::UnknownFunction {
                name: name.to_string(),
                span,
            });
        }
        Ok(Factor::Application(Application {
            function_name: name.to_string(),
            arguments,
        }))
    }

    fn variable(&mut self, name: &'i str, _span: Span) -> Result<Factor, Error> {
        self.free_variables.insert(name.to_string());
        Ok(Factor::variable(name))
    }

    fn constant(&mut self, literal: &'i str, span: Span) -> Result<Factor, Error> {
        literal_value(literal, &span).map(Factor::Constant)
    }

    fn group(&mut self, expression: Sum, _span: Span) -> Result<Factor, Error> {
        Ok(Factor::Group(expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn whitelist(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_collects_free_variables() {
        let functions = whitelist(&["norm"]);
        let mut semantics = ValidationSemantics::new(&functions);
        parse("a * norm(b, c / a) - (d + 2)", &mut semantics).unwrap();
        assert_eq!(
            semantics.into_free_variables(),
            whitelist(&["a", "b", "c", "d"])
        );
    }

    #[test]
    fn test_function_names_are_not_variables() {
        let functions = whitelist(&["norm"]);
        let mut semantics = ValidationSemantics::new(&functions);
        parse("norm(x)", &mut semantics).unwrap();
        assert_eq!(semantics.free_variables(), &whitelist(&["x"]));
    }

    #[test]
    fn test_unknown_function() {
        let functions = whitelist(&["norm"]);
        let mut semantics = ValidationSemantics::new(&functions);
        let result = parse("1 + foo(x)", &mut semantics);
        assert_eq!(
            result,
            Err(Error::UnknownFunction {
                name: "foo".to_string(),
                span: Span::new(4, 10),
            })
        );
    }

    #[test]
    fn test_nested_unknown_function() {
        let functions = whitelist(&["norm"]);
        let mut semantics = ValidationSemantics::new(&functions);
        let result = parse("norm(bar(x))", &mut semantics);
        assert!(
            matches!(&result, Err(Error::UnknownFunction { name, .. }) if name == "bar"),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_empty_whitelist_rejects_everything() {
        let functions = BTreeSet::new();
        let mut semantics = ValidationSemantics::new(&functions);
        assert!(parse("norm(x)", &mut semantics).is_err());
    }

    #[test]
    fn test_whitelist_is_exact() {
        // Names are compared exactly: no trimming, no case folding.
        let functions = whitelist(&["norm "]);
        let mut semantics = ValidationSemantics::new(&functions);
        assert!(matches!(
            parse("norm(x)", &mut semantics),
            Err(Error::UnknownFunction { .. })
        ));
    }
}
