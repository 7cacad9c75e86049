use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::api::Error;
use crate::parser::{Span, convert_pest_error};
use crate::semantics::{Operand, Semantics};

#[derive(Parser)]
#[grammar = "parser/formula.pest"]
pub struct FormulaParser;

/// Default maximum nesting depth for formula parsing.
/// This prevents stack overflow from deeply nested formulas like `(((((...(1)...)))))`.
pub const DEFAULT_MAX_PARSE_DEPTH: usize = 100;

struct ParseContext<'s, S> {
    semantics: &'s mut S,
}

impl<'i, S: Semantics<'i>> ParseContext<'_, S> {
    fn parse_expression(&mut self, pair: Pair<'i, Rule>) -> Result<S::Expression, Error> {
        let span = Span::from(pair.as_span());

        let mut positive = Vec::new();
        let mut negative = Vec::new();
        let mut sign = Rule::add;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::add | Rule::sub => sign = inner.as_rule(),
                Rule::term => {
                    let term = self.parse_term(inner)?;
                    if sign == Rule::sub {
                        negative.push(term);
                    } else {
                        positive.push(term);
                    }
                }
                rule => return Err(unhandled(rule, "expression")),
            }
        }

        self.semantics.expression(positive, negative, span)
    }

    fn parse_term(&mut self, pair: Pair<'i, Rule>) -> Result<S::Term, Error> {
        let span = Span::from(pair.as_span());

        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        let mut op = Rule::mul;
        for inner in pair.into_inner() {
            let operand = match inner.as_rule() {
                Rule::mul | Rule::div => {
                    op = inner.as_rule();
                    continue;
                }
                Rule::variable => self.parse_variable(inner)?,
                Rule::application => Operand::Value(self.parse_application(inner)?),
                Rule::constant => {
                    let span = Span::from(inner.as_span());
                    Operand::Value(self.semantics.constant(inner.as_str(), span)?)
                }
                // A nested expression can only come from a parenthesised group.
                Rule::expression => {
                    let span = Span::from(inner.as_span());
                    let expression = self.parse_expression(inner)?;
                    Operand::Value(self.semantics.group(expression, span)?)
                }
                rule => return Err(unhandled(rule, "term")),
            };
            if op == Rule::div {
                denominator.push(operand);
            } else {
                numerator.push(operand);
            }
        }

        self.semantics.term(numerator, denominator, span)
    }

    fn parse_application(&mut self, pair: Pair<'i, Rule>) -> Result<S::Factor, Error> {
        let span = Span::from(pair.as_span());
        let mut inner = pair.into_inner();
        let name = inner
            .next()
            .ok_or_else(|| Error::Internal("application without a function name".to_string()))?
            .as_str();

        self.semantics.enter_application(name, &span)?;
        let arguments = inner
            .map(|argument| self.parse_expression(argument))
            .collect::<Result<Vec<_>, _>>()?;

        self.semantics.application(name, arguments, span)
    }

    fn parse_variable(&mut self, pair: Pair<'i, Rule>) -> Result<Operand<'i, S::Factor>, Error> {
        let identifier = pair
            .into_inner()
            .next()
            .ok_or_else(|| Error::Internal("variable without an identifier".to_string()))?;
        Ok(Operand::Variable {
            name: identifier.as_str(),
            span: Span::from(identifier.as_span()),
        })
    }
}

/// Rejects input whose parentheses nest deeper than `max_depth` expressions,
/// before the recursive grammar ever sees it.
fn check_nesting(source: &str, max_depth: usize) -> Result<(), Error> {
    let mut depth = 0usize;
    for (position, c) in source.char_indices() {
        match c {
            '(' => {
                depth += 1;
                // The top-level expression counts as one level.
                if depth >= max_depth {
                    return Err(Error::Syntax {
                        position: position + 1,
                        message: format!(
                            "formula nesting exceeds the maximum depth of {} levels",
                            max_depth
                        ),
                    });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn unhandled(rule: Rule, parent: &str) -> Error {
    Error::Internal(format!("unhandled rule {:?} inside {}", rule, parent))
}

/// Converts a numeric literal accepted by the grammar to its value.
///
/// A literal the grammar matched but `f64` cannot parse is an internal
/// error. A literal that overflows to infinity is a syntax error.
pub fn literal_value(literal: &str, span: &Span) -> Result<f64, Error> {
    let value: f64 = literal.parse().map_err(|e| {
        Error::Internal(format!(
            "numeric literal `{}` accepted by the grammar failed to parse: {}",
            literal, e
        ))
    })?;
    if !value.is_finite() {
        return Err(Error::Syntax {
            position: span.start(),
            message: format!("numeric literal `{}` is out of range", literal),
        });
    }
    Ok(value)
}

/// Parses `source` and reduces it with `semantics`, using the default
/// maximum nesting depth.
pub fn parse<'i, S: Semantics<'i>>(
    source: &'i str,
    semantics: &mut S,
) -> Result<S::Expression, Error> {
    parse_with_max_depth(source, semantics, DEFAULT_MAX_PARSE_DEPTH)
}

/// Parses `source` and reduces every grammar rule through `semantics`.
///
/// `max_depth` bounds how many expressions may nest inside each other
/// through parentheses and function arguments. The whole input is matched
/// against the grammar before any semantics rule runs, so a syntax error
/// never reaches the semantics pass.
pub fn parse_with_max_depth<'i, S: Semantics<'i>>(
    source: &'i str,
    semantics: &mut S,
    max_depth: usize,
) -> Result<S::Expression, Error> {
    check_nesting(source, max_depth)?;
    let mut pairs = FormulaParser::parse(Rule::main, source).map_err(|e| {
        tracing::debug!("Pest parser failed with: {:?}", e);
        convert_pest_error(e, source)
    })?;
    let expression = pairs
        .next()
        .and_then(|main| main.into_inner().next())
        .ok_or_else(|| Error::Internal("main rule produced no expression".to_string()))?;

    ParseContext { semantics }.parse_expression(expression)
}
