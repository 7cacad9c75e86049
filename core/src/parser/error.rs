use pest::error::{ErrorVariant, InputLocation};

use super::Rule;
use crate::api::Error;

/// Converts a pest failure into a syntax error positioned in `source`.
///
/// Failures at the end of input are reported immediately after the last
/// token, not after trailing whitespace.
pub fn convert_pest_error(error: pest::error::Error<Rule>, source: &str) -> Error {
    let reported = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let position = if reported >= source.len() {
        source.trim_end().len()
    } else {
        reported
    };

    let message = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } => {
            let found = match source.get(reported..).and_then(|rest| rest.chars().next()) {
                Some(c) => format!("unexpected `{}`", c),
                None => "unexpected end of input".to_string(),
            };
            match describe_expected(positives) {
                Some(expected) => format!("{}, expected {}", found, expected),
                None => found,
            }
        }
        ErrorVariant::CustomError { message } => message.clone(),
    };

    Error::Syntax { position, message }
}

fn describe_expected(positives: &[Rule]) -> Option<String> {
    let mut operand = false;
    let mut multiplicative = false;
    let mut additive = false;
    let mut end = false;
    for rule in positives {
        match rule {
            Rule::expression
            | Rule::term
            | Rule::application
            | Rule::variable
            | Rule::constant
            | Rule::identifier => operand = true,
            Rule::mul | Rule::div => multiplicative = true,
            Rule::add | Rule::sub => additive = true,
            Rule::EOI => end = true,
            _ => {}
        }
    }

    let mut parts = Vec::new();
    if operand {
        parts.push("a number, variable, function call or `(`");
    }
    if multiplicative {
        parts.push("`*` or `/`");
    }
    if additive {
        parts.push("`+` or `-`");
    }
    if end {
        parts.push("end of input");
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", or "))
    }
}
