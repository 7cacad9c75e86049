//! Public error type for the formula API.
//!
//! Every failure is terminal for the call that produced it: there are no
//! partial results. [`Error::to_diagnostic`] turns an error into a
//! source-located [`Diagnostic`] for rendering.

use crate::parser::{Rule, Span};
use crate::series::SeriesError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The formula does not match the grammar. `position` is a byte offset
    /// into the formula.
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Validation only: the function is not in the whitelist.
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String, span: Span },

    /// Evaluation only: the variable is missing from the mapping.
    #[error("unbound variable `{name}`")]
    UnboundVariable { name: String, span: Span },

    /// Evaluation only: a term's denominator product is exactly zero.
    #[error("division by zero")]
    DivisionByZero { span: Span },

    /// Evaluation was asked to reduce a rule it does not implement.
    #[error("evaluation does not support the {rule:?} rule")]
    UnsupportedOperation { rule: Rule, span: Span },

    #[error(transparent)]
    Series(#[from] SeriesError),

    /// A consistency failure inside the formula engine itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Source location of the error, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Syntax { position, .. } => Some(Span::at(*position)),
            Error::UnknownFunction { span, .. }
            | Error::UnboundVariable { span, .. }
            | Error::DivisionByZero { span }
            | Error::UnsupportedOperation { span, .. } => Some(span.clone()),
            Error::Series(_) | Error::Internal(_) => None,
        }
    }

    /// Stable code for documentation lookup.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Internal(_) => "F000",
            Error::Syntax { .. } => "F001",
            Error::UnknownFunction { .. } => "F002",
            Error::UnboundVariable { .. } => "F003",
            Error::DivisionByZero { .. } => "F004",
            Error::UnsupportedOperation { .. } => "F005",
            Error::Series(_) => "F006",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match self {
            Error::Syntax { message, .. } => message.clone(),
            other => other.to_string(),
        };

        let help = match self {
            Error::UnknownFunction { .. } => {
                vec!["only whitelisted functions may be called".to_string()]
            }
            Error::UnboundVariable { name, .. } => {
                vec![format!("supply a series named `{}`", name)]
            }
            Error::DivisionByZero { .. } => {
                vec!["the denominator of this term evaluates to zero".to_string()]
            }
            Error::UnsupportedOperation {
                rule: Rule::application,
                ..
            } => vec!["function calls can be validated but not evaluated".to_string()],
            _ => Vec::new(),
        };

        Diagnostic {
            message,
            span: self.span().unwrap_or_default(),
            help,
            code: Some(self.code().to_string()),
        }
    }
}

/// A source-located error message.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the issue.
    pub span: Span,

    /// Help messages suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "F001") for documentation lookup.
    pub code: Option<String>,
}
