mod error;
#[allow(clippy::module_inception)]
mod parser;
mod syntax;

pub use error::convert_pest_error;
pub use parser::{
    DEFAULT_MAX_PARSE_DEPTH, FormulaParser, Rule, literal_value, parse, parse_with_max_depth,
};
pub use syntax::Span;
