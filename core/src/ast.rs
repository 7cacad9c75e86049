//! Typed AST produced by [`ValidationSemantics`](crate::semantics::ValidationSemantics).
//!
//! Each grammar level has its own node type, so a `Sum` always holds
//! `Product`s and a `Product` always holds `Factor`s. The `Display`
//! implementations render a formula that parses back to the same groupings.

use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An `expression`: positive addends minus negative addends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sum {
    pub positive: Vec<Product>,
    pub negative: Vec<Product>,
}

/// A `term`: numerator factors divided by denominator factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub numerator: Vec<Factor>,
    pub denominator: Vec<Factor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Factor {
    Application(Application),
    Variable(String),
    Constant(f64),
    /// A parenthesised sub-expression.
    Group(Sum),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub function_name: String,
    pub arguments: Vec<Sum>,
}

impl Sum {
    pub fn new(positive: Vec<Product>, negative: Vec<Product>) -> Self {
        Sum { positive, negative }
    }

    /// A sum with a single positive addend.
    pub fn of(product: Product) -> Self {
        Sum::new(vec![product], Vec::new())
    }

    /// Names of every variable referenced anywhere in the tree.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        for product in self.positive.iter().chain(&self.negative) {
            for factor in product.numerator.iter().chain(&product.denominator) {
                match factor {
                    Factor::Variable(name) => {
                        names.insert(name.as_str());
                    }
                    Factor::Application(application) => {
                        for argument in &application.arguments {
                            argument.collect_variables(names);
                        }
                    }
                    Factor::Group(sum) => sum.collect_variables(names),
                    Factor::Constant(_) => {}
                }
            }
        }
    }
}

impl Product {
    pub fn new(numerator: Vec<Factor>, denominator: Vec<Factor>) -> Self {
        Product {
            numerator,
            denominator,
        }
    }

    /// A product with a single numerator factor.
    pub fn of(factor: Factor) -> Self {
        Product::new(vec![factor], Vec::new())
    }
}

impl Factor {
    pub fn variable(name: impl Into<String>) -> Self {
        Factor::Variable(name.into())
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.positive, " + ")?;
        if !self.negative.is_empty() {
            f.write_str(" - ")?;
            write_joined(f, &self.negative, " - ")?;
        }
        Ok(())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.numerator, " * ")?;
        if !self.denominator.is_empty() {
            f.write_str(" / ")?;
            write_joined(f, &self.denominator, " / ")?;
        }
        Ok(())
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Application(application) => write!(f, "{}", application),
            Factor::Variable(name) => f.write_str(name),
            // Debug formatting is the shortest round-trip form and always
            // keeps a `.` or exponent, so it reads back as a constant.
            Factor::Constant(value) => write!(f, "{:?}", value),
            Factor::Group(sum) => write!(f, "({})", sum),
        }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function_name)?;
        write_joined(f, &self.arguments, ", ")?;
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_sum_with_negatives() {
        let sum = Sum::new(
            vec![
                Product::of(Factor::variable("a")),
                Product::of(Factor::variable("b")),
            ],
            vec![
                Product::of(Factor::variable("c")),
                Product::of(Factor::Constant(1.0)),
            ],
        );
        assert_eq!(sum.to_string(), "a + b - c - 1.0");
    }

    #[test]
    fn test_display_product_with_denominator() {
        let product = Product::new(
            vec![Factor::variable("a"), Factor::Constant(2.5)],
            vec![Factor::variable("b"), Factor::variable("c")],
        );
        assert_eq!(product.to_string(), "a * 2.5 / b / c");
    }

    #[test]
    fn test_display_application_and_group() {
        let sum = Sum::of(Product::new(
            vec![
                Factor::Application(Application {
                    function_name: "norm".to_string(),
                    arguments: vec![
                        Sum::of(Product::of(Factor::variable("x"))),
                        Sum::of(Product::of(Factor::Constant(3.0))),
                    ],
                }),
                Factor::Group(Sum::new(
                    vec![Product::of(Factor::variable("y"))],
                    vec![Product::of(Factor::variable("z"))],
                )),
            ],
            vec![],
        ));
        assert_eq!(sum.to_string(), "norm(x, 3.0) * (y - z)");
    }

    #[test]
    fn test_display_small_constant_keeps_exponent() {
        let sum = Sum::of(Product::of(Factor::Constant(1e-7)));
        assert_eq!(sum.to_string(), "1e-7");
    }

    #[test]
    fn test_variables_walks_whole_tree() {
        let sum = Sum::new(
            vec![Product::new(
                vec![Factor::Application(Application {
                    function_name: "norm".to_string(),
                    arguments: vec![Sum::of(Product::of(Factor::variable("x")))],
                })],
                vec![Factor::Group(Sum::of(Product::of(Factor::variable("y"))))],
            )],
            vec![Product::of(Factor::variable("x"))],
        );
        assert_eq!(sum.variables(), BTreeSet::from(["x", "y"]));
    }
}
