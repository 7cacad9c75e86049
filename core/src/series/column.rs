use serde::{Deserialize, Serialize};

use super::{Series, SeriesError, fsum};

/// A column of samples, or a scalar that broadcasts to any length.
///
/// Elementwise operations between two `Values` columns require equal
/// lengths. A `Scalar` combines with a column of any length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Scalar(f64),
    Values(Vec<f64>),
}

impl Column {
    /// Number of samples, or `None` for a scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            Column::Scalar(_) => None,
            Column::Values(values) => Some(values.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Sample at `index`. A scalar has the same value at every index.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            Column::Scalar(value) => Some(*value),
            Column::Values(values) => values.get(index).copied(),
        }
    }

    fn zip_with(
        &self,
        rhs: &Column,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Column, SeriesError> {
        Ok(match (self, rhs) {
            (Column::Scalar(a), Column::Scalar(b)) => Column::Scalar(op(*a, *b)),
            (Column::Scalar(a), Column::Values(b)) => {
                Column::Values(b.iter().map(|b| op(*a, *b)).collect())
            }
            (Column::Values(a), Column::Scalar(b)) => {
                Column::Values(a.iter().map(|a| op(*a, *b)).collect())
            }
            (Column::Values(a), Column::Values(b)) => {
                if a.len() != b.len() {
                    return Err(SeriesError::LengthMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                Column::Values(a.iter().zip(b).map(|(a, b)| op(*a, *b)).collect())
            }
        })
    }
}

/// Common length of the non-scalar columns, if any.
fn common_len(columns: &[Column]) -> Result<Option<usize>, SeriesError> {
    let mut common: Option<usize> = None;
    for len in columns.iter().filter_map(Column::len) {
        match common {
            Some(left) if left != len => {
                return Err(SeriesError::LengthMismatch { left, right: len });
            }
            _ => common = Some(len),
        }
    }
    Ok(common)
}

impl Series for Column {
    fn broadcast(value: f64) -> Self {
        Column::Scalar(value)
    }

    fn try_add(&self, rhs: &Self) -> Result<Self, SeriesError> {
        self.zip_with(rhs, |a, b| a + b)
    }

    fn try_sub(&self, rhs: &Self) -> Result<Self, SeriesError> {
        self.zip_with(rhs, |a, b| a - b)
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self, SeriesError> {
        self.zip_with(rhs, |a, b| a * b)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self, SeriesError> {
        self.zip_with(rhs, |a, b| a / b)
    }

    /// Sums each index independently with [`fsum`].
    fn sum(terms: &[Self]) -> Result<Self, SeriesError> {
        let Some(len) = common_len(terms)? else {
            return Ok(Column::Scalar(fsum(terms.iter().filter_map(|t| t.get(0)))));
        };
        let values = (0..len)
            .map(|index| fsum(terms.iter().filter_map(|term| term.get(index))))
            .collect();
        Ok(Column::Values(values))
    }

    fn contains_zero(&self) -> bool {
        match self {
            Column::Scalar(value) => *value == 0.0,
            Column::Values(values) => values.iter().any(|value| *value == 0.0),
        }
    }
}

impl From<f64> for Column {
    fn from(value: f64) -> Self {
        Column::Scalar(value)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Values(values)
    }
}

impl FromIterator<f64> for Column {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Column::Values(iter.into_iter().collect())
    }
}
