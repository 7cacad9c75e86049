//! Values that formulas are evaluated over.
//!
//! A [`Series`] only needs elementwise arithmetic, scalar broadcasting and
//! stable multi-term reductions. `f64` is the scalar case; [`Column`] holds
//! a vector of samples.

mod column;
mod fsum;

pub use column::Column;
pub use fsum::fsum;

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    #[error("series have different lengths ({left} and {right})")]
    LengthMismatch { left: usize, right: usize },
}

pub trait Series: Clone + fmt::Debug {
    /// A series holding `value` everywhere.
    fn broadcast(value: f64) -> Self;

    fn try_add(&self, rhs: &Self) -> Result<Self, SeriesError>;

    fn try_sub(&self, rhs: &Self) -> Result<Self, SeriesError>;

    fn try_mul(&self, rhs: &Self) -> Result<Self, SeriesError>;

    fn try_div(&self, rhs: &Self) -> Result<Self, SeriesError>;

    /// Sum of all `terms`, correctly rounded and independent of their
    /// order. The empty sum is zero.
    fn sum(terms: &[Self]) -> Result<Self, SeriesError>;

    /// Product of all `factors`, folded left to right from one.
    fn product(factors: &[Self]) -> Result<Self, SeriesError> {
        factors
            .iter()
            .try_fold(Self::broadcast(1.0), |acc, factor| acc.try_mul(factor))
    }

    /// Whether any element is exactly zero (either sign).
    fn contains_zero(&self) -> bool;
}

impl Series for f64 {
    fn broadcast(value: f64) -> Self {
        value
    }

    fn try_add(&self, rhs: &Self) -> Result<Self, SeriesError> {
        Ok(self + rhs)
    }

    fn try_sub(&self, rhs: &Self) -> Result<Self, SeriesError> {
        Ok(self - rhs)
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self, SeriesError> {
        Ok(self * rhs)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self, SeriesError> {
        Ok(self / rhs)
    }

    fn sum(terms: &[Self]) -> Result<Self, SeriesError> {
        Ok(fsum(terms.iter().copied()))
    }

    fn contains_zero(&self) -> bool {
        *self == 0.0
    }
}

/// Read-only mapping from variable name to series.
pub trait Variables<S> {
    fn lookup(&self, name: &str) -> Option<&S>;
}

impl<K, S, H> Variables<S> for HashMap<K, S, H>
where
    K: Borrow<str> + Hash + Eq,
    H: core::hash::BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<&S> {
        self.get(name)
    }
}

impl<K, S> Variables<S> for BTreeMap<K, S>
where
    K: Borrow<str> + Ord,
{
    fn lookup(&self, name: &str) -> Option<&S> {
        self.get(name)
    }
}
