/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Predicates implementing stopping conditions.
//!
//! [`PageRank::run_until`](super::PageRank::run_until) requires a
//! [predicate](Predicate) to stop the iteration. This module provides two
//! such predicates: they evaluate to true if the computation should be
//! stopped. [`PageRank::run`](super::PageRank::run) combines them as
//! `L2Norm ∨ MaxIter`.
//!
//! You can combine the predicates using the `and` and `or` methods provided
//! by the [`Predicate`] trait.
//!
//! # Examples
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use predicates::prelude::*;
//! use linkrank::rank::preds::{L2Norm, MaxIter};
//!
//! let mut predicate = L2Norm::try_from(1E-6)?.boxed();
//! predicate = predicate.or(MaxIter::from(100)).boxed();
//! #     Ok(())
//! # }
//! ```

use anyhow::ensure;
use predicates::{Predicate, reflection::PredicateReflection};
use std::fmt::Display;

#[doc(hidden)]
/// This structure is passed to stopping predicates to provide the
/// information that is needed to evaluate them.
#[derive(Debug)]
pub struct PredParams {
    /// The number of iterations completed so far (at least one).
    pub iteration: usize,
    /// The ℓ₂ distance between the last two approximations.
    pub distance: f64,
}

/// Stops after at most the provided number of iterations.
#[derive(Debug, Clone)]
pub struct MaxIter {
    max_iter: usize,
}

impl MaxIter {
    pub const DEFAULT_MAX_ITER: usize = 10_000;
}

impl From<usize> for MaxIter {
    fn from(max_iter: usize) -> Self {
        MaxIter { max_iter }
    }
}

impl Default for MaxIter {
    fn default() -> Self {
        Self::from(Self::DEFAULT_MAX_ITER)
    }
}

impl Display for MaxIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("(max iter: {})", self.max_iter))
    }
}

impl PredicateReflection for MaxIter {}

impl Predicate<PredParams> for MaxIter {
    fn eval(&self, pred_params: &PredParams) -> bool {
        pred_params.iteration >= self.max_iter
    }
}

/// Stops when the Euclidean distance between successive approximations
/// falls to a given tolerance.
///
/// The distance is ‖*x*(*t*) − *x*(*t* − 1)‖₂, where *x*(*t*) is the rank
/// vector at iteration *t*. Note that it is not a bound on the error with
/// respect to the fixed point.
#[derive(Debug, Clone)]
pub struct L2Norm {
    tolerance: f64,
}

impl L2Norm {
    pub const DEFAULT_TOLERANCE: f64 = 1E-6;

    /// Returns the tolerance of this predicate.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl TryFrom<Option<f64>> for L2Norm {
    type Error = anyhow::Error;
    fn try_from(tolerance: Option<f64>) -> anyhow::Result<Self> {
        Ok(match tolerance {
            Some(tolerance) => {
                ensure!(!tolerance.is_nan(), "The tolerance must be a number");
                ensure!(tolerance > 0.0, "The tolerance must be positive, got {tolerance}");
                L2Norm { tolerance }
            }
            None => Self::default(),
        })
    }
}

impl TryFrom<f64> for L2Norm {
    type Error = anyhow::Error;
    fn try_from(tolerance: f64) -> anyhow::Result<Self> {
        Some(tolerance).try_into()
    }
}

impl Default for L2Norm {
    fn default() -> Self {
        L2Norm {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

impl Display for L2Norm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("(distance: {})", self.tolerance))
    }
}

impl PredicateReflection for L2Norm {}
impl Predicate<PredParams> for L2Norm {
    fn eval(&self, pred_params: &PredParams) -> bool {
        pred_params.distance <= self.tolerance
    }
}
