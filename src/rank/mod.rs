/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PageRank by power iteration.
//!
//! [`PageRank`] starts from the uniform vector (or from a given
//! [initial](PageRank::initial) vector) and repeatedly replaces it with the
//! output of an [`UpdateKernel`], until the Euclidean distance between
//! successive approximations falls to a tolerance. At least one update is
//! always performed.
//!
//! Two kernels are available, selected by [`Strategy`]:
//!
//! - [`ElementWise`] computes each entry independently, in parallel, as
//!   > *pⱼ*′ = ∑ᵢ ( (1 − α) [*i* → *j*] *cᵢ* *pᵢ* + α *pᵢ* / *n* );
//! - [`MatrixKernel`] updates the whole vector as
//!   > **p**′ = (1 − α) **1** + α *A*ᵀ **p**, with *A* = *L* ⊙ *C*.
//!
//! The two formulae are _not_ equivalent: in the first one α is the
//! random-jump probability, in the second one it is the link-following
//! probability, and the second fixed point is not stochastic. Each kernel
//! converges to its own fixed point; the default
//! [`Sum`](Normalization::Sum) normalization rescales the final vector so
//! that results are comparable.
//!
//! Dangling pages (declared outdegree zero) are not patched: their rank is
//! simply not propagated through links.
//!
//! # Stopping criteria
//!
//! [`run`](PageRank::run) stops as soon as the distance is at most the
//! tolerance, and fails with
//! [`NotConverged`](crate::PageRankError::NotConverged) if this does not
//! happen within [`max_iter`](PageRank::max_iter) iterations.
//! [`run_until`](PageRank::run_until) accepts instead an arbitrary
//! composition of the [predicates](preds) in this module.

pub mod preds;

mod elementwise;
pub use elementwise::*;

mod matrix;
pub use matrix::*;

mod pagerank;
pub use pagerank::*;

/// A rule computing the next PageRank approximation from the previous one.
///
/// Implementations must only read `prev` and must overwrite every entry of
/// `next`; the two slices have the same length, equal to the number of pages.
pub trait UpdateKernel: Sync {
    /// Writes into `next` the approximation following `prev`.
    fn next_rank(&self, prev: &[f64], next: &mut [f64]);
}
