/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use thiserror::Error;

/// Errors raised while building a [link graph](crate::graph::LinkGraph) or
/// running a [PageRank](crate::rank::PageRank) computation.
///
/// All errors are caller errors: the computation is deterministic, so nothing
/// is retried and no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageRankError {
    /// A page index is not smaller than the number of pages.
    #[error("Page index {index} out of range (the graph has {page_count} pages)")]
    IndexOutOfRange { index: usize, page_count: usize },

    /// An argument is outside its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The iteration cap was reached before the distance between successive
    /// approximations fell to the tolerance.
    #[error(
        "No convergence after {iterations} iterations: distance {distance} is above tolerance {tolerance}"
    )]
    NotConverged {
        iterations: usize,
        distance: f64,
        tolerance: f64,
    },
}
