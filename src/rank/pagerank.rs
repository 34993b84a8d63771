/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::preds::{L2Norm, MaxIter, PredParams};
use super::{ElementWise, MatrixKernel, MatrixStorage, UpdateKernel};
use crate::PageRankError;
use crate::graph::LinkGraph;
use dsi_progress_logger::{ProgressLog, no_logging};
use kahan::KahanSum;
use predicates::prelude::*;

/// Selects the [update kernel](UpdateKernel) used by [`PageRank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// The [element-wise kernel](ElementWise), parallel over target pages.
    /// This is the default.
    #[default]
    ElementWise,
    /// The [matrix kernel](MatrixKernel) with the given storage.
    Matrix(MatrixStorage),
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::ElementWise => f.write_str("element-wise"),
            Strategy::Matrix(storage) => write!(f, "matrix ({storage})"),
        }
    }
}

/// Post-processing applied to the rank vector when the iteration stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Normalization {
    /// Divides the vector by the sum of its entries, unless the sum is zero.
    /// This is the default.
    #[default]
    Sum,
    /// Leaves the last iterate untouched.
    None,
}

/// Returns the Euclidean distance between two vectors of the same length.
///
/// # Examples
///
/// ```
/// use linkrank::rank::l2_distance;
///
/// assert_eq!(l2_distance(&[1.0, 1.0], &[4.0, 5.0]), 5.0);
/// ```
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum: KahanSum<f64> = KahanSum::new();
    for (x, y) in a.iter().zip(b) {
        let d = x - y;
        sum += d * d;
    }
    sum.sum().sqrt()
}

/// Computes PageRank by power iteration on a dense [`LinkGraph`].
///
/// The struct owns its graph, is configured via setters, and is executed via
/// [`run`](Self::run). After completion the rank vector is also available via
/// the [`rank`](Self::rank) method.
///
/// The iteration uses two buffers that swap roles at each step: the previous
/// approximation is borrowed immutably by the [kernel](UpdateKernel) while
/// the new one is written, so no update ever observes a value of the same
/// iteration.
///
/// # Examples
///
/// A three-page cycle has a uniform PageRank:
///
/// ```
/// # fn main() -> Result<(), linkrank::PageRankError> {
/// use linkrank::rank::PageRank;
///
/// let mut pr = PageRank::with_default_damping(3)?;
/// for (from, to) in [(0, 1), (1, 2), (2, 0)] {
///     pr.create_link(from, to)?;
///     pr.set_out_link_count(from, 1)?;
/// }
/// let rank = pr.run(1E-6)?;
///
/// for &r in rank {
///     assert!((r - 1.0 / 3.0).abs() < 1E-6);
/// }
/// # Ok(())
/// # }
/// ```
///
/// The same graph with the sparse matrix kernel:
///
/// ```
/// # fn main() -> Result<(), linkrank::PageRankError> {
/// use linkrank::graph::LinkGraph;
/// use linkrank::rank::{MatrixStorage, PageRank, Strategy};
///
/// let mut graph = LinkGraph::new(3)?;
/// for (from, to) in [(0, 1), (1, 2), (2, 0)] {
///     graph.create_link(from, to)?;
/// }
/// graph.derive_out_link_counts();
///
/// let mut pr = PageRank::from_graph(graph, 0.85)?;
/// pr.strategy(Strategy::Matrix(MatrixStorage::Sparse));
/// let rank = pr.run(1E-9)?;
///
/// assert!((rank.iter().sum::<f64>() - 1.0).abs() < 1E-9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PageRank {
    graph: LinkGraph,
    alpha: f64,
    strategy: Strategy,
    parallel: bool,
    granularity: usize,
    max_iter: usize,
    normalization: Normalization,
    initial: Option<Box<[f64]>>,

    rank: Box<[f64]>,
    iteration: usize,
    distance: f64,
}

impl PageRank {
    pub const DEFAULT_ALPHA: f64 = 0.85;

    /// Creates a computation on `page_count` pages without links, with
    /// damping factor `alpha`.
    pub fn new(page_count: usize, alpha: f64) -> Result<Self, PageRankError> {
        Self::from_graph(LinkGraph::new(page_count)?, alpha)
    }

    /// Creates a computation on `page_count` pages without links, with
    /// damping factor [`DEFAULT_ALPHA`](Self::DEFAULT_ALPHA).
    pub fn with_default_damping(page_count: usize) -> Result<Self, PageRankError> {
        Self::new(page_count, Self::DEFAULT_ALPHA)
    }

    /// Creates a computation on an existing graph.
    ///
    /// The damping factor must lie in the open interval (0 . . 1).
    pub fn from_graph(graph: LinkGraph, alpha: f64) -> Result<Self, PageRankError> {
        // NaN fails the comparisons, too
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(PageRankError::InvalidArgument(format!(
                "The damping factor must be in (0 . . 1), got {alpha}"
            )));
        }
        let n = graph.page_count();
        Ok(Self {
            graph,
            alpha,
            strategy: Strategy::default(),
            parallel: true,
            granularity: 1,
            max_iter: MaxIter::DEFAULT_MAX_ITER,
            normalization: Normalization::default(),
            initial: None,
            rank: vec![1.0 / n as f64; n].into_boxed_slice(),
            iteration: 0,
            distance: f64::INFINITY,
        })
    }

    /// Adds a link from `from` to `to`.
    pub fn create_link(&mut self, from: usize, to: usize) -> Result<(), PageRankError> {
        self.graph.create_link(from, to)
    }

    /// Declares the outdegree of `page`.
    ///
    /// See [`LinkGraph::set_out_link_count`].
    pub fn set_out_link_count(&mut self, page: usize, count: usize) -> Result<(), PageRankError> {
        self.graph.set_out_link_count(page, count)
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    /// Returns a mutable reference to the underlying graph.
    pub fn graph_mut(&mut self) -> &mut LinkGraph {
        &mut self.graph
    }

    /// Returns the damping factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Sets the update [strategy](Strategy).
    pub fn strategy(&mut self, strategy: Strategy) -> &mut Self {
        self.strategy = strategy;
        self
    }

    /// Sets whether the element-wise kernel runs in parallel.
    ///
    /// It has no effect on the matrix kernel.
    pub fn parallel(&mut self, parallel: bool) -> &mut Self {
        self.parallel = parallel;
        self
    }

    /// Sets the minimum number of pages passed to a Rayon task by the
    /// element-wise kernel.
    pub fn granularity(&mut self, granularity: usize) -> &mut Self {
        self.granularity = granularity.max(1);
        self
    }

    /// Sets the maximum number of iterations performed by [`run`](Self::run).
    pub fn max_iter(&mut self, max_iter: usize) -> Result<&mut Self, PageRankError> {
        if max_iter == 0 {
            return Err(PageRankError::InvalidArgument(
                "The maximum number of iterations must be positive".to_owned(),
            ));
        }
        self.max_iter = max_iter;
        Ok(self)
    }

    /// Sets the [normalization](Normalization) of the final vector.
    pub fn normalization(&mut self, normalization: Normalization) -> &mut Self {
        self.normalization = normalization;
        self
    }

    /// Sets the initial approximation.
    ///
    /// Pass `None` to revert to the uniform vector 1/*n*. The entries must be
    /// finite and nonnegative.
    pub fn initial(&mut self, initial: Option<&[f64]>) -> Result<&mut Self, PageRankError> {
        if let Some(v) = initial {
            let n = self.graph.page_count();
            if v.len() != n {
                return Err(PageRankError::InvalidArgument(format!(
                    "Initial vector length ({}) does not match the number of pages ({n})",
                    v.len()
                )));
            }
            if let Some((i, x)) = v
                .iter()
                .enumerate()
                .find(|(_, x)| !x.is_finite() || **x < 0.0)
            {
                return Err(PageRankError::InvalidArgument(format!(
                    "The initial vector has an invalid entry at index {i}: {x}"
                )));
            }
        }
        self.initial = initial.map(Into::into);
        Ok(self)
    }

    /// Returns the rank vector.
    ///
    /// After a successful [`run`](Self::run), this contains the computed
    /// PageRank values. If the last run failed with
    /// [`NotConverged`](PageRankError::NotConverged), this contains the
    /// starting vector of that run.
    pub fn rank(&self) -> &[f64] {
        &self.rank
    }

    /// Returns the number of iterations performed by the last run.
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// Returns the ℓ₂ distance between the last two approximations of the
    /// last run (before normalization).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Runs the computation until the ℓ₂ distance between successive
    /// approximations is at most `tolerance`, and returns the rank vector.
    ///
    /// At least one iteration is always performed. If the distance is still
    /// above `tolerance` after the [maximum number of
    /// iterations](Self::max_iter), this method returns
    /// [`NotConverged`](PageRankError::NotConverged).
    pub fn run(&mut self, tolerance: f64) -> Result<&[f64], PageRankError> {
        self.run_with_logging(tolerance, no_logging![])
    }

    /// Like [`run`](Self::run), logging the iterations on `pl`.
    pub fn run_with_logging(
        &mut self,
        tolerance: f64,
        pl: &mut impl ProgressLog,
    ) -> Result<&[f64], PageRankError> {
        let converged = L2Norm::try_from(tolerance)
            .map_err(|e| PageRankError::InvalidArgument(e.to_string()))?;
        self.run_until(converged.clone().or(MaxIter::from(self.max_iter)), pl);

        if !converged.eval(&PredParams {
            iteration: self.iteration,
            distance: self.distance,
        }) {
            self.reset_rank();
            return Err(PageRankError::NotConverged {
                iterations: self.iteration,
                distance: self.distance,
                tolerance,
            });
        }
        Ok(&self.rank)
    }

    /// Runs the computation until the given predicate is satisfied.
    ///
    /// The predicate is evaluated after each iteration; no iteration cap is
    /// applied besides those contained in the predicate.
    pub fn run_until(
        &mut self,
        predicate: impl Predicate<PredParams>,
        pl: &mut impl ProgressLog,
    ) {
        log::info!("Strategy: {}", self.strategy);
        log::info!("Alpha: {}", self.alpha);
        log::info!("Stopping criterion: {}", predicate);

        let inconsistent = self.graph.inconsistent_pages();
        if let Some(&first) = inconsistent.first() {
            log::warn!(
                "{} pages have a declared outdegree different from their number of links (first: page {first})",
                inconsistent.len()
            );
        }

        self.reset_rank();

        let (iteration, distance) = match self.strategy {
            Strategy::ElementWise => {
                let kernel = ElementWise::new(&self.graph, self.alpha)
                    .parallel(self.parallel)
                    .granularity(self.granularity);
                iterate(&kernel, &mut self.rank, &predicate, pl)
            }
            Strategy::Matrix(storage) => {
                let kernel = MatrixKernel::new(&self.graph, self.alpha, storage);
                log::info!("Transition matrix entries: {}", kernel.nnz());
                iterate(&kernel, &mut self.rank, &predicate, pl)
            }
        };
        self.iteration = iteration;
        self.distance = distance;

        if self.normalization == Normalization::Sum {
            let mut sum: KahanSum<f64> = KahanSum::new();
            for &r in self.rank.iter() {
                sum += r;
            }
            let sum = sum.sum();
            if sum > 0.0 {
                self.rank.iter_mut().for_each(|r| *r /= sum);
            }
        }
    }

    /// Replaces the rank vector with the initial approximation.
    fn reset_rank(&mut self) {
        match &self.initial {
            Some(v) => self.rank.copy_from_slice(v),
            None => self.rank.fill(1.0 / self.graph.page_count() as f64),
        }
    }
}

/// Applies `kernel` to `rank` until `predicate` holds, returning the number
/// of iterations and the last distance.
fn iterate(
    kernel: &impl UpdateKernel,
    rank: &mut Box<[f64]>,
    predicate: &impl Predicate<PredParams>,
    pl: &mut impl ProgressLog,
) -> (usize, f64) {
    let mut prev = vec![0.0; rank.len()].into_boxed_slice();
    let mut iteration = 0;

    pl.item_name("iteration");
    pl.expected_updates(None);
    pl.start("Computing PageRank...");

    loop {
        std::mem::swap(rank, &mut prev);
        kernel.next_rank(&prev, rank);
        iteration += 1;

        let distance = l2_distance(rank, &prev);
        log::info!("Iteration {iteration}: distance = {distance}");
        pl.update_and_display();

        if predicate.eval(&PredParams {
            iteration,
            distance,
        }) {
            pl.done();
            return (iteration, distance);
        }
    }
}
