/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Element-wise update kernel.
//!
//! Each entry of the new rank vector is computed independently as
//!
//! > *pⱼ*⁽*ᵗ* ⁺ ¹⁾ = ∑ᵢ ( (1 − α) [*i* → *j*] *cᵢ* *pᵢ*⁽*ᵗ*⁾ + α *pᵢ*⁽*ᵗ*⁾ / *n* ),
//!
//! where *cᵢ* is the declared normalization weight of *i* and the sum ranges
//! over _all_ pages, including *j*. The random-jump term is accumulated in the
//! same loop as the link term, so it equals α / *n* only when the previous
//! vector sums to one.
//!
//! Targets are independent, so the kernel is parallelized over *j* with
//! Rayon; all reads go to the previous vector, and each task writes only its
//! own slot of the new one.

use super::UpdateKernel;
use crate::graph::LinkGraph;
use kahan::KahanSum;
use rayon::prelude::*;

/// The element-wise kernel.
///
/// Per-target sums use compensated summation in a fixed order, so parallel
/// and sequential execution yield identical vectors.
#[derive(Debug, Clone)]
pub struct ElementWise<'a> {
    graph: &'a LinkGraph,
    alpha: f64,
    parallel: bool,
    granularity: usize,
}

impl<'a> ElementWise<'a> {
    /// Creates a parallel kernel on `graph` with damping factor `alpha`.
    pub fn new(graph: &'a LinkGraph, alpha: f64) -> Self {
        Self {
            graph,
            alpha,
            parallel: true,
            granularity: 1,
        }
    }

    /// Sets whether targets are processed in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the minimum number of targets passed to a Rayon task.
    pub fn granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity.max(1);
        self
    }

    fn target_rank(&self, j: usize, prev: &[f64]) -> f64 {
        let n = self.graph.page_count();
        let jump = self.alpha / n as f64;
        let follow = 1.0 - self.alpha;
        let inv_out_degrees = self.graph.inv_out_degrees();

        let mut sigma: KahanSum<f64> = KahanSum::new();
        for (i, (&linked, &p_i)) in self.graph.predecessors(j).iter().zip(prev).enumerate() {
            let c_i = if linked { inv_out_degrees[i] } else { 0.0 };
            sigma += follow * c_i * p_i + jump * p_i;
        }
        sigma.sum()
    }
}

impl UpdateKernel for ElementWise<'_> {
    fn next_rank(&self, prev: &[f64], next: &mut [f64]) {
        debug_assert_eq!(prev.len(), self.graph.page_count());
        debug_assert_eq!(next.len(), self.graph.page_count());

        if self.parallel {
            next.par_iter_mut()
                .with_min_len(self.granularity)
                .enumerate()
                .for_each(|(j, p_j)| *p_j = self.target_rank(j, prev));
        } else {
            next.iter_mut()
                .enumerate()
                .for_each(|(j, p_j)| *p_j = self.target_rank(j, prev));
        }
    }
}
