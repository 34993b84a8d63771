/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Matrix update kernel.
//!
//! The whole rank vector is updated at once as
//!
//! > **p**⁽*ᵗ* ⁺ ¹⁾ = (1 − α) **1** + α *A*ᵀ **p**⁽*ᵗ*⁾,
//!
//! where *A* = *L* ⊙ *C* is the pointwise product of the link matrix and of
//! the matrix whose *i*-th row is filled with the normalization weight
//! *cᵢ* of page *i*. Note that the roles of α and 1 − α are swapped with
//! respect to the [element-wise kernel](super::ElementWise), and that the
//! fixed point is not stochastic: for a graph without dangling pages it sums
//! to *n*.
//!
//! *A*ᵀ is built once, when the kernel is created, using either a dense
//! [`ndarray`] matrix or a sparse CSR [`nalgebra_sparse`] matrix.

use super::UpdateKernel;
use crate::graph::LinkGraph;
use nalgebra_sparse::{CooMatrix, CsrMatrix};
use ndarray::{Array2, ArrayView1, ArrayViewMut1};
use rayon::prelude::*;

/// Storage used for the transition matrix of a [`MatrixKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixStorage {
    /// A compressed sparse row matrix. This is the default.
    #[default]
    Sparse,
    /// A dense matrix.
    Dense,
}

impl std::fmt::Display for MatrixStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixStorage::Sparse => f.write_str("sparse"),
            MatrixStorage::Dense => f.write_str("dense"),
        }
    }
}

#[derive(Debug, Clone)]
enum Transition {
    Dense(Array2<f64>),
    Sparse(CsrMatrix<f64>),
}

/// The matrix kernel.
#[derive(Debug, Clone)]
pub struct MatrixKernel {
    alpha: f64,
    /// *A*ᵀ.
    transition: Transition,
}

impl MatrixKernel {
    /// Creates a kernel for `graph` with damping factor `alpha`, computing
    /// the transposed transition matrix in the given storage.
    pub fn new(graph: &LinkGraph, alpha: f64, storage: MatrixStorage) -> Self {
        let transition = match storage {
            MatrixStorage::Dense => Transition::Dense(dense_transition(graph)),
            MatrixStorage::Sparse => Transition::Sparse(sparse_transition(graph)),
        };
        Self { alpha, transition }
    }

    /// Returns the number of stored entries of *A*ᵀ.
    pub fn nnz(&self) -> usize {
        match &self.transition {
            Transition::Dense(a_t) => a_t.len(),
            Transition::Sparse(a_t) => a_t.nnz(),
        }
    }
}

fn dense_transition(graph: &LinkGraph) -> Array2<f64> {
    let n = graph.page_count();
    let inv_out_degrees = graph.inv_out_degrees();
    let mut l = Array2::<f64>::zeros((n, n));
    for (from, to) in graph.links() {
        l[[from, to]] = 1.0;
    }
    let c = Array2::from_shape_fn((n, n), |(i, _)| inv_out_degrees[i]);
    (&l * &c).reversed_axes()
}

fn sparse_transition(graph: &LinkGraph) -> CsrMatrix<f64> {
    let n = graph.page_count();
    let inv_out_degrees = graph.inv_out_degrees();
    let mut coo = CooMatrix::new(n, n);
    for (from, to) in graph.links() {
        coo.push(from, to, 1.0);
    }
    let mut a = CsrMatrix::from(&coo);
    // C is constant along rows, so L ⊙ C only scales the stored entries.
    for (i, mut row) in a.row_iter_mut().enumerate() {
        row.values_mut()
            .iter_mut()
            .for_each(|v| *v *= inv_out_degrees[i]);
    }
    a.transpose()
}

/// Computes `y = β y + α A x` for a CSR matrix, in parallel over rows.
fn spmv(alpha: f64, a: &CsrMatrix<f64>, x: &[f64], beta: f64, y: &mut [f64]) {
    debug_assert_eq!(a.ncols(), x.len());
    debug_assert_eq!(a.nrows(), y.len());
    y.par_iter_mut().enumerate().for_each(|(i, y_i)| {
        let row = a.row(i);
        let dot = row
            .values()
            .iter()
            .zip(row.col_indices())
            .fold(0.0, |acc, (v, &j)| acc + v * x[j]);
        *y_i = beta * *y_i + alpha * dot;
    });
}

impl UpdateKernel for MatrixKernel {
    fn next_rank(&self, prev: &[f64], next: &mut [f64]) {
        next.fill(1.0 - self.alpha);
        match &self.transition {
            Transition::Dense(a_t) => {
                let product = a_t.dot(&ArrayView1::from(prev));
                ArrayViewMut1::from(next).scaled_add(self.alpha, &product);
            }
            Transition::Sparse(a_t) => spmv(self.alpha, a_t, prev, 1.0, next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_page_graph() -> LinkGraph {
        let mut graph = LinkGraph::new(2).unwrap();
        graph.create_link(0, 1).unwrap();
        graph.create_link(1, 1).unwrap();
        graph.set_out_link_count(0, 1).unwrap();
        graph.set_out_link_count(1, 2).unwrap();
        graph
    }

    #[test]
    fn test_dense_transition_is_transposed() {
        let a_t = dense_transition(&two_page_graph());
        // A = [[0, 1], [0, 1/2]]
        assert_eq!(a_t[[0, 0]], 0.0);
        assert_eq!(a_t[[0, 1]], 0.0);
        assert_eq!(a_t[[1, 0]], 1.0);
        assert_eq!(a_t[[1, 1]], 0.5);
    }

    #[test]
    fn test_sparse_matches_dense() {
        let graph = two_page_graph();
        let dense = dense_transition(&graph);
        let sparse = sparse_transition(&graph);
        assert_eq!(sparse.nnz(), 2);
        for (i, j, &v) in sparse.triplet_iter() {
            assert_eq!(dense[[i, j]], v);
        }
    }

    #[test]
    fn test_spmv() {
        let sparse = sparse_transition(&two_page_graph());
        let mut y = [1.0, 1.0];
        spmv(2.0, &sparse, &[0.5, 0.5], 3.0, &mut y);
        // A^T x = [0, 0.75]
        assert_eq!(y, [3.0, 4.5]);
    }

    #[test]
    fn test_declared_zero_outdegree_drops_links() {
        let mut graph = two_page_graph();
        graph.set_out_link_count(1, 0).unwrap();
        let kernel = MatrixKernel::new(&graph, 0.85, MatrixStorage::Dense);
        let mut next = [0.0; 2];
        kernel.next_rank(&[0.5, 0.5], &mut next);
        assert!((next[0] - 0.15).abs() < 1E-12);
        assert!((next[1] - (0.15 + 0.85 * 0.5)).abs() < 1E-12);
    }
}
