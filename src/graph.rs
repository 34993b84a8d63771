/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Dense link graphs.
//!
//! A [`LinkGraph`] stores the link relation *L* among a fixed number of pages
//! as a dense boolean matrix, together with the _declared_ outdegree of each
//! page and the corresponding normalization weight *c*ᵢ = 1 / *dᵢ* (or zero
//! for dangling pages).
//!
//! Outdegrees are never inferred from the links behind the caller's back:
//! they are set explicitly with
//! [`set_out_link_count`](LinkGraph::set_out_link_count), or all at once from
//! the current links with
//! [`derive_out_link_counts`](LinkGraph::derive_out_link_counts). Pages whose
//! declared outdegree disagrees with their links are listed by
//! [`inconsistent_pages`](LinkGraph::inconsistent_pages).
//!
//! Since the update kernels enumerate the _predecessors_ of a page, the
//! matrix is stored transposed: row *j* contains the pages linking to *j*.

use crate::PageRankError;

/// A dense directed link graph with declared outdegrees.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), linkrank::PageRankError> {
/// use linkrank::graph::LinkGraph;
///
/// let mut graph = LinkGraph::new(3)?;
/// graph.create_link(0, 1)?;
/// graph.create_link(0, 2)?;
/// graph.create_link(0, 2)?; // collapses with the previous one
/// graph.derive_out_link_counts();
///
/// assert_eq!(graph.num_links(), 2);
/// assert_eq!(graph.out_link_count(0)?, 2);
/// assert_eq!(graph.inv_out_degree(0)?, 0.5);
/// assert_eq!(graph.inv_out_degree(1)?, 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinkGraph {
    page_count: usize,
    /// Transposed adjacency matrix: `links[to * page_count + from]`.
    links: Box<[bool]>,
    num_links: usize,
    out_link_counts: Box<[usize]>,
    inv_out_degrees: Box<[f64]>,
}

impl LinkGraph {
    /// Creates a graph with `page_count` pages, no links, and all declared
    /// outdegrees set to zero.
    pub fn new(page_count: usize) -> Result<Self, PageRankError> {
        if page_count == 0 {
            return Err(PageRankError::InvalidArgument(
                "The number of pages must be positive".to_owned(),
            ));
        }
        let cells = page_count.checked_mul(page_count).ok_or_else(|| {
            PageRankError::InvalidArgument(format!(
                "Too many pages for a dense link matrix: {page_count}"
            ))
        })?;
        let mut links = Vec::new();
        links.try_reserve_exact(cells).map_err(|e| {
            PageRankError::InvalidArgument(format!(
                "Cannot allocate a dense link matrix for {page_count} pages: {e}"
            ))
        })?;
        links.resize(cells, false);
        Ok(Self {
            page_count,
            links: links.into_boxed_slice(),
            num_links: 0,
            out_link_counts: vec![0; page_count].into_boxed_slice(),
            inv_out_degrees: vec![0.0; page_count].into_boxed_slice(),
        })
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the number of distinct links.
    pub fn num_links(&self) -> usize {
        self.num_links
    }

    fn check(&self, index: usize) -> Result<usize, PageRankError> {
        if index < self.page_count {
            Ok(index)
        } else {
            Err(PageRankError::IndexOutOfRange {
                index,
                page_count: self.page_count,
            })
        }
    }

    /// Adds a link from `from` to `to`.
    ///
    /// Adding a link twice has no effect. Self-links are allowed.
    pub fn create_link(&mut self, from: usize, to: usize) -> Result<(), PageRankError> {
        let (from, to) = (self.check(from)?, self.check(to)?);
        let cell = &mut self.links[to * self.page_count + from];
        if !*cell {
            *cell = true;
            self.num_links += 1;
        }
        Ok(())
    }

    /// Returns whether `from` links to `to`.
    pub fn has_link(&self, from: usize, to: usize) -> Result<bool, PageRankError> {
        let (from, to) = (self.check(from)?, self.check(to)?);
        Ok(self.links[to * self.page_count + from])
    }

    /// Declares the outdegree of `page`.
    ///
    /// The normalization weight of the page becomes 1 / `count`, or zero if
    /// `count` is zero, in which case the page contributes nothing through
    /// its links.
    pub fn set_out_link_count(&mut self, page: usize, count: usize) -> Result<(), PageRankError> {
        let page = self.check(page)?;
        self.out_link_counts[page] = count;
        self.inv_out_degrees[page] = if count > 0 { 1.0 / count as f64 } else { 0.0 };
        Ok(())
    }

    /// Declares the outdegree of every page as the number of its links.
    pub fn derive_out_link_counts(&mut self) {
        let counts = self.link_counts();
        for (page, count) in counts.into_iter().enumerate() {
            self.out_link_counts[page] = count;
            self.inv_out_degrees[page] = if count > 0 { 1.0 / count as f64 } else { 0.0 };
        }
    }

    /// Returns the declared outdegree of `page`.
    pub fn out_link_count(&self, page: usize) -> Result<usize, PageRankError> {
        Ok(self.out_link_counts[self.check(page)?])
    }

    /// Returns the normalization weight of `page`.
    pub fn inv_out_degree(&self, page: usize) -> Result<f64, PageRankError> {
        Ok(self.inv_out_degrees[self.check(page)?])
    }

    /// Returns the normalization weights of all pages.
    pub fn inv_out_degrees(&self) -> &[f64] {
        &self.inv_out_degrees
    }

    /// Returns, for each page `from`, whether `from` links to `to`.
    ///
    /// # Panics
    ///
    /// Panics if `to` is out of range.
    pub(crate) fn predecessors(&self, to: usize) -> &[bool] {
        let start = to * self.page_count;
        &self.links[start..start + self.page_count]
    }

    /// Returns an iterator over the links, as pairs `(from, to)` in
    /// increasing order of `to`, then `from`.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.page_count).flat_map(move |to| {
            self.predecessors(to)
                .iter()
                .enumerate()
                .filter(|&(_, &linked)| linked)
                .map(move |(from, _)| (from, to))
        })
    }

    /// Returns the number of links leaving each page.
    fn link_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.page_count];
        for (from, _) in self.links() {
            counts[from] += 1;
        }
        counts
    }

    /// Returns the pages whose declared outdegree differs from the number of
    /// their links.
    pub fn inconsistent_pages(&self) -> Vec<usize> {
        self.link_counts()
            .into_iter()
            .zip(self.out_link_counts.iter())
            .enumerate()
            .filter(|&(_, (actual, &declared))| actual != declared)
            .map(|(page, _)| page)
            .collect()
    }
}
