/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PageRank by power iteration on dense link graphs.
//!
//! The crate stores the link relation of a fixed set of pages in a
//! [`LinkGraph`](graph::LinkGraph), together with the declared outdegree of
//! each page, and computes the PageRank vector with [`PageRank`](rank::PageRank),
//! which iterates either an element-parallel kernel or a matrix kernel until
//! the ℓ₂ distance between successive approximations falls to a tolerance.
//!
//! ```
//! # fn main() -> Result<(), linkrank::PageRankError> {
//! use linkrank::prelude::*;
//!
//! let mut pr = PageRank::with_default_damping(2)?;
//! pr.create_link(0, 1)?;
//! pr.set_out_link_count(0, 1)?;
//! pr.set_out_link_count(1, 0)?;
//!
//! let rank = pr.run(1E-6)?;
//! assert!(rank[1] > rank[0]);
//! # Ok(())
//! # }
//! ```

#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

mod error;
pub use error::PageRankError;

pub mod graph;
pub mod rank;

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::PageRankError;
    pub use crate::graph::LinkGraph;
    pub use crate::rank::preds;
    pub use crate::rank::{
        ElementWise, MatrixKernel, MatrixStorage, Normalization, PageRank, Strategy,
        UpdateKernel, l2_distance,
    };
}
