/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use linkrank::rank::preds::*;
use predicates::prelude::*;

fn params(iteration: usize, distance: f64) -> PredParams {
    PredParams {
        iteration,
        distance,
    }
}

#[test]
fn test_max_iter_eval() {
    let pred = MaxIter::from(10);
    assert!(!pred.eval(&params(9, 1.0)));
    assert!(pred.eval(&params(10, 1.0)));
    assert!(pred.eval(&params(11, 1.0)));
}

#[test]
fn test_max_iter_default() {
    let pred = MaxIter::default();
    assert!(!pred.eval(&params(MaxIter::DEFAULT_MAX_ITER - 1, 1.0)));
    assert!(pred.eval(&params(MaxIter::DEFAULT_MAX_ITER, 1.0)));
}

#[test]
fn test_l2_norm_eval() -> anyhow::Result<()> {
    let pred = L2Norm::try_from(1E-3)?;
    assert_eq!(pred.tolerance(), 1E-3);
    assert!(!pred.eval(&params(1, 2E-3)));
    assert!(pred.eval(&params(1, 1E-3)));
    assert!(pred.eval(&params(1, 0.0)));
    Ok(())
}

#[test]
fn test_l2_norm_invalid() {
    assert!(L2Norm::try_from(0.0).is_err());
    assert!(L2Norm::try_from(-1E-6).is_err());
    assert!(L2Norm::try_from(f64::NAN).is_err());
}

#[test]
fn test_l2_norm_default() -> anyhow::Result<()> {
    let pred = L2Norm::try_from(None)?;
    assert_eq!(pred.tolerance(), L2Norm::DEFAULT_TOLERANCE);
    assert_eq!(L2Norm::default().tolerance(), L2Norm::DEFAULT_TOLERANCE);
    Ok(())
}

#[test]
fn test_display() -> anyhow::Result<()> {
    assert_eq!(MaxIter::from(7).to_string(), "(max iter: 7)");
    assert_eq!(L2Norm::try_from(0.5)?.to_string(), "(distance: 0.5)");
    Ok(())
}

#[test]
fn test_or() -> anyhow::Result<()> {
    let pred = L2Norm::try_from(1E-6)?.or(MaxIter::from(3));
    assert!(!pred.eval(&params(1, 1.0)));
    assert!(pred.eval(&params(1, 1E-7)));
    assert!(pred.eval(&params(3, 1.0)));
    Ok(())
}
