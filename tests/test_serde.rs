/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "serde")]

use anyhow::Result;
use linkrank::rank::{MatrixStorage, Normalization, Strategy};

#[test]
fn test_strategy_config() -> Result<()> {
    let strategy = Strategy::Matrix(MatrixStorage::Dense);
    let json = serde_json::to_string(&strategy)?;
    assert_eq!(json, r#"{"Matrix":"Dense"}"#);
    assert_eq!(serde_json::from_str::<Strategy>(&json)?, strategy);

    let normalization: Normalization = serde_json::from_str(r#""None""#)?;
    assert_eq!(normalization, Normalization::None);
    Ok(())
}
