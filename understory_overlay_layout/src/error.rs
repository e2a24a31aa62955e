// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

/// A [`LayoutConfig`](crate::LayoutConfig) value the engine cannot work with.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Row height was zero, negative, or not finite.
    #[error("row height must be positive and finite, got {0}")]
    InvalidRowHeight(f64),
    /// Explicit width was negative or not finite.
    #[error("overlay width must be non-negative and finite, got {0}")]
    InvalidWidth(f64),
}
