// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use understory_overlay_layout::LayoutError;

/// Programmer errors caught while configuring an overlay.
///
/// Geometry that cannot be shown (no screen, an anchor that disappeared, content that does not
/// fit) is not an error; it surfaces as a non-displayable layout instead.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum OverlayError {
    /// An anchor was built from a missing handle.
    #[error("anchor handle is missing")]
    MissingAnchor,
    /// A placement value was out of range.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
