// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for overlay placement: anchors, configuration, and results.

use kurbo::{Rect, Vec2};

use crate::error::LayoutError;

/// Vertical clearance kept between a panel and the top of the screen, or the top of an active
/// obscuring region.
pub const EDGE_PADDING: f64 = 20.0;

/// Row height used by [`LayoutConfig::default`].
pub const DEFAULT_ROW_HEIGHT: f64 = 44.0;

/// Where an overlay shows relative to its anchor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Below the anchor when possible, otherwise above if strictly less content is cut off there.
    #[default]
    Any,
    /// Above the anchor; the overlay does not show if not enough rows fit.
    Top,
    /// Below the anchor; the overlay does not show if not enough rows fit.
    Bottom,
}

/// The flavor of anchor an overlay is attached to.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorKind {
    /// An ordinary view such as a button or a text field.
    #[default]
    Generic,
    /// An item in a navigation or tool bar. Overlays on these behave like menus.
    BarItem,
}

/// An anchor's frame in window coordinates, resolved for a single layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorRegion {
    /// Frame of the anchor in window coordinates.
    pub frame: Rect,
    /// Anchor flavor.
    pub kind: AnchorKind,
}

impl AnchorRegion {
    /// Create an anchor region.
    pub const fn new(frame: Rect, kind: AnchorKind) -> Self {
        Self { frame, kind }
    }
}

/// Latest state of a screen-covering surface, such as a software keyboard.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Obscuring {
    /// Whether the region currently covers part of the screen.
    pub active: bool,
    /// Window-space y coordinate of the region's top edge.
    pub top_edge: f64,
}

impl Obscuring {
    /// No obscuring region.
    pub const NONE: Self = Self {
        active: false,
        top_edge: 0.0,
    };

    /// An active region whose top edge sits at `top_edge`.
    pub const fn covering_from(top_edge: f64) -> Self {
        Self {
            active: true,
            top_edge,
        }
    }
}

/// Per-overlay placement configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Requested direction. Layout never writes to this.
    pub direction: Direction,
    /// Offset from the anchor's top-left corner when the overlay shows above the anchor.
    pub top_offset: Vec2,
    /// Offset from the anchor's top-left corner when the overlay shows below the anchor.
    ///
    /// With the default of zero the overlay covers its anchor. Use `(0, anchor height)` to show
    /// it underneath.
    pub bottom_offset: Vec2,
    /// Explicit width. When `None`, the width follows the anchor and grows to fit the content.
    pub width: Option<f64>,
    /// Height of a single row. Must be positive.
    pub row_height: f64,
    /// Number of rows in the dataset.
    pub row_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Any,
            top_offset: Vec2::ZERO,
            bottom_offset: Vec2::ZERO,
            width: None,
            row_height: DEFAULT_ROW_HEIGHT,
            row_count: 0,
        }
    }
}

impl LayoutConfig {
    /// Height needed to show every row at once.
    pub fn content_height(&self) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Row counts never approach 2^52."
        )]
        let rows = self.row_count as f64;
        self.row_height * rows
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_row_height(self.row_height)?;
        if let Some(width) = self.width {
            check_width(width)?;
        }
        Ok(())
    }
}

/// Reject row heights that are not strictly positive and finite.
pub(crate) fn check_row_height(row_height: f64) -> Result<(), LayoutError> {
    if row_height.is_finite() && row_height > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidRowHeight(row_height))
    }
}

/// Reject widths that are negative or not finite.
pub(crate) fn check_width(width: f64) -> Result<(), LayoutError> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidWidth(width))
    }
}

/// Computed placement for a single layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Left edge of the panel.
    pub x: f64,
    /// Top edge of the panel.
    pub y: f64,
    /// Panel width.
    pub width: f64,
    /// Height of the panel on screen: content height minus the offscreen part.
    pub visible_height: f64,
    /// Part of the content height that does not fit. Non-zero means the panel must scroll.
    pub offscreen_height: f64,
    /// True when at least one full row is visible.
    pub can_be_displayed: bool,
    /// Direction the panel was placed in.
    pub resolved_direction: Direction,
}

impl LayoutResult {
    /// A zeroed, non-displayable result.
    pub const fn unavailable(direction: Direction) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            visible_height: 0.0,
            offscreen_height: 0.0,
            can_be_displayed: false,
            resolved_direction: direction,
        }
    }

    /// The on-screen panel rectangle.
    pub fn frame(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + self.width.max(0.0),
            self.y + self.visible_height.max(0.0),
        )
    }

    /// True when part of the content is cut off and the panel needs to scroll.
    pub fn is_scrollable(&self) -> bool {
        self.offscreen_height > 0.0
    }
}
