// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine.
//!
//! ## Overview
//!
//! [`compute_layout`] turns anchor geometry, configuration, and screen constraints into a
//! [`LayoutResult`]. A pass runs these steps in order:
//!
//! 1. Bail out with a non-displayable result when there is no visible screen.
//! 2. Right-align panels hanging off bar items in the right half of the screen.
//! 3. Resolve the direction and compute the bottom or top placement.
//! 4. Widen the panel to its content unless an explicit width is set.
//! 5. Shift the panel left, or shrink it, so it does not bleed off the right edge.
//! 6. Decide whether at least one row is visible.
//!
//! ## Direction resolution
//!
//! - Anchorless overlays always show centered on the screen and resolve to [`Direction::Bottom`].
//! - [`Direction::Bottom`] and [`Direction::Top`] are honored as requested.
//! - [`Direction::Any`] prefers the bottom. Only when the bottom placement cuts content off is the
//!   top placement computed; it wins if it cuts off strictly less. Ties keep the bottom.

use kurbo::{Rect, Vec2};

use crate::types::{
    AnchorKind, AnchorRegion, Direction, EDGE_PADDING, LayoutConfig, LayoutResult, Obscuring,
};

/// Source of the content-fit width: the width needed to render the widest row without clipping.
///
/// Implemented for any `FnMut() -> f64`. The engine calls it at most once per pass and never
/// reuses a value across passes, since content can change between measurements.
pub trait FittingWidth {
    /// Measure the widest row.
    fn fitting_width(&mut self) -> f64;
}

impl<F: FnMut() -> f64> FittingWidth for F {
    fn fitting_width(&mut self) -> f64 {
        self()
    }
}

/// Measures on first use and remembers the value for the rest of the pass.
struct PassWidth<'a, W: FittingWidth + ?Sized> {
    source: &'a mut W,
    measured: Option<f64>,
}

impl<'a, W: FittingWidth + ?Sized> PassWidth<'a, W> {
    fn new(source: &'a mut W) -> Self {
        Self {
            source,
            measured: None,
        }
    }

    fn get(&mut self) -> f64 {
        match self.measured {
            Some(w) => w,
            None => {
                let w = self.source.fitting_width();
                self.measured = Some(w);
                w
            }
        }
    }
}

/// Placement before width and bounds reconciliation.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Placement {
    x: f64,
    y: f64,
    width: f64,
    offscreen_height: f64,
}

/// Compute where an overlay goes and whether it can be shown.
///
/// - `anchor`: the anchor's frame for this pass, or `None` for an anchorless overlay centered on
///   the screen.
/// - `screen`: bounds of the visible window, or `None` when there is none. A missing screen yields
///   [`LayoutResult::unavailable`] regardless of anchor and direction.
/// - `obscuring`: latest obscuring-region signal. When active it takes precedence over the bottom
///   of the screen for bottom placements.
/// - `fitting`: content-fit width source, consulted only when needed.
///
/// The function is deterministic for stable inputs and never mutates `config`.
pub fn compute_layout<W: FittingWidth + ?Sized>(
    anchor: Option<AnchorRegion>,
    config: &LayoutConfig,
    screen: Option<Rect>,
    obscuring: Obscuring,
    fitting: &mut W,
) -> LayoutResult {
    let Some(screen) = screen else {
        tracing::trace!(target: "overlay.layout", "no_visible_screen");
        return LayoutResult::unavailable(config.direction);
    };
    let mut fit = PassWidth::new(fitting);
    let content_height = config.content_height();

    // Panels hanging off trailing bar items grow leftwards from the item's right edge.
    let mut bottom_offset = config.bottom_offset;
    if let Some(a) = anchor
        && a.kind == AnchorKind::BarItem
        && a.frame.min_x() > screen.center().x
    {
        let w = match config.width {
            Some(w) => w,
            None => fit.get(),
        };
        bottom_offset.x = -(w - a.frame.width());
    }

    let (mut placement, resolved_direction) = match anchor {
        None => (
            place_below(
                None,
                bottom_offset,
                config.width,
                content_height,
                screen,
                obscuring,
                &mut fit,
            ),
            Direction::Bottom,
        ),
        Some(a) => match config.direction {
            Direction::Bottom => (
                place_below(
                    Some(&a),
                    bottom_offset,
                    config.width,
                    content_height,
                    screen,
                    obscuring,
                    &mut fit,
                ),
                Direction::Bottom,
            ),
            Direction::Top => (
                place_above(&a, config.top_offset, config.width, content_height, screen),
                Direction::Top,
            ),
            Direction::Any => {
                let below = place_below(
                    Some(&a),
                    bottom_offset,
                    config.width,
                    content_height,
                    screen,
                    obscuring,
                    &mut fit,
                );
                if below.offscreen_height > 0.0 {
                    let above =
                        place_above(&a, config.top_offset, config.width, content_height, screen);
                    if above.offscreen_height < below.offscreen_height {
                        tracing::debug!(
                            target: "overlay.layout",
                            below = below.offscreen_height,
                            above = above.offscreen_height,
                            "flip_to_top"
                        );
                        (above, Direction::Top)
                    } else {
                        (below, Direction::Bottom)
                    }
                } else {
                    (below, Direction::Bottom)
                }
            }
        },
    };

    if config.width.is_none() {
        fit_width_to_content(&mut placement, fit.get());
    }
    clamp_to_screen(&mut placement, screen);

    let visible_height = content_height - placement.offscreen_height;
    let can_be_displayed = visible_height >= config.row_height;

    tracing::trace!(
        target: "overlay.layout",
        x = placement.x,
        y = placement.y,
        width = placement.width,
        visible_height,
        offscreen_height = placement.offscreen_height,
        can_be_displayed,
        direction = ?resolved_direction,
        "layout_pass"
    );

    LayoutResult {
        x: placement.x,
        y: placement.y,
        width: placement.width,
        visible_height,
        offscreen_height: placement.offscreen_height,
        can_be_displayed,
        resolved_direction,
    }
}

fn place_below<W: FittingWidth + ?Sized>(
    anchor: Option<&AnchorRegion>,
    offset: Vec2,
    width: Option<f64>,
    content_height: f64,
    screen: Rect,
    obscuring: Obscuring,
    fit: &mut PassWidth<'_, W>,
) -> Placement {
    let width = match (width, anchor) {
        (Some(w), _) => w,
        (None, Some(a)) => a.frame.width() - offset.x,
        (None, None) => fit.get() - offset.x,
    };
    let center = screen.center();
    let (anchor_x, anchor_y) = match anchor {
        Some(a) => (a.frame.min_x(), a.frame.min_y()),
        None => (center.x - width / 2.0, center.y - content_height / 2.0),
    };

    let x = anchor_x + offset.x;
    let y = anchor_y.max(screen.min_y()) + offset.y;

    let max_y = y + content_height;
    let obscured_from = obscuring.top_edge - EDGE_PADDING;
    let offscreen_height = if obscuring.active && max_y > obscured_from {
        max_y - obscured_from
    } else if max_y > screen.max_y() {
        max_y - screen.max_y()
    } else {
        0.0
    };

    Placement {
        x,
        y,
        width,
        offscreen_height,
    }
}

fn place_above(
    anchor: &AnchorRegion,
    offset: Vec2,
    width: Option<f64>,
    content_height: f64,
    screen: Rect,
) -> Placement {
    let x = anchor.frame.min_x() + offset.x;
    let mut y = anchor.frame.max_y() + offset.y - content_height;

    let top = screen.min_y() + EDGE_PADDING;
    let mut offscreen_height = 0.0;
    if y < top {
        offscreen_height = top - y;
        y = top;
    }

    let width = width.unwrap_or(anchor.frame.width() - offset.x);

    Placement {
        x,
        y,
        width,
        offscreen_height,
    }
}

/// Content is never clipped horizontally unless the caller set an explicit width.
fn fit_width_to_content(placement: &mut Placement, fitting_width: f64) {
    if placement.width < fitting_width {
        placement.width = fitting_width;
    }
}

/// Shift left to stay on screen; once the left edge is reached, shrink instead.
fn clamp_to_screen(placement: &mut Placement, screen: Rect) {
    let max_x = placement.x + placement.width;
    if max_x <= screen.max_x() {
        return;
    }
    let delta = max_x - screen.max_x();
    let new_x = placement.x - delta;
    if new_x > screen.min_x() {
        placement.x = new_x;
    } else {
        placement.x = screen.min_x();
        // `new_x` is left of the screen edge here, so this shrinks the width.
        placement.width += new_x - screen.min_x();
    }
}
