// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single overlay: configuration, rows, selection, and cached placement.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Display;

use kurbo::Vec2;
use understory_overlay_layout::{Direction, LayoutConfig, LayoutResult, compute_layout};

use crate::anchor::Anchor;
use crate::environment::Environment;
use crate::error::OverlayError;
use crate::selection::SelectionState;
use crate::types::{DismissMode, Invalidation, OverlayState};

/// Custom row text, keyed by index and item. Replaces the item's `Display` output.
pub type RowFormatter<T> = Box<dyn Fn(usize, &T) -> String>;

/// An overlay listing rows of `T`, anchored to a host element `H`.
///
/// Setters record an [`Invalidation`] instead of laying out immediately. The pass runs when the
/// overlay is shown, or at the next [`Overlays::flush`](crate::Overlays::flush).
pub struct Overlay<T, H> {
    anchor: Option<Anchor<H>>,
    config: LayoutConfig,
    dismiss_mode: DismissMode,
    items: Vec<T>,
    formatter: Option<RowFormatter<T>>,
    pub(crate) selection: SelectionState,
    pub(crate) state: OverlayState,
    pub(crate) invalidation: Invalidation,
    pub(crate) last_layout: Option<LayoutResult>,
}

impl<T, H> core::fmt::Debug for Overlay<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Overlay")
            .field("anchor", &self.anchor.as_ref().map(Anchor::kind))
            .field("config", &self.config)
            .field("dismiss_mode", &self.dismiss_mode)
            .field("rows", &self.items.len())
            .field("custom_formatter", &self.formatter.is_some())
            .field("selection", &self.selection)
            .field("state", &self.state)
            .field("invalidation", &self.invalidation)
            .finish_non_exhaustive()
    }
}

impl<T, H> Default for Overlay<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H> Overlay<T, H> {
    /// An anchorless overlay with no rows and default configuration.
    pub fn new() -> Self {
        Self {
            anchor: None,
            config: LayoutConfig::default(),
            dismiss_mode: DismissMode::default(),
            items: Vec::new(),
            formatter: None,
            selection: SelectionState::new(),
            state: OverlayState::Hidden,
            invalidation: Invalidation::empty(),
            last_layout: None,
        }
    }

    /// An overlay with the given placement configuration.
    ///
    /// `config.row_count` is ignored; the row count always follows [`items`](Self::items).
    pub fn with_config(config: LayoutConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        let mut overlay = Self::new();
        overlay.config = LayoutConfig {
            row_count: 0,
            ..config
        };
        Ok(overlay)
    }

    /// Builder form of [`set_anchor`](Self::set_anchor).
    pub fn with_anchor(mut self, anchor: Anchor<H>) -> Self {
        self.set_anchor(Some(anchor));
        self
    }

    /// Set the rows of a new overlay.
    ///
    /// Once inserted, replace rows through [`Overlays::set_items`](crate::Overlays::set_items).
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.set_items(items);
        self
    }

    /// Builder form of [`set_dismiss_mode`](Self::set_dismiss_mode).
    pub fn with_dismiss_mode(mut self, mode: DismissMode) -> Self {
        self.dismiss_mode = mode;
        self
    }

    /// Builder form of [`set_formatter`](Self::set_formatter).
    pub fn with_formatter(mut self, formatter: impl Fn(usize, &T) -> String + 'static) -> Self {
        self.set_formatter(Some(Box::new(formatter)));
        self
    }

    /// The anchor, or `None` for an overlay centered on the screen.
    pub fn anchor(&self) -> Option<&Anchor<H>> {
        self.anchor.as_ref()
    }

    /// Replace the anchor.
    pub fn set_anchor(&mut self, anchor: Option<Anchor<H>>) {
        self.anchor = anchor;
        self.invalidate(Invalidation::ANCHOR);
    }

    /// Requested direction.
    pub fn direction(&self) -> Direction {
        self.config.direction
    }

    /// Set the requested direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.config.direction = direction;
        self.invalidate(Invalidation::DIRECTION);
    }

    /// Offset from the anchor's origin when showing above it.
    pub fn top_offset(&self) -> Vec2 {
        self.config.top_offset
    }

    /// Set the offset used when showing above the anchor.
    pub fn set_top_offset(&mut self, offset: Vec2) {
        self.config.top_offset = offset;
        self.invalidate(Invalidation::OFFSETS);
    }

    /// Offset from the anchor's origin when showing below it.
    pub fn bottom_offset(&self) -> Vec2 {
        self.config.bottom_offset
    }

    /// Set the offset used when showing below the anchor.
    ///
    /// The default of zero places the overlay over its anchor; `(0, anchor height)` places it
    /// underneath.
    pub fn set_bottom_offset(&mut self, offset: Vec2) {
        self.config.bottom_offset = offset;
        self.invalidate(Invalidation::OFFSETS);
    }

    /// Explicit width, if any.
    pub fn width(&self) -> Option<f64> {
        self.config.width
    }

    /// Set an explicit width, or `None` to follow the anchor and content.
    pub fn set_width(&mut self, width: Option<f64>) -> Result<(), OverlayError> {
        LayoutConfig {
            width,
            ..self.config
        }
        .validate()?;
        self.config.width = width;
        self.invalidate(Invalidation::WIDTH);
        Ok(())
    }

    /// Row height.
    pub fn row_height(&self) -> f64 {
        self.config.row_height
    }

    /// Set the row height. Must be positive and finite.
    pub fn set_row_height(&mut self, row_height: f64) -> Result<(), OverlayError> {
        LayoutConfig {
            row_height,
            ..self.config
        }
        .validate()?;
        self.config.row_height = row_height;
        self.invalidate(Invalidation::ROW_HEIGHT);
        Ok(())
    }

    /// How the user can dismiss this overlay.
    pub fn dismiss_mode(&self) -> DismissMode {
        self.dismiss_mode
    }

    /// Change how the user can dismiss this overlay. Takes effect on the next interaction.
    pub fn set_dismiss_mode(&mut self, mode: DismissMode) {
        self.dismiss_mode = mode;
    }

    /// The rows.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The row at `index`.
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Replace the rows. Clears the selection first.
    pub(crate) fn set_items(&mut self, items: Vec<T>) {
        self.selection.deselect(self.selection.selected());
        self.config.row_count = items.len();
        self.items = items;
        self.invalidate(Invalidation::DATASET);
    }

    /// Install or remove a custom row formatter.
    pub fn set_formatter(&mut self, formatter: Option<RowFormatter<T>>) {
        self.formatter = formatter;
        self.invalidate(Invalidation::DATASET);
    }

    /// Selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Item of the selected row.
    pub fn selected_item(&self) -> Option<&T> {
        self.selection.selected().and_then(|i| self.items.get(i))
    }

    /// Index of the first row equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|it| it == item)
    }

    /// Current visibility state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// True while shown.
    pub fn is_shown(&self) -> bool {
        self.state == OverlayState::Shown
    }

    /// Reasons a layout pass is pending; empty when up to date.
    pub fn pending_invalidation(&self) -> Invalidation {
        self.invalidation
    }

    /// True when a layout pass is pending.
    pub fn needs_layout(&self) -> bool {
        !self.invalidation.is_empty()
    }

    /// Placement from the most recent pass.
    pub fn last_layout(&self) -> Option<LayoutResult> {
        self.last_layout
    }

    /// Placement configuration, with the row count taken from the rows.
    pub fn layout_config(&self) -> LayoutConfig {
        self.config
    }

    /// Text shown for the row at `index`: the formatter's output, or the item's `Display`.
    pub fn row_text(&self, index: usize) -> Option<String>
    where
        T: Display,
    {
        let item = self.items.get(index)?;
        Some(match &self.formatter {
            Some(format) => format(index, item),
            None => item.to_string(),
        })
    }

    /// Run a layout pass against the host environment without changing any state.
    ///
    /// An anchor the host can no longer resolve yields a non-displayable result, as does a
    /// missing screen.
    pub fn compute_layout<E>(&self, env: &E) -> LayoutResult
    where
        E: Environment<AnchorHandle = H> + ?Sized,
        T: Display,
    {
        let anchor = match &self.anchor {
            None => None,
            Some(anchor) => {
                let Some(region) = anchor.resolve(env) else {
                    tracing::debug!(target: "overlay.layout", "anchor_unresolved");
                    return LayoutResult::unavailable(self.config.direction);
                };
                Some(region)
            }
        };
        compute_layout(
            anchor,
            &self.config,
            env.visible_screen(),
            env.obscuring(),
            &mut || self.fitting_width(env),
        )
    }

    /// Widest rendered row over the whole dataset.
    fn fitting_width<E>(&self, env: &E) -> f64
    where
        E: Environment<AnchorHandle = H> + ?Sized,
        T: Display,
    {
        (0..self.items.len())
            .filter_map(|i| self.row_text(i))
            .map(|text| env.measure_row(&text, self.config.row_height))
            .fold(0.0, f64::max)
    }

    pub(crate) fn invalidate(&mut self, reason: Invalidation) {
        self.invalidation |= reason;
    }
}
