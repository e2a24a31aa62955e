// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay container and lifecycle state machine.
//!
//! ## Overview
//!
//! [`Overlays`] owns overlays in generational slots, holds the
//! [visibility registry](crate::registry::VisibilityRegistry), and queues
//! [events](crate::event::OverlayEvent). Create one per application (or one per test) and route
//! every lifecycle request through it.
//!
//! ## Transitions
//!
//! - [`show`](Overlays::show): cancel the overlay currently on screen, if it is a different one;
//!   queue [`WillShow`](OverlayEvent::WillShow); occupy the registry; lay out. If at least one row
//!   fits, the overlay becomes [`Shown`](OverlayState::Shown), otherwise it is hidden again and
//!   the outcome reports how much did not fit.
//! - [`hide`](Overlays::hide): release the registry if this overlay holds it, then become
//!   [`Hidden`](OverlayState::Hidden). Hiding a hidden overlay changes nothing.
//! - [`cancel`](Overlays::cancel): hide, then queue [`Canceled`](OverlayEvent::Canceled) so
//!   listeners can tell a dismissal from a programmatic hide.
//!
//! ## Stale ids
//!
//! Removing an overlay does not touch the registry. Readers validate the registry's occupant
//! against the slot generations, and every operation on a stale id is a no-op.

use alloc::vec::Vec;
use core::fmt::Display;

use kurbo::Point;
use understory_overlay_layout::LayoutResult;

use crate::environment::Environment;
use crate::event::OverlayEvent;
use crate::overlay::Overlay;
use crate::registry::VisibilityRegistry;
use crate::types::{
    DismissMode, Interaction, InteractionOutcome, Invalidation, OverlayId, OverlayState,
    ShowOutcome,
};

/// Container and lifecycle service for overlays of rows `T` anchored to host handles `H`.
pub struct Overlays<T, H> {
    slots: Vec<Option<Overlay<T, H>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    registry: VisibilityRegistry,
    events: Vec<OverlayEvent<T>>,
}

impl<T, H> core::fmt::Debug for Overlays<T, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Overlays")
            .field("slots_total", &total)
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("registry", &self.registry)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<T, H> Default for Overlays<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H> Overlays<T, H> {
    /// Create an empty container with an empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            registry: VisibilityRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Take ownership of an overlay and return its id.
    pub fn insert(&mut self, overlay: Overlay<T, H>) -> OverlayId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(overlay);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "OverlayId uses 32-bit indices by design."
            )]
            OverlayId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(overlay));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "OverlayId uses 32-bit indices by design."
            )]
            OverlayId::new((self.slots.len() - 1) as u32, generation)
        }
    }

    /// Remove an overlay and hand it back.
    ///
    /// This models the overlay being destroyed by its owner: no events are queued and the
    /// registry is left alone. A registry still naming `id` is treated as empty from now on.
    pub fn remove(&mut self, id: OverlayId) -> Option<Overlay<T, H>> {
        if !self.is_alive(id) {
            return None;
        }
        let overlay = self.slots[id.idx()].take();
        self.free_list.push(id.idx());
        tracing::debug!(target: "overlay.lifecycle", ?id, "removed");
        overlay
    }

    /// Whether `id` refers to a live overlay.
    pub fn is_alive(&self, id: OverlayId) -> bool {
        self.slots.get(id.idx()).is_some_and(Option::is_some)
            && self.generations.get(id.idx()) == Some(&id.generation())
    }

    /// The overlay behind `id`, if alive.
    pub fn get(&self, id: OverlayId) -> Option<&Overlay<T, H>> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots.get(id.idx())?.as_ref()
    }

    /// The overlay behind `id`, if alive, for configuration.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut Overlay<T, H>> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots.get_mut(id.idx())?.as_mut()
    }

    /// Ids of all live overlays, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "OverlayId uses 32-bit indices by design."
            )]
            Some(OverlayId::new(i as u32, self.generations[i]))
        })
    }

    /// The overlay currently on screen.
    ///
    /// Returns `None` when the registry is empty or names an overlay that no longer exists.
    pub fn visible(&self) -> Option<OverlayId> {
        self.registry.occupant().filter(|id| self.is_alive(*id))
    }

    /// The registry itself, for inspection.
    pub fn registry(&self) -> &VisibilityRegistry {
        &self.registry
    }

    /// Hide `id`.
    ///
    /// Releases the registry if `id` occupies it. Does nothing else if the overlay is already
    /// hidden or gone.
    pub fn hide(&mut self, id: OverlayId) {
        let released = self.registry.release(id);
        let Some(overlay) = self.get_mut(id) else {
            return;
        };
        if overlay.state == OverlayState::Hidden {
            return;
        }
        overlay.state = OverlayState::Hidden;
        tracing::debug!(target: "overlay.lifecycle", ?id, released, "hidden");
        self.events.push(OverlayEvent::Hidden(id));
    }

    /// Hide `id` and report the dismissal.
    ///
    /// [`Canceled`](OverlayEvent::Canceled) is queued even when the overlay was already hidden.
    pub fn cancel(&mut self, id: OverlayId) {
        if !self.is_alive(id) {
            self.registry.release(id);
            return;
        }
        self.hide(id);
        tracing::debug!(target: "overlay.lifecycle", ?id, "canceled");
        self.events.push(OverlayEvent::Canceled(id));
    }

    /// Mark every live overlay as needing layout, for example after the screen rotated or the
    /// keyboard appeared.
    pub fn invalidate_all(&mut self, reason: Invalidation) {
        for overlay in self.slots.iter_mut().flatten() {
            overlay.invalidate(reason);
        }
    }

    /// Select a row, or clear the selection when `index` is `None`.
    ///
    /// While the overlay is shown the new highlight is queued as an event. Rows past the end of
    /// the dataset are ignored.
    pub fn select_row_at(&mut self, id: OverlayId, index: Option<usize>) {
        let Some(index) = index else {
            self.deselect_row_at(id, None);
            return;
        };
        let Some(overlay) = self.get_mut(id) else {
            return;
        };
        if index >= overlay.items().len() {
            tracing::warn!(target: "overlay.selection", ?id, index, "row_out_of_range");
            return;
        }
        overlay.selection.select(Some(index));
        let shown = overlay.is_shown();
        tracing::trace!(target: "overlay.selection", ?id, index, "select");
        if shown {
            self.events.push(OverlayEvent::Highlight {
                overlay: id,
                row: Some(index),
            });
        }
    }

    /// Clear the selection, whichever row `index` names.
    pub fn deselect_row_at(&mut self, id: OverlayId, index: Option<usize>) {
        let Some(overlay) = self.get_mut(id) else {
            return;
        };
        let had_selection = overlay.selection.selected().is_some();
        overlay.selection.deselect(index);
        let shown = overlay.is_shown();
        tracing::trace!(target: "overlay.selection", ?id, ?index, "deselect");
        if shown && had_selection {
            self.events.push(OverlayEvent::Highlight {
                overlay: id,
                row: None,
            });
        }
    }

    /// Replace the rows of `id`.
    ///
    /// Clears the selection first; a shown overlay queues the cleared highlight. The new rows
    /// are laid out at the next [`flush`](Self::flush).
    pub fn set_items(&mut self, id: OverlayId, items: Vec<T>) {
        self.deselect_row_at(id, None);
        if let Some(overlay) = self.get_mut(id) {
            overlay.set_items(items);
        }
    }

    /// Select the first row equal to `item`. Returns false, changing nothing, if no row matches.
    pub fn select_item(&mut self, id: OverlayId, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(index) = self.get(id).and_then(|o| o.index_of(item)) else {
            return false;
        };
        self.select_row_at(id, Some(index));
        true
    }

    /// The user tapped row `index`.
    ///
    /// Selects the row and queues [`SelectionChanged`](OverlayEvent::SelectionChanged). Overlays
    /// anchored to bar items act as menus and drop the selection right away. The overlay is then
    /// hidden. Returns false if the overlay or row does not exist.
    pub fn row_tapped(&mut self, id: OverlayId, index: usize) -> bool
    where
        T: Clone,
    {
        let Some(overlay) = self.get_mut(id) else {
            return false;
        };
        let Some(item) = overlay.item(index).cloned() else {
            tracing::warn!(target: "overlay.selection", ?id, index, "row_out_of_range");
            return false;
        };
        overlay.selection.select(Some(index));
        let is_menu = overlay.anchor().is_some_and(|a| a.is_menu());
        tracing::debug!(target: "overlay.selection", ?id, index, is_menu, "row_tapped");
        self.events.push(OverlayEvent::SelectionChanged {
            overlay: id,
            index,
            item,
        });
        if is_menu {
            self.deselect_row_at(id, Some(index));
        }
        self.hide(id);
        true
    }

    /// Route a pointer interaction at `point` to overlay `id`.
    ///
    /// Interactions inside the panel go to the rows. Outside it, the modal backdrop applies the
    /// overlay's [`DismissMode`]: `Automatic` cancels on any interaction, `OnTap` on a completed
    /// tap, and `Manual` never.
    pub fn interact(
        &mut self,
        id: OverlayId,
        point: Point,
        interaction: Interaction,
    ) -> InteractionOutcome {
        let Some(overlay) = self.get(id) else {
            return InteractionOutcome::PassThrough;
        };
        if !overlay.is_shown() {
            return InteractionOutcome::PassThrough;
        }
        if overlay
            .last_layout
            .is_some_and(|layout| layout.frame().contains(point))
        {
            return InteractionOutcome::Forward;
        }
        match (overlay.dismiss_mode(), interaction) {
            (DismissMode::Automatic, _) | (DismissMode::OnTap, Interaction::Tap) => {
                tracing::debug!(target: "overlay.dismiss", ?id, ?interaction, "dismissed");
                self.cancel(id);
                InteractionOutcome::Dismissed
            }
            _ => InteractionOutcome::Absorbed,
        }
    }

    /// Events queued since the last drain, oldest first.
    pub fn pending_events(&self) -> &[OverlayEvent<T>] {
        &self.events
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = OverlayEvent<T>> + '_ {
        self.events.drain(..)
    }
}

impl<T: Display, H> Overlays<T, H> {
    /// Show `id` if at least one row fits.
    ///
    /// Whatever overlay was on screen before is canceled first and fully hidden by the time this
    /// overlay is laid out. "Does not fit" is a normal outcome, reported through
    /// [`ShowOutcome`], as is a missing screen or a vanished anchor.
    pub fn show<E>(&mut self, id: OverlayId, env: &E) -> ShowOutcome
    where
        E: Environment<AnchorHandle = H> + ?Sized,
    {
        if !self.is_alive(id) {
            tracing::debug!(target: "overlay.lifecycle", ?id, "show_stale_id");
            return ShowOutcome::rejected(0.0);
        }
        if let Some(current) = self.visible()
            && current != id
        {
            tracing::debug!(target: "overlay.lifecycle", displaced = ?current, by = ?id, "displace");
            self.cancel(current);
        }

        self.events.push(OverlayEvent::WillShow(id));
        self.registry.occupy(id);

        let Some(overlay) = self.get_mut(id) else {
            return ShowOutcome::rejected(0.0);
        };
        let layout = overlay.compute_layout(env);
        overlay.last_layout = Some(layout);
        overlay.invalidation = Invalidation::empty();

        if !layout.can_be_displayed {
            tracing::debug!(
                target: "overlay.lifecycle",
                ?id,
                offscreen_height = layout.offscreen_height,
                "show_rejected"
            );
            self.hide(id);
            return ShowOutcome::rejected(layout.offscreen_height);
        }

        overlay.state = OverlayState::Shown;
        let selected = overlay.selection.selected();
        tracing::debug!(
            target: "overlay.lifecycle",
            ?id,
            direction = ?layout.resolved_direction,
            "shown"
        );
        self.events.push(OverlayEvent::Shown {
            overlay: id,
            layout,
        });
        if let Some(row) = selected {
            self.events.push(OverlayEvent::Highlight {
                overlay: id,
                row: Some(row),
            });
        }
        ShowOutcome::SHOWN
    }

    /// Run the pending layout pass of `id`, if it is shown and has one.
    ///
    /// This is the checkpoint for deferred layout: call it once per frame, before painting, and
    /// any number of setter calls since the last flush cost a single pass. A shown overlay that
    /// no longer fits is hidden. Returns the new placement when a pass ran.
    pub fn flush<E>(&mut self, id: OverlayId, env: &E) -> Option<LayoutResult>
    where
        E: Environment<AnchorHandle = H> + ?Sized,
    {
        let overlay = self.get_mut(id)?;
        if !overlay.is_shown() || !overlay.needs_layout() {
            return None;
        }
        let reasons = overlay.invalidation;
        let layout = overlay.compute_layout(env);
        overlay.last_layout = Some(layout);
        overlay.invalidation = Invalidation::empty();
        tracing::trace!(target: "overlay.lifecycle", ?id, ?reasons, "relayout");

        if layout.can_be_displayed {
            self.events.push(OverlayEvent::Relayout {
                overlay: id,
                layout,
            });
        } else {
            self.hide(id);
        }
        Some(layout)
    }

    /// [`flush`](Self::flush) every live overlay.
    pub fn flush_all<E>(&mut self, env: &E)
    where
        E: Environment<AnchorHandle = H> + ?Sized,
    {
        let ids: Vec<OverlayId> = self.ids().collect();
        for id in ids {
            let _ = self.flush(id, env);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Rect, Vec2};
    use understory_overlay_layout::Direction;

    use super::*;
    use crate::anchor::Anchor;
    use crate::environment::testing::TestEnv;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 400.0, 800.0);

    fn env() -> TestEnv {
        TestEnv::new(SCREEN)
            .with_anchor(1, Rect::new(20.0, 100.0, 220.0, 140.0))
            .with_anchor(2, Rect::new(20.0, 700.0, 220.0, 740.0))
            .with_anchor(3, Rect::new(340.0, 20.0, 380.0, 60.0))
    }

    fn rows() -> Vec<&'static str> {
        vec!["10 EUR", "20 EUR", "30 EUR", "40 EUR", "50 EUR"]
    }

    fn anchored(handle: u32) -> Overlay<&'static str, u32> {
        let mut o = Overlay::new()
            .with_anchor(Anchor::view(handle))
            .with_items(rows());
        o.set_bottom_offset(Vec2::new(0.0, 40.0));
        o
    }

    fn count(
        events: &[OverlayEvent<&'static str>],
        f: impl Fn(&OverlayEvent<&'static str>) -> bool,
    ) -> usize {
        events.iter().filter(|e| f(e)).count()
    }

    #[test]
    fn show_transitions_and_occupies() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        assert_eq!(overlays.get(a).unwrap().state(), OverlayState::Hidden);

        let outcome = overlays.show(a, &env);
        assert_eq!(outcome, ShowOutcome::SHOWN);
        assert_eq!(overlays.visible(), Some(a));
        assert!(overlays.get(a).unwrap().is_shown());

        let events: Vec<_> = overlays.drain_events().collect();
        assert!(matches!(events[0], OverlayEvent::WillShow(id) if id == a));
        assert!(matches!(events[1], OverlayEvent::Shown { overlay, .. } if overlay == a));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn show_flips_near_bottom() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(2));
        assert!(overlays.show(a, &env).displayed);
        let layout = overlays.get(a).unwrap().last_layout().unwrap();
        assert_eq!(layout.resolved_direction, Direction::Top);
        assert_eq!(layout.y, 520.0);
        // The request is untouched.
        assert_eq!(overlays.get(a).unwrap().direction(), Direction::Any);
    }

    #[test]
    fn show_that_does_not_fit_reports_offscreen_height() {
        let env = env();
        let mut overlays = Overlays::new();
        let mut o = anchored(2);
        o.set_direction(Direction::Bottom);
        o.set_bottom_offset(Vec2::new(0.0, 80.0));
        let a = overlays.insert(o);

        let outcome = overlays.show(a, &env);
        // 700 + 80 + 220 - 800
        assert_eq!(outcome, ShowOutcome::rejected(200.0));
        assert!(!overlays.get(a).unwrap().is_shown());
        assert_eq!(overlays.visible(), None);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(events, vec![OverlayEvent::WillShow(a)]);
    }

    #[test]
    fn empty_overlay_never_shows() {
        let env = env();
        let mut overlays: Overlays<&str, u32> = Overlays::new();
        let a = overlays.insert(Overlay::new().with_anchor(Anchor::view(1)));
        assert!(!overlays.show(a, &env).displayed);
        assert_eq!(overlays.visible(), None);
    }

    #[test]
    fn no_screen_is_a_normal_rejection() {
        let mut env = env();
        env.screen = None;
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        assert_eq!(overlays.show(a, &env), ShowOutcome::rejected(0.0));
        assert_eq!(overlays.visible(), None);
    }

    #[test]
    fn hide_is_idempotent() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        let b = overlays.insert(anchored(1));
        overlays.show(b, &env);
        overlays.drain_events().for_each(drop);

        // Hiding a hidden overlay leaves the registry and state alone.
        overlays.hide(a);
        assert_eq!(overlays.visible(), Some(b));
        assert_eq!(overlays.get(a).unwrap().state(), OverlayState::Hidden);
        assert!(overlays.pending_events().is_empty());

        overlays.hide(b);
        overlays.hide(b);
        assert_eq!(overlays.visible(), None);
        assert_eq!(overlays.drain_events().count(), 1);
    }

    #[test]
    fn showing_displaces_previous_overlay() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        let b = overlays.insert(anchored(2));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        assert!(overlays.show(b, &env).displayed);
        assert_eq!(overlays.get(a).unwrap().state(), OverlayState::Hidden);
        assert_eq!(overlays.visible(), Some(b));

        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(
            count(&events, |e| matches!(e, OverlayEvent::Canceled(id) if *id == a)),
            1
        );
        // A is fully hidden before B starts showing.
        let hidden_a = events
            .iter()
            .position(|e| *e == OverlayEvent::Hidden(a))
            .unwrap();
        let will_show_b = events
            .iter()
            .position(|e| *e == OverlayEvent::WillShow(b))
            .unwrap();
        assert!(hidden_a < will_show_b, "displacement must complete first");
    }

    #[test]
    fn reshow_of_occupant_does_not_cancel_it() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        overlays.show(a, &env);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(count(&events, |e| matches!(e, OverlayEvent::Canceled(_))), 0);
        assert_eq!(overlays.visible(), Some(a));
    }

    #[test]
    fn cancel_reports_after_hide() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);
        overlays.cancel(a);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(events, vec![OverlayEvent::Hidden(a), OverlayEvent::Canceled(a)]);
        assert_eq!(overlays.visible(), None);
    }

    #[test]
    fn removed_occupant_is_treated_as_empty() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        assert!(overlays.remove(a).is_some());

        // The registry still names the dead id, but nobody sees it.
        assert_eq!(overlays.registry().occupant(), Some(a));
        assert_eq!(overlays.visible(), None);

        // A reused slot gets a new generation and is not mistaken for the old occupant.
        let b = overlays.insert(anchored(1));
        assert_ne!(a, b);
        assert!(!overlays.is_alive(a));
        overlays.drain_events().for_each(drop);
        assert!(overlays.show(b, &env).displayed);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(count(&events, |e| matches!(e, OverlayEvent::Canceled(_))), 0);
        assert_eq!(overlays.visible(), Some(b));
    }

    #[test]
    fn stale_ids_are_ignored() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        let _ = overlays.remove(a);
        assert_eq!(overlays.show(a, &env), ShowOutcome::rejected(0.0));
        overlays.hide(a);
        overlays.cancel(a);
        overlays.select_row_at(a, Some(1));
        assert!(!overlays.row_tapped(a, 0));
        assert!(overlays.pending_events().is_empty());
        assert!(overlays.remove(a).is_none());
    }

    #[test]
    fn selection_round_trip() {
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.select_row_at(a, Some(3));
        assert_eq!(overlays.get(a).unwrap().selected_index(), Some(3));
        overlays.deselect_row_at(a, Some(0));
        assert_eq!(overlays.get(a).unwrap().selected_index(), None);
        overlays.select_row_at(a, Some(2));
        overlays.select_row_at(a, None);
        assert_eq!(overlays.get(a).unwrap().selected_index(), None);
        // Hidden overlays do not queue highlights.
        assert!(overlays.pending_events().is_empty());
    }

    #[test]
    fn select_on_shown_overlay_queues_highlight() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        overlays.select_row_at(a, Some(3));
        assert_eq!(overlays.get(a).unwrap().selected_index(), Some(3));
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(
            events,
            vec![OverlayEvent::Highlight {
                overlay: a,
                row: Some(3)
            }]
        );
    }

    #[test]
    fn select_past_last_row_is_ignored() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.select_row_at(a, Some(1));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        // Five rows: index 5 is one past the end.
        overlays.select_row_at(a, Some(5));
        assert_eq!(overlays.get(a).unwrap().selected_index(), Some(1));
        assert!(overlays.pending_events().is_empty(), "no highlight for a missing row");

        let b = overlays.insert(anchored(1));
        overlays.select_row_at(b, Some(40));
        assert_eq!(overlays.get(b).unwrap().selected_index(), None);
    }

    #[test]
    fn show_restores_highlight() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        assert!(overlays.select_item(a, &"30 EUR"));
        assert!(!overlays.select_item(a, &"999 EUR"));
        overlays.show(a, &env);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(
            events.last(),
            Some(&OverlayEvent::Highlight {
                overlay: a,
                row: Some(2)
            })
        );
    }

    #[test]
    fn row_tap_selects_and_hides() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        assert!(overlays.row_tapped(a, 1));
        let o = overlays.get(a).unwrap();
        assert_eq!(o.selected_index(), Some(1));
        assert_eq!(o.selected_item(), Some(&"20 EUR"));
        assert!(!o.is_shown());
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(
            events,
            vec![
                OverlayEvent::SelectionChanged {
                    overlay: a,
                    index: 1,
                    item: "20 EUR"
                },
                OverlayEvent::Hidden(a),
            ]
        );
        assert!(!overlays.row_tapped(a, 17), "out of range");
    }

    #[test]
    fn menu_tap_does_not_keep_selection() {
        let env = env();
        let mut overlays = Overlays::new();
        let menu = overlays.insert(
            Overlay::new()
                .with_anchor(Anchor::bar_item(3))
                .with_items(vec!["Share", "Rename", "Delete"]),
        );
        overlays.show(menu, &env);
        overlays.drain_events().for_each(drop);

        assert!(overlays.row_tapped(menu, 2));
        assert_eq!(overlays.get(menu).unwrap().selected_index(), None);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(
            events,
            vec![
                OverlayEvent::SelectionChanged {
                    overlay: menu,
                    index: 2,
                    item: "Delete"
                },
                OverlayEvent::Highlight {
                    overlay: menu,
                    row: None
                },
                OverlayEvent::Hidden(menu),
            ]
        );
    }

    #[test]
    fn trailing_menu_right_aligns() {
        let env = env();
        let mut overlays = Overlays::new();
        let menu = overlays.insert(
            Overlay::new()
                .with_anchor(Anchor::bar_item(3))
                .with_items(vec!["Share", "Rename", "Delete"]),
        );
        overlays.show(menu, &env);
        let layout = overlays.get(menu).unwrap().last_layout().unwrap();
        // Widest row is "Rename"/"Delete": 60 units. Right edge meets the item's right edge.
        assert_eq!(layout.width, 60.0);
        assert_eq!(layout.x + layout.width, 380.0);
        assert_eq!(
            overlays.get(menu).unwrap().bottom_offset(),
            Vec2::ZERO,
            "adjustment is per pass"
        );
    }

    #[test]
    fn dataset_change_clears_selection_and_relayouts() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.select_row_at(a, Some(1));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        overlays.set_items(a, vec!["only"]);
        let o = overlays.get_mut(a).unwrap();
        o.set_row_height(50.0).unwrap();
        assert_eq!(o.selected_index(), None);
        assert!(o.needs_layout());

        let layout = overlays.flush(a, &env).unwrap();
        assert_eq!(layout.visible_height, 50.0);
        assert!(!overlays.get(a).unwrap().needs_layout());
        // Nothing pending: no second pass.
        assert_eq!(overlays.flush(a, &env), None);

        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(events.len(), 2, "several setters coalesce into one relayout");
        assert_eq!(
            events[0],
            OverlayEvent::Highlight {
                overlay: a,
                row: None
            }
        );
        assert!(matches!(events[1], OverlayEvent::Relayout { overlay, .. } if overlay == a));
    }

    #[test]
    fn replacing_rows_of_shown_overlay_clears_highlight() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(
            Overlay::new()
                .with_anchor(Anchor::view(1))
                .with_items(vec!["a", "b", "c"]),
        );
        overlays.show(a, &env);
        overlays.select_row_at(a, Some(2));
        overlays.drain_events().for_each(drop);

        overlays.set_items(a, vec!["x", "y", "z"]);
        let _ = overlays.flush(a, &env);

        assert_eq!(overlays.get(a).unwrap().selected_index(), None);
        let events: Vec<_> = overlays.drain_events().collect();
        assert!(
            events.contains(&OverlayEvent::Highlight {
                overlay: a,
                row: None
            }),
            "cleared selection must reach the render sink: {events:?}"
        );
    }

    #[test]
    fn replacing_rows_without_selection_queues_no_highlight() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        overlays.set_items(a, vec!["x"]);
        assert!(overlays.pending_events().is_empty(), "nothing was highlighted");
        assert_eq!(overlays.get(a).unwrap().items(), &["x"]);
    }

    #[test]
    fn flush_skips_hidden_overlays() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.get_mut(a).unwrap().set_direction(Direction::Top);
        assert_eq!(overlays.flush(a, &env), None);
        assert!(overlays.get(a).unwrap().needs_layout(), "kept for the next show");
        overlays.show(a, &env);
        assert!(!overlays.get(a).unwrap().needs_layout());
    }

    #[test]
    fn keyboard_pushes_shown_overlay_off_screen() {
        let mut env = env();
        let mut overlays = Overlays::new();
        let mut o = anchored(1);
        o.set_direction(Direction::Bottom);
        let a = overlays.insert(o);
        overlays.show(a, &env);
        overlays.drain_events().for_each(drop);

        // Keyboard top at 180: only 20 units remain below y = 140 after padding.
        env.obscuring.will_show(Rect::new(0.0, 180.0, 400.0, 800.0));
        overlays.invalidate_all(Invalidation::ENVIRONMENT);
        overlays.flush_all(&env);

        assert!(!overlays.get(a).unwrap().is_shown());
        assert_eq!(overlays.visible(), None);
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(events, vec![OverlayEvent::Hidden(a)]);
    }

    #[test]
    fn keyboard_shrinks_visible_height() {
        let mut env = env();
        let mut overlays = Overlays::new();
        let mut o = anchored(1);
        o.set_direction(Direction::Bottom);
        let a = overlays.insert(o);
        overlays.show(a, &env);

        // Content spans 140..360; keyboard at 300 leaves 140..280.
        env.obscuring.will_show(Rect::new(0.0, 300.0, 400.0, 800.0));
        overlays.invalidate_all(Invalidation::ENVIRONMENT);
        let layout = overlays.flush(a, &env).unwrap();
        assert_eq!(layout.offscreen_height, 80.0);
        assert_eq!(layout.visible_height, 140.0);
        assert!(layout.is_scrollable());
        assert!(overlays.get(a).unwrap().is_shown());
    }

    #[test]
    fn automatic_dismiss_on_any_outside_interaction() {
        let env = env();
        let mut overlays = Overlays::new();
        let mut o = anchored(1);
        o.set_dismiss_mode(DismissMode::Automatic);
        let a = overlays.insert(o);
        overlays.show(a, &env);

        // Panel spans x 20..220, y 140..360.
        assert_eq!(
            overlays.interact(a, Point::new(50.0, 200.0), Interaction::Press),
            InteractionOutcome::Forward
        );
        assert_eq!(
            overlays.interact(a, Point::new(300.0, 600.0), Interaction::Press),
            InteractionOutcome::Dismissed
        );
        assert!(!overlays.get(a).unwrap().is_shown());
        assert_eq!(
            overlays.interact(a, Point::new(300.0, 600.0), Interaction::Tap),
            InteractionOutcome::PassThrough
        );
        let events: Vec<_> = overlays.drain_events().collect();
        assert_eq!(count(&events, |e| matches!(e, OverlayEvent::Canceled(_))), 1);
    }

    #[test]
    fn on_tap_dismiss_waits_for_tap() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1));
        overlays.show(a, &env);
        let outside = Point::new(300.0, 600.0);
        assert_eq!(
            overlays.interact(a, outside, Interaction::Press),
            InteractionOutcome::Absorbed
        );
        assert!(overlays.get(a).unwrap().is_shown());
        assert_eq!(
            overlays.interact(a, outside, Interaction::Tap),
            InteractionOutcome::Dismissed
        );
        assert!(!overlays.get(a).unwrap().is_shown());
    }

    #[test]
    fn manual_overlays_ignore_outside_taps() {
        let env = env();
        let mut overlays = Overlays::new();
        let a = overlays.insert(anchored(1).with_dismiss_mode(DismissMode::Manual));
        overlays.show(a, &env);
        assert_eq!(
            overlays.interact(a, Point::new(300.0, 600.0), Interaction::Tap),
            InteractionOutcome::Absorbed
        );
        assert_eq!(overlays.visible(), Some(a));
    }

    #[test]
    fn anchorless_overlay_centers() {
        let env = env();
        let mut overlays: Overlays<&str, u32> = Overlays::new();
        let a = overlays.insert(Overlay::new().with_items(vec!["English", "German", "Ukrainian"]));
        assert!(overlays.show(a, &env).displayed);
        let layout = overlays.get(a).unwrap().last_layout().unwrap();
        // "Ukrainian" measures 90.
        assert_eq!(layout.width, 90.0);
        assert_eq!(layout.x, 155.0);
        assert_eq!(layout.y, 400.0 - 66.0);
    }
}
