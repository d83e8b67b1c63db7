// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-renderer façade.
//!
//! [`FrameRenderer`] is what the widget layer and the render driver talk to.
//! It owns a [`FrameLayers`] ordering table and the per-stratum cache-target
//! slots, and translates widget lifecycle events (shown, hidden, re-strata'd,
//! re-leveled) into table mutations.
//!
//! The render pass is re-entrancy tolerant: a frame's draw callback may hide
//! or destroy any frame, including itself. Each stratum pass works from a
//! snapshot taken up front and re-checks liveness and membership immediately
//! before every callback, so a frame removed mid-pass is skipped and a
//! destroyed frame is never drawn.

use alloc::vec::Vec;

use kurbo::Point;

use crate::backend::TargetId;
use crate::frame::{FrameId, FrameTree};
use crate::layers::FrameLayers;
use crate::strata::{FrameStrata, STRATA_COUNT};

/// Layering and render-order management for one top-level renderer.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    layers: FrameLayers,
    targets: [Option<TargetId>; STRATA_COUNT],
}

impl FrameRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Widget-layer notifications --

    /// Tells this renderer that it should (or no longer should) render a
    /// frame.
    ///
    /// On `rendered = true` the frame is inserted at its effective stratum
    /// and level as reported by the widget capability; on `false` it is
    /// removed at its recorded placement (the widget's current values are
    /// deliberately not consulted, so a widget that already mutated its
    /// stratum or level unregisters cleanly).
    ///
    /// # Panics
    ///
    /// Panics if the effective stratum is the `Parent` pseudo-stratum, on
    /// double registration, and on unregistering a frame that is not
    /// registered.
    pub fn notify_rendered<T>(&mut self, tree: &T, id: FrameId, rendered: bool)
    where
        T: FrameTree + ?Sized,
    {
        if rendered {
            let strata = tree.effective_strata(id);
            let level = tree.level(id);
            self.layers.register(id, strata, level);
        } else {
            self.layers.unregister(id);
        }
    }

    /// Tells this renderer that a frame moved from stratum `old` to `new`.
    ///
    /// Both endpoints are marked for redraw.
    ///
    /// # Panics
    ///
    /// Panics if either stratum is `Parent`, if the frame is not registered,
    /// or if `old` disagrees with the recorded placement.
    pub fn notify_strata_changed(&mut self, id: FrameId, old: FrameStrata, new: FrameStrata) {
        self.layers.move_strata(id, old, new);
    }

    /// Tells this renderer that a frame moved from level `old` to `new`
    /// within its stratum.
    ///
    /// # Panics
    ///
    /// Panics if the frame is not registered or if `old` disagrees with the
    /// recorded placement.
    pub fn notify_level_changed(&mut self, id: FrameId, old: i32, new: i32) {
        self.layers.move_level(id, old, new);
    }

    /// Tells this renderer that a stratum's pixel content needs re-rendering
    /// even though nothing structural changed (e.g. a frame's texture
    /// animated).
    pub fn notify_strata_needs_redraw(&mut self, strata: FrameStrata) {
        self.layers.mark_redraw(strata);
    }

    // -- Rendering --

    /// Renders one stratum: invokes `draw` for each of its frames in render
    /// order.
    ///
    /// The callback receives `&mut Self` so it may mutate the renderer
    /// re-entrantly (scripts run from draw callbacks do). The frame list is
    /// snapshotted before the first callback; each frame is skipped unless it
    /// is still alive and still registered at callback time.
    ///
    /// This touches no backend state — compositing the stratum (or replaying
    /// its cache target) is the driver's job.
    pub fn render_stratum<T, F>(&mut self, strata: FrameStrata, tree: &T, mut draw: F)
    where
        T: FrameTree + ?Sized,
        F: FnMut(&mut Self, FrameId),
    {
        let snapshot: Vec<FrameId> = self.layers.stratum_frames(strata).collect();
        for id in snapshot {
            if tree.is_alive(id) && self.layers.contains(id) {
                draw(self, id);
            }
        }
    }

    // -- Queries --

    /// Finds the topmost frame matching `predicate`.
    ///
    /// Walks frames in reverse render order (frame on top goes first) and
    /// returns the first that is alive, visible, mouse-enabled, and accepted
    /// by the predicate. The point-in-bounds test, if any, is the caller's:
    /// fold it into the predicate or use
    /// [`topmost_frame_at`](Self::topmost_frame_at).
    pub fn find_topmost<T, F>(&self, tree: &T, predicate: F) -> Option<FrameId>
    where
        T: FrameTree + ?Sized,
        F: Fn(FrameId) -> bool,
    {
        self.layers.topmost_where(tree, predicate)
    }

    /// Finds the topmost interactable frame under `point` that satisfies
    /// `predicate`.
    pub fn topmost_frame_at<T, F>(&self, point: Point, tree: &T, predicate: F) -> Option<FrameId>
    where
        T: FrameTree + ?Sized,
        F: Fn(FrameId) -> bool,
    {
        self.layers.topmost_frame_at(point, tree, predicate)
    }

    /// Returns the highest populated level in a stratum, or 0 when empty.
    ///
    /// # Panics
    ///
    /// Panics if `strata` is `Parent`.
    #[must_use]
    pub fn highest_level(&self, strata: FrameStrata) -> i32 {
        self.layers.highest_level(strata)
    }

    /// Returns the ordering table, for render-order iteration and debug
    /// dumps.
    #[must_use]
    pub fn layers(&self) -> &FrameLayers {
        &self.layers
    }

    // -- Stratum cache targets --

    /// Installs (or removes) the off-screen cache target for a stratum and
    /// marks the stratum for redraw.
    pub fn set_stratum_target(&mut self, strata: FrameStrata, target: Option<TargetId>) {
        self.targets[strata.index()] = target;
        self.layers.mark_redraw(strata);
    }

    /// Returns the stratum's cache target, if one is installed.
    #[must_use]
    pub fn stratum_target(&self, strata: FrameStrata) -> Option<TargetId> {
        self.targets[strata.index()]
    }

    // -- Reload / dirty consumption --

    /// Resets the renderer for a full UI reload.
    ///
    /// The table is left empty with every stratum marked for redraw and the
    /// structure flag set; all cache targets are dropped.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.targets = [None; STRATA_COUNT];
    }

    /// Drains and returns the strata needing re-render since the last drain.
    pub fn drain_redraw(&mut self) -> Vec<FrameStrata> {
        self.layers.drain_redraw()
    }

    /// Returns whether render order changed since the last call, and resets
    /// the flag. Drivers rebuild order-derived batching state when this
    /// trips.
    pub fn take_structure_changed(&mut self) -> bool {
        self.layers.take_structure_changed()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use kurbo::Rect;

    use super::*;
    use crate::frame::RendererId;
    use crate::strata::FrameStrata::{High, Low, Medium, Parent, Tooltip};

    struct TestFrame {
        strata: FrameStrata,
        level: i32,
        visible: bool,
        mouse: bool,
        bounds: Rect,
        alive: Cell<bool>,
    }

    impl TestFrame {
        fn at(strata: FrameStrata, level: i32) -> Self {
            Self {
                strata,
                level,
                visible: true,
                mouse: true,
                bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                alive: Cell::new(true),
            }
        }
    }

    #[derive(Default)]
    struct TestTree {
        frames: BTreeMap<FrameId, TestFrame>,
    }

    impl TestTree {
        fn add(&mut self, id: FrameId, frame: TestFrame) {
            self.frames.insert(id, frame);
        }

        fn kill(&self, id: FrameId) {
            self.frames[&id].alive.set(false);
        }
    }

    impl FrameTree for TestTree {
        fn is_alive(&self, id: FrameId) -> bool {
            self.frames.get(&id).is_some_and(|f| f.alive.get())
        }
        fn effective_strata(&self, id: FrameId) -> FrameStrata {
            self.frames[&id].strata
        }
        fn level(&self, id: FrameId) -> i32 {
            self.frames[&id].level
        }
        fn is_visible(&self, id: FrameId) -> bool {
            self.frames[&id].visible
        }
        fn is_mouse_enabled(&self, id: FrameId) -> bool {
            self.frames[&id].mouse
        }
        fn contains_point(&self, id: FrameId, point: Point) -> bool {
            self.frames[&id].bounds.contains(point)
        }
        fn parent(&self, _id: FrameId) -> Option<FrameId> {
            None
        }
        fn name(&self, id: FrameId) -> String {
            format!("Frame{}", id.0)
        }
        fn renderer(&self, _id: FrameId) -> RendererId {
            RendererId(0)
        }
        fn bounds(&self, id: FrameId) -> Rect {
            self.frames[&id].bounds
        }
        fn ancestry_generation(&self, _id: FrameId) -> u64 {
            0
        }
    }

    fn show(renderer: &mut FrameRenderer, tree: &TestTree, id: FrameId) {
        renderer.notify_rendered(tree, id, true);
    }

    #[test]
    fn render_order_follows_levels() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Medium, 0));
        tree.add(FrameId(2), TestFrame::at(Medium, 5));
        tree.add(FrameId(3), TestFrame::at(Medium, -3));

        let mut renderer = FrameRenderer::new();
        for id in [1, 2, 3] {
            show(&mut renderer, &tree, FrameId(id));
        }

        let mut drawn = Vec::new();
        renderer.render_stratum(Medium, &tree, |_, id| drawn.push(id));
        assert_eq!(drawn, vec![FrameId(3), FrameId(1), FrameId(2)]);
        assert_eq!(renderer.highest_level(Medium), 5);
    }

    #[test]
    fn topmost_prefers_higher_strata() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Low, 0));
        tree.add(FrameId(2), TestFrame::at(High, 0));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));
        show(&mut renderer, &tree, FrameId(2));

        let hit = renderer.topmost_frame_at(Point::new(10.0, 10.0), &tree, |_| true);
        assert_eq!(hit, Some(FrameId(2)));
    }

    #[test]
    fn topmost_matches_last_in_render_order() {
        let mut tree = TestTree::default();
        for i in 0..6 {
            tree.add(FrameId(i), TestFrame::at(Medium, (i % 3) as i32));
        }

        let mut renderer = FrameRenderer::new();
        for i in 0..6 {
            show(&mut renderer, &tree, FrameId(i));
        }

        let mut drawn = Vec::new();
        renderer.render_stratum(Medium, &tree, |_, id| drawn.push(id));

        let hit = renderer.topmost_frame_at(Point::new(1.0, 1.0), &tree, |_| true);
        assert_eq!(hit, drawn.last().copied(), "hit-test is reverse render order");
    }

    #[test]
    fn topmost_skips_invisible_and_mouse_disabled() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Low, 0));
        tree.add(
            FrameId(2),
            TestFrame {
                visible: false,
                ..TestFrame::at(Tooltip, 0)
            },
        );
        tree.add(
            FrameId(3),
            TestFrame {
                mouse: false,
                ..TestFrame::at(High, 0)
            },
        );

        let mut renderer = FrameRenderer::new();
        for id in [1, 2, 3] {
            show(&mut renderer, &tree, FrameId(id));
        }

        let hit = renderer.topmost_frame_at(Point::new(10.0, 10.0), &tree, |_| true);
        assert_eq!(hit, Some(FrameId(1)));
    }

    #[test]
    fn topmost_respects_predicate_and_short_circuits() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Low, 0));
        tree.add(FrameId(2), TestFrame::at(High, 0));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));
        show(&mut renderer, &tree, FrameId(2));

        let hit = renderer.find_topmost(&tree, |id| id != FrameId(2));
        assert_eq!(hit, Some(FrameId(1)));
    }

    #[test]
    fn strata_change_moves_between_buckets() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Low, 2));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));
        let _ = renderer.drain_redraw();

        renderer.notify_strata_changed(FrameId(1), Low, High);

        let mut dirtied = renderer.drain_redraw();
        dirtied.sort();
        assert_eq!(dirtied, vec![Low, High]);

        let mut drawn = Vec::new();
        renderer.render_stratum(High, &tree, |_, id| drawn.push(id));
        assert_eq!(drawn, vec![FrameId(1)]);
    }

    #[test]
    fn level_change_restacks_within_stratum() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Medium, 0));
        tree.add(FrameId(2), TestFrame::at(Medium, 0));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));
        show(&mut renderer, &tree, FrameId(2));

        // Raise frame 1 above frame 2, the usual "clicked window to front".
        let top = renderer.highest_level(Medium) + 1;
        renderer.notify_level_changed(FrameId(1), 0, top);

        let mut drawn = Vec::new();
        renderer.render_stratum(Medium, &tree, |_, id| drawn.push(id));
        assert_eq!(drawn, vec![FrameId(2), FrameId(1)]);
    }

    #[test]
    fn hide_uses_recorded_placement_not_current_widget_state() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Medium, 0));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));

        // The widget mutates its level before unregistering; removal must
        // still find the frame where the table recorded it.
        tree.frames.get_mut(&FrameId(1)).unwrap().level = 99;
        renderer.notify_rendered(&tree, FrameId(1), false);
        assert!(renderer.layers().is_empty());
    }

    #[test]
    fn render_pass_skips_frames_removed_reentrantly() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Medium, 0));
        tree.add(FrameId(2), TestFrame::at(Medium, 1));
        tree.add(FrameId(3), TestFrame::at(Medium, 2));

        let mut renderer = FrameRenderer::new();
        for id in [1, 2, 3] {
            show(&mut renderer, &tree, FrameId(id));
        }

        // Frame 1's callback closes frame 3 (not yet visited) and then
        // frame 1 itself; neither removal may crash the pass, and frame 3
        // must not be drawn.
        let mut drawn = Vec::new();
        renderer.render_stratum(Medium, &tree, |r, id| {
            drawn.push(id);
            if id == FrameId(1) {
                r.notify_rendered(&tree, FrameId(3), false);
                r.notify_rendered(&tree, FrameId(1), false);
            }
        });
        assert_eq!(drawn, vec![FrameId(1), FrameId(2)]);
    }

    #[test]
    fn render_pass_never_draws_destroyed_frames() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Medium, 0));
        tree.add(FrameId(2), TestFrame::at(Medium, 1));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));
        show(&mut renderer, &tree, FrameId(2));

        // Frame 2 dies mid-pass without unregistering (its owner will catch
        // up later); the liveness check must still skip it.
        let mut drawn = Vec::new();
        renderer.render_stratum(Medium, &tree, |_, id| {
            drawn.push(id);
            if id == FrameId(1) {
                tree.kill(FrameId(2));
            }
        });
        assert_eq!(drawn, vec![FrameId(1)]);
    }

    #[test]
    fn stratum_targets_survive_until_clear() {
        let mut renderer = FrameRenderer::new();
        assert_eq!(renderer.stratum_target(Medium), None);

        renderer.set_stratum_target(Medium, Some(TargetId(7)));
        assert_eq!(renderer.stratum_target(Medium), Some(TargetId(7)));
        assert_eq!(renderer.drain_redraw(), vec![Medium]);

        renderer.clear();
        assert_eq!(renderer.stratum_target(Medium), None);
        assert!(renderer.take_structure_changed());
    }

    #[test]
    fn explicit_redraw_request_is_surfaced_once() {
        let mut renderer = FrameRenderer::new();
        renderer.notify_strata_needs_redraw(Tooltip);
        assert_eq!(renderer.drain_redraw(), vec![Tooltip]);
        assert!(renderer.drain_redraw().is_empty());
        assert!(!renderer.take_structure_changed());
    }

    #[test]
    #[should_panic(expected = "cannot use PARENT strata")]
    fn parent_effective_strata_is_rejected() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Parent, 0));

        let mut renderer = FrameRenderer::new();
        show(&mut renderer, &tree, FrameId(1));
    }

    #[test]
    #[should_panic(expected = "frame not found in any strata")]
    fn hiding_an_unregistered_frame_panics() {
        let mut tree = TestTree::default();
        tree.add(FrameId(1), TestFrame::at(Medium, 0));

        let mut renderer = FrameRenderer::new();
        renderer.notify_rendered(&tree, FrameId(1), false);
    }
}
