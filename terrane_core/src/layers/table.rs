// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordering table itself: membership, mutation, queries, dirty marks.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::frame::{FrameId, FrameTree};
use crate::strata::{FrameStrata, STRATA_COUNT};

use super::iter::{RenderOrder, StratumFrames, StratumLevels};

/// One table entry: a frame plus the stamp that orders it within its level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LevelEntry {
    pub(crate) id: FrameId,
    /// Arrival stamp: assigned on insertion into a level, strictly
    /// increasing across the whole table. Entries in a level are kept in
    /// ascending stamp order, which push-on-insert preserves for free.
    pub(crate) stamp: u64,
}

/// All frames at one level of one stratum, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LevelSlot {
    pub(crate) entries: Vec<LevelEntry>,
}

/// One stratum's level map. Levels exist only while populated.
#[derive(Clone, Debug, Default)]
pub(crate) struct StratumBucket {
    pub(crate) levels: BTreeMap<i32, LevelSlot>,
}

/// Where a registered frame currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The stratum the frame is stored in. Never `Parent`.
    pub strata: FrameStrata,
    /// The level within the stratum.
    pub level: i32,
    pub(crate) stamp: u64,
}

/// The sorted index of all currently rendered frames.
///
/// Frames render in ascending (stratum, level, arrival stamp) order; the
/// arrival stamp is the deterministic tie-breaker for frames sharing a
/// (stratum, level) slot. A stamp is assigned whenever a frame enters a
/// level — at registration and again on every stratum or level move — so a
/// moved frame paints above the frames it rejoins, exactly as if it had just
/// been registered there.
///
/// Every mutation marks the affected strata on the [`dirty::REDRAW`] and
/// [`dirty::STRUCTURE`] channels; the render driver consumes both by
/// draining ([`drain_redraw`](Self::drain_redraw),
/// [`take_structure_changed`](Self::take_structure_changed)).
#[derive(Debug)]
pub struct FrameLayers {
    buckets: [StratumBucket; STRATA_COUNT],
    /// Authoritative membership record. Mutations go through this first so
    /// contract violations surface before any bucket is touched.
    members: BTreeMap<FrameId, Placement>,
    next_stamp: u64,
    dirty: DirtyTracker<u32>,
}

impl Default for FrameLayers {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLayers {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: core::array::from_fn(|_| StratumBucket::default()),
            members: BTreeMap::new(),
            next_stamp: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Mutation API --

    /// Inserts a frame at (`strata`, `level`).
    ///
    /// # Panics
    ///
    /// Panics if `strata` is the `Parent` pseudo-stratum (the widget layer
    /// must resolve the effective stratum first) or if the frame is already
    /// registered.
    pub fn register(&mut self, id: FrameId, strata: FrameStrata, level: i32) {
        assert!(
            !strata.is_parent(),
            "cannot use PARENT strata for renderer"
        );
        assert!(
            !self.members.contains_key(&id),
            "{id:?} is already registered"
        );

        let stamp = self.bump_stamp();
        self.buckets[strata.index()]
            .levels
            .entry(level)
            .or_default()
            .entries
            .push(LevelEntry { id, stamp });
        self.members.insert(
            id,
            Placement {
                strata,
                level,
                stamp,
            },
        );
        self.mark_structural(strata);
    }

    /// Removes a frame from the table.
    ///
    /// The level slot is dropped when its last frame leaves, so a
    /// register/unregister pair restores the table's structure exactly.
    ///
    /// # Panics
    ///
    /// Panics if the frame is not registered — that means some caller lost
    /// track of membership, which must surface rather than be ignored.
    pub fn unregister(&mut self, id: FrameId) {
        let Some(placement) = self.members.remove(&id) else {
            panic!("cannot unregister {id:?}: frame not found in any strata");
        };
        self.remove_entry(placement.strata, placement.level, id);
        self.mark_structural(placement.strata);
    }

    /// Moves a registered frame from stratum `old` to stratum `new`,
    /// keeping its level. Both endpoints are marked for redraw.
    ///
    /// # Panics
    ///
    /// Panics if either stratum is `Parent`, if the frame is not registered,
    /// or if `old` disagrees with the frame's recorded stratum.
    pub fn move_strata(&mut self, id: FrameId, old: FrameStrata, new: FrameStrata) {
        assert!(
            !old.is_parent() && !new.is_parent(),
            "cannot use PARENT strata for renderer"
        );
        let Some(placement) = self.members.get(&id).copied() else {
            panic!("cannot move {id:?}: frame not registered");
        };
        assert!(
            placement.strata == old,
            "{id:?} is registered in {:?}, not {old:?}",
            placement.strata
        );

        self.remove_entry(old, placement.level, id);
        let stamp = self.bump_stamp();
        self.buckets[new.index()]
            .levels
            .entry(placement.level)
            .or_default()
            .entries
            .push(LevelEntry { id, stamp });
        self.members.insert(
            id,
            Placement {
                strata: new,
                level: placement.level,
                stamp,
            },
        );
        self.mark_structural(old);
        self.mark_structural(new);
    }

    /// Moves a registered frame from level `old` to level `new` within its
    /// current stratum.
    ///
    /// # Panics
    ///
    /// Panics if the frame is not registered or if `old` disagrees with the
    /// frame's recorded level.
    pub fn move_level(&mut self, id: FrameId, old: i32, new: i32) {
        let Some(placement) = self.members.get(&id).copied() else {
            panic!("cannot move {id:?}: frame not registered");
        };
        assert!(
            placement.level == old,
            "{id:?} is registered at level {}, not {old}",
            placement.level
        );

        self.remove_entry(placement.strata, old, id);
        let stamp = self.bump_stamp();
        self.buckets[placement.strata.index()]
            .levels
            .entry(new)
            .or_default()
            .entries
            .push(LevelEntry { id, stamp });
        self.members.insert(
            id,
            Placement {
                strata: placement.strata,
                level: new,
                stamp,
            },
        );
        self.mark_structural(placement.strata);
    }

    /// Empties the table.
    ///
    /// Used on full UI reload: afterwards the table is empty, every stratum
    /// is marked for redraw, and the structure flag is set.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.levels.clear();
        }
        self.members.clear();
        for strata in FrameStrata::STORABLE {
            self.mark_structural(strata);
        }
    }

    /// Marks a stratum's pixel content stale without any structural change.
    pub fn mark_redraw(&mut self, strata: FrameStrata) {
        self.dirty.mark(strata.index() as u32, dirty::REDRAW);
    }

    // -- Query API --

    /// Returns whether the frame is registered.
    #[must_use]
    pub fn contains(&self, id: FrameId) -> bool {
        self.members.contains_key(&id)
    }

    /// Returns the frame's current placement, if registered.
    #[must_use]
    pub fn placement(&self, id: FrameId) -> Option<Placement> {
        self.members.get(&id).copied()
    }

    /// Returns the number of registered frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the highest populated level in a stratum, or 0 when the
    /// stratum is empty.
    ///
    /// Widget construction code uses this to auto-stack a new sibling above
    /// everything already in the stratum.
    ///
    /// # Panics
    ///
    /// Panics if `strata` is `Parent`.
    #[must_use]
    pub fn highest_level(&self, strata: FrameStrata) -> i32 {
        self.buckets[strata.index()]
            .levels
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0)
    }

    /// Iterates the whole table in render order.
    #[must_use]
    pub fn iter(&self) -> RenderOrder<'_> {
        RenderOrder::new(&self.buckets)
    }

    /// Iterates one stratum's levels in render order.
    ///
    /// # Panics
    ///
    /// Panics if `strata` is `Parent`.
    #[must_use]
    pub fn range_for(&self, strata: FrameStrata) -> StratumLevels<'_> {
        StratumLevels::new(&self.buckets[strata.index()])
    }

    /// Iterates one stratum's frames flat, in render order.
    ///
    /// # Panics
    ///
    /// Panics if `strata` is `Parent`.
    #[must_use]
    pub fn stratum_frames(&self, strata: FrameStrata) -> StratumFrames<'_> {
        StratumFrames::new(&self.buckets[strata.index()])
    }

    /// Finds the topmost interactable frame satisfying `predicate`.
    ///
    /// Walks strata from highest paint priority to lowest and frames within
    /// each stratum from last-rendered to first-rendered, returning the
    /// first frame that is alive, visible, mouse-enabled, and accepted by
    /// the predicate. Short-circuits on the first match.
    pub fn topmost_where<T, F>(&self, tree: &T, predicate: F) -> Option<FrameId>
    where
        T: FrameTree + ?Sized,
        F: Fn(FrameId) -> bool,
    {
        for bucket in self.buckets.iter().rev() {
            for slot in bucket.levels.values().rev() {
                for entry in slot.entries.iter().rev() {
                    let id = entry.id;
                    if tree.is_alive(id)
                        && tree.is_visible(id)
                        && tree.is_mouse_enabled(id)
                        && predicate(id)
                    {
                        return Some(id);
                    }
                }
            }
        }
        None
    }

    /// Finds the topmost interactable frame containing `point` and
    /// satisfying `predicate`.
    ///
    /// The returned frame is the one that would be painted last among the
    /// matching frames — hit-test order is the exact reverse of render
    /// order.
    pub fn topmost_frame_at<T, F>(&self, point: Point, tree: &T, predicate: F) -> Option<FrameId>
    where
        T: FrameTree + ?Sized,
        F: Fn(FrameId) -> bool,
    {
        self.topmost_where(tree, |id| tree.contains_point(id, point) && predicate(id))
    }

    // -- Dirty consumption (render driver only) --

    /// Drains and returns the strata whose pixel content went stale since
    /// the last drain, in ascending paint order.
    pub fn drain_redraw(&mut self) -> Vec<FrameStrata> {
        self.dirty
            .drain(dirty::REDRAW)
            .deterministic()
            .run()
            .map(|idx| FrameStrata::from_index(idx as usize))
            .collect()
    }

    /// Returns whether the table's structure changed since the last call,
    /// and resets the flag (edge-triggered).
    pub fn take_structure_changed(&mut self) -> bool {
        let changed: Vec<u32> = self.dirty.drain(dirty::STRUCTURE).deterministic().run().collect();
        !changed.is_empty()
    }

    // -- Internal helpers --

    fn bump_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    /// Removes `id` from the (strata, level) slot the membership map said it
    /// occupies, dropping the level when it empties.
    fn remove_entry(&mut self, strata: FrameStrata, level: i32, id: FrameId) {
        let bucket = &mut self.buckets[strata.index()];
        let Some(slot) = bucket.levels.get_mut(&level) else {
            panic!("ordering table desynchronized: {strata:?} has no level {level}");
        };
        let Some(pos) = slot.entries.iter().position(|e| e.id == id) else {
            panic!("ordering table desynchronized: {id:?} missing from {strata:?} level {level}");
        };
        slot.entries.remove(pos);
        if slot.entries.is_empty() {
            bucket.levels.remove(&level);
        }
    }

    fn mark_structural(&mut self, strata: FrameStrata) {
        let key = strata.index() as u32;
        self.dirty.mark(key, dirty::REDRAW);
        self.dirty.mark(key, dirty::STRUCTURE);
    }
}
