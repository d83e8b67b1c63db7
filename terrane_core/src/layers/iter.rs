// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-order iteration over the ordering table.

use alloc::collections::btree_map;
use core::slice;

use crate::frame::FrameId;
use crate::strata::{FrameStrata, STRATA_COUNT};

use super::table::{LevelEntry, LevelSlot, StratumBucket};

/// One entry of a full-table render-order walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderedFrame {
    /// The stratum the frame renders in.
    pub strata: FrameStrata,
    /// The level within the stratum.
    pub level: i32,
    /// The frame itself.
    pub id: FrameId,
}

/// An iterator over the whole table in render order.
///
/// Created by [`FrameLayers::iter`](super::FrameLayers::iter). Yields frames
/// sorted by (stratum, level, arrival stamp), i.e. back-to-front.
#[derive(Debug)]
pub struct RenderOrder<'a> {
    buckets: &'a [StratumBucket; STRATA_COUNT],
    /// Next bucket index to open.
    stratum: usize,
    levels: Option<(FrameStrata, btree_map::Iter<'a, i32, LevelSlot>)>,
    entries: Option<(FrameStrata, i32, slice::Iter<'a, LevelEntry>)>,
}

impl<'a> RenderOrder<'a> {
    pub(crate) fn new(buckets: &'a [StratumBucket; STRATA_COUNT]) -> Self {
        Self {
            buckets,
            stratum: 0,
            levels: None,
            entries: None,
        }
    }
}

impl Iterator for RenderOrder<'_> {
    type Item = OrderedFrame;

    fn next(&mut self) -> Option<OrderedFrame> {
        loop {
            if let Some((strata, level, it)) = &mut self.entries {
                if let Some(entry) = it.next() {
                    return Some(OrderedFrame {
                        strata: *strata,
                        level: *level,
                        id: entry.id,
                    });
                }
                self.entries = None;
            }

            if let Some((strata, it)) = &mut self.levels {
                if let Some((level, slot)) = it.next() {
                    self.entries = Some((*strata, *level, slot.entries.iter()));
                    continue;
                }
                self.levels = None;
            }

            if self.stratum >= STRATA_COUNT {
                return None;
            }
            let strata = FrameStrata::from_index(self.stratum);
            self.levels = Some((strata, self.buckets[self.stratum].levels.iter()));
            self.stratum += 1;
        }
    }
}

/// An iterator over one stratum's levels in render order.
///
/// Created by [`FrameLayers::range_for`](super::FrameLayers::range_for).
/// Yields `(level, frames-at-that-level)` pairs, levels ascending.
#[derive(Debug)]
pub struct StratumLevels<'a> {
    levels: btree_map::Iter<'a, i32, LevelSlot>,
}

impl<'a> StratumLevels<'a> {
    pub(crate) fn new(bucket: &'a StratumBucket) -> Self {
        Self {
            levels: bucket.levels.iter(),
        }
    }
}

impl<'a> Iterator for StratumLevels<'a> {
    type Item = (i32, LevelFrames<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (level, slot) = self.levels.next()?;
        Some((
            *level,
            LevelFrames {
                entries: slot.entries.iter(),
            },
        ))
    }
}

/// An iterator over the frames of one level, in arrival order.
#[derive(Debug)]
pub struct LevelFrames<'a> {
    entries: slice::Iter<'a, LevelEntry>,
}

impl Iterator for LevelFrames<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<FrameId> {
        self.entries.next().map(|e| e.id)
    }
}

/// A flat iterator over one stratum's frames in render order.
///
/// Created by
/// [`FrameLayers::stratum_frames`](super::FrameLayers::stratum_frames).
#[derive(Debug)]
pub struct StratumFrames<'a> {
    levels: btree_map::Iter<'a, i32, LevelSlot>,
    current: Option<slice::Iter<'a, LevelEntry>>,
}

impl<'a> StratumFrames<'a> {
    pub(crate) fn new(bucket: &'a StratumBucket) -> Self {
        Self {
            levels: bucket.levels.iter(),
            current: None,
        }
    }
}

impl Iterator for StratumFrames<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<FrameId> {
        loop {
            if let Some(it) = &mut self.current {
                if let Some(entry) = it.next() {
                    return Some(entry.id);
                }
                self.current = None;
            }
            let (_, slot) = self.levels.next()?;
            self.current = Some(slot.entries.iter());
        }
    }
}
