// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The strata/level ordering table.
//!
//! [`FrameLayers`] indexes every currently rendered frame by
//! (stratum, level, arrival stamp). Iteration yields exact render order;
//! hit-testing walks the exact reverse. The table holds non-owning
//! [`FrameId`](crate::frame::FrameId) handles only — frame lifetime belongs
//! to the external widget tree.
//!
//! Membership is all-or-nothing: a frame is either absent or occupies exactly
//! one (stratum, level) slot. Mis-stated membership (double registration,
//! removing or moving a frame that is not there, stale move keys) is a caller
//! bug and panics immediately rather than desynchronizing silently.

mod iter;
mod table;

pub use iter::{LevelFrames, OrderedFrame, RenderOrder, StratumFrames, StratumLevels};
pub use table::{FrameLayers, Placement};
