// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Terrane uses channelized dirty tracking (via [`understory_dirty`]) to tell
//! the render driver which strata need work. Keys are stratum storage
//! indices (`0..STRATA_COUNT` as `u32`); strata are independent, so no
//! dependency edges exist and nothing propagates.
//!
//! # Channels
//!
//! - **[`REDRAW`]** — The stratum's pixel content is stale: a frame was
//!   added, removed, moved, or explicitly flagged. A backend that caches
//!   strata re-renders exactly the drained strata and replays the rest.
//!
//! - **[`STRUCTURE`]** — The ordering table's shape changed in that stratum.
//!   Batching or atlas state derived from render order must be rebuilt.
//!   Every `STRUCTURE` mark implies a `REDRAW` mark; the reverse does not
//!   hold (an explicit redraw request leaves the order intact).
//!
//! # Consumption
//!
//! Both channels are edge-triggered: the driver consumes them by draining
//! ([`FrameLayers::drain_redraw`](crate::layers::FrameLayers::drain_redraw),
//! [`FrameLayers::take_structure_changed`](crate::layers::FrameLayers::take_structure_changed)),
//! which resets them. Mutating operations only ever mark.

use understory_dirty::Channel;

/// Stratum pixel content is stale and must be re-rendered.
pub const REDRAW: Channel = Channel::new(0);

/// The ordering table's shape changed; order-derived caches must be rebuilt.
pub const STRUCTURE: Channel = Channel::new(1);
