// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame identity and the capabilities the widget layer provides.
//!
//! The ordering and anchor engines never own widgets. They hold [`FrameId`]
//! handles minted by the external widget tree, and read everything else
//! through two injected capabilities: [`FrameTree`] for per-frame queries and
//! [`FrameLookup`] for name resolution. Both are deliberately flat — a
//! concrete widget type implements them once, whatever its own class
//! hierarchy looks like.

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect};

use crate::strata::FrameStrata;

/// A handle to a frame owned by the external widget tree.
///
/// The engine treats the value as opaque; the widget layer decides how
/// handles are minted and when they die. A handle may outlive its frame —
/// liveness is always re-checked through [`FrameTree::is_alive`] before the
/// engine acts on one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u64);

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({})", self.0)
    }
}

/// Identity of a top-level frame renderer.
///
/// Anchors may only bind frames that share a renderer; the widget layer
/// assigns each top-level renderer a distinct id so the anchor engine can
/// reject cross-renderer targets.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererId(pub u32);

impl fmt::Debug for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RendererId({})", self.0)
    }
}

/// Per-frame queries answered by the external widget tree.
///
/// Implementations must answer for any handle they ever minted; for a dead
/// handle [`is_alive`](Self::is_alive) returns `false` and the engine will
/// not call the other methods on it.
pub trait FrameTree {
    /// Returns whether the frame behind this handle still exists.
    fn is_alive(&self, id: FrameId) -> bool;

    /// Returns the frame's effective stratum: its own explicit stratum, or
    /// its parent's effective stratum if it declares
    /// [`Parent`](FrameStrata::Parent).
    ///
    /// The resolution itself is the widget layer's job; returning `Parent`
    /// from here is a bug the renderer surfaces as a panic.
    fn effective_strata(&self, id: FrameId) -> FrameStrata;

    /// Returns the frame's level within its stratum.
    fn level(&self, id: FrameId) -> i32;

    /// Returns whether the frame is currently shown.
    fn is_visible(&self, id: FrameId) -> bool;

    /// Returns whether the frame accepts mouse interaction.
    fn is_mouse_enabled(&self, id: FrameId) -> bool;

    /// Returns whether the given render-space point lies inside the frame's
    /// bounds.
    fn contains_point(&self, id: FrameId, point: Point) -> bool;

    /// Returns the frame's parent, if any.
    fn parent(&self, id: FrameId) -> Option<FrameId>;

    /// Returns the frame's fully-qualified scripting name.
    fn name(&self, id: FrameId) -> String;

    /// Returns the identity of the frame's top-level renderer.
    fn renderer(&self, id: FrameId) -> RendererId;

    /// Returns the frame's bounds: top-left origin and apparent size.
    fn bounds(&self, id: FrameId) -> Rect;

    /// Returns the generation of the frame's parent chain.
    ///
    /// The widget layer bumps this whenever the frame's parent relationship
    /// (or any ancestor's) changes. Anchors stamp their resolution cache with
    /// it and re-resolve when the stamp goes stale, so nobody has to remember
    /// to invalidate anything by hand.
    fn ancestry_generation(&self, id: FrameId) -> u64;
}

/// Name-to-frame resolution, answered by the widget registry.
pub trait FrameLookup {
    /// Returns the frame registered under `name`, if any.
    fn find_by_name(&self, name: &str) -> Option<FrameId>;
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn frame_id_debug_is_compact() {
        assert_eq!(format!("{:?}", FrameId(7)), "FrameId(7)");
        assert_eq!(format!("{:?}", RendererId(2)), "RendererId(2)");
    }

    #[test]
    fn frame_id_orders_by_value() {
        assert!(FrameId(1) < FrameId(2));
    }
}
