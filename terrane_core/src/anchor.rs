// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative anchors: pin a point of one frame to a point of another.
//!
//! An anchor names its target by string, because the target may not exist
//! when the anchor is declared — layout files routinely reference frames
//! created later in the same load. Resolution is therefore lazy: the target
//! is looked up when first needed, memoized, and re-resolved whenever the
//! owner's ancestry generation changes (see
//! [`FrameTree::ancestry_generation`]). A failed lookup is never memoized,
//! so "not yet defined" heals itself on a later query.
//!
//! Resolution failures are not errors. The anchor degrades to "no target" —
//! positioned against the render target's full extent from origin `(0, 0)` —
//! and emits one diagnostic through the [`Tracer`]. The rendering loop never
//! sees a fault.

use alloc::string::{String, ToString};

use kurbo::{Point, Vec2};

use crate::backend::RenderTarget;
use crate::frame::{FrameId, FrameLookup, FrameTree};
use crate::geometry::{self, Rounding};
use crate::trace::{AnchorFault, AnchorFaultEvent, Tracer};

/// The literal token substituted with the owner's parent's name.
pub const PARENT_PLACEHOLDER: &str = "$parent";

/// A raw target name meaning "my parent if I have one, else the screen".
pub const DEFAULT_TARGET: &str = "$default";

/// The nine nameable points of a rectangle.
///
/// Each point decomposes independently per axis: an X-category
/// (left / center / right) and a Y-category (top / center / bottom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnchorPoint {
    /// Left edge, top edge.
    #[default]
    TopLeft,
    /// Horizontal center, top edge.
    Top,
    /// Right edge, top edge.
    TopRight,
    /// Left edge, vertical center.
    Left,
    /// Both centers.
    Center,
    /// Right edge, vertical center.
    Right,
    /// Left edge, bottom edge.
    BottomLeft,
    /// Horizontal center, bottom edge.
    Bottom,
    /// Right edge, bottom edge.
    BottomRight,
}

/// Position of an anchor point along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisAlign {
    /// The leading edge (left or top): zero displacement.
    Leading,
    /// The midpoint: half the reference extent.
    Center,
    /// The trailing edge (right or bottom): the full reference extent.
    Trailing,
}

impl AnchorPoint {
    /// Returns the horizontal category of this point.
    #[must_use]
    pub const fn x_align(self) -> AxisAlign {
        match self {
            Self::TopLeft | Self::Left | Self::BottomLeft => AxisAlign::Leading,
            Self::Top | Self::Center | Self::Bottom => AxisAlign::Center,
            Self::TopRight | Self::Right | Self::BottomRight => AxisAlign::Trailing,
        }
    }

    /// Returns the vertical category of this point.
    #[must_use]
    pub const fn y_align(self) -> AxisAlign {
        match self {
            Self::TopLeft | Self::Top | Self::TopRight => AxisAlign::Leading,
            Self::Left | Self::Center | Self::Right => AxisAlign::Center,
            Self::BottomLeft | Self::Bottom | Self::BottomRight => AxisAlign::Trailing,
        }
    }
}

/// How an anchor's offset is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// The offset is absolute pixels.
    #[default]
    Absolute,
    /// The offset is a fraction of the reference size, per axis.
    Relative,
}

/// The declarative part of an anchor, as a layout file or script states it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnchorSpec {
    /// Which point of the owner is being pinned.
    pub point: AnchorPoint,
    /// Raw target name. May contain [`PARENT_PLACEHOLDER`], may be
    /// [`DEFAULT_TARGET`]; empty means the render target itself.
    pub target_name: String,
    /// Which point of the target the owner's point is pinned to.
    pub target_point: AnchorPoint,
    /// Offset from the target point.
    pub offset: Vec2,
    /// Whether `offset` is absolute pixels or a fraction of the target size.
    pub kind: AnchorKind,
}

/// A successfully resolved target, stamped with the ancestry generation it
/// was resolved under.
#[derive(Clone, Copy, Debug)]
struct CachedTarget {
    target: FrameId,
    generation: u64,
}

/// An anchor declared by a frame, with its lazily resolved target.
#[derive(Clone, Debug)]
pub struct Anchor {
    spec: AnchorSpec,
    cached: Option<CachedTarget>,
}

impl Anchor {
    /// Creates an unresolved anchor from its declaration.
    #[must_use]
    pub fn new(spec: AnchorSpec) -> Self {
        Self { spec, cached: None }
    }

    /// Returns the anchor's declaration.
    #[must_use]
    pub fn spec(&self) -> &AnchorSpec {
        &self.spec
    }

    /// Resolves the anchor's target frame.
    ///
    /// Returns `None` when the anchor is bound to the render target: either
    /// by declaration (empty name) or by degradation after a fault. The
    /// successful case is memoized against the owner's current ancestry
    /// generation and re-checked for target liveness on every call; faults
    /// are never memoized.
    pub fn target<T, L>(
        &mut self,
        owner: FrameId,
        tree: &T,
        lookup: &L,
        tracer: &mut Tracer<'_>,
    ) -> Option<FrameId>
    where
        T: FrameTree + ?Sized,
        L: FrameLookup + ?Sized,
    {
        let generation = tree.ancestry_generation(owner);
        if let Some(cached) = self.cached {
            if cached.generation == generation && tree.is_alive(cached.target) {
                return Some(cached.target);
            }
            self.cached = None;
        }

        let parent = tree.parent(owner);
        let raw: &str = if self.spec.target_name == DEFAULT_TARGET {
            if parent.is_some() {
                PARENT_PLACEHOLDER
            } else {
                ""
            }
        } else {
            &self.spec.target_name
        };

        if raw.is_empty() {
            return None;
        }

        let full_name = if let Some(parent) = parent {
            raw.replace(PARENT_PLACEHOLDER, &tree.name(parent))
        } else if raw.contains(PARENT_PLACEHOLDER) {
            tracer.anchor_fault(&AnchorFaultEvent {
                owner,
                owner_name: tree.name(owner),
                target_name: raw.to_string(),
                fault: AnchorFault::MissingParent,
            });
            return None;
        } else {
            raw.to_string()
        };

        let Some(target) = lookup.find_by_name(&full_name) else {
            tracer.anchor_fault(&AnchorFaultEvent {
                owner,
                owner_name: tree.name(owner),
                target_name: full_name,
                fault: AnchorFault::TargetNotFound,
            });
            return None;
        };

        if tree.renderer(target) != tree.renderer(owner) {
            tracer.anchor_fault(&AnchorFaultEvent {
                owner,
                owner_name: tree.name(owner),
                target_name: full_name,
                fault: AnchorFault::CrossRenderer,
            });
            return None;
        }

        self.cached = Some(CachedTarget { target, generation });
        Some(target)
    }

    /// Computes the absolute point this anchor pins the owner's
    /// [`point`](AnchorSpec::point) to.
    ///
    /// The reference is the resolved target's bounds, or the render target's
    /// extent from `(0, 0)` when there is no target. The offset is converted
    /// to pixels (multiplied by the reference size if relative), snapped to
    /// whole pixels with [`Rounding::NearestNotZero`], and summed with the
    /// reference origin and the per-axis displacement of the target point.
    pub fn resolve<T, L, R>(
        &mut self,
        owner: FrameId,
        tree: &T,
        lookup: &L,
        screen: &R,
        tracer: &mut Tracer<'_>,
    ) -> Point
    where
        T: FrameTree + ?Sized,
        L: FrameLookup + ?Sized,
        R: RenderTarget + ?Sized,
    {
        let (origin, size) = match self.target(owner, tree, lookup, tracer) {
            Some(target) => {
                let bounds = tree.bounds(target);
                (bounds.origin(), geometry::sanitize_size(bounds.size()))
            }
            None => (Point::ZERO, geometry::sanitize_size(screen.dimensions())),
        };

        let offset = match self.spec.kind {
            AnchorKind::Absolute => self.spec.offset,
            AnchorKind::Relative => Vec2::new(
                self.spec.offset.x * size.width,
                self.spec.offset.y * size.height,
            ),
        };
        let offset = geometry::round_vec2(offset, 1.0, Rounding::NearestNotZero);

        let displacement = Vec2::new(
            axis_displacement(self.spec.target_point.x_align(), size.width),
            axis_displacement(self.spec.target_point.y_align(), size.height),
        );

        origin + offset + displacement
    }
}

/// Displacement of an anchor point along one axis of a reference extent.
fn axis_displacement(align: AxisAlign, extent: f64) -> f64 {
    match align {
        AxisAlign::Leading => 0.0,
        AxisAlign::Center => extent / 2.0,
        AxisAlign::Trailing => extent,
    }
}
