// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed paint strata.
//!
//! Every rendered frame lives in exactly one of eight strata, painted in
//! ascending order: `Background` first, `Tooltip` last. The ninth variant,
//! [`Parent`](FrameStrata::Parent), is a widget-side declaration meaning
//! "inherit my parent's effective stratum". It must be resolved by the widget
//! layer before a frame reaches the renderer; the storage layer rejects it.

/// Number of storable strata ([`FrameStrata::Parent`] excluded).
pub const STRATA_COUNT: usize = 8;

/// A paint-priority band.
///
/// Ordering follows paint priority: a stratum that compares greater is
/// painted later (on top). `Parent` compares lowest but is a pseudo-stratum
/// and never participates in painting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameStrata {
    /// Inherit the parent widget's effective stratum. Never storable.
    Parent,
    /// The backmost band.
    Background,
    /// Below-normal content.
    Low,
    /// Normal widget content. The default for new frames.
    Medium,
    /// Above-normal content.
    High,
    /// Dialogs.
    Dialog,
    /// Fullscreen overlays.
    Fullscreen,
    /// Dialogs on top of fullscreen overlays.
    FullscreenDialog,
    /// Tooltips, above everything else.
    Tooltip,
}

impl FrameStrata {
    /// The storable strata in ascending paint order.
    pub const STORABLE: [Self; STRATA_COUNT] = [
        Self::Background,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Dialog,
        Self::Fullscreen,
        Self::FullscreenDialog,
        Self::Tooltip,
    ];

    /// Returns the storage index of this stratum.
    ///
    /// # Panics
    ///
    /// Panics on [`Parent`](Self::Parent), which has no storage slot.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Parent => panic!("PARENT strata cannot be used for rendering"),
            Self::Background => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Dialog => 4,
            Self::Fullscreen => 5,
            Self::FullscreenDialog => 6,
            Self::Tooltip => 7,
        }
    }

    /// Returns the stratum at the given storage index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= STRATA_COUNT`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < STRATA_COUNT,
            "strata index {index} out of range (max {})",
            STRATA_COUNT - 1
        );
        Self::STORABLE[index]
    }

    /// Returns whether this is the `Parent` pseudo-stratum.
    #[must_use]
    pub const fn is_parent(self) -> bool {
        matches!(self, Self::Parent)
    }
}

impl Default for FrameStrata {
    fn default() -> Self {
        Self::Medium
    }
}
