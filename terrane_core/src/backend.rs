// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for rendering integrations.
//!
//! Terrane splits platform-specific work out of the core entirely. The core
//! decides *what* to draw and in *which order*; a backend decides how pixels
//! happen. The pieces a backend provides:
//!
//! - **Render target** — Implements [`RenderTarget`] so the anchor engine
//!   knows the screen extent that anchors with no target resolve against.
//!
//! - **Draw callbacks** — The closures handed to
//!   [`FrameRenderer::render_stratum`](crate::renderer::FrameRenderer::render_stratum);
//!   the core calls them per frame in render order and never touches GPU
//!   state itself.
//!
//! - **Stratum caches** — Optionally, one off-screen surface per stratum so
//!   a stratum whose redraw flag stayed clean can be replayed from cache.
//!   The core only stores the [`TargetId`] handle; allocation, resizing, and
//!   invalidation of the actual surface belong to the backend, driven by the
//!   redraw strata drained from
//!   [`FrameRenderer::drain_redraw`](crate::renderer::FrameRenderer::drain_redraw).
//!
//! # Crate boundaries
//!
//! `terrane_core` owns the ordering table, the façade, and this contract
//! module. Backend crates depend on `terrane_core` and provide surface glue.
//! Application code depends on both and wires them together in an
//! update/render loop.

use core::fmt;

use kurbo::Size;

/// An opaque reference to a backend-owned off-screen surface.
///
/// Surfaces are created and managed externally (e.g. by a GPU backend). The
/// renderer keeps at most one per stratum as that stratum's batching cache.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

/// The surface the whole UI renders into.
///
/// Anchors with no target frame resolve against this extent, from origin
/// `(0, 0)`.
pub trait RenderTarget {
    /// Returns the target's width and height in render-space units.
    fn dimensions(&self) -> Size;
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    struct FixedTarget(Size);

    impl RenderTarget for FixedTarget {
        fn dimensions(&self) -> Size {
            self.0
        }
    }

    #[test]
    fn target_id_debug_is_compact() {
        assert_eq!(format!("{:?}", TargetId(3)), "TargetId(3)");
    }

    #[test]
    fn render_target_reports_dimensions() {
        let target = FixedTarget(Size::new(1024.0, 768.0));
        assert_eq!(target.dimensions(), Size::new(1024.0, 768.0));
    }
}
