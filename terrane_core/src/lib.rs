// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata/level frame ordering and anchor resolution for retained-mode GUIs.
//!
//! `terrane_core` provides the layering and positioning engine of a
//! retained-mode widget toolkit: every shown widget ("frame") is indexed by a
//! paint stratum and an integer level within it, and positioned by declarative
//! anchors that pin one of its points to a point of another frame. It is
//! `no_std` compatible (with `alloc`) and holds no widget state of its own:
//! frames live in an external widget tree and are referenced by [`FrameId`]
//! handles.
//!
//! # Architecture
//!
//! The crate is organized around two passes the external driver runs per
//! displayed frame:
//!
//! ```text
//!   Widget tree (external)
//!       │ notify_rendered / notify_*_changed
//!       ▼
//!   FrameRenderer ──► FrameLayers (stratum ► level ► arrival order)
//!       │                   │
//!       │ render_stratum    │ drain_redraw / take_structure_changed
//!       ▼                   ▼
//!   draw callbacks      render driver (external)
//!
//!   Anchor::resolve ──► absolute point (reads FrameTree + RenderTarget)
//! ```
//!
//! **[`layers`]** — The ordering table. Frames are keyed by
//! (stratum, level, arrival stamp); iteration yields exact render order and
//! hit-testing walks the exact reverse.
//!
//! **[`renderer`]** — The [`FrameRenderer`](renderer::FrameRenderer) façade
//! over the table: change notifications, per-stratum redraw dirtying,
//! topmost-frame queries, and the stratum render pass with liveness checks.
//!
//! **[`anchor`]** — Declarative anchors with lazy, generation-stamped target
//! resolution and pixel-snapped point computation.
//!
//! **[`strata`]** — The 8 fixed paint bands plus the `Parent` pseudo-stratum
//! that may never reach storage.
//!
//! **[`frame`]** — [`FrameId`] handles and the [`FrameTree`](frame::FrameTree)
//! / [`FrameLookup`](frame::FrameLookup) capabilities the external widget
//! layer implements.
//!
//! **[`backend`]** — The [`RenderTarget`](backend::RenderTarget) capability
//! and per-stratum cache target handles.
//!
//! **[`dirty`]** — Redraw and structure dirty channels via
//! `understory_dirty`, drained edge-triggered by the render driver.
//!
//! **[`geometry`]** — Pixel rounding policies and degenerate-size
//! sanitization over [`kurbo`] types.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! anchor-resolution diagnostics, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod anchor;
pub mod backend;
pub mod dirty;
pub mod frame;
pub mod geometry;
pub mod layers;
pub mod renderer;
pub mod strata;
pub mod trace;

pub use frame::FrameId;
pub use strata::FrameStrata;
