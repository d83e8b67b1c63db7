// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, event recording, and JSON dumps for terrane diagnostics.
//!
//! This crate provides [`TraceSink`](terrane_core::trace::TraceSink)
//! implementations and table introspection for development and post-mortem
//! analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecordingSink`] — in-memory event capture for tests and
//!   tooling.
//! - [`dump`] — JSON snapshots of a
//!   [`FrameLayers`](terrane_core::layers::FrameLayers) table in render
//!   order.

pub mod dump;
pub mod pretty;
pub mod recorder;
