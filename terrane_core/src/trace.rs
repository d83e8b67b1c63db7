// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for anchor resolution.
//!
//! Anchor failures are deliberately non-fatal: a missing target degrades to
//! "anchored to the screen" and the UI keeps rendering. The only visible
//! artifact is a diagnostic event, dispatched through this module.
//!
//! [`TraceSink`] has one method per event with a default no-op body, so a
//! sink implements only what it cares about. [`Tracer`] wraps an optional
//! `&mut dyn TraceSink`. When the `trace` feature is **off**, every `Tracer`
//! method compiles to nothing (zero overhead). When **on**, each method
//! performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use alloc::string::String;

use crate::frame::FrameId;

/// Why an anchor failed to resolve its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorFault {
    /// The raw target name contains `$parent` but the owner has no parent.
    MissingParent,
    /// No frame is registered under the resolved target name. Non-fatal:
    /// the target may simply not exist *yet*, so resolution is re-attempted
    /// on the next query.
    TargetNotFound,
    /// The named frame exists but belongs to a different top-level renderer.
    /// The anchor is fully rejected.
    CrossRenderer,
}

/// Emitted when an anchor fails to resolve its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorFaultEvent {
    /// The frame that owns the failing anchor.
    pub owner: FrameId,
    /// The owner's fully-qualified name.
    pub owner_name: String,
    /// The target name after `$parent` substitution (the raw name if no
    /// substitution applied).
    pub target_name: String,
    /// What went wrong.
    pub fault: AnchorFault,
}

/// Receives diagnostic events from the anchor engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an anchor fails to resolve its target.
    fn on_anchor_fault(&mut self, e: &AnchorFaultEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AnchorFaultEvent`].
    #[inline]
    pub fn anchor_fault(&mut self, e: &AnchorFaultEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_anchor_fault(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn sample_event() -> AnchorFaultEvent {
        AnchorFaultEvent {
            owner: FrameId(3),
            owner_name: "Root.Child".to_string(),
            target_name: "Missing".to_string(),
            fault: AnchorFault::TargetNotFound,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_anchor_fault(&sample_event());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.anchor_fault(&sample_event());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            faults: Vec<AnchorFault>,
        }
        impl TraceSink for RecordingSink {
            fn on_anchor_fault(&mut self, e: &AnchorFaultEvent) {
                self.faults.push(e.fault);
            }
        }

        let mut sink = RecordingSink { faults: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.anchor_fault(&sample_event());
        drop(tracer);
        assert_eq!(sink.faults, &[AnchorFault::TargetNotFound]);
    }
}
