// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event capture.
//!
//! [`RecordingSink`] implements [`TraceSink`] and stores every event it
//! receives, for test assertions and post-mortem inspection.

use terrane_core::trace::{AnchorFaultEvent, TraceSink};

/// A [`TraceSink`] that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<AnchorFaultEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[AnchorFaultEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<AnchorFaultEvent> {
        self.events
    }

    /// Drops all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecordingSink {
    fn on_anchor_fault(&mut self, e: &AnchorFaultEvent) {
        self.events.push(e.clone());
    }
}

#[cfg(test)]
mod tests {
    use terrane_core::FrameId;
    use terrane_core::trace::{AnchorFault, Tracer};

    use super::*;

    #[test]
    fn records_through_a_tracer() {
        let mut sink = RecordingSink::new();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.anchor_fault(&AnchorFaultEvent {
                owner: FrameId(4),
                owner_name: "A".to_string(),
                target_name: "B".to_string(),
                fault: AnchorFault::CrossRenderer,
            });
        }
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.events()[0].fault, AnchorFault::CrossRenderer);

        sink.clear();
        assert!(sink.events().is_empty());
    }
}
