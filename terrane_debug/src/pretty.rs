// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use terrane_core::trace::{AnchorFault, AnchorFaultEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_anchor_fault(&mut self, e: &AnchorFaultEvent) {
        let _ = match e.fault {
            AnchorFault::MissingParent => writeln!(
                self.writer,
                "[anchor] \"{}\" tries to anchor to \"{}\", but '$parent' does not exist",
                e.owner_name, e.target_name,
            ),
            AnchorFault::TargetNotFound => writeln!(
                self.writer,
                "[anchor] \"{}\" tries to anchor to \"{}\", but this frame does not (yet?) exist",
                e.owner_name, e.target_name,
            ),
            AnchorFault::CrossRenderer => writeln!(
                self.writer,
                "[anchor] \"{}\" tries to anchor to \"{}\", which belongs to another renderer",
                e.owner_name, e.target_name,
            ),
        };
    }
}
