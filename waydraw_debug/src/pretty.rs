// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::fmt;
use std::io::Write;

use waydraw_core::damage::Damage;
use waydraw_core::trace::{
    ForkEvent, ForkKind, NavigateEvent, PresentEvent, StrokeEvent, StrokePhase, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Formats damage compactly: `none`, `full`, or `x0,y0..x1,y1`.
struct DamageDisplay(Damage);

impl fmt::Display for DamageDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Damage::None => f.write_str("none"),
            Damage::Full => f.write_str("full"),
            Damage::Rect(r) => write!(f, "{},{}..{},{}", r.x0, r.y0, r.x1, r.y1),
        }
    }
}

fn fork_kind_name(kind: ForkKind) -> &'static str {
    match kind {
        ForkKind::Clone => "clone",
        ForkKind::Adopt => "adopt",
    }
}

fn phase_name(phase: StrokePhase) -> &'static str {
    match phase {
        StrokePhase::Begin => "begin",
        StrokePhase::End => "end",
        StrokePhase::Cancel => "cancel",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_fork(&mut self, e: &ForkEvent) {
        let _ = writeln!(
            self.writer,
            "[fork] output={} node={} parent={} kind={} versions={}",
            e.output.0,
            e.node,
            e.parent,
            fork_kind_name(e.kind),
            e.chronological_len,
        );
    }

    fn on_navigate(&mut self, e: &NavigateEvent) {
        let outcome = if e.moved { "" } else { " (stayed)" };
        let _ = writeln!(
            self.writer,
            "[{}] output={} {} -> {}{outcome}",
            e.command.name(),
            e.output.0,
            e.from,
            e.to,
        );
    }

    fn on_stroke(&mut self, e: &StrokeEvent) {
        let _ = write!(
            self.writer,
            "[stroke:{}] output={} {} policy={:?}",
            phase_name(e.phase),
            e.output.0,
            e.kind.name(),
            e.policy,
        );
        let _ = match e.node {
            Some(node) => writeln!(self.writer, " node={node}"),
            None => writeln!(self.writer),
        };
    }

    fn on_present(&mut self, e: &PresentEvent) {
        let _ = writeln!(
            self.writer,
            "[present] output={} node={} damage={}",
            e.output.0,
            e.node,
            DamageDisplay(e.damage),
        );
    }
}
