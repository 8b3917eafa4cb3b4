// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for history and presentation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`Canvas`](crate::canvas::Canvas) calls as versions are created, navigated
//! and presented. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Events carry raw node indices ([`NodeId::index`]) rather than handles, so
//! recordings can outlive the tree they describe.
//!
//! [`NodeId::index`]: crate::history::NodeId::index

use crate::command::Command;
use crate::damage::Damage;
use crate::output::OutputId;
use crate::stroke::{ForkPolicy, ShapeKind};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How a new version got its pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForkKind {
    /// Cloned from the previous current buffer (`fork`, `fork_if_branching`).
    Clone,
    /// Took ownership of a caller-built buffer (`fork_with`).
    Adopt,
}

/// Which point of a stroke's life an event marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrokePhase {
    /// Pointer pressed.
    Begin,
    /// Pointer released.
    End,
    /// Stroke abandoned.
    Cancel,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a new version is committed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForkEvent {
    /// Output whose tree grew.
    pub output: OutputId,
    /// The new node.
    pub node: u32,
    /// Its parent, the previous current node.
    pub parent: u32,
    /// Where the pixels came from.
    pub kind: ForkKind,
    /// Length of the chronological sequence after the fork.
    pub chronological_len: u32,
}

/// Emitted for every navigation command, including ones that did not move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigateEvent {
    /// Output whose tree was navigated.
    pub output: OutputId,
    /// The command applied.
    pub command: Command,
    /// Current node before.
    pub from: u32,
    /// Current node after.
    pub to: u32,
    /// Whether the current node changed.
    pub moved: bool,
}

/// Emitted at stroke begin, end and cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeEvent {
    /// Output being drawn on.
    pub output: OutputId,
    /// Which transition this is.
    pub phase: StrokePhase,
    /// Shape being drawn.
    pub kind: ShapeKind,
    /// Fork timing in effect.
    pub policy: ForkPolicy,
    /// Node holding the stroke after [`StrokePhase::End`], if any.
    pub node: Option<u32>,
}

/// Emitted when a buffer is handed to a presenter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentEvent {
    /// Output presented.
    pub output: OutputId,
    /// Current node at present time.
    pub node: u32,
    /// Region handed to the presenter.
    pub damage: Damage,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a canvas.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a new version is committed.
    fn on_fork(&mut self, e: &ForkEvent) {
        _ = e;
    }

    /// Called after a navigation command is applied.
    fn on_navigate(&mut self, e: &NavigateEvent) {
        _ = e;
    }

    /// Called at stroke transitions.
    fn on_stroke(&mut self, e: &StrokeEvent) {
        _ = e;
    }

    /// Called after a buffer is presented.
    fn on_present(&mut self, e: &PresentEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
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

    /// Emits a [`ForkEvent`].
    #[inline]
    pub fn fork(&mut self, e: &ForkEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fork(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NavigateEvent`].
    #[inline]
    pub fn navigate(&mut self, e: &NavigateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_navigate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StrokeEvent`].
    #[inline]
    pub fn stroke(&mut self, e: &StrokeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stroke(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PresentEvent`].
    #[inline]
    pub fn present(&mut self, e: &PresentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_present(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fork() -> ForkEvent {
        ForkEvent {
            output: OutputId(1),
            node: 3,
            parent: 1,
            kind: ForkKind::Clone,
            chronological_len: 4,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_fork(&sample_fork());
        sink.on_navigate(&NavigateEvent {
            output: OutputId(0),
            command: Command::Undo,
            from: 1,
            to: 0,
            moved: true,
        });
        sink.on_present(&PresentEvent {
            output: OutputId(0),
            node: 0,
            damage: Damage::Full,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.fork(&sample_fork());
        tracer.stroke(&StrokeEvent {
            output: OutputId(0),
            phase: StrokePhase::Begin,
            kind: ShapeKind::Brush,
            policy: ForkPolicy::Eager,
            node: None,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            forks: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_fork(&mut self, e: &ForkEvent) {
                self.forks.push(e.node);
            }
        }

        let mut sink = RecordingSink { forks: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.fork(&sample_fork());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.forks, &[3]);
    }
}
