// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use kurbo::Rect;

use waydraw_core::command::Command;
use waydraw_core::damage::Damage;
use waydraw_core::output::OutputId;
use waydraw_core::stroke::{ForkPolicy, ShapeKind};
use waydraw_core::trace::{
    ForkEvent, ForkKind, NavigateEvent, PresentEvent, StrokeEvent, StrokePhase, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FORK: u8 = 1;
const TAG_NAVIGATE: u8 = 2;
const TAG_STROKE: u8 = 3;
const TAG_PRESENT: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u32(val);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
    }

    fn write_damage(&mut self, d: Damage) {
        let (tag, r) = match d {
            Damage::None => (0, Rect::ZERO),
            Damage::Rect(r) => (1, r),
            Damage::Full => (2, Rect::ZERO),
        };
        self.write_u8(tag);
        self.write_f64(r.x0);
        self.write_f64(r.y0);
        self.write_f64(r.x1);
        self.write_f64(r.y1);
    }
}

fn command_code(c: Command) -> u8 {
    match c {
        Command::Undo => 0,
        Command::Redo => 1,
        Command::StepEarlier => 2,
        Command::StepLater => 3,
    }
}

fn shape_code(k: ShapeKind) -> u8 {
    match k {
        ShapeKind::Brush => 0,
        ShapeKind::Line => 1,
        ShapeKind::Rectangle => 2,
        ShapeKind::Circle => 3,
    }
}

fn policy_code(p: ForkPolicy) -> u8 {
    match p {
        ForkPolicy::Eager => 0,
        ForkPolicy::InPlace => 1,
        ForkPolicy::CommitOnEnd => 2,
    }
}

impl TraceSink for RecorderSink {
    fn on_fork(&mut self, e: &ForkEvent) {
        self.write_u8(TAG_FORK);
        self.write_u32(e.output.0);
        self.write_u32(e.node);
        self.write_u32(e.parent);
        self.write_u8(match e.kind {
            ForkKind::Clone => 0,
            ForkKind::Adopt => 1,
        });
        self.write_u32(e.chronological_len);
    }

    fn on_navigate(&mut self, e: &NavigateEvent) {
        self.write_u8(TAG_NAVIGATE);
        self.write_u32(e.output.0);
        self.write_u8(command_code(e.command));
        self.write_u32(e.from);
        self.write_u32(e.to);
        self.write_u8(u8::from(e.moved));
    }

    fn on_stroke(&mut self, e: &StrokeEvent) {
        self.write_u8(TAG_STROKE);
        self.write_u32(e.output.0);
        self.write_u8(match e.phase {
            StrokePhase::Begin => 0,
            StrokePhase::End => 1,
            StrokePhase::Cancel => 2,
        });
        self.write_u8(shape_code(e.kind));
        self.write_u8(policy_code(e.policy));
        self.write_option_u32(e.node);
    }

    fn on_present(&mut self, e: &PresentEvent) {
        self.write_u8(TAG_PRESENT);
        self.write_u32(e.output.0);
        self.write_u32(e.node);
        self.write_damage(e.damage);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`ForkEvent`].
    Fork(ForkEvent),
    /// A [`NavigateEvent`].
    Navigate(NavigateEvent),
    /// A [`StrokeEvent`].
    Stroke(StrokeEvent),
    /// A [`PresentEvent`].
    Present(PresentEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        let present = self.read_u8()?;
        let val = self.read_u32()?;
        Some((present != 0).then_some(val))
    }

    fn read_damage(&mut self) -> Option<Damage> {
        let tag = self.read_u8()?;
        let r = Rect::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        );
        Some(match tag {
            0 => Damage::None,
            1 => Damage::Rect(r),
            _ => Damage::Full,
        })
    }

    fn read_command(&mut self) -> Option<Command> {
        Command::ALL.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_shape(&mut self) -> Option<ShapeKind> {
        Some(match self.read_u8()? {
            0 => ShapeKind::Brush,
            1 => ShapeKind::Line,
            2 => ShapeKind::Rectangle,
            _ => ShapeKind::Circle,
        })
    }

    fn read_policy(&mut self) -> Option<ForkPolicy> {
        Some(match self.read_u8()? {
            0 => ForkPolicy::Eager,
            1 => ForkPolicy::InPlace,
            _ => ForkPolicy::CommitOnEnd,
        })
    }

    fn decode_fork(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Fork(ForkEvent {
            output: OutputId(self.read_u32()?),
            node: self.read_u32()?,
            parent: self.read_u32()?,
            kind: match self.read_u8()? {
                0 => ForkKind::Clone,
                _ => ForkKind::Adopt,
            },
            chronological_len: self.read_u32()?,
        }))
    }

    fn decode_navigate(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Navigate(NavigateEvent {
            output: OutputId(self.read_u32()?),
            command: self.read_command()?,
            from: self.read_u32()?,
            to: self.read_u32()?,
            moved: self.read_u8()? != 0,
        }))
    }

    fn decode_stroke(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Stroke(StrokeEvent {
            output: OutputId(self.read_u32()?),
            phase: match self.read_u8()? {
                0 => StrokePhase::Begin,
                1 => StrokePhase::End,
                _ => StrokePhase::Cancel,
            },
            kind: self.read_shape()?,
            policy: self.read_policy()?,
            node: self.read_option_u32()?,
        }))
    }

    fn decode_present(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Present(PresentEvent {
            output: OutputId(self.read_u32()?),
            node: self.read_u32()?,
            damage: self.read_damage()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FORK => self.decode_fork(),
            TAG_NAVIGATE => self.decode_navigate(),
            TAG_STROKE => self.decode_stroke(),
            TAG_PRESENT => self.decode_present(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use waydraw_core::backend::Presenter;
    use waydraw_core::canvas::Canvas;
    use waydraw_core::raster::RasterBuffer;
    use waydraw_core::stroke::StrokePath;
    use waydraw_core::trace::Tracer;

    struct Discard;

    impl Presenter for Discard {
        fn present(&mut self, _: OutputId, _: &RasterBuffer, _: &Damage) {}
    }

    fn no_ink(_: &mut RasterBuffer, _: &StrokePath) {}

    #[test]
    fn records_a_canvas_session() {
        let out = OutputId(7);
        let mut canvas = Canvas::default();
        canvas.configure(out, 4, 4).unwrap();
        let tool = canvas.new_tool();

        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            canvas
                .begin_stroke(out, &tool, kurbo::Point::new(1.0, 1.0), no_ink, &mut tracer)
                .unwrap();
            canvas.stroke_motion(out, kurbo::Point::new(2.0, 2.0), no_ink);
            canvas.finish_stroke(out, &mut tracer);
            canvas.apply(out, Command::Undo, &mut tracer);
            canvas.present(&mut Discard, &mut tracer);
        }

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 5, "got {events:?}");
        assert!(matches!(
            events[0],
            RecordedEvent::Stroke(StrokeEvent {
                phase: StrokePhase::Begin,
                ..
            })
        ));
        assert_eq!(
            events[1],
            RecordedEvent::Fork(ForkEvent {
                output: out,
                node: 1,
                parent: 0,
                kind: ForkKind::Adopt,
                chronological_len: 2,
            })
        );
        assert!(matches!(
            events[2],
            RecordedEvent::Stroke(StrokeEvent {
                phase: StrokePhase::End,
                node: Some(1),
                ..
            })
        ));
        assert_eq!(
            events[3],
            RecordedEvent::Navigate(NavigateEvent {
                output: out,
                command: Command::Undo,
                from: 1,
                to: 0,
                moved: true,
            })
        );
        assert_eq!(
            events[4],
            RecordedEvent::Present(PresentEvent {
                output: out,
                node: 0,
                damage: Damage::Rect(Rect::new(0.0, 0.0, 4.0, 4.0)),
            })
        );
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_present(&PresentEvent {
            output: OutputId(0),
            node: 0,
            damage: Damage::Full,
        });
        rec.on_present(&PresentEvent {
            output: OutputId(1),
            node: 2,
            damage: Damage::None,
        });
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            RecordedEvent::Present(PresentEvent {
                damage: Damage::Full,
                ..
            })
        ));
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let events: Vec<_> = decode(&[0xff, 1, 2, 3]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
