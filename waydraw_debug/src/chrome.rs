// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Recordings carry no wall-clock time, so each event's position in the
//! recording is used as its timestamp (one microsecond per event). Each
//! output becomes a process; strokes become duration slices.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use waydraw_core::damage::Damage;
use waydraw_core::trace::StrokePhase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::Fork(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Fork",
                    "cat": "History",
                    "ts": ts,
                    "pid": e.output.0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "node": e.node,
                        "parent": e.parent,
                        "kind": format!("{:?}", e.kind),
                        "versions": e.chronological_len,
                    }
                }));
            }
            RecordedEvent::Navigate(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.command.name(),
                    "cat": "History",
                    "ts": ts,
                    "pid": e.output.0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "moved": e.moved,
                    }
                }));
            }
            RecordedEvent::Stroke(e) => {
                let ph = match e.phase {
                    StrokePhase::Begin => "B",
                    StrokePhase::End | StrokePhase::Cancel => "E",
                };
                events.push(json!({
                    "ph": ph,
                    "name": e.kind.name(),
                    "cat": "Stroke",
                    "ts": ts,
                    "pid": e.output.0,
                    "tid": 0,
                    "args": {
                        "policy": format!("{:?}", e.policy),
                        "cancelled": e.phase == StrokePhase::Cancel,
                        "node": e.node,
                    }
                }));
            }
            RecordedEvent::Present(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Present",
                    "cat": "Present",
                    "ts": ts,
                    "pid": e.output.0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "node": e.node,
                        "damage": damage_json(e.damage),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn damage_json(damage: Damage) -> Value {
    match damage {
        Damage::None => Value::Null,
        Damage::Full => json!("full"),
        Damage::Rect(r) => json!([r.x0, r.y0, r.x1, r.y1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use waydraw_core::command::Command;
    use waydraw_core::output::OutputId;
    use waydraw_core::stroke::{ForkPolicy, ShapeKind};
    use waydraw_core::trace::{NavigateEvent, PresentEvent, StrokeEvent, TraceSink};

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        let stroke = StrokeEvent {
            output: OutputId(1),
            phase: StrokePhase::Begin,
            kind: ShapeKind::Line,
            policy: ForkPolicy::CommitOnEnd,
            node: None,
        };
        rec.on_stroke(&stroke);
        rec.on_stroke(&StrokeEvent {
            phase: StrokePhase::End,
            node: Some(1),
            ..stroke
        });
        rec.on_navigate(&NavigateEvent {
            output: OutputId(1),
            command: Command::Undo,
            from: 1,
            to: 0,
            moved: true,
        });
        rec.on_present(&PresentEvent {
            output: OutputId(1),
            node: 0,
            damage: Damage::Full,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        // The stroke is a begin/end slice named after its shape.
        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["name"], "line");
        assert_eq!(parsed[1]["ph"], "E");
        assert_eq!(parsed[1]["args"]["node"], 1);

        assert_eq!(parsed[2]["name"], "undo");
        assert_eq!(parsed[2]["ts"], 2);
        assert_eq!(parsed[3]["args"]["damage"], "full");
        assert_eq!(parsed[3]["pid"], 1);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
