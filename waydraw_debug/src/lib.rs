// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and export for waydraw diagnostics.
//!
//! This crate provides [`TraceSink`](waydraw_core::trace::TraceSink)
//! implementations and history inspection for development and post-mortem
//! analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from
//!   recorded bytes.
//! - [`dump::tree_to_json`]: the shape of a history tree as JSON.

pub mod chrome;
pub mod dump;
pub mod pretty;
pub mod recorder;
