// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branching raster history for on-screen drawing overlays.
//!
//! `waydraw_core` keeps every version of a drawing as a full pixel snapshot
//! in a tree, so undoing and then drawing never throws away the future that
//! was undone. It is `no_std` compatible (with `alloc`), performs no I/O and
//! leaves rasterization and compositor protocol to the host.
//!
//! # Architecture
//!
//! ```text
//!   pointer / keyboard (host)
//!       │
//!       ▼
//!   Canvas::begin_stroke / stroke_motion / finish_stroke ──► Stroke
//!   Canvas::apply(Command)                                    │
//!       │                                                     ▼
//!       └────────────► HistoryTree (one per output) ◄── fork / fork_with
//!                              │
//!                              ▼
//!   PRESENT dirty channel + Damage ──► Canvas::present() ──► Presenter
//! ```
//!
//! **[`history`]**: The branching version tree: struct-of-arrays node
//! storage linked by [`list`] chains, with lineage (undo/redo) and
//! chronological (earlier/later) navigation.
//!
//! **[`list`]**: Index-linked doubly linked lists over a shared arena, so
//! one node can sit in several sequences at once.
//!
//! **[`raster`]**: Fixed-size `ARGB8888` pixel buffers.
//!
//! **[`stroke`]**: When an in-progress stroke forks, and where it draws
//! ([`ForkPolicy`](stroke::ForkPolicy)).
//!
//! **[`canvas`]**: One tree per output, stroke bookkeeping, and present
//! scheduling via [`dirty`] and [`damage`].
//!
//! **[`command`]** and **[`tool`]**: Key bindings and per-seat drawing
//! state.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait hosts
//! implement to put pixels on screen.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod canvas;
pub mod command;
pub mod damage;
pub mod dirty;
pub mod history;
pub mod list;
pub mod output;
pub mod raster;
pub mod stroke;
pub mod tool;
pub mod trace;
