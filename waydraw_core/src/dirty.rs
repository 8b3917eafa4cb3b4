// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! [`Canvas`](crate::canvas::Canvas) tracks which outputs need re-presenting
//! with [`understory_dirty`], keyed by the raw [`OutputId`] value. Outputs
//! have no dependencies on each other, so nothing propagates: marking one
//! output never dirties another.
//!
//! # Consumption
//!
//! Callers never query dirty state directly.
//! [`Canvas::present`](crate::canvas::Canvas::present) drains [`PRESENT`] in
//! deterministic order and hands each dirty output to a
//! [`Presenter`](crate::backend::Presenter).
//!
//! [`OutputId`]: crate::output::OutputId

use understory_dirty::Channel;

/// The output's visible pixels changed: a fork, a navigation, a stroke
/// motion, or a fresh configure.
pub const PRESENT: Channel = Channel::new(0);
