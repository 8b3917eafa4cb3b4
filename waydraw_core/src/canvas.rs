// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-output histories and present scheduling.
//!
//! A [`Canvas`] owns one [`HistoryTree`] per output surface, the stroke in
//! progress on each, and the damage not yet presented. Trees never interact:
//! undo on one output leaves every other output untouched.
//!
//! Every mutation marks the output on the [`PRESENT`](crate::dirty::PRESENT)
//! channel and merges its [`Damage`]. [`Canvas::present`] drains the channel
//! and hands each dirty output's visible buffer to a [`Presenter`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Point;
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::backend::Presenter;
use crate::command::Command;
use crate::damage::Damage;
use crate::dirty;
use crate::history::{HistoryTree, NodeId};
use crate::output::OutputId;
use crate::raster::{RasterBuffer, RasterError};
use crate::stroke::{ForkPolicy, Stroke, StrokePath};
use crate::tool::Tool;
use crate::trace::{
    ForkEvent, ForkKind, NavigateEvent, PresentEvent, StrokeEvent, StrokePhase, Tracer,
};

/// Tunables shared by every output of a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasConfig {
    /// When strokes become versions.
    pub fork_policy: ForkPolicy,
    /// Width of a fresh [`Tool`], in pixels.
    pub initial_stroke_width: f64,
    /// Smallest width scrolling can reach, in pixels.
    pub min_stroke_width: f64,
    /// Width change per unit of scroll-axis value.
    pub scroll_sensitivity: f64,
}

impl CanvasConfig {
    /// Commit each stroke when the pointer is released.
    pub const DEFAULT: Self = Self {
        fork_policy: ForkPolicy::CommitOnEnd,
        initial_stroke_width: 10.0,
        min_stroke_width: 1.0,
        scroll_sensitivity: 0.1,
    };

    /// Coalesce linear strokes into one version, branching only when drawing
    /// over an explored node.
    #[must_use]
    pub const fn coalescing() -> Self {
        Self {
            fork_policy: ForkPolicy::InPlace,
            ..Self::DEFAULT
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug)]
struct Surface {
    tree: HistoryTree,
    stroke: Option<Stroke>,
    damage: Damage,
}

impl Surface {
    /// The pixels the user should currently see.
    fn visible(&self) -> &RasterBuffer {
        match &self.stroke {
            Some(stroke) => stroke.preview(&self.tree),
            None => self.tree.current_buffer(),
        }
    }
}

/// Drawing histories for every output, plus what still needs presenting.
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    surfaces: BTreeMap<OutputId, Surface>,
    dirty: DirtyTracker<u32>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::DEFAULT)
    }
}

impl Canvas {
    /// Creates a canvas with no outputs.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            surfaces: BTreeMap::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// The configuration this canvas was created with.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// A fresh tool for a new seat.
    #[must_use]
    pub fn new_tool(&self) -> Tool {
        Tool::new(&self.config)
    }

    // -- Outputs --

    /// Handles a surface configure for `output`.
    ///
    /// The first configure creates the output's history with a transparent
    /// root of `width` x `height`. Later configures keep the existing history
    /// and its dimensions. Either way the whole output is scheduled for
    /// present. Returns `true` if a history was created.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] if the root buffer cannot be
    /// allocated.
    pub fn configure(
        &mut self,
        output: OutputId,
        width: u32,
        height: u32,
    ) -> Result<bool, RasterError> {
        let created = if self.surfaces.contains_key(&output) {
            false
        } else {
            let tree = HistoryTree::new(width, height)?;
            self.surfaces.insert(
                output,
                Surface {
                    tree,
                    stroke: None,
                    damage: Damage::None,
                },
            );
            true
        };
        self.invalidate(output, Damage::Full);
        Ok(created)
    }

    /// Drops an output and its history. Returns `false` if it was unknown.
    pub fn remove_output(&mut self, output: OutputId) -> bool {
        self.dirty.remove_key(output.0);
        self.surfaces.remove(&output).is_some()
    }

    /// Configured outputs, in ascending id order.
    pub fn outputs(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.surfaces.keys().copied()
    }

    /// The history of `output`, if it has been configured.
    #[must_use]
    pub fn tree(&self, output: OutputId) -> Option<&HistoryTree> {
        self.surfaces.get(&output).map(|s| &s.tree)
    }

    /// Mutable access to the history of `output`.
    ///
    /// Changes made this way are not tracked; follow them with
    /// [`invalidate`](Self::invalidate).
    pub fn tree_mut(&mut self, output: OutputId) -> Option<&mut HistoryTree> {
        self.surfaces.get_mut(&output).map(|s| &mut s.tree)
    }

    /// The buffer `output` should show right now: the in-progress stroke
    /// preview if there is one, else the current version.
    #[must_use]
    pub fn visible_buffer(&self, output: OutputId) -> Option<&RasterBuffer> {
        self.surfaces.get(&output).map(Surface::visible)
    }

    /// Schedules `damage` on `output` for the next present. Unknown outputs
    /// are ignored.
    pub fn invalidate(&mut self, output: OutputId, damage: Damage) {
        if damage.is_empty() {
            return;
        }
        if let Some(surface) = self.surfaces.get_mut(&output) {
            surface.damage.merge(&damage);
            self.dirty.mark(output.0, dirty::PRESENT);
        }
    }

    // -- Navigation --

    /// Applies a navigation command to `output`'s history.
    ///
    /// Returns `true` if the current version changed. An active
    /// [`CommitOnEnd`](ForkPolicy::CommitOnEnd) stroke follows the move and
    /// will commit on top of the new current version; an in-place stroke is
    /// detached by it.
    pub fn apply(&mut self, output: OutputId, command: Command, tracer: &mut Tracer<'_>) -> bool {
        let Some(surface) = self.surfaces.get_mut(&output) else {
            return false;
        };
        let from = surface.tree.current();
        let moved = surface.tree.apply(command);
        tracer.navigate(&NavigateEvent {
            output,
            command,
            from: from.index(),
            to: surface.tree.current().index(),
            moved,
        });
        if moved {
            if let Some(stroke) = &mut surface.stroke {
                stroke.rebase(&surface.tree);
            }
            self.invalidate(output, Damage::Full);
        }
        moved
    }

    // -- Strokes --

    /// Returns `true` if a stroke is in progress on `output`.
    #[must_use]
    pub fn is_stroking(&self, output: OutputId) -> bool {
        self.surfaces
            .get(&output)
            .is_some_and(|s| s.stroke.is_some())
    }

    /// Starts a stroke on `output` with `tool`'s shape, width and color.
    ///
    /// The color is captured now; later palette changes on `tool` do not
    /// affect this stroke. A brush marks the press point right away by
    /// calling `render` once.
    ///
    /// Each output holds at most one stroke. Returns `Ok(false)` without side
    /// effects if the output is unknown or already has a stroke in progress,
    /// so a second seat pressing on the same output is ignored until the
    /// first releases. Seats on different outputs draw concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] if the pre-stroke copies cannot be
    /// allocated.
    pub fn begin_stroke<F>(
        &mut self,
        output: OutputId,
        tool: &Tool,
        at: Point,
        render: F,
        tracer: &mut Tracer<'_>,
    ) -> Result<bool, RasterError>
    where
        F: FnMut(&mut RasterBuffer, &StrokePath),
    {
        let policy = self.config.fork_policy;
        let Some(surface) = self.surfaces.get_mut(&output) else {
            return Ok(false);
        };
        if surface.stroke.is_some() {
            return Ok(false);
        }

        let parent = surface.tree.current();
        let before = surface.tree.node_count();
        let mut stroke = Stroke::begin(
            &mut surface.tree,
            tool.kind(),
            policy,
            tool.width(),
            tool.color(),
            at,
        )?;
        if surface.tree.node_count() > before {
            trace_fork(tracer, output, &surface.tree, parent, ForkKind::Clone);
        }
        tracer.stroke(&StrokeEvent {
            output,
            phase: StrokePhase::Begin,
            kind: tool.kind(),
            policy,
            node: None,
        });

        let damage = if tool.kind().is_preview() {
            Damage::None
        } else {
            stroke.motion(&mut surface.tree, at, render)
        };
        surface.stroke = Some(stroke);
        self.invalidate(output, damage);
        Ok(true)
    }

    /// Extends the stroke on `output` to `to`.
    ///
    /// Returns `false` if there is no stroke in progress, or if it was
    /// detached by navigation and no longer draws.
    pub fn stroke_motion<F>(&mut self, output: OutputId, to: Point, render: F) -> bool
    where
        F: FnMut(&mut RasterBuffer, &StrokePath),
    {
        let Some(surface) = self.surfaces.get_mut(&output) else {
            return false;
        };
        let Some(stroke) = &mut surface.stroke else {
            return false;
        };
        if !stroke.is_attached(&surface.tree) {
            return false;
        }
        let damage = stroke.motion(&mut surface.tree, to, render);
        self.invalidate(output, damage);
        true
    }

    /// Ends the stroke on `output` and returns the version holding it.
    pub fn finish_stroke(&mut self, output: OutputId, tracer: &mut Tracer<'_>) -> Option<NodeId> {
        let surface = self.surfaces.get_mut(&output)?;
        let stroke = surface.stroke.take()?;
        let (kind, policy) = (stroke.path().kind(), stroke.policy());
        let bounds = stroke.path().bounds();

        let parent = surface.tree.current();
        let before = surface.tree.node_count();
        let node = stroke.finish(&mut surface.tree);
        if surface.tree.node_count() > before {
            trace_fork(tracer, output, &surface.tree, parent, ForkKind::Adopt);
        }
        tracer.stroke(&StrokeEvent {
            output,
            phase: StrokePhase::End,
            kind,
            policy,
            node: node.map(NodeId::index),
        });

        if node.is_some() {
            self.invalidate(output, Damage::Rect(bounds));
        }
        node
    }

    /// Abandons the stroke on `output`. Returns `false` if there was none.
    pub fn cancel_stroke(&mut self, output: OutputId, tracer: &mut Tracer<'_>) -> bool {
        let Some(surface) = self.surfaces.get_mut(&output) else {
            return false;
        };
        let Some(stroke) = surface.stroke.take() else {
            return false;
        };
        let (kind, policy) = (stroke.path().kind(), stroke.policy());
        let bounds = stroke.path().bounds();
        stroke.cancel(&mut surface.tree);
        tracer.stroke(&StrokeEvent {
            output,
            phase: StrokePhase::Cancel,
            kind,
            policy,
            node: None,
        });
        self.invalidate(output, Damage::Rect(bounds));
        true
    }

    // -- Presentation --

    /// Presents every output with pending damage.
    ///
    /// Outputs are visited in a deterministic order. Damage is clamped to the
    /// output's bounds first; outputs whose damage clamps to nothing are
    /// skipped. Returns the number of outputs presented.
    pub fn present<P>(&mut self, presenter: &mut P, tracer: &mut Tracer<'_>) -> usize
    where
        P: Presenter + ?Sized,
    {
        let pending: Vec<u32> = self
            .dirty
            .drain(dirty::PRESENT)
            .deterministic()
            .run()
            .collect();

        let mut presented = 0;
        for idx in pending {
            let output = OutputId(idx);
            let Some(surface) = self.surfaces.get_mut(&output) else {
                continue;
            };
            let damage = core::mem::take(&mut surface.damage);
            let buffer = surface.visible();
            let damage = damage.clamp_to(buffer.bounds());
            if damage.is_empty() {
                continue;
            }
            presenter.present(output, buffer, &damage);
            tracer.present(&PresentEvent {
                output,
                node: surface.tree.current().index(),
                damage,
            });
            presented += 1;
        }
        presented
    }
}

fn trace_fork(
    tracer: &mut Tracer<'_>,
    output: OutputId,
    tree: &HistoryTree,
    parent: NodeId,
    kind: ForkKind,
) {
    tracer.fork(&ForkEvent {
        output,
        node: tree.current().index(),
        parent: parent.index(),
        kind,
        chronological_len: u32::try_from(tree.node_count()).unwrap_or(u32::MAX),
    });
}
