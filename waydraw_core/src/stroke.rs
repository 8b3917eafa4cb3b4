// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-progress strokes and when they become history.
//!
//! A [`Stroke`] spans one press-drag-release gesture on one tree. Rendering
//! is left to the caller: every [`motion`](Stroke::motion) hands a
//! [`StrokePath`] and a target buffer to a closure. What this module decides
//! is *which* buffer is drawn into and *when* the result is committed, per
//! [`ForkPolicy`]:
//!
//! | Policy         | At begin              | Drawn into        | At finish         |
//! |----------------|-----------------------|-------------------|-------------------|
//! | `Eager`        | `fork`                | the new node      | nothing           |
//! | `InPlace`      | `fork_if_branching`   | the current node  | nothing           |
//! | `CommitOnEnd`  | nothing               | an overlay        | `fork_with`       |
//!
//! Shape kinds ([`ShapeKind::is_preview`]) are re-rendered from the
//! pre-stroke pixels on every motion, so only the latest preview remains.
//! [`ShapeKind::Brush`] accumulates.
//!
//! A `CommitOnEnd` stroke draws into a transparent overlay that is painted
//! over whichever version is current. If the tree navigates mid-drag (an
//! undo while the pointer is down), the stroke follows and is committed on
//! top of the version current at release. In-place strokes are bound to the
//! node they draw into; once the tree moves away from it they detach, and
//! further motion is ignored.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::damage::Damage;
use crate::history::{HistoryTree, NodeId};
use crate::raster::{RasterBuffer, RasterError};

/// When a stroke's pixels become a committed version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForkPolicy {
    /// Fork at stroke start and draw directly into the new node.
    ///
    /// Each stroke is exactly one version. If the session ends mid-stroke,
    /// the half-drawn node stays in history.
    Eager,
    /// Fork at stroke start only when the current node is a branch point,
    /// otherwise keep drawing into the current node.
    ///
    /// Consecutive linear strokes coalesce into one version; returning to an
    /// earlier version and drawing still starts a new branch.
    InPlace,
    /// Draw into a transparent overlay and commit it over the current
    /// version with [`fork_with`](HistoryTree::fork_with) at stroke end.
    ///
    /// Nothing reaches history until the stroke finishes. Costs two extra
    /// buffers for the duration of the stroke.
    #[default]
    CommitOnEnd,
}

/// What the caller is drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Freehand: every motion adds a segment.
    #[default]
    Brush,
    /// Straight line from the anchor to the pointer.
    Line,
    /// Axis-aligned rectangle spanned by the anchor and the pointer.
    Rectangle,
    /// Circle centered on the anchor through the pointer.
    Circle,
}

impl ShapeKind {
    /// Returns `true` if the shape is a preview that is cleared and redrawn
    /// on every motion.
    #[must_use]
    pub const fn is_preview(self) -> bool {
        !matches!(self, Self::Brush)
    }

    /// Short lowercase name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
        }
    }
}

/// Pointer positions of a stroke, as seen by the render closure.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePath {
    kind: ShapeKind,
    width: f64,
    color: u32,
    points: Vec<Point>,
}

impl StrokePath {
    fn new(kind: ShapeKind, width: f64, color: u32, anchor: Point) -> Self {
        let mut points = Vec::new();
        points.push(anchor);
        Self {
            kind,
            width,
            color,
            points,
        }
    }

    /// The shape being drawn.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Stroke width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Stroke color as `0xAARRGGBB`, fixed when the stroke began.
    #[must_use]
    pub fn color(&self) -> u32 {
        self.color
    }

    /// Where the stroke started.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.points[0]
    }

    /// The latest pointer position.
    #[must_use]
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Every pointer position so far, anchor first.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The newest freehand segment, from the previous position to the latest.
    ///
    /// Right after begin both ends are the anchor, which renders as a dot.
    #[must_use]
    pub fn last_segment(&self) -> (Point, Point) {
        let n = self.points.len();
        (self.points[n.saturating_sub(2)], self.points[n - 1])
    }

    /// Bounding box of everything this stroke may have touched so far,
    /// including earlier previews, grown by half the stroke width plus one
    /// pixel for antialiasing.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let anchor = self.anchor();
        let core = match self.kind {
            ShapeKind::Circle => {
                let radius = self
                    .points
                    .iter()
                    .map(|p| p.distance(anchor))
                    .fold(0.0, f64::max);
                Rect::from_center_size(anchor, (2.0 * radius, 2.0 * radius))
            }
            ShapeKind::Brush | ShapeKind::Line | ShapeKind::Rectangle => self
                .points
                .iter()
                .fold(Rect::from_points(anchor, anchor), |r, &p| r.union_pt(p)),
        };
        core.inflate(self.width * 0.5 + 1.0, self.width * 0.5 + 1.0)
    }

    fn push(&mut self, to: Point) {
        self.points.push(to);
    }
}

/// Where a stroke's pixels live until it ends.
#[derive(Debug)]
enum Canvas {
    /// Drawing straight into the node `target`; `base` holds its pixels from
    /// before the stroke.
    InPlace { target: NodeId, base: RasterBuffer },
    /// Drawing into a transparent `overlay`; `composed` is the overlay
    /// painted over the tree's current buffer.
    Overlay {
        overlay: RasterBuffer,
        composed: RasterBuffer,
    },
}

/// One in-progress stroke on a [`HistoryTree`].
#[derive(Debug)]
pub struct Stroke {
    path: StrokePath,
    policy: ForkPolicy,
    canvas: Canvas,
    moved: bool,
}

impl Stroke {
    /// Starts a stroke at `at` in `color`, forking first if `policy` asks
    /// for it.
    ///
    /// The color is fixed for the life of the stroke; changing the tool's
    /// color mid-drag only affects the next stroke.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Allocation`] if the pre-stroke buffers cannot
    /// be allocated. The tree is unchanged in that case.
    pub fn begin(
        tree: &mut HistoryTree,
        kind: ShapeKind,
        policy: ForkPolicy,
        width: f64,
        color: u32,
        at: Point,
    ) -> Result<Self, RasterError> {
        let canvas = match policy {
            ForkPolicy::CommitOnEnd => {
                let (w, h) = tree.dimensions();
                Canvas::Overlay {
                    overlay: RasterBuffer::new(w, h)?,
                    composed: tree.current_buffer().try_clone()?,
                }
            }
            ForkPolicy::Eager | ForkPolicy::InPlace => {
                let base = tree.current_buffer().try_clone()?;
                if policy == ForkPolicy::Eager {
                    tree.fork();
                } else {
                    tree.fork_if_branching();
                }
                Canvas::InPlace {
                    target: tree.current(),
                    base,
                }
            }
        };

        Ok(Self {
            path: StrokePath::new(kind, width, color, at),
            policy,
            canvas,
            moved: false,
        })
    }

    /// The pointer path so far.
    #[must_use]
    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    /// The policy this stroke was started with.
    #[must_use]
    pub fn policy(&self) -> ForkPolicy {
        self.policy
    }

    /// Returns `true` if further motion still draws.
    ///
    /// Overlay strokes ([`ForkPolicy::CommitOnEnd`]) are always attached and
    /// follow the tree wherever it navigates. In-place strokes detach once
    /// the tree's current node is no longer the node they draw into.
    #[must_use]
    pub fn is_attached(&self, tree: &HistoryTree) -> bool {
        match &self.canvas {
            Canvas::InPlace { target, .. } => tree.current() == *target,
            Canvas::Overlay { .. } => true,
        }
    }

    /// Extends the stroke to `to` and re-renders.
    ///
    /// Preview shapes first discard what the previous motion drew. Returns
    /// the damage to re-present, or [`Damage::None`] if the stroke is
    /// detached.
    pub fn motion<F>(&mut self, tree: &mut HistoryTree, to: Point, mut render: F) -> Damage
    where
        F: FnMut(&mut RasterBuffer, &StrokePath),
    {
        if !self.is_attached(tree) {
            return Damage::None;
        }
        self.path.push(to);
        self.moved = true;

        let preview = self.path.kind.is_preview();
        match &mut self.canvas {
            Canvas::InPlace { base, .. } => {
                let target = tree.current_buffer_mut();
                if preview {
                    restore(target, base);
                }
                render(target, &self.path);
            }
            Canvas::Overlay { overlay, composed } => {
                if preview {
                    overlay.clear();
                }
                render(overlay, &self.path);
                compose(composed, tree.current_buffer(), overlay);
            }
        }

        Damage::Rect(self.path.bounds())
    }

    /// Recomputes the preview after the tree's current node changed under
    /// an overlay stroke. In-place strokes are unaffected.
    pub fn rebase(&mut self, tree: &HistoryTree) {
        if let Canvas::Overlay { overlay, composed } = &mut self.canvas {
            compose(composed, tree.current_buffer(), overlay);
        }
    }

    /// The buffer to present while the stroke is active.
    ///
    /// Under [`ForkPolicy::CommitOnEnd`] this is the stroke painted over the
    /// current version; otherwise it is the tree's current buffer.
    #[must_use]
    pub fn preview<'a>(&'a self, tree: &'a HistoryTree) -> &'a RasterBuffer {
        match &self.canvas {
            Canvas::Overlay { composed, .. } => composed,
            Canvas::InPlace { .. } => tree.current_buffer(),
        }
    }

    /// Ends the stroke and returns the node holding it, if any.
    ///
    /// Under [`ForkPolicy::CommitOnEnd`] the stroke is painted over whatever
    /// version is current *now* and committed as its new child, even if the
    /// tree navigated since the stroke began. Nothing is committed if the
    /// pointer never moved. In-place strokes already live in their node and
    /// return it, unless they were detached.
    pub fn finish(self, tree: &mut HistoryTree) -> Option<NodeId> {
        match self.canvas {
            Canvas::Overlay {
                overlay,
                mut composed,
            } => {
                if !self.moved {
                    return None;
                }
                compose(&mut composed, tree.current_buffer(), &overlay);
                tree.fork_with(composed).ok()
            }
            Canvas::InPlace { target, .. } => (tree.current() == target).then_some(target),
        }
    }

    /// Abandons the stroke.
    ///
    /// Overlay strokes simply vanish. In-place strokes restore their node's
    /// pre-stroke pixels; a node already forked by [`ForkPolicy::Eager`]
    /// stays in history (nodes are never removed) holding the pre-stroke
    /// image again.
    pub fn cancel(self, tree: &mut HistoryTree) {
        if let Canvas::InPlace { target, base } = &self.canvas
            && tree.current() == *target
        {
            restore(tree.current_buffer_mut(), base);
        }
    }
}

/// Copies `base` back over `target`. Both come from the same tree.
fn restore(target: &mut RasterBuffer, base: &RasterBuffer) {
    let copied = target.copy_from(base);
    debug_assert!(copied.is_ok(), "stroke base does not match tree: {copied:?}");
}

/// Rebuilds `composed` as `overlay` painted over `current`.
fn compose(composed: &mut RasterBuffer, current: &RasterBuffer, overlay: &RasterBuffer) {
    let painted = composed
        .copy_from(current)
        .and_then(|()| composed.composite_over(overlay));
    debug_assert!(
        painted.is_ok(),
        "stroke overlay does not match tree: {painted:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u32 = 0xff00_ff00;

    fn tree() -> HistoryTree {
        HistoryTree::new(16, 16).unwrap()
    }

    /// Marks the latest point, standing in for real rasterization.
    #[expect(clippy::cast_possible_truncation, reason = "test coordinates are small")]
    fn dot(buf: &mut RasterBuffer, path: &StrokePath) {
        let p = path.last();
        buf.set_pixel(p.x as i32, p.y as i32, path.color());
    }

    fn inked(buf: &RasterBuffer) -> usize {
        buf.pixels().iter().filter(|&&p| p == INK).count()
    }

    #[test]
    fn commit_on_end_commits_overlay_once() {
        let mut tree = tree();
        let root = tree.root();
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::CommitOnEnd,
            1.0,
            INK,
            Point::new(1.0, 1.0),
        )
        .unwrap();
        assert_eq!(tree.node_count(), 1, "nothing committed at begin");

        stroke.motion(&mut tree, Point::new(2.0, 2.0), dot);
        stroke.motion(&mut tree, Point::new(3.0, 3.0), dot);
        assert_eq!(inked(tree.current_buffer()), 0, "current is untouched");
        assert_eq!(inked(stroke.preview(&tree)), 2);

        let node = stroke.finish(&mut tree).expect("stroke moved");
        assert_eq!(tree.current(), node);
        assert_eq!(tree.parent(node), Some(root));
        assert_eq!(inked(tree.current_buffer()), 2);
        assert_eq!(inked(tree.buffer(root)), 0);
    }

    #[test]
    fn commit_on_end_without_motion_commits_nothing() {
        let mut tree = tree();
        let stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Line,
            ForkPolicy::CommitOnEnd,
            1.0,
            INK,
            Point::new(1.0, 1.0),
        )
        .unwrap();
        assert_eq!(stroke.finish(&mut tree), None);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn eager_forks_at_begin_and_draws_in_place() {
        let mut tree = tree();
        let root = tree.root();
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::Eager,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        assert_eq!(tree.node_count(), 2);
        let node = tree.current();

        stroke.motion(&mut tree, Point::new(4.0, 4.0), dot);
        assert_eq!(inked(tree.current_buffer()), 1);
        assert_eq!(stroke.finish(&mut tree), Some(node));
        assert_eq!(tree.node_count(), 2);
        assert_eq!(inked(tree.buffer(root)), 0);
    }

    #[test]
    fn in_place_coalesces_linear_strokes() {
        let mut tree = tree();
        for x in 0..3 {
            let mut stroke = Stroke::begin(
                &mut tree,
                ShapeKind::Brush,
                ForkPolicy::InPlace,
                1.0,
                INK,
                Point::new(0.0, 0.0),
            )
            .unwrap();
            stroke.motion(&mut tree, Point::new(f64::from(x), 5.0), dot);
            stroke.finish(&mut tree);
        }
        assert_eq!(tree.node_count(), 1, "leaf is edited in place");
        assert_eq!(inked(tree.current_buffer()), 3);
    }

    #[test]
    fn in_place_branches_after_undo() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.fork();
        tree.undo();

        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::InPlace,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        stroke.motion(&mut tree, Point::new(1.0, 1.0), dot);
        let b = stroke.finish(&mut tree).unwrap();

        assert_ne!(b, root);
        let kids: Vec<_> = tree.children(root).collect();
        assert_eq!(kids, [a, b]);
        assert_eq!(inked(tree.buffer(a)), 0, "explored branch preserved");
    }

    #[test]
    fn preview_shapes_redraw_from_base() {
        let mut tree = tree();
        tree.current_buffer_mut().set_pixel(15, 15, INK);
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Line,
            ForkPolicy::CommitOnEnd,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        stroke.motion(&mut tree, Point::new(3.0, 3.0), dot);
        stroke.motion(&mut tree, Point::new(6.0, 6.0), dot);

        let preview = stroke.preview(&tree);
        assert_eq!(preview.pixel(3, 3), Some(0), "old preview cleared");
        assert_eq!(preview.pixel(6, 6), Some(INK));
        assert_eq!(preview.pixel(15, 15), Some(INK), "pre-stroke pixels kept");
    }

    #[test]
    fn brush_accumulates() {
        let mut tree = tree();
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::Eager,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        stroke.motion(&mut tree, Point::new(3.0, 3.0), dot);
        stroke.motion(&mut tree, Point::new(6.0, 6.0), dot);
        assert_eq!(inked(tree.current_buffer()), 2);
        assert_eq!(
            stroke.path().last_segment(),
            (Point::new(3.0, 3.0), Point::new(6.0, 6.0))
        );
    }

    #[test]
    fn undo_mid_stroke_commits_over_new_current() {
        let mut tree = tree();
        let first = tree.fork();
        tree.current_buffer_mut().set_pixel(9, 9, INK);
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::CommitOnEnd,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        stroke.motion(&mut tree, Point::new(1.0, 1.0), dot);
        tree.undo();
        stroke.rebase(&tree);
        assert!(stroke.is_attached(&tree));
        assert_eq!(stroke.preview(&tree).pixel(9, 9), Some(0), "undone ink gone");
        assert_eq!(stroke.preview(&tree).pixel(1, 1), Some(INK));

        assert_ne!(
            stroke.motion(&mut tree, Point::new(2.0, 2.0), dot),
            Damage::None
        );
        let node = stroke.finish(&mut tree).expect("stroke moved");
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.parent(node), Some(tree.root()));
        let kids: Vec<_> = tree.children(tree.root()).collect();
        assert_eq!(kids, [first, node], "undone version kept as a sibling");
        let committed = tree.buffer(node);
        assert_eq!(committed.pixel(1, 1), Some(INK));
        assert_eq!(committed.pixel(2, 2), Some(INK));
        assert_eq!(committed.pixel(9, 9), Some(0));
    }

    #[test]
    fn in_place_stroke_detaches_when_tree_moves() {
        let mut tree = tree();
        tree.fork();
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::Eager,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        let target = tree.current();
        stroke.motion(&mut tree, Point::new(1.0, 1.0), dot);
        tree.undo();

        assert!(!stroke.is_attached(&tree));
        assert_eq!(
            stroke.motion(&mut tree, Point::new(2.0, 2.0), dot),
            Damage::None
        );
        let before = tree.node_count();
        assert_eq!(stroke.finish(&mut tree), None);
        assert_eq!(tree.node_count(), before);
        assert_eq!(inked(tree.buffer(target)), 1, "drawn part stays in its node");
    }

    #[test]
    fn preview_composites_translucent_ink() {
        let mut tree = tree();
        tree.current_buffer_mut().set_pixel(1, 1, 0xff00_00ff);
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::CommitOnEnd,
            1.0,
            0x8080_0000,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        stroke.motion(&mut tree, Point::new(1.0, 1.0), dot);
        assert_eq!(stroke.preview(&tree).pixel(1, 1), Some(0xff80_007f));
        assert_eq!(stroke.path().color(), 0x8080_0000);
    }

    #[test]
    fn cancel_restores_pre_stroke_pixels() {
        let mut tree = tree();
        let mut stroke = Stroke::begin(
            &mut tree,
            ShapeKind::Brush,
            ForkPolicy::InPlace,
            1.0,
            INK,
            Point::new(0.0, 0.0),
        )
        .unwrap();
        stroke.motion(&mut tree, Point::new(2.0, 2.0), dot);
        assert_eq!(inked(tree.current_buffer()), 1);
        stroke.cancel(&mut tree);
        assert_eq!(inked(tree.current_buffer()), 0);
    }

    #[test]
    fn bounds_cover_all_previews() {
        let mut path = StrokePath::new(ShapeKind::Circle, 2.0, INK, Point::new(10.0, 10.0));
        path.push(Point::new(14.0, 10.0));
        path.push(Point::new(11.0, 10.0));
        // Largest radius seen is 4, plus 1 (half width) plus 1 (antialiasing).
        assert_eq!(path.bounds(), Rect::new(4.0, 4.0, 16.0, 16.0));

        let mut line = StrokePath::new(ShapeKind::Line, 0.0, INK, Point::new(1.0, 1.0));
        line.push(Point::new(5.0, 3.0));
        assert_eq!(line.bounds(), Rect::new(0.0, 0.0, 6.0, 4.0));
    }
}
