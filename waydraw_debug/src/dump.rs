// Copyright 2026 the Waydraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of a history tree's shape.
//!
//! Pixels are not included, only topology: who is whose parent, child order
//! (which decides where redo goes), creation order and the current node.

use std::io::{self, Write};

use serde_json::{Value, json};

use waydraw_core::history::{HistoryTree, NodeId};

/// Describes `tree` as a JSON object.
///
/// ```text
/// {
///   "width": 640, "height": 480,
///   "current": 2,
///   "chronological": [0, 1, 2],
///   "nodes": [
///     { "id": 0, "parent": null, "depth": 0, "children": [1, 2] },
///     ...
///   ]
/// }
/// ```
///
/// `nodes` is in creation order.
#[must_use]
pub fn tree_to_json(tree: &HistoryTree) -> Value {
    let (width, height) = tree.dimensions();
    let nodes: Vec<Value> = tree
        .chronological()
        .map(|id| {
            json!({
                "id": id.index(),
                "parent": tree.parent(id).map(NodeId::index),
                "depth": tree.depth(id),
                "children": tree.children(id).map(NodeId::index).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "width": width,
        "height": height,
        "current": tree.current().index(),
        "chronological": tree.chronological().map(NodeId::index).collect::<Vec<_>>(),
        "nodes": nodes,
    })
}

/// Writes [`tree_to_json`] to `writer`, pretty-printed.
pub fn write_tree(tree: &HistoryTree, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, &tree_to_json(tree))?;
    Ok(())
}
