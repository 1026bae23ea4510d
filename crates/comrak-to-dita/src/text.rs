/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * comrak splits literal text into several Text nodes (around escapes,
 * entities and soft breaks). The serializer emits one characters event
 * per text node, so adjacent runs are merged here.
 */

use dita_markdown::{Node, NodeKind};

/// Push `node`, appending to the previous node instead when both are text.
pub(crate) fn push_merging_text(out: &mut Vec<Node>, node: Node) {
    if let NodeKind::Text(text) = &node.kind {
        if let Some(Node {
            kind: NodeKind::Text(previous),
            ..
        }) = out.last_mut()
        {
            previous.push_str(text);
            return;
        }
    }
    out.push(node);
}
