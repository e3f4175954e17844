//! Route tree
//!
//! Each node binds a path to a page model and may nest child nodes. Lookup is a
//! children-before-self depth-first search: a descendant with the same path
//! shadows its ancestor, and sibling order decides ties.

use super::Page;

/// A named view bound to a page model
pub struct RouteNode {
    pub(super) path: String,
    pub(super) model: Box<dyn Page>,
    pub(super) children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>, model: impl Page + 'static) -> Self {
        Self {
            path: path.into(),
            model: Box::new(model),
            children: Vec::new(),
        }
    }

    /// Append a nested view
    pub fn child(mut self, node: RouteNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn children(&self) -> &[RouteNode] {
        &self.children
    }
}

/// Index trail from the root list down to a node
pub(super) type Location = Vec<usize>;

/// Find `path`, checking a node's descendants before the node itself
pub(super) fn locate(nodes: &[RouteNode], path: &str) -> Option<Location> {
    let mut trail = Vec::new();
    locate_in(nodes, path, &mut trail).then_some(trail)
}

fn locate_in(nodes: &[RouteNode], path: &str, trail: &mut Location) -> bool {
    for (i, node) in nodes.iter().enumerate() {
        trail.push(i);
        if locate_in(&node.children, path, trail) || node.path == path {
            return true;
        }
        trail.pop();
    }
    false
}

pub(super) fn node_at<'a>(nodes: &'a [RouteNode], location: &[usize]) -> Option<&'a RouteNode> {
    let (first, rest) = location.split_first()?;
    let node = nodes.get(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at(&node.children, rest)
    }
}

pub(super) fn node_at_mut<'a>(
    nodes: &'a mut [RouteNode],
    location: &[usize],
) -> Option<&'a mut RouteNode> {
    let (first, rest) = location.split_first()?;
    let node = nodes.get_mut(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at_mut(&mut node.children, rest)
    }
}
