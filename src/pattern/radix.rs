//! Radix tree behind [`super::PathMatcher`]
//!
//! Each node owns a run of literal bytes rather than a single character, so a
//! lookup walks at most one node per literal run and costs O(k) in the length
//! of the path, independent of how many patterns share the tree.
//!
//! ## Node shape
//!
//! - `part`: literal bytes consumed verbatim at this position
//! - `terminal`: a pattern ends exactly here
//! - `children`: static children, at most one per leading byte
//! - `param`: a single named parameter child capturing one path segment
//! - `wildcard`: a pattern ends here and captures the remainder under `"0"`
//!
//! Inserting a literal that diverges partway through an existing node splits
//! that node: the shared prefix stays in place and the old remainder moves into
//! a fresh child that takes over the node's markers and children.
//!
//! Terminal markers record which concrete pattern first reached them. A later
//! insertion of the same shape never replaces the marker.

use std::sync::Arc;

use super::parse::ParsedPattern;
use super::ParamVec;
use crate::error::RouterError;

/// Capture key used for the remainder matched by a trailing `*`.
pub const WILDCARD_KEY: &str = "0";

#[derive(Debug, Clone, Default)]
pub(crate) struct RadixNode {
    part: Vec<u8>,
    terminal: Option<Arc<str>>,
    children: Vec<RadixNode>,
    param: Option<Box<ParamNode>>,
    wildcard: Option<Arc<str>>,
}

#[derive(Debug, Clone)]
struct ParamNode {
    name: Arc<str>,
    /// A pattern ends after consuming this one segment
    terminal: Option<Arc<str>>,
    /// Tree continuing after the segment (always starts with `/`)
    child: Option<RadixNode>,
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

impl RadixNode {
    fn new(part: &[u8]) -> Self {
        Self {
            part: part.to_vec(),
            ..Self::default()
        }
    }

    /// Root of an empty tree. Every normalized pattern starts with `/`.
    pub(crate) fn root() -> Self {
        Self::new(b"/")
    }

    /// Move this node's current shape below a prefix of length `at`.
    fn split_at(&mut self, at: usize) {
        let suffix = self.part.split_off(at);
        let moved = RadixNode {
            part: suffix,
            terminal: self.terminal.take(),
            children: std::mem::take(&mut self.children),
            param: self.param.take(),
            wildcard: self.wildcard.take(),
        };
        self.children.push(moved);
    }

    /// Consume `part` starting at this node, splitting and creating nodes as
    /// needed, and return the node where the literal run ends.
    fn insert_static(&mut self, part: &[u8]) -> &mut RadixNode {
        let common = common_prefix_len(&self.part, part);
        if common < self.part.len() {
            self.split_at(common);
        }
        if common == part.len() {
            return self;
        }

        let rest = &part[common..];
        match self
            .children
            .iter()
            .position(|child| child.part.first() == rest.first())
        {
            Some(idx) => self.children[idx].insert_static(rest),
            None => {
                self.children.push(RadixNode::new(rest));
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        }
    }

    fn attach_param(&mut self, name: &str, pattern: &str) -> Result<&mut ParamNode, RouterError> {
        if let Some(existing) = &self.param {
            if existing.name.as_ref() != name {
                return Err(RouterError::ParameterNameConflict {
                    pattern: pattern.to_string(),
                    existing: existing.name.to_string(),
                    requested: name.to_string(),
                });
            }
        }
        let param = self.param.get_or_insert_with(|| {
            Box::new(ParamNode {
                name: Arc::from(name),
                terminal: None,
                child: None,
            })
        });
        Ok(&mut **param)
    }

    /// Insert one concrete pattern, tagging its end marker with `variant`.
    pub(crate) fn insert(
        &mut self,
        route: &ParsedPattern,
        variant: &Arc<str>,
    ) -> Result<(), RouterError> {
        let mut node = self.insert_static(route.head.as_bytes());

        for step in &route.steps {
            let param = node.attach_param(&step.name, variant)?;
            if step.tail.is_empty() {
                param.terminal.get_or_insert_with(|| Arc::clone(variant));
                return Ok(());
            }
            let tail = step.tail.as_bytes();
            node = param
                .child
                .get_or_insert_with(|| RadixNode::new(tail))
                .insert_static(tail);
        }

        let slot = if route.wildcard {
            &mut node.wildcard
        } else {
            &mut node.terminal
        };
        slot.get_or_insert_with(|| Arc::clone(variant));
        Ok(())
    }

    /// Match `path[start..]` against this subtree.
    ///
    /// Branches are tried static child first, then parameter, then wildcard.
    /// A failed branch leaves `captures` as it found them.
    pub(crate) fn find<'n>(
        &'n self,
        path: &str,
        start: usize,
        captures: &mut ParamVec,
    ) -> Option<&'n Arc<str>> {
        let bytes = path.as_bytes();
        let end = start + self.part.len();
        if bytes.get(start..end)? != self.part.as_slice() {
            return None;
        }

        if end == bytes.len() {
            if let Some(variant) = &self.terminal {
                return Some(variant);
            }
            if let Some(variant) = &self.wildcard {
                captures.push((Arc::from(WILDCARD_KEY), String::new()));
                return Some(variant);
            }
            return None;
        }

        let next = bytes.get(end)?;
        if let Some(child) = self
            .children
            .iter()
            .find(|child| child.part.first() == Some(next))
        {
            if let Some(variant) = child.find(path, end, captures) {
                return Some(variant);
            }
        }

        if let Some(param) = &self.param {
            if let Some(variant) = param.find(path, end, captures) {
                return Some(variant);
            }
        }

        if let Some(variant) = &self.wildcard {
            let rest = path.get(end..)?;
            captures.push((Arc::from(WILDCARD_KEY), rest.to_string()));
            return Some(variant);
        }

        None
    }

    /// Number of nodes in this subtree, parameter children's subtrees included.
    pub(crate) fn node_count(&self) -> usize {
        1 + self.children.iter().map(RadixNode::node_count).sum::<usize>()
            + self
                .param
                .as_ref()
                .and_then(|p| p.child.as_ref())
                .map_or(0, RadixNode::node_count)
    }
}

impl ParamNode {
    fn find<'n>(&'n self, path: &str, start: usize, captures: &mut ParamVec) -> Option<&'n Arc<str>> {
        let rest = path.get(start..)?;
        match rest.find('/') {
            // parameters never capture an empty segment
            Some(0) => None,
            None => {
                let variant = self.terminal.as_ref()?;
                captures.push((Arc::clone(&self.name), rest.to_string()));
                Some(variant)
            }
            Some(offset) => {
                let child = self.child.as_ref()?;
                let mark = captures.len();
                captures.push((Arc::clone(&self.name), rest[..offset].to_string()));
                let found = child.find(path, start + offset, captures);
                if found.is_none() {
                    captures.truncate(mark);
                }
                found
            }
        }
    }
}
