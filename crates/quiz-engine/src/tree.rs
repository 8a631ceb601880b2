//! Nested group tree.
//!
//! Every node is either a branch (group key -> child) or a terminal bucket of
//! siblings. The same shape carries raw assets after grouping and generated
//! questions after assembly, so the serializer mirrors exactly the grouping.

use indexmap::IndexMap;
use quiz_core::entities::{BucketEntry, Question};
use quiz_core::enums::DepthConflictPolicy;

use crate::code_path::CodePath;
use crate::error::{EngineError, display_path};

/// A node of the group tree. Keys keep first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupNode<T> {
    Branch(IndexMap<String, GroupNode<T>>),
    Terminal(Vec<T>),
}

/// Grouped assets, ready for assembly.
pub type AssetTree = GroupNode<BucketEntry>;

/// Generated questions, ready for serialization.
pub type QuestionTree = GroupNode<Question>;

impl<T> GroupNode<T> {
    /// A branch with no children.
    #[must_use]
    pub fn empty() -> Self {
        Self::Branch(IndexMap::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Branch(children) => children.values().all(Self::is_empty),
            Self::Terminal(items) => items.is_empty(),
        }
    }

    /// Walk `path` from this node.
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&Self> {
        let mut node = self;
        for key in path {
            match node {
                Self::Branch(children) => node = children.get(*key)?,
                Self::Terminal(_) => return None,
            }
        }
        Some(node)
    }

    /// The terminal bucket at `path`, if that path ends at a terminal.
    #[must_use]
    pub fn bucket(&self, path: &[&str]) -> Option<&[T]> {
        match self.get(path)? {
            Self::Terminal(items) => Some(items),
            Self::Branch(_) => None,
        }
    }

    /// Child keys of the branch at `path`, in insertion order.
    #[must_use]
    pub fn keys(&self, path: &[&str]) -> Option<Vec<&str>> {
        match self.get(path)? {
            Self::Branch(children) => Some(children.keys().map(String::as_str).collect()),
            Self::Terminal(_) => None,
        }
    }

    /// Every terminal with its key path, depth-first in insertion order.
    #[must_use]
    pub fn terminals(&self) -> Vec<(Vec<String>, &[T])> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect_terminals(&mut path, &mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, path: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a [T])>) {
        match self {
            Self::Terminal(items) => out.push((path.clone(), items.as_slice())),
            Self::Branch(children) => {
                for (key, child) in children {
                    path.push(key.clone());
                    child.collect_terminals(path, out);
                    path.pop();
                }
            }
        }
    }

    /// Visit each terminal mutably, depth-first.
    pub fn for_each_terminal_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&[String], &mut Vec<T>),
    {
        let mut path = Vec::new();
        self.visit_terminals_mut(&mut path, f);
    }

    fn visit_terminals_mut<F>(&mut self, path: &mut Vec<String>, f: &mut F)
    where
        F: FnMut(&[String], &mut Vec<T>),
    {
        match self {
            Self::Terminal(items) => f(path, items),
            Self::Branch(children) => {
                for (key, child) in children.iter_mut() {
                    path.push(key.clone());
                    child.visit_terminals_mut(path, f);
                    path.pop();
                }
            }
        }
    }

    /// Rebuild the tree bucket by bucket. `f` sees the key path and the whole
    /// sibling bucket, and returns the replacement bucket.
    ///
    /// # Errors
    ///
    /// Stops at the first error returned by `f`.
    pub fn try_map<U, E, F>(&self, f: &mut F) -> Result<GroupNode<U>, E>
    where
        F: FnMut(&[String], &[T]) -> Result<Vec<U>, E>,
    {
        let mut path = Vec::new();
        self.try_map_at(&mut path, f)
    }

    fn try_map_at<U, E, F>(&self, path: &mut Vec<String>, f: &mut F) -> Result<GroupNode<U>, E>
    where
        F: FnMut(&[String], &[T]) -> Result<Vec<U>, E>,
    {
        match self {
            Self::Terminal(items) => Ok(GroupNode::Terminal(f(path, items)?)),
            Self::Branch(children) => {
                let mut mapped = IndexMap::with_capacity(children.len());
                for (key, child) in children {
                    path.push(key.clone());
                    let node = child.try_map_at(path, f)?;
                    path.pop();
                    mapped.insert(key.clone(), node);
                }
                Ok(GroupNode::Branch(mapped))
            }
        }
    }

    /// Total items across all terminals.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Terminal(items) => items.len(),
            Self::Branch(children) => children.values().map(Self::item_count).sum(),
        }
    }

    #[must_use]
    pub fn terminal_count(&self) -> usize {
        match self {
            Self::Terminal(_) => 1,
            Self::Branch(children) => children.values().map(Self::terminal_count).sum(),
        }
    }
}

impl<T> Default for GroupNode<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

/// Builds an [`AssetTree`] from parsed code paths.
#[derive(Debug)]
pub struct TreeBuilder {
    root: AssetTree,
    policy: DepthConflictPolicy,
    default_subgroup: String,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(policy: DepthConflictPolicy, default_subgroup: impl Into<String>) -> Self {
        Self {
            root: GroupNode::empty(),
            policy,
            default_subgroup: default_subgroup.into(),
        }
    }

    /// Append `entry` to the bucket named by `path`'s groups. The entry name
    /// is replaced by the path's leaf.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DepthConflict`] when the path would turn an
    /// existing terminal into a branch (or the reverse) and the policy is
    /// [`DepthConflictPolicy::Reject`], and [`EngineError::UnsafeGroupKey`]
    /// when a group key cannot be used as a folder name.
    pub fn insert(&mut self, path: &CodePath, mut entry: BucketEntry) -> Result<(), EngineError> {
        entry.name = path.leaf().to_string();
        entry.group_code = path.groups().last().map(|token| token.code.clone());
        let label = entry
            .file()
            .map_or_else(|| entry.name.clone(), |file| file.file_name.clone());
        if let Some(key) = path.group_names().into_iter().find(|key| !is_safe_key(key)) {
            return Err(EngineError::UnsafeGroupKey { key, file: label });
        }
        let policy = self.policy;
        let default_subgroup = self.default_subgroup.as_str();

        let mut walked: Vec<String> = Vec::with_capacity(path.depth());
        let mut node = &mut self.root;
        for key in path.group_names() {
            let children = split_terminal(node, policy, default_subgroup, &walked, &label)?;
            walked.push(key.clone());
            node = children.entry(key).or_insert_with(GroupNode::empty);
        }

        if matches!(node, GroupNode::Branch(children) if children.is_empty()) {
            *node = GroupNode::Terminal(Vec::new());
        }
        match node {
            GroupNode::Terminal(items) => items.push(entry),
            GroupNode::Branch(children) => {
                if policy == DepthConflictPolicy::Reject {
                    return Err(conflict(&walked, &label));
                }
                tracing::debug!(
                    path = %display_path(&walked),
                    file = %label,
                    subgroup = default_subgroup,
                    "shallower asset moved into default subgroup"
                );
                match children
                    .entry(default_subgroup.to_string())
                    .or_insert_with(|| GroupNode::Terminal(Vec::new()))
                {
                    GroupNode::Terminal(items) => items.push(entry),
                    GroupNode::Branch(_) => {
                        walked.push(default_subgroup.to_string());
                        return Err(conflict(&walked, &label));
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn finish(self) -> AssetTree {
        self.root
    }
}

/// Make `node` a branch and return its children, resolving a terminal in the
/// way according to `policy`.
fn split_terminal<'a>(
    node: &'a mut AssetTree,
    policy: DepthConflictPolicy,
    default_subgroup: &str,
    walked: &[String],
    label: &str,
) -> Result<&'a mut IndexMap<String, AssetTree>, EngineError> {
    if let GroupNode::Terminal(items) = node {
        if policy == DepthConflictPolicy::Reject {
            return Err(conflict(walked, label));
        }
        tracing::debug!(
            path = %display_path(walked),
            file = %label,
            subgroup = default_subgroup,
            "existing bucket moved into default subgroup"
        );
        let moved = std::mem::take(items);
        let mut children = IndexMap::new();
        children.insert(default_subgroup.to_string(), GroupNode::Terminal(moved));
        *node = GroupNode::Branch(children);
    }
    match node {
        GroupNode::Branch(children) => Ok(children),
        GroupNode::Terminal(_) => Err(conflict(walked, label)),
    }
}

/// Group keys become folder names below the output roots.
fn is_safe_key(key: &str) -> bool {
    !matches!(key, "" | "." | "..") && !key.contains(['/', '\\'])
}

fn conflict(walked: &[String], label: &str) -> EngineError {
    EngineError::DepthConflict {
        path: display_path(walked),
        file: label.to_string(),
    }
}
