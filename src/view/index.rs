//! Path-prefix index over a structured view.
//!
//! Annotation resolves every error path against a [`ViewIndex`] built once
//! per clone instead of walking the tree for each error. Array positions
//! are keyed by their canonical decimal form (`"0"`, `"1"`, …).

use indexmap::IndexMap;

use super::tree::{NodeId, NodeKind, ViewTree};

/// Maps each data path to the view node that displays its value.
#[derive(Debug, Clone, Default)]
pub struct ViewIndex {
    entries: IndexMap<Vec<String>, NodeId>,
}

impl ViewIndex {
    /// Indexes every value node of `tree`. The top-level value is stored
    /// under the empty path.
    #[must_use]
    pub fn build(tree: &ViewTree) -> Self {
        let mut index = Self::default();
        if let Some(root) = tree.document_value() {
            index.visit(tree, root, Vec::new());
        }
        index
    }

    /// Node displaying the value at `path`.
    #[must_use]
    pub fn get(&self, path: &[String]) -> Option<NodeId> {
        self.entries.get(path).copied()
    }

    /// Number of indexed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the view has no value at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn visit(&mut self, tree: &ViewTree, id: NodeId, path: Vec<String>) {
        if tree.is_array_container(id) {
            for (position, element) in tree.value_children(id).enumerate() {
                let mut child_path = path.clone();
                child_path.push(position.to_string());
                self.visit(tree, element, child_path);
            }
        } else if tree.is_object_container(id) {
            let mut pending_key = None;
            for member in tree.value_children(id) {
                match tree.kind(member) {
                    Some(NodeKind::Key(name)) => pending_key = Some(name.clone()),
                    _ => {
                        if let Some(name) = pending_key.take() {
                            let mut child_path = path.clone();
                            child_path.push(name);
                            self.visit(tree, member, child_path);
                        }
                    }
                }
            }
        }
        self.entries.insert(path, id);
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::json;

    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| (*s).to_owned()).collect()
    }

    #[rstest]
    fn indexes_every_value_path() {
        let tree = ViewTree::from_json(&json!({"a": [1, {"b": true}], "c": "x"}));
        let index = ViewIndex::build(&tree);

        assert_eq!(index.len(), 6);
        assert_eq!(index.get(&[]), tree.document_value());
        for expected in [
            path(&["a"]),
            path(&["a", "0"]),
            path(&["a", "1"]),
            path(&["a", "1", "b"]),
            path(&["c"]),
        ] {
            assert!(index.get(&expected).is_some(), "missing {expected:?}");
        }
        assert!(index.get(&path(&["a", "2"])).is_none());
    }

    #[rstest]
    fn indexed_nodes_match_tree_lookups() {
        let tree = ViewTree::from_json(&json!({"user": {"age": 3}}));
        let index = ViewIndex::build(&tree);

        let direct = tree
            .document_value()
            .and_then(|root| tree.object_value(root, "user"))
            .and_then(|user| tree.object_value(user, "age"));
        assert_eq!(index.get(&path(&["user", "age"])), direct);
    }

    #[rstest]
    fn scalar_document_is_indexed_at_root() {
        let tree = ViewTree::from_json(&json!(42));
        let index = ViewIndex::build(&tree);
        assert_eq!(index.len(), 1);
        assert!(index.get(&[]).is_some_and(|id| tree.is_leaf(id)));
    }
}
