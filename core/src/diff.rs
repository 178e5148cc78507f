//! Structural diffing between two model snapshots.
//!
//! Both models are keyed by type name (last write wins on duplicates), each
//! type is turned into a JSON tree with its fields keyed by field name
//! (by position for unnamed or repeated names), and three deep differences
//! are computed between the two keyed trees:
//!
//! - **added**: keys present only in the new tree,
//! - **deleted**: keys present only in the old tree,
//! - **changed**: keys present in both whose leaf values differ.
//!
//! Each difference is then flattened to dotted paths (`Color.props.r.type`).
//! List-valued attributes such as `enumValues` are keyed by index. Paths
//! come out in model order.
//!
//! # Example
//!
//! ```
//! use apidoc_core::*;
//!
//! let old = vec![ObjectType::object("A").with_prop(PropType::new("x", "Number"))];
//! let new = vec![ObjectType::object("A").with_prop(PropType::new("x", "String"))];
//!
//! let diff = diff_models(&old, &new);
//! assert!(diff.added.is_empty());
//! assert!(diff.deleted.is_empty());
//! assert_eq!(diff.changed.len(), 1);
//! assert_eq!(diff.changed[0].path, "A.props.x.type");
//! assert_eq!(diff.changed[0].value, "String");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{ObjectType, PropType};

/// An added or changed leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// Dotted path from the type name to the leaf
    pub path: String,
    /// New leaf value
    pub value: Value,
}

/// A deleted path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEntry {
    pub path: String,
}

/// Flattened difference between two model snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDiff {
    pub added: Vec<DiffEntry>,
    pub deleted: Vec<DeletedEntry>,
    pub changed: Vec<DiffEntry>,
}

impl ModelDiff {
    /// Returns `true` when the two models were structurally identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.changed.is_empty()
    }

    /// Renders the three-section Markdown report.
    ///
    /// ```
    /// use apidoc_core::*;
    ///
    /// let old = vec![ObjectType::object("A")];
    /// let diff = diff_models(&old, &[]);
    /// assert_eq!(diff.to_markdown(), "# Added\n\n# Changed\n\n# Deleted\n* `A`");
    /// ```
    pub fn to_markdown(&self) -> String {
        let added = self
            .added
            .iter()
            .map(|e| format!("* `{}` = `{}`", e.path, display_value(&e.value)))
            .collect::<Vec<_>>()
            .join("\n");
        let changed = self
            .changed
            .iter()
            .map(|e| format!("* `{}` = `{}`", e.path, display_value(&e.value)))
            .collect::<Vec<_>>()
            .join("\n");
        let deleted = self
            .deleted
            .iter()
            .map(|e| format!("* `{}`", e.path))
            .collect::<Vec<_>>()
            .join("\n");

        [
            "# Added".to_string(),
            added,
            "# Changed".to_string(),
            changed,
            "# Deleted".to_string(),
            deleted,
        ]
        .join("\n")
    }
}

/// Computes the keyed structural difference between two models.
pub fn diff_models(old: &[ObjectType], new: &[ObjectType]) -> ModelDiff {
    let old_tree = keyed_tree(old);
    let new_tree = keyed_tree(new);

    let mut added = Vec::new();
    flatten(&added_diff(&old_tree, &new_tree), "", &mut |path: String, value: Option<Value>| {
        if let Some(value) = value {
            added.push(DiffEntry { path, value });
        }
    });

    let mut deleted = Vec::new();
    flatten(&deleted_diff(&old_tree, &new_tree), "", &mut |path: String, _: Option<Value>| {
        deleted.push(DeletedEntry { path });
    });

    let mut changed = Vec::new();
    flatten(&updated_diff(&old_tree, &new_tree), "", &mut |path: String, value: Option<Value>| {
        if let Some(value) = value {
            changed.push(DiffEntry { path, value });
        }
    });

    ModelDiff {
        added,
        deleted,
        changed,
    }
}

/// Intermediate difference tree.
#[derive(Debug)]
enum Tree {
    Branch(Vec<(String, Tree)>),
    Leaf(Value),
    /// Key present on the old side only.
    Absent,
}

impl Tree {
    fn is_empty_branch(&self) -> bool {
        matches!(self, Tree::Branch(children) if children.is_empty())
    }
}

fn keyed_tree(model: &[ObjectType]) -> Value {
    let mut map = Map::new();
    for obj in model {
        map.insert(obj.name.clone(), type_tree(obj));
    }
    Value::Object(map)
}

fn type_tree(obj: &ObjectType) -> Value {
    let props: Map<String, Value> = obj
        .props
        .iter()
        .enumerate()
        .map(|(index, p)| (prop_key(obj, index, p), prop_tree(p)))
        .collect();
    json!({
        "extends": obj.extends,
        "name": obj.name,
        "desc": obj.desc,
        "props": props,
        "enumValues": obj.enum_values,
        "isEnum": obj.is_enum,
    })
}

/// A field is keyed by its name when that name is non-empty and unique
/// within the type, else by its position.
fn prop_key(obj: &ObjectType, index: usize, prop: &PropType) -> String {
    let unique = !prop.name.is_empty()
        && obj.props.iter().filter(|p| p.name == prop.name).count() == 1;
    if unique {
        prop.name.clone()
    } else {
        index.to_string()
    }
}

fn prop_tree(prop: &PropType) -> Value {
    let mut tree = json!({
        "name": prop.name,
        "type": prop.type_tag,
        "desc": prop.desc,
        "default": prop.default,
        "enumValues": prop.enum_values,
        "isEnum": prop.is_enum,
        "optional": prop.optional,
    });
    if let (Some(flag), Value::Object(map)) = (prop.may_be_null, &mut tree) {
        map.insert("mayBeNull".to_string(), Value::Bool(flag));
    }
    tree
}

/// Child entries of a container; arrays are keyed by index.
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

fn lookup<'a>(entries: &[(String, &'a Value)], key: &str) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
}

fn added_diff(lhs: &Value, rhs: &Value) -> Tree {
    let mut out = Vec::new();
    if lhs == rhs {
        return Tree::Branch(out);
    }
    let (Some(left), Some(right)) = (entries(lhs), entries(rhs)) else {
        return Tree::Branch(out);
    };

    for (key, rv) in right {
        match lookup(&left, &key) {
            Some(lv) => {
                let child = added_diff(lv, rv);
                if !child.is_empty_branch() {
                    out.push((key, child));
                }
            }
            None => out.push((key, Tree::Leaf(rv.clone()))),
        }
    }
    Tree::Branch(out)
}

fn deleted_diff(lhs: &Value, rhs: &Value) -> Tree {
    let mut out = Vec::new();
    if lhs == rhs {
        return Tree::Branch(out);
    }
    let (Some(left), Some(right)) = (entries(lhs), entries(rhs)) else {
        return Tree::Branch(out);
    };

    for (key, lv) in left {
        match lookup(&right, &key) {
            Some(rv) => {
                let child = deleted_diff(lv, rv);
                if !child.is_empty_branch() {
                    out.push((key, child));
                }
            }
            None => out.push((key, Tree::Absent)),
        }
    }
    Tree::Branch(out)
}

fn updated_diff(lhs: &Value, rhs: &Value) -> Tree {
    if lhs == rhs {
        return Tree::Branch(Vec::new());
    }
    let (Some(left), Some(right)) = (entries(lhs), entries(rhs)) else {
        return Tree::Leaf(rhs.clone());
    };

    let mut out = Vec::new();
    for (key, rv) in right {
        if let Some(lv) = lookup(&left, &key) {
            let child = updated_diff(lv, rv);
            if !child.is_empty_branch() {
                out.push((key, child));
            }
        }
    }
    Tree::Branch(out)
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn flatten(tree: &Tree, prefix: &str, push: &mut dyn FnMut(String, Option<Value>)) {
    match tree {
        Tree::Branch(children) => {
            for (key, child) in children {
                flatten(child, &join_path(prefix, key), push);
            }
        }
        Tree::Absent => push(prefix.to_string(), None),
        Tree::Leaf(value) => flatten_value(value, prefix, push),
    }
}

fn flatten_value(value: &Value, prefix: &str, push: &mut dyn FnMut(String, Option<Value>)) {
    match value {
        // null and empty containers carry no leaves
        Value::Null => {}
        Value::Object(_) | Value::Array(_) => {
            for (key, child) in entries(value).unwrap_or_default() {
                flatten_value(child, &join_path(prefix, &key), push);
            }
        }
        leaf => push(prefix.to_string(), Some(leaf.clone())),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
