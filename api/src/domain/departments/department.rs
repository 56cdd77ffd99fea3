use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flat department record as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub parent_id: Option<i64>,
}

/// Department hierarchy node. Leaves carry no `children` key at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentNode {
    pub id: i64,
    pub name: String,
    pub level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DepartmentNode>>,
}

impl DepartmentNode {
    pub fn leaf(id: i64, name: impl Into<String>, level: i32) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            children: None,
        }
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(DepartmentNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Assembles flat rows into a forest ordered by id.
///
/// Rows without a parent, with an unknown parent or pointing at themselves
/// become roots. Rows only reachable through a cycle are dropped.
pub fn build_tree(rows: Vec<DepartmentRow>) -> Vec<DepartmentNode> {
    let ids: HashSet<i64> = rows.iter().map(|r| r.id).collect();
    let mut children_of: HashMap<i64, Vec<DepartmentRow>> = HashMap::new();
    let mut roots: Vec<DepartmentRow> = Vec::new();

    for row in rows {
        match row.parent_id {
            Some(pid) if pid != row.id && ids.contains(&pid) => {
                children_of.entry(pid).or_default().push(row)
            }
            _ => roots.push(row),
        }
    }

    roots.sort_by_key(|r| r.id);
    let mut visited = HashSet::new();
    roots
        .into_iter()
        .map(|r| attach(r, &mut children_of, &mut visited))
        .collect()
}

fn attach(
    row: DepartmentRow,
    children_of: &mut HashMap<i64, Vec<DepartmentRow>>,
    visited: &mut HashSet<i64>,
) -> DepartmentNode {
    visited.insert(row.id);
    let mut kids = children_of.remove(&row.id).unwrap_or_default();
    kids.sort_by_key(|r| r.id);
    let mut children = Vec::with_capacity(kids.len());
    for kid in kids {
        if !visited.contains(&kid.id) {
            children.push(attach(kid, children_of, visited));
        }
    }
    DepartmentNode {
        id: row.id,
        name: row.name,
        level: row.level,
        children: if children.is_empty() {
            None
        } else {
            Some(children)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, level: i32, parent_id: Option<i64>) -> DepartmentRow {
        DepartmentRow {
            id,
            name: name.to_string(),
            level,
            parent_id,
        }
    }

    #[test]
    fn builds_nested_tree_ordered_by_id() {
        let tree = build_tree(vec![
            row(4, "Backend", 2, Some(2)),
            row(2, "Engineering", 1, Some(1)),
            row(1, "HQ", 0, None),
            row(3, "Sales", 1, Some(1)),
        ]);
        assert_eq!(tree.len(), 1);
        let hq = &tree[0];
        assert_eq!(hq.name, "HQ");
        let kids = hq.children.as_ref().unwrap();
        assert_eq!(kids.iter().map(|k| k.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(kids[0].children.as_ref().unwrap()[0].name, "Backend");
        assert!(kids[1].children.is_none());
        assert_eq!(hq.depth(), 3);
    }

    #[test]
    fn orphans_and_self_parents_become_roots() {
        let tree = build_tree(vec![row(5, "Lost", 3, Some(99)), row(6, "Loop", 0, Some(6))]);
        assert_eq!(tree.iter().map(|n| n.id).collect::<Vec<_>>(), vec![5, 6]);
    }

    #[test]
    fn rows_only_reachable_through_a_cycle_are_dropped() {
        let tree = build_tree(vec![
            row(1, "HQ", 0, None),
            row(7, "Ping", 1, Some(8)),
            row(8, "Pong", 1, Some(7)),
        ]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, 1);
        assert!(tree[0].children.is_none());
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_tree(Vec::new()).is_empty());
    }

    #[test]
    fn leaf_serializes_without_children_key() {
        let json = serde_json::to_value(DepartmentNode::leaf(1, "HQ", 0)).unwrap();
        assert!(json.get("children").is_none());
    }

    #[test]
    fn json_round_trip_preserves_structure_at_any_depth() {
        let mut node = DepartmentNode::leaf(0, "n0", 0);
        for depth in 1..=6 {
            let encoded = serde_json::to_string(&node).unwrap();
            let decoded: DepartmentNode = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, node);
            assert_eq!(decoded.depth(), depth);
            node = DepartmentNode {
                id: depth as i64,
                name: format!("n{depth}"),
                level: 0,
                children: Some(vec![node, DepartmentNode::leaf(100 + depth as i64, "leaf", 1)]),
            };
        }
    }
}
