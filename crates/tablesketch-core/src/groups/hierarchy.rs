//! Tree view of the flat group list.

use super::{GroupId, GroupStore};
use serde::{Deserialize, Serialize};

/// How a group is laid out in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLayout {
    /// Has subgroups; drawn as a labelled frame around them.
    Container,
    /// Leaf with rows; drawn as a table.
    Table,
    /// Leaf without rows; offers to add a subgroup.
    Empty,
}

/// One group with its subgroups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    pub id: GroupId,
    pub name: String,
    pub level: usize,
    pub layout: GroupLayout,
    /// Only the first top-level group carries the header row.
    pub show_headers: bool,
    pub children: Vec<GroupNode>,
}

impl GroupStore {
    /// Arrange the groups as a tree, keeping list order among siblings.
    pub fn hierarchy(&self) -> Vec<GroupNode> {
        self.nodes_under(None, 0)
    }

    fn nodes_under(&self, parent: Option<GroupId>, level: usize) -> Vec<GroupNode> {
        // Deeper than the group count means the parent chain loops.
        if level > self.groups.len() {
            return Vec::new();
        }
        self.groups
            .iter()
            .filter(|g| g.parent_id == parent)
            .enumerate()
            .map(|(index, group)| {
                let children = self.nodes_under(Some(group.id), level + 1);
                let layout = if !children.is_empty() {
                    GroupLayout::Container
                } else if !group.rows.is_empty() {
                    GroupLayout::Table
                } else {
                    GroupLayout::Empty
                };
                GroupNode {
                    id: group.id,
                    name: group.name.clone(),
                    level,
                    layout,
                    show_headers: level == 0 && index == 0,
                    children,
                }
            })
            .collect()
    }
}
