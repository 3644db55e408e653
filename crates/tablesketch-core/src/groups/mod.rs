//! Group store: the shared header list and a flat list of groups.
//!
//! Groups form a tree through their optional parent reference. The list is
//! kept flat because its order decides where groups appear; the tree itself
//! is built on demand by [`GroupStore::hierarchy`].
//!
//! Every operation is a silent no-op when its arguments do not make sense.
//! The return value says whether anything changed.

pub mod dialog;
pub mod hierarchy;
pub mod reorder;

use crate::config::TableConfig;
use reorder::{RowMove, move_row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for groups.
pub type GroupId = Uuid;

/// Where a new group goes relative to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
}

/// Requested position of a new group in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: InsertPosition,
    pub relative_to: GroupId,
}

/// A named group of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    parent_id: Option<GroupId>,
    rows: Vec<Vec<String>>,
}

impl Group {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<GroupId> {
        self.parent_id
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Top-level groups have no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Headers plus every group of the table.
#[derive(Debug, Clone)]
pub struct GroupStore {
    headers: Vec<String>,
    groups: Vec<Group>,
    config: TableConfig,
}

impl GroupStore {
    /// Create a store with the given headers and no groups.
    pub fn new(headers: Vec<String>, config: TableConfig) -> Self {
        Self {
            headers,
            groups: Vec::new(),
            config,
        }
    }

    /// Create a store holding the initial table described by `config`.
    pub fn seeded(config: TableConfig) -> Self {
        let width = config.initial_headers.len();
        let rows = config
            .initial_rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(width, String::new());
                row
            })
            .collect();
        let group = Group {
            id: Uuid::new_v4(),
            name: config.initial_group_name.clone(),
            parent_id: None,
            rows,
        };
        Self {
            headers: config.initial_headers.clone(),
            groups: vec![group],
            config,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All groups in list order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    fn index_of(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    fn blank_row(&self) -> Vec<String> {
        vec![String::new(); self.headers.len()]
    }

    /// Groups without a parent, in list order.
    pub fn parent_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.parent_id.is_none())
    }

    /// Direct children of `parent`, in list order.
    pub fn child_groups(&self, parent: GroupId) -> impl Iterator<Item = &Group> {
        self.groups
            .iter()
            .filter(move |g| g.parent_id == Some(parent))
    }

    /// Depth of a group: 0 for top-level, one more per ancestor.
    pub fn nesting_level(&self, id: GroupId) -> usize {
        let mut level = 0;
        let mut current = self.group(id).and_then(|g| g.parent_id);
        while let Some(parent) = current {
            if level >= self.groups.len() {
                break;
            }
            level += 1;
            current = self.group(parent).and_then(|g| g.parent_id);
        }
        level
    }

    /// Every group below `id`, nearest first.
    pub fn descendants(&self, id: GroupId) -> Vec<GroupId> {
        let mut found = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut frontier = vec![id];
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for parent in frontier {
                for child in self.child_groups(parent) {
                    if seen.insert(child.id) {
                        next.push(child.id);
                    }
                }
            }
            found.extend(&next);
            frontier = next;
        }
        found
    }

    /// Create a group.
    ///
    /// Child groups start with one blank row, top-level groups with none.
    /// A placement relative to an unknown group falls back to appending.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<GroupId>,
        placement: Option<Placement>,
    ) -> Option<GroupId> {
        if let Some(parent) = parent_id {
            if self.group(parent).is_none() {
                log::debug!("create_group: unknown parent {parent}");
                return None;
            }
        }

        let rows = if parent_id.is_some() {
            vec![self.blank_row()]
        } else {
            Vec::new()
        };
        let group = Group {
            id: Uuid::new_v4(),
            name: name.into(),
            parent_id,
            rows,
        };
        let id = group.id;

        let index = placement.and_then(|p| {
            self.index_of(p.relative_to).map(|i| match p.position {
                InsertPosition::Before => i,
                InsertPosition::After => i + 1,
            })
        });
        log::info!("created group {:?} ({id})", group.name);
        match index {
            Some(index) => self.groups.insert(index, group),
            None => self.groups.push(group),
        }
        Some(id)
    }

    /// Append a numbered subgroup under `parent`.
    pub fn add_child_group(&mut self, parent: GroupId) -> Option<GroupId> {
        if self.group(parent).is_none() {
            log::debug!("add_child_group: unknown parent {parent}");
            return None;
        }
        let n = self.child_groups(parent).count();
        let group = Group {
            id: Uuid::new_v4(),
            name: format!("{} {}", self.config.subgroup_name_prefix, n + 1),
            parent_id: Some(parent),
            rows: vec![self.blank_row()],
        };
        let id = group.id;
        log::info!("created group {:?} ({id})", group.name);
        self.groups.push(group);
        Some(id)
    }

    /// Remove a group together with everything below it.
    ///
    /// The only top-level group cannot go while it has children, and a child
    /// cannot go while it is the last one under its parent.
    pub fn remove_group(&mut self, id: GroupId) -> bool {
        let Some(group) = self.group(id) else {
            log::debug!("remove_group: unknown group {id}");
            return false;
        };

        match group.parent_id {
            None => {
                let has_children = self.child_groups(id).next().is_some();
                if has_children && self.parent_groups().count() <= 1 {
                    log::debug!("remove_group: {id} is the only top-level group");
                    return false;
                }
            }
            Some(parent) => {
                if self.child_groups(parent).count() <= 1 {
                    log::debug!("remove_group: {id} is the last child of {parent}");
                    return false;
                }
            }
        }

        let mut doomed: HashSet<GroupId> = self.descendants(id).into_iter().collect();
        doomed.insert(id);
        self.groups.retain(|g| !doomed.contains(&g.id));
        log::info!("removed group {id} and {} descendants", doomed.len() - 1);
        true
    }

    /// Append a header and an empty cell to every row.
    pub fn add_header(&mut self) {
        self.headers.push(self.config.default_header_label.clone());
        for row in self.groups.iter_mut().flat_map(|g| g.rows.iter_mut()) {
            row.push(String::new());
        }
    }

    /// Remove a header and its cell from every row. The last header stays.
    pub fn remove_header(&mut self, index: usize) -> bool {
        if self.headers.len() <= 1 || index >= self.headers.len() {
            log::debug!("remove_header: refused index {index}");
            return false;
        }
        self.headers.remove(index);
        for row in self.groups.iter_mut().flat_map(|g| g.rows.iter_mut()) {
            if index < row.len() {
                row.remove(index);
            }
        }
        true
    }

    /// Append a blank row to a group.
    pub fn add_row(&mut self, group_id: GroupId) -> bool {
        let row = self.blank_row();
        match self.group_mut(group_id) {
            Some(group) => {
                group.rows.push(row);
                true
            }
            None => false,
        }
    }

    /// Remove a row. A group's last row stays.
    pub fn remove_row(&mut self, group_id: GroupId, row_index: usize) -> bool {
        let Some(group) = self.group_mut(group_id) else {
            return false;
        };
        if group.rows.len() <= 1 || row_index >= group.rows.len() {
            log::debug!("remove_row: refused row {row_index} of {group_id}");
            return false;
        }
        group.rows.remove(row_index);
        true
    }

    /// Replace all rows of a group. Every row must match the header count.
    pub fn update_rows(&mut self, group_id: GroupId, rows: Vec<Vec<String>>) -> bool {
        let width = self.headers.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            log::debug!(
                "update_rows: row has {} cells, expected {width}",
                bad.len()
            );
            return false;
        }
        match self.group_mut(group_id) {
            Some(group) => {
                group.rows = rows;
                true
            }
            None => false,
        }
    }

    /// Write one cell.
    pub fn update_cell(
        &mut self,
        group_id: GroupId,
        row: usize,
        column: usize,
        value: impl Into<String>,
    ) -> bool {
        let cell = self
            .group_mut(group_id)
            .and_then(|g| g.rows.get_mut(row))
            .and_then(|r| r.get_mut(column));
        match cell {
            Some(cell) => {
                *cell = value.into();
                true
            }
            None => false,
        }
    }

    /// Move the row at `from` so it ends up at `to`, within one group.
    pub fn reorder_row(&mut self, group_id: GroupId, from: usize, to: usize) -> bool {
        let Some(group) = self.group_mut(group_id) else {
            return false;
        };
        if from == to || from >= group.rows.len() || to >= group.rows.len() {
            return false;
        }
        group.rows = move_row(&group.rows, from, to);
        true
    }

    /// Apply a move produced by a row drag.
    pub fn apply_row_move(&mut self, row_move: &RowMove) -> bool {
        self.reorder_row(row_move.group_id, row_move.from, row_move.to)
    }
}
