//! Form state of the "create group" dialog.

use super::{GroupId, GroupStore, InsertPosition, Placement};
use serde::{Deserialize, Serialize};

/// Whether the new group sits at the top level or under a parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Parent,
    #[default]
    Child,
}

/// A group the new one can be nested under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentOption {
    pub id: GroupId,
    pub name: String,
    pub level: usize,
    /// Name indented with one `"— "` per nesting level.
    pub label: String,
}

/// A group the new one can be placed before or after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOption {
    pub id: GroupId,
    pub name: String,
}

/// The dialog as the host renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogView {
    pub open: bool,
    pub name: String,
    pub kind: GroupKind,
    pub parent_id: Option<GroupId>,
    pub position: Option<InsertPosition>,
    pub relative_to: Option<GroupId>,
    pub parent_options: Vec<ParentOption>,
    pub positioning_options: Vec<PositionOption>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupDialog {
    open: bool,
    pub name: String,
    pub kind: GroupKind,
    pub parent_id: Option<GroupId>,
    pub position: Option<InsertPosition>,
    pub relative_to: Option<GroupId>,
}

impl GroupDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the dialog and reset the form.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Switching to a top-level group drops the chosen parent.
    pub fn set_kind(&mut self, kind: GroupKind) {
        self.kind = kind;
        if kind == GroupKind::Parent {
            self.parent_id = None;
        }
    }

    /// Every group, with its depth, as a possible parent.
    pub fn parent_options(&self, store: &GroupStore) -> Vec<ParentOption> {
        store
            .groups()
            .iter()
            .map(|group| {
                let level = store.nesting_level(group.id());
                ParentOption {
                    id: group.id(),
                    name: group.name().to_string(),
                    level,
                    label: format!("{}{}", "— ".repeat(level), group.name()),
                }
            })
            .collect()
    }

    /// Groups the new one may be positioned against: top-level groups for a
    /// parent group, siblings under the chosen parent for a child group.
    pub fn positioning_options(&self, store: &GroupStore) -> Vec<PositionOption> {
        let option = |group: &super::Group| PositionOption {
            id: group.id(),
            name: group.name().to_string(),
        };
        match (self.kind, self.parent_id) {
            (GroupKind::Parent, _) => store.parent_groups().map(option).collect(),
            (GroupKind::Child, Some(parent)) => store.child_groups(parent).map(option).collect(),
            (GroupKind::Child, None) => Vec::new(),
        }
    }

    fn placement(&self) -> Option<Placement> {
        Some(Placement {
            position: self.position?,
            relative_to: self.relative_to?,
        })
    }

    /// Create the group described by the form.
    ///
    /// A name that is blank once trimmed is refused and the form stays as
    /// it is. On success the dialog closes.
    pub fn submit(&mut self, store: &mut GroupStore) -> Option<GroupId> {
        if self.name.trim().is_empty() {
            log::debug!("group dialog: blank name");
            return None;
        }
        let parent_id = match self.kind {
            GroupKind::Parent => None,
            GroupKind::Child => self.parent_id,
        };
        let id = store.create_group(self.name.clone(), parent_id, self.placement())?;
        self.close();
        Some(id)
    }

    pub fn view(&self, store: &GroupStore) -> DialogView {
        DialogView {
            open: self.open,
            name: self.name.clone(),
            kind: self.kind,
            parent_id: self.parent_id,
            position: self.position,
            relative_to: self.relative_to,
            parent_options: self.parent_options(store),
            positioning_options: self.positioning_options(store),
        }
    }
}
