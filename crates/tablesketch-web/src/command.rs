//! The JSON command protocol spoken by the browser host.
//!
//! Every command is an object whose `action` field names the operation,
//! e.g. `{"action": "add_row", "group_id": "…"}`.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use tablesketch_core::{
    ColorTarget, EditorSnapshot, GroupId, GroupKind, InsertPosition, KeyEvent, MenuAction,
    MenuEntry, Placement, PointerEvent, RowHover, ShapeId, ShapeKind, ToolKind,
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    // Group table
    CreateGroup {
        name: String,
        #[serde(default)]
        parent_id: Option<GroupId>,
        #[serde(default)]
        placement: Option<Placement>,
    },
    AddChildGroup {
        parent_id: GroupId,
    },
    RemoveGroup {
        group_id: GroupId,
    },
    AddHeader,
    RemoveHeader {
        index: usize,
    },
    AddRow {
        group_id: GroupId,
    },
    RemoveRow {
        group_id: GroupId,
        row_index: usize,
    },
    UpdateRows {
        group_id: GroupId,
        rows: Vec<Vec<String>>,
    },
    UpdateCell {
        group_id: GroupId,
        row: usize,
        column: usize,
        value: String,
    },
    ReorderRow {
        group_id: GroupId,
        from: usize,
        to: usize,
    },

    // Row drag
    BeginRowDrag {
        group_id: GroupId,
        index: usize,
    },
    HoverRow(RowHover),
    EndRowDrag,

    // Create-group dialog
    OpenDialog,
    CloseDialog,
    SetDialogName {
        name: String,
    },
    SetDialogKind {
        kind: GroupKind,
    },
    SetDialogParent {
        #[serde(default)]
        parent_id: Option<GroupId>,
    },
    SetDialogPosition {
        #[serde(default)]
        position: Option<InsertPosition>,
        #[serde(default)]
        relative_to: Option<GroupId>,
    },
    SubmitDialog,

    // Canvas
    SetTool {
        tool: ToolKind,
    },
    Pointer {
        event: PointerEvent,
    },
    Key {
        event: KeyEvent,
    },
    CancelGesture,
    SelectShape {
        shape_id: ShapeId,
    },
    ClearSelection,
    SubmitLabel {
        text: String,
    },
    CancelLabel,
    DeleteSelected,
    Copy {
        shape_id: ShapeId,
    },
    Duplicate {
        shape_id: ShapeId,
    },
    Paste {
        at: Point,
    },
    BringToFront {
        shape_id: ShapeId,
    },
    SendToBack {
        shape_id: ShapeId,
    },
    /// `color` is a color picker value such as `#ff8800`.
    SetColor {
        target: ColorTarget,
        color: String,
    },
    AddShape {
        kind: ShapeKind,
        at: Point,
    },
    RequestClear,
    ResolveConfirmation {
        accepted: bool,
    },
    ContextMenu {
        at: Point,
    },
    Menu {
        menu_action: MenuAction,
    },
    Snapshot,
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the command changed any state.
    pub changed: bool,
    /// ID of the group or shape the command created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Entries of a requested context menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<MenuEntry>>,
    pub snapshot: EditorSnapshot,
}
