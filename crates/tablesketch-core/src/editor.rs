//! One editing session: the group table, the canvas overlay and the
//! revision counter the host uses to skip redundant renders.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::groups::dialog::{GroupDialog, GroupKind};
use crate::groups::reorder::{RowDrag, RowHover, RowMove};
use crate::groups::{GroupId, GroupStore, InsertPosition, Placement};
use crate::input::{KeyEvent, PointerEvent};
use crate::menu::{MenuAction, MenuEntry};
use crate::shapes::{ColorTarget, SerializableColor, ShapeId, ShapeKind};
use crate::snapshot::{EditorSnapshot, RowDragView, TableSnapshot};
use crate::tools::ToolKind;
use kurbo::Point;
use std::cmp::Ordering;

/// Results that tell whether an operation changed anything.
trait Changed {
    fn changed(&self) -> bool;
}

impl Changed for bool {
    fn changed(&self) -> bool {
        *self
    }
}

impl<T> Changed for Option<T> {
    fn changed(&self) -> bool {
        self.is_some()
    }
}

impl Changed for () {
    fn changed(&self) -> bool {
        true
    }
}

/// The editor state owned by one host view.
#[derive(Debug, Clone)]
pub struct Editor {
    table: GroupStore,
    canvas: Canvas,
    dialog: GroupDialog,
    row_drag: Option<RowDrag>,
    revision: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Start a session with the seeded table and an empty canvas.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            table: GroupStore::seeded(config.table),
            canvas: Canvas::new(config.canvas),
            dialog: GroupDialog::new(),
            row_drag: None,
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn table(&self) -> &GroupStore {
        &self.table
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn dialog(&self) -> &GroupDialog {
        &self.dialog
    }

    pub fn row_drag(&self) -> Option<RowDrag> {
        self.row_drag
    }

    fn track<T: Changed>(&mut self, result: T) -> T {
        if result.changed() {
            self.revision += 1;
        }
        result
    }

    // Group table

    pub fn create_group(
        &mut self,
        name: &str,
        parent_id: Option<GroupId>,
        placement: Option<Placement>,
    ) -> Option<GroupId> {
        let result = self.table.create_group(name, parent_id, placement);
        self.track(result)
    }

    pub fn add_child_group(&mut self, parent: GroupId) -> Option<GroupId> {
        let result = self.table.add_child_group(parent);
        self.track(result)
    }

    pub fn remove_group(&mut self, id: GroupId) -> bool {
        let result = self.table.remove_group(id);
        if result && self.row_drag.is_some_and(|d| self.table.group(d.group_id).is_none()) {
            self.row_drag = None;
        }
        self.track(result)
    }

    pub fn add_header(&mut self) {
        self.table.add_header();
        self.track(())
    }

    pub fn remove_header(&mut self, index: usize) -> bool {
        let result = self.table.remove_header(index);
        self.track(result)
    }

    pub fn add_row(&mut self, group_id: GroupId) -> bool {
        let result = self.table.add_row(group_id);
        self.track(result)
    }

    pub fn remove_row(&mut self, group_id: GroupId, row_index: usize) -> bool {
        let result = self.table.remove_row(group_id, row_index);
        if let Some(drag) = self.row_drag.filter(|d| result && d.group_id == group_id) {
            // The dragged row is gone, or shifted up by one.
            self.row_drag = match drag.index.cmp(&row_index) {
                Ordering::Equal => None,
                Ordering::Greater => Some(RowDrag::new(group_id, drag.index - 1)),
                Ordering::Less => Some(drag),
            };
        }
        self.track(result)
    }

    pub fn update_rows(&mut self, group_id: GroupId, rows: Vec<Vec<String>>) -> bool {
        let result = self.table.update_rows(group_id, rows);
        self.track(result)
    }

    pub fn update_cell(&mut self, group_id: GroupId, row: usize, column: usize, value: &str) -> bool {
        let result = self.table.update_cell(group_id, row, column, value);
        self.track(result)
    }

    pub fn reorder_row(&mut self, group_id: GroupId, from: usize, to: usize) -> bool {
        let result = self.table.reorder_row(group_id, from, to);
        self.track(result)
    }

    // Row drag

    /// Start dragging a row. The group and row must exist.
    pub fn begin_row_drag(&mut self, group_id: GroupId, index: usize) -> bool {
        let exists = self
            .table
            .group(group_id)
            .is_some_and(|g| index < g.rows().len());
        if exists {
            self.row_drag = Some(RowDrag::new(group_id, index));
        }
        self.track(exists)
    }

    /// Feed a hover event to the current drag and apply the resulting move.
    /// Hovers over rows the group does not have are ignored.
    pub fn hover_row(&mut self, hover: &RowHover) -> Option<RowMove> {
        let drag = self.row_drag?;
        let len = self.table.group(drag.group_id)?.rows().len();
        if drag.index >= len {
            log::debug!("row drag lost its row, ending it");
            self.row_drag = None;
            self.track(());
            return None;
        }
        if hover.index >= len {
            log::debug!("hover over missing row {}", hover.index);
            return None;
        }

        let row_move = drag.hover(hover)?;
        let applied = self.table.apply_row_move(&row_move).then_some(row_move);
        if let (Some(row_move), Some(drag)) = (&applied, self.row_drag.as_mut()) {
            drag.follow(row_move);
        }
        self.track(applied)
    }

    pub fn end_row_drag(&mut self) -> bool {
        let result = self.row_drag.take().is_some();
        self.track(result)
    }

    // Create-group dialog

    pub fn open_dialog(&mut self) {
        self.dialog.open();
        self.track(())
    }

    pub fn close_dialog(&mut self) {
        self.dialog.close();
        self.track(())
    }

    pub fn set_dialog_name(&mut self, name: &str) {
        self.dialog.name = name.to_string();
        self.track(())
    }

    pub fn set_dialog_kind(&mut self, kind: GroupKind) {
        self.dialog.set_kind(kind);
        self.track(())
    }

    pub fn set_dialog_parent(&mut self, parent_id: Option<GroupId>) {
        self.dialog.parent_id = parent_id;
        self.track(())
    }

    pub fn set_dialog_position(
        &mut self,
        position: Option<InsertPosition>,
        relative_to: Option<GroupId>,
    ) {
        self.dialog.position = position;
        self.dialog.relative_to = relative_to;
        self.track(())
    }

    pub fn submit_dialog(&mut self) -> Option<GroupId> {
        let result = self.dialog.submit(&mut self.table);
        self.track(result)
    }

    // Canvas

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.canvas.set_tool(tool);
        self.track(())
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let result = self.canvas.handle_pointer(event);
        self.track(result)
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let result = self.canvas.handle_key(event);
        self.track(result)
    }

    pub fn cancel_gesture(&mut self) -> bool {
        let result = self.canvas.cancel_gesture();
        self.track(result)
    }

    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        let result = self.canvas.select(id);
        self.track(result)
    }

    pub fn clear_selection(&mut self) -> bool {
        let result = self.canvas.clear_selection();
        self.track(result)
    }

    pub fn submit_label(&mut self, text: &str) -> bool {
        let result = self.canvas.submit_label(text);
        self.track(result)
    }

    pub fn cancel_label(&mut self) -> bool {
        let result = self.canvas.cancel_label();
        self.track(result)
    }

    pub fn delete_selected(&mut self) -> bool {
        let result = self.canvas.delete_selected();
        self.track(result)
    }

    pub fn copy_shape(&mut self, id: ShapeId) -> bool {
        let result = self.canvas.copy(id);
        self.track(result)
    }

    pub fn duplicate_shape(&mut self, id: ShapeId) -> Option<ShapeId> {
        let result = self.canvas.duplicate(id);
        self.track(result)
    }

    pub fn paste_at(&mut self, point: Point) -> Option<ShapeId> {
        let result = self.canvas.paste_at(point);
        self.track(result)
    }

    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        let result = self.canvas.bring_to_front(id);
        self.track(result)
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        let result = self.canvas.send_to_back(id);
        self.track(result)
    }

    pub fn set_color(&mut self, target: ColorTarget, color: SerializableColor) {
        self.canvas.set_color(target, color);
        self.track(())
    }

    pub fn add_shape_at(&mut self, kind: ShapeKind, point: Point) -> ShapeId {
        let id = self.canvas.add_shape_at(kind, point);
        self.track(());
        id
    }

    pub fn request_clear(&mut self) -> bool {
        let result = self.canvas.request_clear();
        self.track(result)
    }

    pub fn resolve_confirmation(&mut self, accepted: bool) -> bool {
        let result = self.canvas.resolve_confirmation(accepted);
        self.track(result)
    }

    /// Menu for a right click at `point`. Building it changes nothing.
    pub fn context_menu(&self, point: Point) -> Vec<MenuEntry> {
        self.canvas.context_menu(point)
    }

    pub fn apply_menu_action(&mut self, action: &MenuAction) -> bool {
        let result = self.canvas.apply_menu_action(action);
        self.track(result)
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            revision: self.revision,
            table: TableSnapshot {
                headers: self.table.headers().to_vec(),
                groups: self.table.groups().to_vec(),
                hierarchy: self.table.hierarchy(),
                dialog: self.dialog.view(&self.table),
                row_drag: self.row_drag.map(|d| RowDragView {
                    group_id: d.group_id,
                    index: d.index,
                }),
            },
            canvas: self.canvas.snapshot(),
        }
    }
}
