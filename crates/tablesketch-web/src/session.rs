//! Dispatch of decoded commands against one editor.

use crate::command::{Command, Outcome};
use crate::error::CommandError;
use tablesketch_core::{Editor, EditorConfig, SerializableColor};

/// One editor plus the JSON plumbing around it.
#[derive(Debug, Default)]
pub struct Session {
    editor: Editor,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editor: Editor::new(config),
        }
    }

    /// Build a session from a JSON config. A blank string means defaults.
    pub fn from_config_json(json: &str) -> Result<Self, CommandError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::new(EditorConfig::from_json(json)?))
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Run one command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, CommandError> {
        log::debug!("command: {command:?}");
        let editor = &mut self.editor;
        let mut id = None;
        let mut menu = None;

        let changed = match command {
            Command::CreateGroup {
                name,
                parent_id,
                placement,
            } => {
                id = editor.create_group(&name, parent_id, placement);
                id.is_some()
            }
            Command::AddChildGroup { parent_id } => {
                id = editor.add_child_group(parent_id);
                id.is_some()
            }
            Command::RemoveGroup { group_id } => editor.remove_group(group_id),
            Command::AddHeader => {
                editor.add_header();
                true
            }
            Command::RemoveHeader { index } => editor.remove_header(index),
            Command::AddRow { group_id } => editor.add_row(group_id),
            Command::RemoveRow {
                group_id,
                row_index,
            } => editor.remove_row(group_id, row_index),
            Command::UpdateRows { group_id, rows } => editor.update_rows(group_id, rows),
            Command::UpdateCell {
                group_id,
                row,
                column,
                value,
            } => editor.update_cell(group_id, row, column, &value),
            Command::ReorderRow { group_id, from, to } => editor.reorder_row(group_id, from, to),

            Command::BeginRowDrag { group_id, index } => editor.begin_row_drag(group_id, index),
            Command::HoverRow(hover) => editor.hover_row(&hover).is_some(),
            Command::EndRowDrag => editor.end_row_drag(),

            Command::OpenDialog => {
                editor.open_dialog();
                true
            }
            Command::CloseDialog => {
                editor.close_dialog();
                true
            }
            Command::SetDialogName { name } => {
                editor.set_dialog_name(&name);
                true
            }
            Command::SetDialogKind { kind } => {
                editor.set_dialog_kind(kind);
                true
            }
            Command::SetDialogParent { parent_id } => {
                editor.set_dialog_parent(parent_id);
                true
            }
            Command::SetDialogPosition {
                position,
                relative_to,
            } => {
                editor.set_dialog_position(position, relative_to);
                true
            }
            Command::SubmitDialog => {
                id = editor.submit_dialog();
                id.is_some()
            }

            Command::SetTool { tool } => {
                editor.set_tool(tool);
                true
            }
            Command::Pointer { event } => editor.handle_pointer(event),
            Command::Key { event } => editor.handle_key(&event),
            Command::CancelGesture => editor.cancel_gesture(),
            Command::SelectShape { shape_id } => editor.select_shape(shape_id),
            Command::ClearSelection => editor.clear_selection(),
            Command::SubmitLabel { text } => editor.submit_label(&text),
            Command::CancelLabel => editor.cancel_label(),
            Command::DeleteSelected => editor.delete_selected(),
            Command::Copy { shape_id } => editor.copy_shape(shape_id),
            Command::Duplicate { shape_id } => {
                id = editor.duplicate_shape(shape_id);
                id.is_some()
            }
            Command::Paste { at } => {
                id = editor.paste_at(at);
                id.is_some()
            }
            Command::BringToFront { shape_id } => editor.bring_to_front(shape_id),
            Command::SendToBack { shape_id } => editor.send_to_back(shape_id),
            Command::SetColor { target, color } => {
                let color = SerializableColor::from_hex(&color)?;
                editor.set_color(target, color);
                true
            }
            Command::AddShape { kind, at } => {
                id = Some(editor.add_shape_at(kind, at));
                true
            }
            Command::RequestClear => editor.request_clear(),
            Command::ResolveConfirmation { accepted } => editor.resolve_confirmation(accepted),
            Command::ContextMenu { at } => {
                menu = Some(editor.context_menu(at));
                false
            }
            Command::Menu { menu_action } => editor.apply_menu_action(&menu_action),
            Command::Snapshot => false,
        };

        Ok(Outcome {
            changed,
            id,
            menu,
            snapshot: editor.snapshot(),
        })
    }

    /// Decode, run and encode one command. Failures come back as
    /// `{"error": "..."}`.
    pub fn execute_json(&mut self, json: &str) -> String {
        let result = serde_json::from_str::<Command>(json)
            .map_err(CommandError::from)
            .and_then(|command| self.execute(command))
            .and_then(|outcome| serde_json::to_string(&outcome).map_err(CommandError::Encode));
        match result {
            Ok(json) => json,
            Err(err) => {
                log::warn!("{err}");
                err.to_json()
            }
        }
    }

    /// The current snapshot as JSON.
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.editor.snapshot()) {
            Ok(json) => json,
            Err(err) => CommandError::Encode(err).to_json(),
        }
    }
}
