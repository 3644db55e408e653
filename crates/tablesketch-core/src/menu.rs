//! Right-click context menu for the canvas.
//!
//! The menu is built fresh for every right click. Building it never touches
//! canvas state; the host shows the entries and sends the chosen
//! [`MenuAction`] back through [`crate::canvas::Canvas::apply_menu_action`].

use crate::shapes::{ShapeId, ShapeKind};
use crate::shortcuts::{ShortcutCommand, ShortcutRegistry};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An operation a menu entry triggers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuAction {
    BringToFront { shape_id: ShapeId },
    SendToBack { shape_id: ShapeId },
    Copy { shape_id: ShapeId },
    Duplicate { shape_id: ShapeId },
    Delete { shape_id: ShapeId },
    Paste { at: Point },
    AddShape { kind: ShapeKind, at: Point },
    /// Only asks for confirmation; nothing is removed yet.
    ClearCanvas,
}

/// A clickable menu entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    /// `None` for entries that only open a submenu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MenuAction>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submenu: Vec<MenuEntry>,
}

/// One row of the context menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

impl MenuEntry {
    fn action(label: &str, action: MenuAction) -> Self {
        MenuEntry::Item(MenuItem {
            label: label.to_string(),
            shortcut: None,
            action: Some(action),
            disabled: false,
            submenu: Vec::new(),
        })
    }

    fn with_shortcut(mut self, command: ShortcutCommand) -> Self {
        if let MenuEntry::Item(item) = &mut self {
            item.shortcut = ShortcutRegistry::label_for(command);
        }
        self
    }

    fn disabled(mut self, disabled: bool) -> Self {
        if let MenuEntry::Item(item) = &mut self {
            item.disabled = disabled;
        }
        self
    }

    fn submenu(label: &str, entries: Vec<MenuEntry>) -> Self {
        MenuEntry::Item(MenuItem {
            label: label.to_string(),
            shortcut: None,
            action: None,
            disabled: false,
            submenu: entries,
        })
    }

    /// The entry's item, or `None` for a separator.
    pub fn item(&self) -> Option<&MenuItem> {
        match self {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        }
    }
}

/// Build the menu for a right click at `point`.
///
/// `hit` is the frontmost shape under the pointer, if any.
pub fn build_context_menu(point: Point, hit: Option<ShapeId>, clipboard_filled: bool) -> Vec<MenuEntry> {
    match hit {
        Some(shape_id) => vec![
            MenuEntry::action("Bring to Front", MenuAction::BringToFront { shape_id }),
            MenuEntry::action("Send to Back", MenuAction::SendToBack { shape_id }),
            MenuEntry::Separator,
            MenuEntry::action("Copy", MenuAction::Copy { shape_id })
                .with_shortcut(ShortcutCommand::Copy),
            MenuEntry::action("Duplicate", MenuAction::Duplicate { shape_id })
                .with_shortcut(ShortcutCommand::Duplicate),
            MenuEntry::Separator,
            MenuEntry::action("Delete", MenuAction::Delete { shape_id })
                .with_shortcut(ShortcutCommand::Delete),
        ],
        None => {
            let add_shape = ShapeKind::all()
                .iter()
                .map(|&kind| MenuEntry::action(kind.display_name(), MenuAction::AddShape { kind, at: point }))
                .collect();
            vec![
                MenuEntry::action("Paste", MenuAction::Paste { at: point })
                    .with_shortcut(ShortcutCommand::Paste)
                    .disabled(!clipboard_filled),
                MenuEntry::submenu("Add Shape", add_shape),
                MenuEntry::Separator,
                MenuEntry::action("Clear Canvas", MenuAction::ClearCanvas),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn labels(entries: &[MenuEntry]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| e.item().map_or("---", |i| i.label.as_str()))
            .collect()
    }

    #[test]
    fn test_shape_menu() {
        let id = Uuid::new_v4();
        let menu = build_context_menu(Point::new(5.0, 5.0), Some(id), false);
        assert_eq!(
            labels(&menu),
            vec![
                "Bring to Front",
                "Send to Back",
                "---",
                "Copy",
                "Duplicate",
                "---",
                "Delete"
            ]
        );
        let delete = menu[6].item().unwrap();
        assert_eq!(delete.action, Some(MenuAction::Delete { shape_id: id }));
        assert_eq!(delete.shortcut.as_deref(), Some("Delete"));
        assert_eq!(menu[3].item().unwrap().shortcut.as_deref(), Some("Ctrl+C"));
    }

    #[test]
    fn test_empty_space_menu() {
        let at = Point::new(40.0, 60.0);
        let menu = build_context_menu(at, None, false);
        assert_eq!(labels(&menu), vec!["Paste", "Add Shape", "---", "Clear Canvas"]);

        let paste = menu[0].item().unwrap();
        assert!(paste.disabled);
        assert_eq!(paste.action, Some(MenuAction::Paste { at }));

        let add = menu[1].item().unwrap();
        assert!(add.action.is_none());
        assert_eq!(
            labels(&add.submenu),
            vec!["Rectangle", "Square", "Text", "Circle", "Line", "Arrow"]
        );
        assert_eq!(
            add.submenu[1].item().unwrap().action,
            Some(MenuAction::AddShape {
                kind: ShapeKind::Square,
                at
            })
        );
    }

    #[test]
    fn test_paste_enabled_with_clipboard() {
        let menu = build_context_menu(Point::ZERO, None, true);
        assert!(!menu[0].item().unwrap().disabled);
    }

    #[test]
    fn test_action_json() {
        let action: MenuAction =
            serde_json::from_str(r#"{"type":"add_shape","kind":"circle","at":{"x":1.0,"y":2.0}}"#)
                .unwrap();
        assert_eq!(
            action,
            MenuAction::AddShape {
                kind: ShapeKind::Circle,
                at: Point::new(1.0, 2.0)
            }
        );
        let json = serde_json::to_value(MenuEntry::Separator).unwrap();
        assert_eq!(json["type"], "separator");
    }
}
