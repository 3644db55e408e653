//! Keyboard shortcut registry.

use crate::input::Modifiers;
use serde::Serialize;

/// What a shortcut does on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutCommand {
    Copy,
    Paste,
    Duplicate,
    Delete,
    Cancel,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Serialize)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub command: ShortcutCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        command: ShortcutCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+C").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key.to_ascii_uppercase())
        } else {
            self.key.to_string()
        }
    }

    fn matches(&self, key: &str, modifiers: &Modifiers) -> bool {
        self.ctrl == modifiers.command() && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("c", true, ShortcutCommand::Copy, "Copy selected shape"),
            Shortcut::new("v", true, ShortcutCommand::Paste, "Paste at pointer"),
            Shortcut::new("d", true, ShortcutCommand::Duplicate, "Duplicate selected shape"),
            Shortcut::new("Delete", false, ShortcutCommand::Delete, "Delete selected shape"),
            Shortcut::new("Backspace", false, ShortcutCommand::Delete, "Delete selected shape"),
            Shortcut::new("Escape", false, ShortcutCommand::Cancel, "Cancel current action"),
        ]
    }

    /// Find the command bound to a key press.
    pub fn lookup(key: &str, modifiers: &Modifiers) -> Option<ShortcutCommand> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.command)
    }

    /// Display string for the first shortcut bound to `command`.
    pub fn label_for(command: ShortcutCommand) -> Option<String> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.command == command)
            .map(|shortcut| shortcut.format())
    }
}
