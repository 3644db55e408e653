//! tablesketch core library
//!
//! Platform-agnostic state for the group table editor and its canvas overlay.
//! Everything here is synchronous and in-memory; hosts drive it through
//! [`Editor`] and render the [`EditorSnapshot`] it returns.

pub mod canvas;
pub mod config;
pub mod editor;
pub mod groups;
pub mod input;
pub mod menu;
pub mod shapes;
pub mod shortcuts;
pub mod snapshot;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument, Confirmation, Gesture, PendingLabel};
pub use config::{CanvasConfig, ConfigError, EditorConfig, TableConfig};
pub use editor::Editor;
pub use groups::dialog::{GroupDialog, GroupKind};
pub use groups::hierarchy::{GroupLayout, GroupNode};
pub use groups::reorder::{RowDrag, RowHover, RowMove, move_row};
pub use groups::{Group, GroupId, GroupStore, InsertPosition, Placement};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use menu::{MenuAction, MenuEntry, MenuItem, build_context_menu};
pub use shapes::{ColorParseError, ColorTarget, SerializableColor, Shape, ShapeId, ShapeKind};
pub use shortcuts::{ShortcutCommand, ShortcutRegistry};
pub use snapshot::{CanvasSnapshot, EditorSnapshot, ShapeView, TableSnapshot};
pub use tools::{ToolKind, ToolManager};
