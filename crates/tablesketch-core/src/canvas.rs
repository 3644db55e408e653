//! Canvas document and state management.

use crate::config::CanvasConfig;
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::menu::{MenuAction, MenuEntry, build_context_menu};
use crate::shapes::{ColorTarget, SerializableColor, Shape, ShapeId, ShapeKind};
use crate::shortcuts::{ShortcutCommand, ShortcutRegistry};
use crate::snapshot::{CanvasSnapshot, ColorsView, ShapeView};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All shapes on the canvas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of everything else.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Clear all shapes from the document.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Bring a shape to the front (topmost). Unknown IDs are ignored.
    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        if !self.shapes.contains_key(&id) {
            return false;
        }
        self.z_order.retain(|&shape_id| shape_id != id);
        self.z_order.push(id);
        true
    }

    /// Send a shape to the back (bottommost). Unknown IDs are ignored.
    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        if !self.shapes.contains_key(&id) {
            return false;
        }
        self.z_order.retain(|&shape_id| shape_id != id);
        self.z_order.insert(0, id);
        true
    }

    /// Find shapes at a point, front to back.
    pub fn shapes_at_point(&self, point: Point) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.hit_test(point))
                    .map(|_| id)
            })
            .collect()
    }

    /// The frontmost shape under a point.
    pub fn shape_at_point(&self, point: Point) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.hit_test(point)))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// A shape is being dragged out; it lives in the tool manager until release.
    Drawing,
    /// A shape follows the pointer, keeping the point it was grabbed at.
    Moving { shape_id: ShapeId, grab_offset: Vec2 },
}

/// A text box waiting for its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingLabel {
    pub shape_id: ShapeId,
    /// Where the host should place the text input.
    pub anchor: Point,
}

/// Destructive operations that wait for the user to confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    ClearCanvas,
}

/// The canvas overlay: shapes plus everything the pointer and keyboard act on.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub document: CanvasDocument,
    pub tool_manager: ToolManager,
    /// At most one shape is selected.
    pub selection: Option<ShapeId>,
    /// Single-slot clipboard.
    pub clipboard: Option<Shape>,
    pub gesture: Gesture,
    pub pending_label: Option<PendingLabel>,
    pub pending_confirmation: Option<Confirmation>,
    /// Last known pointer position; keyboard paste lands here.
    pub last_pointer: Point,
    config: CanvasConfig,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            tool_manager: ToolManager::with_style(config.default_style.clone()),
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Set the current tool. An in-progress gesture is abandoned.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.cancel_gesture();
        self.tool_manager.set_tool(tool);
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection == Some(id)
    }

    /// Select a shape, replacing any previous selection.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.document.get_shape(id).is_none() {
            return false;
        }
        self.selection = Some(id);
        true
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) -> bool {
        self.selection.take().is_some()
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position, .. } => self.pointer_up(position),
        }
    }

    /// Start a gesture. Only the left button acts; right clicks go through
    /// [`Canvas::context_menu`].
    pub fn pointer_down(&mut self, point: Point, button: MouseButton) -> bool {
        self.last_pointer = point;
        if button != MouseButton::Left {
            return false;
        }
        let mut changed = self.cancel_label();

        match self.tool_manager.current_tool {
            ToolKind::Off => {}
            ToolKind::Select => match self.document.shape_at_point(point) {
                Some(shape_id) => {
                    let origin = self
                        .document
                        .get_shape(shape_id)
                        .map_or(point, |s| s.origin());
                    self.selection = Some(shape_id);
                    self.gesture = Gesture::Moving {
                        shape_id,
                        grab_offset: point - origin,
                    };
                    changed = true;
                }
                None => {
                    changed |= self.clear_selection();
                }
            },
            _ => {
                if self.tool_manager.begin(point) {
                    self.gesture = Gesture::Drawing;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Continue the current gesture. Repeated moves are last-write-wins.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.last_pointer = point;
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Drawing => self.tool_manager.update(point),
            Gesture::Moving {
                shape_id,
                grab_offset,
            } => match self.document.get_shape_mut(shape_id) {
                Some(shape) => {
                    shape.set_origin(point - grab_offset);
                    true
                }
                None => false,
            },
        }
    }

    /// Finish the current gesture. The release point may lie outside the canvas.
    pub fn pointer_up(&mut self, point: Point) -> bool {
        self.last_pointer = point;
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Moving { .. } => true,
            Gesture::Drawing => {
                let Some(shape) = self.tool_manager.end(point) else {
                    return false;
                };
                let id = shape.id();
                let text_anchor = (shape.kind() == ShapeKind::Text).then(|| shape.centroid());
                log::debug!("drew {:?} {}", shape.kind(), id);
                self.document.add_shape(shape);
                if let Some(anchor) = text_anchor {
                    self.pending_label = Some(PendingLabel {
                        shape_id: id,
                        anchor,
                    });
                }
                true
            }
        }
    }

    /// Abandon an in-progress draw, or drop a shape being moved where it is.
    pub fn cancel_gesture(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Drawing => {
                self.tool_manager.cancel();
                true
            }
            Gesture::Moving { .. } => true,
        }
    }

    /// The shape being dragged out, as it would be created right now.
    pub fn preview(&self) -> Option<Shape> {
        match self.gesture {
            Gesture::Drawing => self.tool_manager.preview_shape(),
            _ => None,
        }
    }

    /// Dispatch a key press through the shortcut registry.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let KeyEvent::Pressed { key, modifiers } = event else {
            return false;
        };
        let Some(command) = ShortcutRegistry::lookup(key, modifiers) else {
            return false;
        };
        // Keys typed into the label input belong to the label.
        if self.pending_label.is_some() && command != ShortcutCommand::Cancel {
            return false;
        }

        match command {
            ShortcutCommand::Copy => match self.selection {
                Some(id) => self.copy(id),
                None => false,
            },
            ShortcutCommand::Paste => self.paste_at(self.last_pointer).is_some(),
            ShortcutCommand::Duplicate => match self.selection {
                Some(id) => self.duplicate(id).is_some(),
                None => false,
            },
            ShortcutCommand::Delete => self.delete_selected(),
            ShortcutCommand::Cancel => {
                let cancelled = self.cancel_gesture();
                self.cancel_label() || cancelled
            }
        }
    }

    /// Write the label of the text box waiting for one.
    pub fn submit_label(&mut self, text: &str) -> bool {
        let Some(pending) = self.pending_label.take() else {
            log::debug!("no label pending");
            return false;
        };
        if let Some(Shape::Text(text_box)) = self.document.get_shape_mut(pending.shape_id) {
            text_box.content = text.to_string();
        }
        true
    }

    /// Dismiss the label input, leaving the text box empty.
    pub fn cancel_label(&mut self) -> bool {
        self.pending_label.take().is_some()
    }

    /// Delete the selected shape.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.remove_shape(id),
            None => false,
        }
    }

    /// Remove a shape and every reference the canvas holds to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        if self.document.remove_shape(id).is_none() {
            return false;
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.pending_label.is_some_and(|p| p.shape_id == id) {
            self.pending_label = None;
        }
        if matches!(self.gesture, Gesture::Moving { shape_id, .. } if shape_id == id) {
            self.gesture = Gesture::Idle;
        }
        true
    }

    /// Put a copy of a shape in the clipboard.
    pub fn copy(&mut self, id: ShapeId) -> bool {
        match self.document.get_shape(id) {
            Some(shape) => {
                self.clipboard = Some(shape.clone());
                true
            }
            None => false,
        }
    }

    /// Add a copy of a shape, shifted by the duplicate offset.
    pub fn duplicate(&mut self, id: ShapeId) -> Option<ShapeId> {
        let mut copy = self.document.get_shape(id)?.clone();
        copy.regenerate_id();
        let [dx, dy] = self.config.duplicate_offset;
        copy.translate(Vec2::new(dx, dy));
        let new_id = copy.id();
        self.document.add_shape(copy);
        Some(new_id)
    }

    /// Add a copy of the clipboard with its top-left corner at `point`.
    pub fn paste_at(&mut self, point: Point) -> Option<ShapeId> {
        let Some(mut shape) = self.clipboard.clone() else {
            log::debug!("paste with empty clipboard");
            return None;
        };
        shape.regenerate_id();
        shape.set_origin(point);
        let id = shape.id();
        self.document.add_shape(shape);
        log::info!("pasted shape {id} at ({}, {})", point.x, point.y);
        Some(id)
    }

    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        self.document.bring_to_front(id)
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        self.document.send_to_back(id)
    }

    /// Change a color for new shapes and for the selected shape.
    pub fn set_color(&mut self, target: ColorTarget, color: SerializableColor) {
        self.tool_manager.current_style.set_color(target, color);
        if let Some(id) = self.selection {
            if let Some(shape) = self.document.get_shape_mut(id) {
                shape.style_mut().set_color(target, color);
            }
        }
    }

    /// Add a default-sized shape with its top-left corner at `point`.
    pub fn add_shape_at(&mut self, kind: ShapeKind, point: Point) -> ShapeId {
        let [width, height] = self.config.default_shape_size.map(f64::abs);
        let (width, height) = match kind {
            ShapeKind::Square => (width.min(height), width.min(height)),
            _ => (width, height),
        };
        let rect = Rect::new(point.x, point.y, point.x + width, point.y + height);
        let end = Point::new(point.x + width, point.y);
        let mut shape = Shape::from_geometry(kind, rect, point, end);
        *shape.style_mut() = self.tool_manager.current_style.clone();

        let id = shape.id();
        let anchor = shape.centroid();
        self.document.add_shape(shape);
        if kind == ShapeKind::Text {
            self.pending_label = Some(PendingLabel {
                shape_id: id,
                anchor,
            });
        }
        id
    }

    /// Ask the user before clearing the canvas.
    pub fn request_clear(&mut self) -> bool {
        if self.pending_confirmation == Some(Confirmation::ClearCanvas) {
            return false;
        }
        self.pending_confirmation = Some(Confirmation::ClearCanvas);
        true
    }

    /// Answer the pending confirmation. Declining leaves the shapes alone.
    pub fn resolve_confirmation(&mut self, accepted: bool) -> bool {
        let Some(confirmation) = self.pending_confirmation.take() else {
            return false;
        };
        match confirmation {
            Confirmation::ClearCanvas if accepted => {
                log::info!("clearing {} shapes", self.document.len());
                self.cancel_gesture();
                self.document.clear();
                self.selection = None;
                self.pending_label = None;
            }
            Confirmation::ClearCanvas => {}
        }
        true
    }

    /// Build the context menu for a right click at `point`.
    pub fn context_menu(&self, point: Point) -> Vec<MenuEntry> {
        let hit = self.document.shape_at_point(point);
        build_context_menu(point, hit, self.clipboard.is_some())
    }

    /// Perform the operation behind a menu entry.
    pub fn apply_menu_action(&mut self, action: &MenuAction) -> bool {
        match *action {
            MenuAction::BringToFront { shape_id } => self.bring_to_front(shape_id),
            MenuAction::SendToBack { shape_id } => self.send_to_back(shape_id),
            MenuAction::Copy { shape_id } => self.copy(shape_id),
            MenuAction::Duplicate { shape_id } => self.duplicate(shape_id).is_some(),
            MenuAction::Delete { shape_id } => self.remove_shape(shape_id),
            MenuAction::Paste { at } => self.paste_at(at).is_some(),
            MenuAction::AddShape { kind, at } => {
                self.add_shape_at(kind, at);
                true
            }
            MenuAction::ClearCanvas => self.request_clear(),
        }
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            shapes: self
                .document
                .shapes_ordered()
                .map(|shape| ShapeView::new(shape, self.is_selected(shape.id())))
                .collect(),
            selection: self.selection,
            clipboard_filled: self.clipboard.is_some(),
            tool: self.tool_manager.current_tool,
            colors: ColorsView::from(&self.tool_manager.current_style),
            pending_label: self.pending_label,
            pending_confirmation: self.pending_confirmation,
            preview: self.preview().map(|shape| ShapeView::new(&shape, false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, ShapeTrait};

    fn canvas() -> Canvas {
        Canvas::new(CanvasConfig::default())
    }

    fn add_rect(canvas: &mut Canvas, x: f64, y: f64, w: f64, h: f64) -> ShapeId {
        let rect = Rectangle::new(Point::new(x, y), w, h);
        let id = rect.id();
        canvas.document.add_shape(Shape::Rectangle(rect));
        id
    }

    fn drag(canvas: &mut Canvas, from: Point, to: Point) {
        canvas.pointer_down(from, MouseButton::Left);
        canvas.pointer_move(to);
        canvas.pointer_up(to);
    }

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_add_shape() {
        let mut doc = CanvasDocument::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let id = rect.id();

        doc.add_shape(Shape::Rectangle(rect));
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(id).is_some());
    }

    #[test]
    fn test_remove_shape() {
        let mut doc = CanvasDocument::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let id = rect.id();

        doc.add_shape(Shape::Rectangle(rect));
        assert!(doc.remove_shape(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.z_order.is_empty());
    }

    #[test]
    fn test_z_order() {
        let mut canvas = canvas();
        let id1 = add_rect(&mut canvas, 0.0, 0.0, 100.0, 100.0);
        let id2 = add_rect(&mut canvas, 50.0, 50.0, 100.0, 100.0);
        assert_eq!(canvas.document.z_order, vec![id1, id2]);

        assert!(canvas.bring_to_front(id1));
        assert_eq!(canvas.document.z_order, vec![id2, id1]);

        assert!(canvas.send_to_back(id1));
        assert_eq!(canvas.document.z_order, vec![id1, id2]);

        assert!(!canvas.bring_to_front(uuid::Uuid::new_v4()));
        assert_eq!(canvas.document.z_order, vec![id1, id2]);
    }

    #[test]
    fn test_shapes_at_point() {
        let mut canvas = canvas();
        let id1 = add_rect(&mut canvas, 0.0, 0.0, 100.0, 100.0);
        let id2 = add_rect(&mut canvas, 50.0, 50.0, 100.0, 100.0);

        let hits = canvas.document.shapes_at_point(Point::new(75.0, 75.0));
        assert_eq!(hits, vec![id2, id1]);
        assert_eq!(canvas.document.shape_at_point(Point::new(75.0, 75.0)), Some(id2));

        let hits = canvas.document.shapes_at_point(Point::new(25.0, 25.0));
        assert_eq!(hits, vec![id1]);

        // Edges are inclusive.
        assert_eq!(canvas.document.shape_at_point(Point::new(150.0, 150.0)), Some(id2));
        assert_eq!(canvas.document.shape_at_point(Point::new(151.0, 150.0)), None);
    }

    #[test]
    fn test_draw_rectangle() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, Point::new(10.0, 10.0), Point::new(50.0, 30.0));

        assert_eq!(canvas.gesture, Gesture::Idle);
        let shape = canvas.document.shapes_ordered().next().unwrap();
        assert_eq!(shape.bounds(), Rect::new(10.0, 10.0, 50.0, 30.0));
        assert_eq!(canvas.selection, None);
    }

    #[test]
    fn test_draw_square() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Square);
        drag(&mut canvas, Point::new(10.0, 10.0), Point::new(30.0, 50.0));

        let bounds = canvas.document.shapes_ordered().next().unwrap().bounds();
        assert_eq!(bounds, Rect::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(bounds.width(), bounds.height());
    }

    #[test]
    fn test_preview_during_draw() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Circle);
        canvas.pointer_down(Point::new(10.0, 10.0), MouseButton::Left);
        canvas.pointer_move(Point::new(0.0, 0.0));

        let preview = canvas.preview().unwrap();
        assert_eq!(preview.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(canvas.document.is_empty());

        assert!(canvas.handle_key(&KeyEvent::pressed("Escape")));
        assert!(canvas.preview().is_none());
        assert!(canvas.document.is_empty());
    }

    #[test]
    fn test_text_draw_waits_for_label() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Text);
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(40.0, 20.0));

        let pending = canvas.pending_label.unwrap();
        assert_eq!(pending.anchor, Point::new(20.0, 10.0));

        assert!(canvas.submit_label("Note"));
        assert!(canvas.pending_label.is_none());
        let shape = canvas.document.get_shape(pending.shape_id).unwrap();
        assert_eq!(shape.label(), Some("Note"));

        assert!(!canvas.submit_label("again"));
    }

    #[test]
    fn test_press_cancels_pending_label() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Text);
        drag(&mut canvas, Point::new(0.0, 0.0), Point::new(40.0, 20.0));
        assert!(canvas.pending_label.is_some());

        canvas.pointer_down(Point::new(100.0, 100.0), MouseButton::Left);
        assert!(canvas.pending_label.is_none());
    }

    #[test]
    fn test_select_and_move() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 10.0, 10.0, 20.0, 20.0);

        canvas.pointer_down(Point::new(15.0, 12.0), MouseButton::Left);
        assert!(canvas.is_selected(id));
        canvas.pointer_move(Point::new(105.0, 102.0));
        canvas.pointer_up(Point::new(105.0, 102.0));

        let shape = canvas.document.get_shape(id).unwrap();
        assert_eq!(shape.origin(), Point::new(100.0, 100.0));
        assert!(canvas.is_selected(id));

        // Clicking empty space clears the selection.
        canvas.pointer_down(Point::new(500.0, 500.0), MouseButton::Left);
        assert_eq!(canvas.selection, None);
    }

    #[test]
    fn test_move_is_not_clamped() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        canvas.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        canvas.pointer_up(Point::new(-50.0, -50.0));
        // Release alone does not move; only the move events do.
        assert_eq!(canvas.document.get_shape(id).unwrap().origin(), Point::ZERO);

        canvas.pointer_down(Point::new(0.0, 0.0), MouseButton::Left);
        canvas.pointer_move(Point::new(-50.0, -50.0));
        canvas.pointer_up(Point::new(-50.0, -50.0));
        assert_eq!(
            canvas.document.get_shape(id).unwrap().origin(),
            Point::new(-50.0, -50.0)
        );
    }

    #[test]
    fn test_off_tool_ignores_presses() {
        let mut canvas = canvas();
        add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        canvas.set_tool(ToolKind::Off);
        assert!(!canvas.pointer_down(Point::new(5.0, 5.0), MouseButton::Left));
        assert_eq!(canvas.selection, None);
    }

    #[test]
    fn test_delete_selected() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 0.0, 0.0, 100.0, 100.0);

        assert!(!canvas.delete_selected());
        canvas.select(id);
        assert!(canvas.handle_key(&KeyEvent::pressed("Delete")));

        assert!(canvas.document.is_empty());
        assert_eq!(canvas.selection, None);
    }

    #[test]
    fn test_copy_and_paste() {
        let mut canvas = canvas();
        assert!(canvas.paste_at(Point::ZERO).is_none());
        assert_eq!(canvas.document.len(), 0);

        let id = add_rect(&mut canvas, 0.0, 0.0, 30.0, 10.0);
        assert!(canvas.copy(id));
        let pasted = canvas.paste_at(Point::new(200.0, 50.0)).unwrap();

        assert_ne!(pasted, id);
        assert_eq!(canvas.document.len(), 2);
        assert_eq!(canvas.document.z_order.last(), Some(&pasted));
        let shape = canvas.document.get_shape(pasted).unwrap();
        assert_eq!(shape.bounds(), Rect::new(200.0, 50.0, 230.0, 60.0));
        assert!(!canvas.is_selected(pasted));
    }

    #[test]
    fn test_keyboard_copy_paste_uses_last_pointer() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        canvas.select(id);
        assert!(canvas.handle_key(&KeyEvent::ctrl("c")));

        canvas.pointer_move(Point::new(70.0, 80.0));
        assert!(canvas.handle_key(&KeyEvent::ctrl("v")));
        let pasted = canvas.document.z_order[1];
        assert_eq!(
            canvas.document.get_shape(pasted).unwrap().origin(),
            Point::new(70.0, 80.0)
        );
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 5.0, 5.0, 10.0, 10.0);
        canvas.select(id);
        let copy = canvas.duplicate(id).unwrap();

        assert_ne!(copy, id);
        assert_eq!(
            canvas.document.get_shape(copy).unwrap().origin(),
            Point::new(25.0, 25.0)
        );
        assert!(canvas.is_selected(id));
        assert!(canvas.duplicate(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_set_color_updates_tool_and_selection() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        let other = add_rect(&mut canvas, 50.0, 50.0, 10.0, 10.0);
        canvas.select(id);

        let red = SerializableColor::from_hex("#ff0000").unwrap();
        canvas.set_color(ColorTarget::Fill, red);

        assert_eq!(canvas.tool_manager.current_style.fill_color, red);
        assert_eq!(canvas.document.get_shape(id).unwrap().style().fill_color, red);
        assert_eq!(
            canvas.document.get_shape(other).unwrap().style().fill_color,
            SerializableColor::white()
        );
    }

    #[test]
    fn test_add_shape_at() {
        let mut canvas = canvas();
        let at = Point::new(10.0, 20.0);

        let rect = canvas.add_shape_at(ShapeKind::Rectangle, at);
        assert_eq!(
            canvas.document.get_shape(rect).unwrap().bounds(),
            Rect::new(10.0, 20.0, 130.0, 100.0)
        );

        let square = canvas.add_shape_at(ShapeKind::Square, at);
        assert_eq!(
            canvas.document.get_shape(square).unwrap().bounds(),
            Rect::new(10.0, 20.0, 90.0, 100.0)
        );

        let line = canvas.add_shape_at(ShapeKind::Line, at);
        assert_eq!(
            canvas.document.get_shape(line).unwrap().points(),
            Some([at, Point::new(130.0, 20.0)])
        );

        let text = canvas.add_shape_at(ShapeKind::Text, at);
        assert_eq!(canvas.pending_label.map(|p| p.shape_id), Some(text));
    }

    #[test]
    fn test_add_shape_at_keeps_extent_positive() {
        let mut canvas = Canvas::new(CanvasConfig {
            default_shape_size: [-50.0, 30.0],
            ..CanvasConfig::default()
        });
        let id = canvas.add_shape_at(ShapeKind::Rectangle, Point::new(100.0, 100.0));
        let shape = canvas.document.get_shape(id).unwrap();
        assert_eq!(shape.bounds(), Rect::new(100.0, 100.0, 150.0, 130.0));
        assert_eq!(canvas.document.shape_at_point(Point::new(125.0, 110.0)), Some(id));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut canvas = canvas();
        add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);

        assert!(canvas.request_clear());
        assert_eq!(canvas.pending_confirmation, Some(Confirmation::ClearCanvas));
        assert!(canvas.resolve_confirmation(false));
        assert_eq!(canvas.document.len(), 1);

        canvas.request_clear();
        assert!(canvas.resolve_confirmation(true));
        assert!(canvas.document.is_empty());
        assert_eq!(canvas.pending_confirmation, None);
        assert!(!canvas.resolve_confirmation(true));
    }

    #[test]
    fn test_menu_actions() {
        let mut canvas = canvas();
        let id = add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        canvas.select(id);

        let menu = canvas.context_menu(Point::new(5.0, 5.0));
        assert_eq!(menu.len(), 7);
        let menu = canvas.context_menu(Point::new(50.0, 50.0));
        assert!(menu[0].item().unwrap().disabled);

        assert!(canvas.apply_menu_action(&MenuAction::Copy { shape_id: id }));
        let menu = canvas.context_menu(Point::new(50.0, 50.0));
        assert!(!menu[0].item().unwrap().disabled);

        assert!(canvas.apply_menu_action(&MenuAction::Delete { shape_id: id }));
        assert!(canvas.document.is_empty());
        assert_eq!(canvas.selection, None);

        assert!(canvas.apply_menu_action(&MenuAction::Paste {
            at: Point::new(1.0, 1.0)
        }));
        assert_eq!(canvas.document.len(), 1);

        assert!(canvas.apply_menu_action(&MenuAction::ClearCanvas));
        assert_eq!(canvas.document.len(), 1);
    }

    #[test]
    fn test_snapshot_marks_selection() {
        let mut canvas = canvas();
        let id1 = add_rect(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        let id2 = add_rect(&mut canvas, 20.0, 0.0, 10.0, 10.0);
        canvas.select(id2);

        let snapshot = canvas.snapshot();
        assert_eq!(snapshot.shapes.len(), 2);
        assert_eq!(snapshot.shapes[0].id, id1);
        assert!(!snapshot.shapes[0].is_selected);
        assert!(snapshot.shapes[1].is_selected);
        assert_eq!(snapshot.shapes[1].colors.fill, "#ffffff");
        assert_eq!(snapshot.tool, ToolKind::Select);
    }
}
