//! Tool palette and the draw gesture.

use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Press selects and drags shapes.
    #[default]
    Select,
    /// Drawing disabled; presses fall through to the table.
    #[serde(rename = "none")]
    Off,
    Rectangle,
    Square,
    Text,
    Circle,
    Line,
    Arrow,
}

impl ToolKind {
    /// The shape kind this tool draws, if it is a drawing tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select | ToolKind::Off => None,
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Square => Some(ShapeKind::Square),
            ToolKind::Text => Some(ShapeKind::Text),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Arrow => Some(ShapeKind::Arrow),
        }
    }

    /// Check if this tool creates shapes.
    pub fn is_drawing(self) -> bool {
        self.shape_kind().is_some()
    }
}

/// Bounding box of a shape being dragged out from `anchor` to `pointer`.
///
/// Extents are the absolute deltas; a square takes the larger of the two for
/// both sides, each keeping the sign of its own delta so the square grows
/// into the quadrant the pointer is in. The returned rect is normalized, so
/// its origin is the top-left corner whatever the drag direction.
pub fn drag_bounds(kind: ShapeKind, anchor: Point, pointer: Point) -> Rect {
    let dx = pointer.x - anchor.x;
    let dy = pointer.y - anchor.y;
    let (dx, dy) = if kind == ShapeKind::Square {
        let side = dx.abs().max(dy.abs());
        (side.copysign(dx), side.copysign(dy))
    } else {
        (dx, dy)
    };

    let x = if dx < 0.0 { anchor.x + dx } else { anchor.x };
    let y = if dy < 0.0 { anchor.y + dy } else { anchor.y };
    Rect::new(x, y, x + dx.abs(), y + dy.abs())
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A shape is being dragged out.
    Active {
        /// Press point; the shape stays anchored here.
        start: Point,
        /// Latest pointer position.
        current: Point,
        /// ID the finished shape will carry, stable for the whole gesture.
        id: ShapeId,
    },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Colors applied to new shapes.
    pub current_style: ShapeStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager whose new shapes use `style`.
    pub fn with_style(style: ShapeStyle) -> Self {
        Self {
            current_style: style,
            ..Self::default()
        }
    }

    /// Set the current tool. Any draw in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a draw at `point`. Returns false for non-drawing tools.
    pub fn begin(&mut self, point: Point) -> bool {
        if !self.current_tool.is_drawing() {
            return false;
        }
        self.state = ToolState::Active {
            start: point,
            current: point,
            id: Uuid::new_v4(),
        };
        true
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: Point) -> bool {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
            true
        } else {
            false
        }
    }

    /// End the current interaction and return the finished shape.
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        self.update(point);
        let shape = self.preview_shape();
        self.state = ToolState::Idle;
        shape
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Get the shape as it currently stands in the draw.
    pub fn preview_shape(&self) -> Option<Shape> {
        if let ToolState::Active { start, current, id } = &self.state {
            let mut shape = self.create_shape(*start, *current)?;
            shape.set_id(*id);
            Some(shape)
        } else {
            None
        }
    }

    /// Create a shape from anchor and pointer positions with the current style.
    fn create_shape(&self, start: Point, end: Point) -> Option<Shape> {
        let kind = self.current_tool.shape_kind()?;
        let bounds = drag_bounds(kind, start, end);
        let mut shape = Shape::from_geometry(kind, bounds, start, end);
        *shape.style_mut() = self.current_style.clone();
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Select);

        tm.set_tool(ToolKind::Rectangle);
        assert_eq!(tm.current_tool, ToolKind::Rectangle);
    }

    #[test]
    fn test_tool_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        assert!(!tm.is_active());

        assert!(tm.begin(Point::new(0.0, 0.0)));
        assert!(tm.is_active());

        tm.update(Point::new(50.0, 50.0));
        let preview = tm.preview_shape().unwrap();

        let shape = tm.end(Point::new(100.0, 100.0)).unwrap();
        assert_eq!(shape.id(), preview.id());
        assert_eq!(shape.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!tm.is_active());
    }

    #[test]
    fn test_cancel_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());

        tm.cancel();
        assert!(!tm.is_active());
        assert!(tm.preview_shape().is_none());
    }

    #[test]
    fn test_select_tool_no_shape() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Select);

        assert!(!tm.begin(Point::new(0.0, 0.0)));
        assert!(tm.end(Point::new(100.0, 100.0)).is_none());

        tm.set_tool(ToolKind::Off);
        assert!(!tm.begin(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_rectangle_drag_bounds() {
        let rect = drag_bounds(
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
            Point::new(50.0, 30.0),
        );
        assert_eq!(rect, Rect::new(10.0, 10.0, 50.0, 30.0));

        // Dragging up-left moves the origin to the pointer.
        let rect = drag_bounds(
            ShapeKind::Rectangle,
            Point::new(50.0, 30.0),
            Point::new(10.0, 10.0),
        );
        assert_eq!(rect, Rect::new(10.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn test_square_drag_bounds_follow_quadrant() {
        let anchor = Point::new(10.0, 10.0);

        let rect = drag_bounds(ShapeKind::Square, anchor, Point::new(30.0, 50.0));
        assert_eq!(rect, Rect::new(10.0, 10.0, 50.0, 50.0));

        let rect = drag_bounds(ShapeKind::Square, anchor, Point::new(0.0, 50.0));
        assert_eq!(rect, Rect::new(-30.0, 10.0, 10.0, 50.0));

        let rect = drag_bounds(ShapeKind::Square, anchor, Point::new(-20.0, 0.0));
        assert_eq!(rect, Rect::new(-20.0, -20.0, 10.0, 10.0));
    }

    #[test]
    fn test_line_keeps_drag_direction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Arrow);
        tm.begin(Point::new(40.0, 40.0));
        let shape = tm.end(Point::new(0.0, 10.0)).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Arrow);
        assert_eq!(
            shape.points(),
            Some([Point::new(40.0, 40.0), Point::new(0.0, 10.0)])
        );
        assert_eq!(shape.bounds(), Rect::new(0.0, 10.0, 40.0, 40.0));
    }

    #[test]
    fn test_new_shapes_take_current_style() {
        let mut style = ShapeStyle::default();
        style.fill_color = crate::shapes::SerializableColor::new(1, 2, 3, 255);
        let mut tm = ToolManager::with_style(style.clone());
        tm.set_tool(ToolKind::Circle);
        tm.begin(Point::ZERO);
        let shape = tm.end(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(shape.style(), &style);
    }
}
