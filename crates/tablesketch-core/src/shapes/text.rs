//! Text box shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A box carrying a text label.
///
/// The box is drawn like a rectangle; the label is captured afterwards by the
/// host and written with [`crate::canvas::Canvas::submit_label`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub(crate) id: ShapeId,
    /// Top-left corner of the box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// The text content.
    pub content: String,
    /// Style properties.
    pub style: ShapeStyle,
}

impl TextBox {
    /// Create an empty text box.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            content: String::new(),
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for TextBox {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
