//! Shape definitions for the canvas overlay.

mod ellipse;
mod line;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::TextBox;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 3, 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0:?}")]
    BadDigit(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a color picker value (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn from_hex(color: &str) -> Result<Self, ColorParseError> {
        let trimmed = color.trim();
        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(color.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(color.to_string()));
        }

        let byte = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(color.to_string()))
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = byte(&hex[0..1])? * 17;
                let g = byte(&hex[1..2])? * 17;
                let b = byte(&hex[2..3])? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(ColorParseError::BadLength(color.to_string())),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Which color slot a color-picker change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTarget {
    Fill,
    Stroke,
    Text,
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color.
    pub fill_color: SerializableColor,
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Label color.
    pub text_color: SerializableColor,
}

impl ShapeStyle {
    /// Overwrite the color stored in a slot.
    pub fn set_color(&mut self, target: ColorTarget, color: SerializableColor) {
        match target {
            ColorTarget::Fill => self.fill_color = color,
            ColorTarget::Stroke => self.stroke_color = color,
            ColorTarget::Text => self.text_color = color,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: SerializableColor::white(),
            stroke_color: SerializableColor::black(),
            text_color: SerializableColor::black(),
        }
    }
}

/// The persisted kinds of shape. `select` and `none` are tool modes, not kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Square,
    Text,
    Circle,
    Line,
    Arrow,
}

impl ShapeKind {
    /// Every kind the user can create, in menu order.
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Rectangle,
            ShapeKind::Square,
            ShapeKind::Text,
            ShapeKind::Circle,
            ShapeKind::Line,
            ShapeKind::Arrow,
        ]
    }

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Text => "Text",
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
            ShapeKind::Arrow => "Arrow",
        }
    }
}

/// Closed-interval containment: points on the right and bottom edges hit too.
pub(crate) fn box_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the normalized bounding box (top-left origin, non-negative extents).
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape.
    fn hit_test(&self, point: Point) -> bool {
        box_contains(self.bounds(), point)
    }

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Move the shape by a delta.
    fn translate(&mut self, delta: Vec2);
}

/// Enum wrapper for all shape kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Square(Rectangle),
    Text(TextBox),
    Circle(Ellipse),
    Line(Line),
    Arrow(Line),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) | Shape::Square(s) => s,
            Shape::Text(s) => s,
            Shape::Circle(s) => s,
            Shape::Line(s) | Shape::Arrow(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) | Shape::Square(s) => s,
            Shape::Text(s) => s,
            Shape::Circle(s) => s,
            Shape::Line(s) | Shape::Arrow(s) => s,
        }
    }

    /// Build a shape of `kind` occupying `rect`. Lines and arrows run from
    /// `start` to `end`, which the caller passes unnormalized.
    pub fn from_geometry(kind: ShapeKind, rect: Rect, start: Point, end: Point) -> Self {
        let origin = Point::new(rect.x0, rect.y0);
        match kind {
            ShapeKind::Rectangle => {
                Shape::Rectangle(Rectangle::new(origin, rect.width(), rect.height()))
            }
            ShapeKind::Square => {
                Shape::Square(Rectangle::square(origin, rect.width().max(rect.height())))
            }
            ShapeKind::Text => Shape::Text(TextBox::new(origin, rect.width(), rect.height())),
            ShapeKind::Circle => {
                Shape::Circle(Ellipse::new(origin, rect.width(), rect.height()))
            }
            ShapeKind::Line => Shape::Line(Line::new(start, end)),
            ShapeKind::Arrow => Shape::Arrow(Line::new(start, end)),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Square(_) => ShapeKind::Square,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    /// Top-left corner of the bounding box.
    pub fn origin(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.x0, bounds.y0)
    }

    /// Center of the bounding box.
    pub fn centroid(&self) -> Point {
        self.bounds().center()
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.as_trait().hit_test(point)
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    /// Move the shape so its bounding box starts at `origin`.
    pub fn set_origin(&mut self, origin: Point) {
        let delta = origin - self.origin();
        self.translate(delta);
    }

    /// The label of a text box.
    pub fn label(&self) -> Option<&str> {
        match self {
            Shape::Text(t) => Some(t.content.as_str()),
            _ => None,
        }
    }

    /// Endpoints of a line or arrow.
    pub fn points(&self) -> Option<[Point; 2]> {
        match self {
            Shape::Line(l) | Shape::Arrow(l) => Some([l.start, l.end]),
            _ => None,
        }
    }

    /// Replace the shape's ID with the given one.
    pub(crate) fn set_id(&mut self, id: ShapeId) {
        match self {
            Shape::Rectangle(s) | Shape::Square(s) => s.id = id,
            Shape::Text(s) => s.id = id,
            Shape::Circle(s) => s.id = id,
            Shape::Line(s) | Shape::Arrow(s) => s.id = id,
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// Used when duplicating or pasting so the copy is independent.
    pub fn regenerate_id(&mut self) {
        self.set_id(Uuid::new_v4());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            SerializableColor::from_hex("#ff8000").unwrap(),
            SerializableColor::new(255, 128, 0, 255)
        );
        assert_eq!(
            SerializableColor::from_hex("#fff").unwrap(),
            SerializableColor::white()
        );
        assert_eq!(
            SerializableColor::from_hex("#00000080").unwrap(),
            SerializableColor::new(0, 0, 0, 128)
        );
        assert_eq!(
            SerializableColor::from_hex("transparent").unwrap(),
            SerializableColor::transparent()
        );
    }

    #[test]
    fn test_reject_bad_colors() {
        assert!(matches!(
            SerializableColor::from_hex("ff0000"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            SerializableColor::from_hex("#ff00"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            SerializableColor::from_hex("#gg0000"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(SerializableColor::new(18, 52, 86, 255).to_hex(), "#123456");
        assert_eq!(SerializableColor::new(18, 52, 86, 0).to_hex(), "#12345600");
    }

    #[test]
    fn test_set_origin_moves_line_by_bounds() {
        let mut shape = Shape::Line(Line::new(Point::new(50.0, 10.0), Point::new(10.0, 40.0)));
        shape.set_origin(Point::new(0.0, 0.0));
        assert_eq!(shape.points(), Some([Point::new(40.0, 0.0), Point::new(0.0, 30.0)]));
    }

    #[test]
    fn test_regenerate_id() {
        let mut shape = Shape::Rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0));
        let before = shape.id();
        shape.regenerate_id();
        assert_ne!(before, shape.id());
    }

    #[test]
    fn test_shape_serializes_with_kind_tag() {
        let shape = Shape::Square(Rectangle::new(Point::ZERO, 5.0, 5.0));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["kind"], "square");
    }
}
