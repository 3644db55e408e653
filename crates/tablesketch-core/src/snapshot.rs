//! Immutable, serializable views handed to the rendering host.

use crate::canvas::{Confirmation, PendingLabel};
use crate::groups::dialog::DialogView;
use crate::groups::hierarchy::GroupNode;
use crate::groups::{Group, GroupId};
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Colors as hex strings, ready for a color picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorsView {
    pub fill: String,
    pub stroke: String,
    pub text: String,
}

impl From<&ShapeStyle> for ColorsView {
    fn from(style: &ShapeStyle) -> Self {
        Self {
            fill: style.fill_color.to_hex(),
            stroke: style.stroke_color.to_hex(),
            text: style.text_color.to_hex(),
        }
    }
}

/// A shape flattened to box geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeView {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub colors: ColorsView,
    pub text: String,
    /// Start and end of lines and arrows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<[Point; 2]>,
    pub is_selected: bool,
}

impl ShapeView {
    pub fn new(shape: &Shape, is_selected: bool) -> Self {
        let bounds = shape.bounds();
        Self {
            id: shape.id(),
            kind: shape.kind(),
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
            colors: ColorsView::from(shape.style()),
            text: shape.label().unwrap_or_default().to_string(),
            points: shape.points(),
            is_selected,
        }
    }
}

/// Everything the canvas overlay needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    /// Shapes back to front.
    pub shapes: Vec<ShapeView>,
    pub selection: Option<ShapeId>,
    pub clipboard_filled: bool,
    pub tool: ToolKind,
    /// Colors applied to the next shape.
    pub colors: ColorsView,
    pub pending_label: Option<PendingLabel>,
    pub pending_confirmation: Option<Confirmation>,
    /// The shape currently being dragged out.
    pub preview: Option<ShapeView>,
}

/// Row drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDragView {
    pub group_id: GroupId,
    pub index: usize,
}

/// Everything the table view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    /// Groups in list order.
    pub groups: Vec<Group>,
    /// The same groups arranged as a tree.
    pub hierarchy: Vec<GroupNode>,
    pub dialog: DialogView,
    pub row_drag: Option<RowDragView>,
}

/// Full editor state at one revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    /// Increments on every state change.
    pub revision: u64,
    pub table: TableSnapshot,
    pub canvas: CanvasSnapshot,
}
