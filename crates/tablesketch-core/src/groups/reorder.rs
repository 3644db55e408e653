//! Turning row drag hovers into row moves.
//!
//! The drag library reports which row the pointer is over while a row is
//! being dragged. A move happens only once the pointer has crossed the
//! hovered row's vertical midpoint, so rows do not flicker back and forth
//! while the pointer sits near a boundary.

use super::GroupId;
use serde::{Deserialize, Serialize};

/// Move the row at `from` to index `to`. Out-of-range indices leave the rows
/// unchanged.
pub fn move_row(rows: &[Vec<String>], from: usize, to: usize) -> Vec<Vec<String>> {
    let mut rows = rows.to_vec();
    if from < rows.len() && to < rows.len() {
        let row = rows.remove(from);
        rows.insert(to, row);
    }
    rows
}

/// The row being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDrag {
    pub group_id: GroupId,
    /// Current index of the dragged row; follows the row as it moves.
    pub index: usize,
}

/// The pointer is over a row during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowHover {
    pub group_id: GroupId,
    pub index: usize,
    pub pointer_y: f64,
    pub row_top: f64,
    pub row_bottom: f64,
}

/// A reorder to apply to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMove {
    pub group_id: GroupId,
    pub from: usize,
    pub to: usize,
}

impl RowDrag {
    pub fn new(group_id: GroupId, index: usize) -> Self {
        Self { group_id, index }
    }

    /// Decide whether a hover moves the dragged row.
    ///
    /// Rows never move between groups. The drag itself is left alone; call
    /// [`RowDrag::follow`] once the move has been applied.
    pub fn hover(&self, hover: &RowHover) -> Option<RowMove> {
        if hover.group_id != self.group_id || hover.index == self.index {
            return None;
        }

        let middle = (hover.row_bottom - hover.row_top) / 2.0;
        let offset = hover.pointer_y - hover.row_top;
        if self.index < hover.index && offset < middle {
            return None;
        }
        if self.index > hover.index && offset > middle {
            return None;
        }

        Some(RowMove {
            group_id: self.group_id,
            from: self.index,
            to: hover.index,
        })
    }

    /// Track the dragged row after `row_move` landed.
    pub fn follow(&mut self, row_move: &RowMove) {
        if row_move.group_id == self.group_id && row_move.from == self.index {
            self.index = row_move.to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn rows(cells: &[&str]) -> Vec<Vec<String>> {
        cells.iter().map(|c| vec![c.to_string()]).collect()
    }

    fn hover(group_id: GroupId, index: usize, pointer_y: f64) -> RowHover {
        // Rows are 20px tall, stacked from y = 0.
        let row_top = index as f64 * 20.0;
        RowHover {
            group_id,
            index,
            pointer_y,
            row_top,
            row_bottom: row_top + 20.0,
        }
    }

    #[test]
    fn test_move_row() {
        let input = rows(&["a", "b", "c", "d"]);
        assert_eq!(move_row(&input, 0, 2), rows(&["b", "c", "a", "d"]));
        assert_eq!(move_row(&input, 3, 0), rows(&["d", "a", "b", "c"]));
        assert_eq!(move_row(&input, 1, 9), input);
    }

    #[test]
    fn test_downward_waits_for_midpoint() {
        let group = Uuid::new_v4();
        let mut drag = RowDrag::new(group, 0);

        // Top half of row 1.
        assert_eq!(drag.hover(&hover(group, 1, 25.0)), None);
        assert_eq!(drag.index, 0);

        // Exactly at the midpoint moves.
        let row_move = drag.hover(&hover(group, 1, 30.0)).unwrap();
        assert_eq!(
            row_move,
            RowMove {
                group_id: group,
                from: 0,
                to: 1
            }
        );
        assert_eq!(drag.index, 0);
        drag.follow(&row_move);
        assert_eq!(drag.index, 1);
    }

    #[test]
    fn test_upward_waits_for_midpoint() {
        let group = Uuid::new_v4();
        let drag = RowDrag::new(group, 2);

        // Bottom half of row 0.
        assert_eq!(drag.hover(&hover(group, 0, 15.0)), None);
        let row_move = drag.hover(&hover(group, 0, 5.0)).unwrap();
        assert_eq!((row_move.from, row_move.to), (2, 0));
    }

    #[test]
    fn test_hovers_chain() {
        let group = Uuid::new_v4();
        let mut drag = RowDrag::new(group, 0);
        let mut data = rows(&["a", "b", "c"]);

        for (index, y) in [(1, 35.0), (2, 55.0)] {
            let row_move = drag.hover(&hover(group, index, y)).unwrap();
            data = move_row(&data, row_move.from, row_move.to);
            drag.follow(&row_move);
        }
        assert_eq!(data, rows(&["b", "c", "a"]));
    }

    #[test]
    fn test_other_group_and_same_row_ignored() {
        let group = Uuid::new_v4();
        let drag = RowDrag::new(group, 0);
        assert_eq!(drag.hover(&hover(Uuid::new_v4(), 1, 39.0)), None);
        assert_eq!(drag.hover(&hover(group, 0, 10.0)), None);
        assert_eq!(drag.index, 0);
    }

    #[test]
    fn test_follow_ignores_foreign_moves() {
        let group = Uuid::new_v4();
        let mut drag = RowDrag::new(group, 1);
        drag.follow(&RowMove {
            group_id: Uuid::new_v4(),
            from: 1,
            to: 3,
        });
        drag.follow(&RowMove {
            group_id: group,
            from: 0,
            to: 2,
        });
        assert_eq!(drag.index, 1);
    }
}
