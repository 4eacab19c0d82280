//! Keyboard transitions for the selected cell.
//!
//! Horizontal movement steps through the visible-column list rather than raw
//! column indices, so hidden columns are skipped entirely. Arrow keys clamp at
//! the grid edges; Tab and Shift+Tab wrap across rows.

use crate::state::view_state::SelectedCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Tab,
    ShiftTab,
    Home,
    End,
    CtrlHome,
    CtrlEnd,
}

impl NavKey {
    /// Maps a DOM-style key name plus modifiers to a navigation key.
    pub fn from_key_name(name: &str, shift: bool, ctrl: bool) -> Option<Self> {
        match name {
            "ArrowUp" => Some(NavKey::Up),
            "ArrowDown" => Some(NavKey::Down),
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            "Tab" if shift => Some(NavKey::ShiftTab),
            "Tab" => Some(NavKey::Tab),
            "Home" if ctrl => Some(NavKey::CtrlHome),
            "Home" => Some(NavKey::Home),
            "End" if ctrl => Some(NavKey::CtrlEnd),
            "End" => Some(NavKey::End),
            _ => None,
        }
    }
}

/// Computes the selection after `key`. Total: out-of-range input is clamped.
pub fn next_selection(
    current: SelectedCell,
    key: NavKey,
    visible_columns: &[usize],
    row_count: usize,
) -> SelectedCell {
    let (Some(&first), Some(&last)) = (visible_columns.first(), visible_columns.last()) else {
        return current;
    };
    let last_row = row_count.saturating_sub(1);
    let row = current.row.min(last_row);
    let index = visible_index(visible_columns, current.column);

    match key {
        NavKey::Up => SelectedCell::new(row.saturating_sub(1), current.column),
        NavKey::Down => SelectedCell::new((row + 1).min(last_row), current.column),
        NavKey::Left => SelectedCell::new(row, visible_columns[index.saturating_sub(1)]),
        NavKey::Right => {
            let next = (index + 1).min(visible_columns.len() - 1);
            SelectedCell::new(row, visible_columns[next])
        }
        NavKey::Tab => {
            if index + 1 < visible_columns.len() {
                SelectedCell::new(row, visible_columns[index + 1])
            } else {
                SelectedCell::new((row + 1).min(last_row), first)
            }
        }
        NavKey::ShiftTab => {
            if index > 0 {
                SelectedCell::new(row, visible_columns[index - 1])
            } else if row == 0 {
                SelectedCell::new(last_row, last)
            } else {
                SelectedCell::new(row - 1, last)
            }
        }
        NavKey::Home => SelectedCell::new(row, first),
        NavKey::End => SelectedCell::new(row, last),
        NavKey::CtrlHome => SelectedCell::new(0, first),
        NavKey::CtrlEnd => SelectedCell::new(last_row, last),
    }
}

/// Position of `column` in the visible list. A hidden column resolves to the
/// nearest visible column before it.
fn visible_index(visible_columns: &[usize], column: usize) -> usize {
    match visible_columns.binary_search(&column) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    }
}
