use sheetgrid::state::navigation::{next_selection, NavKey};
use sheetgrid::state::view_state::SelectedCell;

const VISIBLE: [usize; 3] = [0, 2, 4];
const ROWS: usize = 10;

fn step(row: usize, column: usize, key: NavKey) -> (usize, usize) {
    let next = next_selection(SelectedCell::new(row, column), key, &VISIBLE, ROWS);
    (next.row, next.column)
}

#[test]
fn test_tab_past_last_visible_wraps_to_next_row() {
    assert_eq!(step(1, 4, NavKey::Tab), (2, 0));
}

#[test]
fn test_shift_tab_from_origin_wraps_to_bottom_right() {
    assert_eq!(step(0, 0, NavKey::ShiftTab), (ROWS - 1, 4));
}

#[test]
fn test_shift_tab_from_first_column_goes_to_previous_row() {
    assert_eq!(step(5, 0, NavKey::ShiftTab), (4, 4));
}

#[test]
fn test_tab_on_last_row_stays_on_last_row() {
    assert_eq!(step(ROWS - 1, 4, NavKey::Tab), (ROWS - 1, 0));
}

#[test]
fn test_horizontal_moves_skip_hidden_columns() {
    assert_eq!(step(3, 0, NavKey::Right), (3, 2));
    assert_eq!(step(3, 2, NavKey::Tab), (3, 4));
    assert_eq!(step(3, 4, NavKey::Left), (3, 2));
    assert_eq!(step(3, 2, NavKey::ShiftTab), (3, 0));
}

#[test]
fn test_arrows_clamp_at_edges() {
    assert_eq!(step(0, 2, NavKey::Up), (0, 2));
    assert_eq!(step(ROWS - 1, 2, NavKey::Down), (ROWS - 1, 2));
    assert_eq!(step(4, 0, NavKey::Left), (4, 0));
    assert_eq!(step(4, 4, NavKey::Right), (4, 4));
}

#[test]
fn test_vertical_moves_keep_column() {
    assert_eq!(step(4, 2, NavKey::Up), (3, 2));
    assert_eq!(step(4, 2, NavKey::Down), (5, 2));
}

#[test]
fn test_home_and_end_keys() {
    assert_eq!(step(6, 2, NavKey::Home), (6, 0));
    assert_eq!(step(6, 2, NavKey::End), (6, 4));
    assert_eq!(step(6, 2, NavKey::CtrlHome), (0, 0));
    assert_eq!(step(6, 2, NavKey::CtrlEnd), (ROWS - 1, 4));
}

#[test]
fn test_result_is_always_in_range() {
    let keys = [
        NavKey::Up,
        NavKey::Down,
        NavKey::Left,
        NavKey::Right,
        NavKey::Tab,
        NavKey::ShiftTab,
        NavKey::Home,
        NavKey::End,
        NavKey::CtrlHome,
        NavKey::CtrlEnd,
    ];
    for row in 0..ROWS {
        for &column in &VISIBLE {
            for key in keys {
                let (next_row, next_column) = step(row, column, key);
                assert!(next_row < ROWS);
                assert!(VISIBLE.contains(&next_column));
            }
        }
    }
}

#[test]
fn test_no_visible_columns_leaves_selection_alone() {
    let current = SelectedCell::new(3, 1);
    assert_eq!(next_selection(current, NavKey::Tab, &[], ROWS), current);
}
