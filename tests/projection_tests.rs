use std::collections::BTreeSet;

use sheetgrid::state::cell::{Cell, CellValue};
use sheetgrid::state::projection::{self, visible_columns};
use sheetgrid::state::sheet::Sheet;
use sheetgrid::state::view_state::{SortDirection, SortKey};

/// Header plus the given body rows, padded with `trailing` empty rows.
fn sheet_with_rows(rows: &[[&str; 3]], trailing: usize) -> Sheet {
    let headers: Vec<String> = ["Name", "Team", "Value"].iter().map(|h| h.to_string()).collect();
    let mut sheet = Sheet::new("s", "S", &headers, 1, rows.len() + 1 + trailing);
    for (offset, values) in rows.iter().enumerate() {
        for (column, value) in values.iter().enumerate() {
            if !value.is_empty() {
                sheet.put_cell(offset + 1, column, Cell::text(*value));
            }
        }
    }
    sheet
}

fn column_values(view: &projection::ProjectedView, column: usize) -> Vec<String> {
    (1..view.row_count()).map(|row| view.display(row, column)).collect()
}

#[test]
fn test_visible_columns_is_complement_of_hidden() {
    let hidden = BTreeSet::from([1, 3, 9]);
    let visible = visible_columns(5, &hidden);
    assert_eq!(visible, vec![0, 2, 4]);

    let hidden_in_range = hidden.iter().filter(|c| **c < 5).count();
    assert_eq!(visible.len() + hidden_in_range, 5);
}

#[test]
fn test_numeric_strings_sort_numerically() {
    let sheet = sheet_with_rows(&[["a", "x", "10"], ["b", "x", "9"], ["c", "x", "2"]], 0);
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(2)]);
    assert_eq!(column_values(&view, 2), vec!["2", "9", "10"]);
    assert_eq!(column_values(&view, 0), vec!["c", "b", "a"]);
}

#[test]
fn test_currency_and_separators_are_numeric() {
    let sheet = sheet_with_rows(&[["a", "", "4,500.000"], ["b", "", "$900"], ["c", "", "12,000"]], 0);
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::desc(2)]);
    assert_eq!(column_values(&view, 0), vec!["c", "a", "b"]);
}

#[test]
fn test_text_sort_is_case_insensitive() {
    let sheet = sheet_with_rows(&[["banana", "", ""], ["Apple", "", ""], ["cherry", "", ""]], 0);
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(0)]);
    assert_eq!(column_values(&view, 0), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn test_ties_fall_through_to_next_key() {
    let sheet = sheet_with_rows(
        &[["d", "red", "1"], ["a", "blue", "2"], ["c", "red", "3"], ["b", "blue", "4"]],
        0,
    );
    let view = projection::project(
        &sheet,
        &BTreeSet::new(),
        &[SortKey::asc(1), SortKey::desc(2)],
    );
    assert_eq!(column_values(&view, 0), vec!["b", "a", "c", "d"]);
}

#[test]
fn test_equal_rows_keep_canonical_order() {
    let sheet = sheet_with_rows(
        &[["first", "same", ""], ["second", "same", ""], ["third", "same", ""]],
        0,
    );
    for direction in [SortKey::asc(1), SortKey::desc(1)] {
        let view = projection::project(&sheet, &BTreeSet::new(), &[direction]);
        assert_eq!(column_values(&view, 0), vec!["first", "second", "third"]);
    }
}

#[test]
fn test_empty_sort_spec_returns_canonical_rows() {
    let sheet = sheet_with_rows(&[["z", "", "3"], ["", "", ""], ["a", "", "1"]], 2);
    let view = projection::project(&sheet, &BTreeSet::new(), &[]);
    assert_eq!(view.row_count(), sheet.row_count());
    for row in 0..sheet.row_count() {
        assert_eq!(view.source_row(row), Some(row));
        for column in 0..3 {
            assert_eq!(view.cell(row, column), sheet.cell(row, column));
        }
    }
}

#[test]
fn test_empty_rows_trail_sorted_rows() {
    let sheet = sheet_with_rows(&[["z", "", ""], ["", "", ""], ["a", "", ""]], 2);
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(0)]);

    assert_eq!(view.row_count(), sheet.row_count());
    assert_eq!(column_values(&view, 0), vec!["a", "z", "", "", ""]);
    assert_eq!(view.source_row(1), Some(3));
    assert_eq!(view.source_row(3), Some(2));
}

#[test]
fn test_header_row_never_moves() {
    let sheet = sheet_with_rows(&[["b", "", ""], ["a", "", ""]], 0);
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::desc(0)]);
    assert_eq!(view.display(0, 0), "Name");
    assert_eq!(view.source_row(0), Some(0));
}

#[test]
fn test_second_header_row_is_not_sorted() {
    let headers: Vec<String> = vec!["Name".to_string()];
    let mut sheet = Sheet::new("s", "S", &headers, 2, 5);
    sheet.put_cell(1, 0, Cell::text("zzz sub header"));
    sheet.put_cell(2, 0, Cell::text("b"));
    sheet.put_cell(3, 0, Cell::text("a"));

    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(0)]);
    assert_eq!(view.display(1, 0), "zzz sub header");
    assert_eq!(view.display(2, 0), "a");
    assert_eq!(view.display(3, 0), "b");
}

#[test]
fn test_projection_does_not_mutate_sheet() {
    let sheet = sheet_with_rows(&[["b", "", "2"], ["a", "", "1"]], 1);
    let before = sheet.clone();
    let hidden = BTreeSet::from([1]);
    let _ = projection::project(&sheet, &hidden, &[SortKey::asc(0)]);
    assert_eq!(sheet, before);
}

#[test]
fn test_address_follows_display_position() {
    let sheet = sheet_with_rows(&[["b", "", ""], ["a", "", ""]], 0);
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(0)]);
    assert_eq!(view.display(1, 0), "a");
    assert_eq!(view.address(1, 0), "A2");
}

#[test]
fn test_sort_badges_report_priority() {
    let sheet = sheet_with_rows(&[["a", "", ""]], 0);
    let view = projection::project(
        &sheet,
        &BTreeSet::new(),
        &[SortKey::desc(2), SortKey::asc(0)],
    );
    assert_eq!(view.sort_badge(2), Some((SortDirection::Desc, 1)));
    assert_eq!(view.sort_badge(0), Some((SortDirection::Asc, 2)));
    assert_eq!(view.sort_badge(1), None);
}

#[test]
fn test_number_values_compare_with_numeric_text() {
    let mut sheet = sheet_with_rows(&[["a", "", "15"], ["b", "", ""], ["c", "", "3"]], 0);
    sheet.put_cell(2, 2, Cell::new(CellValue::Number(7.0), Default::default()));
    let view = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(2)]);
    assert_eq!(column_values(&view, 0), vec!["c", "b", "a"]);
}

fn mixed_column_sheet() -> Sheet {
    let headers = vec!["Code".to_string()];
    let mut sheet = Sheet::new("s", "S", &headers, 1, 1);
    let mut row = 1;
    for n in 0..30 {
        for value in [format!("{}", n % 13), format!("{n}x"), format!("1{}", n % 7)] {
            sheet.put_cell(row, 0, Cell::text(value));
            row += 1;
        }
    }
    sheet
}

fn assert_mixed_order(view: &projection::ProjectedView, descending: bool) {
    let keys: Vec<(Option<f64>, String, usize)> = (1..view.row_count())
        .map(|row| {
            let text = view.display(row, 0);
            let source = view.source_row(row).unwrap_or(0);
            (projection::parse_numeric(&text), text.to_lowercase(), source)
        })
        .collect();

    for pair in keys.windows(2) {
        let (a, b) = if descending {
            (&pair[1], &pair[0])
        } else {
            (&pair[0], &pair[1])
        };
        match (a.0, b.0) {
            (Some(x), Some(y)) => assert!(x <= y, "{x} before {y}"),
            (Some(_), None) => {}
            (None, Some(_)) => panic!("text {:?} sorted before number {:?}", a.1, b.1),
            (None, None) => assert!(a.1 <= b.1, "{:?} before {:?}", a.1, b.1),
        }
        if pair[0].0 == pair[1].0 && pair[0].1 == pair[1].1 {
            assert!(pair[0].2 < pair[1].2, "equal values keep canonical order");
        }
    }
}

#[test]
fn test_mixed_numeric_and_code_values_sort_totally() {
    let sheet = mixed_column_sheet();
    assert_eq!(sheet.row_count(), 91);

    let ascending = projection::project(&sheet, &BTreeSet::new(), &[SortKey::asc(0)]);
    assert_eq!(ascending.row_count(), sheet.row_count());
    assert_mixed_order(&ascending, false);
    assert_eq!(ascending.display(1, 0), "0");
    assert_eq!(ascending.display(ascending.row_count() - 1, 0), "9x");

    let descending = projection::project(&sheet, &BTreeSet::new(), &[SortKey::desc(0)]);
    assert_mixed_order(&descending, true);
    assert_eq!(descending.display(1, 0), "9x");
}
