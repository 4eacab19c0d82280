use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::state::address;
use crate::state::cell::{display_value, Cell, CellValue};
use crate::state::sheet::Sheet;
use crate::state::view_state::{SortDirection, SortKey};

/// Read-only view of a sheet after hiding and sorting. Built fresh from the canonical
/// sheet; positions here are display positions, not canonical ones.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedView {
    visible_columns: Vec<usize>,
    header_rows: usize,
    column_count: usize,
    rows: Vec<Vec<Cell>>,
    source_rows: Vec<usize>,
    sort_spec: Vec<SortKey>,
}

impl ProjectedView {
    pub fn visible_columns(&self) -> &[usize] {
        &self.visible_columns
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    pub fn display(&self, row: usize, column: usize) -> String {
        self.cell(row, column).map(Cell::display).unwrap_or_default()
    }

    /// Address of a display position, derived from the position itself.
    pub fn address(&self, row: usize, column: usize) -> String {
        address::encode(row, column)
    }

    /// Canonical sheet row shown at display row `row`.
    pub fn source_row(&self, row: usize) -> Option<usize> {
        self.source_rows.get(row).copied()
    }

    /// Direction and 1-based priority of the sort key on `column`, if any.
    pub fn sort_badge(&self, column: usize) -> Option<(SortDirection, usize)> {
        self.sort_spec
            .iter()
            .position(|key| key.column == column)
            .map(|idx| (self.sort_spec[idx].direction, idx + 1))
    }
}

/// Columns `[0, column_count)` minus `hidden`, ascending.
pub fn visible_columns(column_count: usize, hidden: &BTreeSet<usize>) -> Vec<usize> {
    (0..column_count).filter(|c| !hidden.contains(c)).collect()
}

pub fn project(sheet: &Sheet, hidden: &BTreeSet<usize>, sort_spec: &[SortKey]) -> ProjectedView {
    let row_count = sheet.row_count();
    let header_rows = sheet.header_rows().min(row_count);
    let order = if sort_spec.is_empty() {
        (0..row_count).collect()
    } else {
        sorted_row_order(sheet, header_rows, sort_spec)
    };

    let rows = order
        .iter()
        .map(|&row| sheet.row(row).map(<[Cell]>::to_vec).unwrap_or_default())
        .collect();

    ProjectedView {
        visible_columns: visible_columns(sheet.column_count(), hidden),
        header_rows,
        column_count: sheet.column_count(),
        rows,
        source_rows: order,
        sort_spec: sort_spec.to_vec(),
    }
}

/// Header rows in place, then non-empty body rows stably sorted, then the empty
/// body rows in their original order.
fn sorted_row_order(sheet: &Sheet, header_rows: usize, sort_spec: &[SortKey]) -> Vec<usize> {
    let (filled, empty): (Vec<usize>, Vec<usize>) = (header_rows..sheet.row_count())
        .partition(|&row| {
            sheet
                .row(row)
                .map(|cells| cells.iter().any(|cell| !cell.is_empty()))
                .unwrap_or(false)
        });

    let mut keyed: Vec<(usize, Vec<SortValue>)> = filled
        .into_iter()
        .map(|row| {
            let keys = sort_spec
                .iter()
                .map(|key| SortValue::of(sheet.cell(row, key.column).map(|cell| &cell.value)))
                .collect();
            (row, keys)
        })
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_keys(a, b, sort_spec));

    let mut order: Vec<usize> = (0..header_rows).collect();
    order.extend(keyed.into_iter().map(|(row, _)| row));
    order.extend(empty);
    order
}

fn compare_keys(left: &[SortValue], right: &[SortValue], sort_spec: &[SortKey]) -> Ordering {
    for ((a, b), key) in left.iter().zip(right).zip(sort_spec) {
        let ordering = match key.direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sort key of one cell. Numbers order before text; numbers compare by value and
/// text compares case-insensitively, so mixed columns still form a total order.
#[derive(Clone, Debug, PartialEq)]
enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn of(value: Option<&CellValue>) -> Self {
        let text = value.map(display_value).unwrap_or_default();
        match parse_numeric(&text) {
            Some(n) => SortValue::Number(n),
            None => SortValue::Text(text.to_lowercase()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
        }
    }
}

/// Numbers before text; numbers by value, text case-insensitively.
pub fn compare_values(left: Option<&CellValue>, right: Option<&CellValue>) -> Ordering {
    SortValue::of(left).compare(&SortValue::of(right))
}

/// Parses `"$4,500.00"`-style text, ignoring thousands separators and dollar signs.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|ch| !matches!(ch, ',' | '$')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_strips_currency_and_separators() {
        assert_eq!(parse_numeric("4,500.000"), Some(4500.0));
        assert_eq!(parse_numeric("$1,200"), Some(1200.0));
        assert_eq!(parse_numeric(" 7 "), Some(7.0));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("15-10-2024"), None);
        assert_eq!(parse_numeric("inf"), None);
    }

    #[test]
    fn numbers_order_before_text() {
        let ten = CellValue::text("10");
        let word = CellValue::text("apple");
        assert_eq!(compare_values(Some(&ten), Some(&word)), Ordering::Less);
        assert_eq!(
            compare_values(Some(&CellValue::text("B")), Some(&CellValue::text("a"))),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(Some(&CellValue::text("1x")), Some(&CellValue::text("9"))),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(Some(&CellValue::Number(9.0)), Some(&CellValue::text("10"))),
            Ordering::Less
        );
    }
}
