use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::cell::{Cell, CellKind, CellValue};

/// Placeholder written into the sub-header row of appended columns.
pub const SUB_HEADER_PLACEHOLDER: &str = " ";

/// Group label used for columns added without a group name.
pub const UNGROUPED_LABEL: &str = " ";

/// Decorative band spanning columns `from_column..=to_column` above the headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGroup {
    pub label: String,
    pub from_column: usize,
    pub to_column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HeaderGroup {
    pub fn span(&self) -> usize {
        self.to_column.saturating_sub(self.from_column) + 1
    }

    pub fn contains(&self, column: usize) -> bool {
        (self.from_column..=self.to_column).contains(&column)
    }
}

/// Canonical grid of one sheet. Rows only grow; every row holds exactly
/// `column_count` cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    id: String,
    name: String,
    header_rows: usize,
    column_count: usize,
    rows: Vec<Vec<Cell>>,
    #[serde(default)]
    header_groups: Vec<HeaderGroup>,
}

impl Sheet {
    /// Builds a sheet with `headers` in row 0 and empty cells everywhere else.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        headers: &[String],
        header_rows: usize,
        row_count: usize,
    ) -> Self {
        let header_rows = header_rows.clamp(1, 2);
        let column_count = headers.len();
        let row_count = row_count.max(header_rows + 1);
        let mut rows = vec![vec![Cell::empty(); column_count]; row_count];
        rows[0] = headers.iter().map(|h| Cell::text(h.clone())).collect();
        if header_rows == 2 {
            rows[1] = vec![Cell::text(SUB_HEADER_PLACEHOLDER); column_count];
        }
        Self {
            id: id.into(),
            name: name.into(),
            header_rows,
            column_count,
            rows,
            header_groups: Vec::new(),
        }
    }

    pub fn with_header_groups(mut self, header_groups: Vec<HeaderGroup>) -> Self {
        self.header_groups = header_groups;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn header_groups(&self) -> &[HeaderGroup] {
        &self.header_groups
    }

    /// Band covering `column`, if any.
    pub fn header_group_for(&self, column: usize) -> Option<&HeaderGroup> {
        self.header_groups.iter().find(|group| group.contains(column))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Missing positions read as `None`; callers treat that as an empty text cell.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn header_label(&self, column: usize) -> Option<String> {
        self.cell(0, column)
            .filter(|cell| !cell.is_empty())
            .map(Cell::display)
    }

    /// Places a seeded value with an explicit kind, growing the grid to fit.
    pub fn put_cell(&mut self, row: usize, column: usize, cell: Cell) {
        if column >= self.column_count {
            return;
        }
        while self.rows.len() <= row {
            self.push_empty_row();
        }
        self.rows[row][column] = cell;
    }

    /// Writes an edited value. The kind is re-inferred as number or text. Writing a
    /// non-empty value into the last row appends one empty row.
    pub fn set_cell_value(&mut self, row: usize, column: usize, value: CellValue) -> bool {
        if row >= self.rows.len() || column >= self.column_count {
            debug!(sheet = %self.id, row, column, "ignoring write outside grid");
            return false;
        }

        let kind = match value {
            CellValue::Number(_) => CellKind::Number,
            _ => CellKind::Text,
        };
        let grows = row == self.rows.len() - 1 && !value.is_empty();
        self.rows[row][column] = Cell::new(value, kind);

        if grows {
            self.push_empty_row();
            debug!(sheet = %self.id, rows = self.rows.len(), "grew sheet after last-row edit");
        }
        true
    }

    /// Appends a column labelled `header` under header group `group` and returns its
    /// index. A blank group name files the column under [`UNGROUPED_LABEL`].
    pub fn append_column(&mut self, header: &str, group: Option<&str>) -> usize {
        let index = self.column_count;
        self.column_count += 1;
        for (row_index, row) in self.rows.iter_mut().enumerate() {
            let cell = if row_index == 0 {
                Cell::text(header)
            } else if row_index < self.header_rows {
                Cell::text(SUB_HEADER_PLACEHOLDER)
            } else {
                Cell::empty()
            };
            row.push(cell);
        }
        self.merge_into_group(index, group);
        index
    }

    /// Extends the band with the same label when it ends at the previous last column,
    /// otherwise opens a new one-column band.
    fn merge_into_group(&mut self, column: usize, group: Option<&str>) {
        let label = match group.map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => UNGROUPED_LABEL.to_string(),
        };

        let tail = self
            .header_groups
            .iter_mut()
            .filter(|band| band.to_column + 1 == column)
            .find(|band| band.label == label);
        match tail {
            Some(band) => band.to_column = column,
            None => self.header_groups.push(HeaderGroup {
                label,
                from_column: column,
                to_column: column,
                color: None,
            }),
        }
    }

    /// New sheet sharing this sheet's header rows and dimensions, with an empty body.
    pub fn clone_headers(&self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut rows = vec![vec![Cell::empty(); self.column_count]; self.rows.len()];
        for (row_index, row) in self.rows.iter().take(self.header_rows).enumerate() {
            rows[row_index] = row.clone();
        }
        Self {
            id: id.into(),
            name: name.into(),
            header_rows: self.header_rows,
            column_count: self.column_count,
            rows,
            header_groups: self.header_groups.clone(),
        }
    }

    fn push_empty_row(&mut self) {
        self.rows.push(vec![Cell::empty(); self.column_count]);
    }
}
