use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Asc => "\u{2191}",
            SortDirection::Desc => "\u{2193}",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectedCell {
    pub row: usize,
    pub column: usize,
}

impl SelectedCell {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Transient per-sheet view state. Replaced wholesale when the active sheet changes.
///
/// Column multi-select (`selected_columns`) and the single selected cell are
/// independent slices; the only coupling is that selecting a body cell clears
/// the column selection.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ViewState {
    selected_cell: SelectedCell,
    selected_columns: Vec<usize>,
    hidden_columns: BTreeSet<usize>,
    sort_spec: Vec<SortKey>,
    search_query: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected_cell(selected_cell: SelectedCell) -> Self {
        Self {
            selected_cell,
            ..Self::default()
        }
    }

    pub fn selected_cell(&self) -> SelectedCell {
        self.selected_cell
    }

    pub fn selected_columns(&self) -> &[usize] {
        &self.selected_columns
    }

    pub fn is_column_selected(&self, column: usize) -> bool {
        self.selected_columns.contains(&column)
    }

    pub fn hidden_columns(&self) -> &BTreeSet<usize> {
        &self.hidden_columns
    }

    pub fn sort_spec(&self) -> &[SortKey] {
        &self.sort_spec
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Row 0 toggles the column in the multi-select; any other row clears it.
    pub fn select_cell(&mut self, row: usize, column: usize) {
        self.selected_cell = SelectedCell::new(row, column);
        if row == 0 {
            if let Some(pos) = self.selected_columns.iter().position(|c| *c == column) {
                self.selected_columns.remove(pos);
            } else {
                self.selected_columns.push(column);
            }
        } else {
            self.selected_columns.clear();
        }
    }

    /// Double-clicking a header deselects its column and leaves the selected cell alone.
    pub fn double_click_cell(&mut self, row: usize, column: usize) {
        if row == 0 {
            self.selected_columns.retain(|c| *c != column);
        }
    }

    pub fn hide_selected_columns(&mut self) -> bool {
        if self.selected_columns.is_empty() {
            return false;
        }
        self.hidden_columns.extend(self.selected_columns.drain(..));
        true
    }

    pub fn show_all_columns(&mut self) {
        self.hidden_columns.clear();
    }

    /// Adds every selected column not already sorted as an ascending key.
    pub fn sort_selected_columns(&mut self) -> bool {
        if self.selected_columns.is_empty() {
            return false;
        }
        for column in std::mem::take(&mut self.selected_columns) {
            if !self.sort_spec.iter().any(|key| key.column == column) {
                self.sort_spec.push(SortKey::asc(column));
            }
        }
        true
    }

    /// Flips an existing key's direction or appends a new ascending key.
    pub fn toggle_sort_indicator(&mut self, column: usize) {
        match self.sort_spec.iter_mut().find(|key| key.column == column) {
            Some(key) => key.direction = key.direction.toggled(),
            None => self.sort_spec.push(SortKey::asc(column)),
        }
    }

    pub fn clear_sort_for_column(&mut self, column: usize) {
        self.sort_spec.retain(|key| key.column != column);
    }

    pub fn set_sort_spec(&mut self, sort_spec: Vec<SortKey>) {
        let mut seen = BTreeSet::new();
        self.sort_spec = sort_spec
            .into_iter()
            .filter(|key| seen.insert(key.column))
            .collect();
    }

    pub fn set_hidden_columns(&mut self, hidden: impl IntoIterator<Item = usize>) {
        self.hidden_columns = hidden.into_iter().collect();
    }

    /// Stores the query as typed; a blank query disables matching.
    pub fn set_search(&mut self, query: String) {
        self.search_query = query;
    }

    pub fn matches_search(&self, display: &str) -> bool {
        if self.search_query.trim().is_empty() {
            return false;
        }
        display
            .to_lowercase()
            .contains(&self.search_query.to_lowercase())
    }
}
