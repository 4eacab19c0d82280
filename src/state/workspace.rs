use thiserror::Error;
use tracing::{debug, info};

use crate::state::address;
use crate::state::cell::{Cell, CellValue};
use crate::state::navigation::{self, NavKey};
use crate::state::projection::{self, ProjectedView};
use crate::state::seed::SeedConfig;
use crate::state::sheet::{HeaderGroup, Sheet};
use crate::state::view_state::{SelectedCell, ViewState};

const FALLBACK_SHEET_ID: &str = "sheet-1";
const FALLBACK_SHEET_NAME: &str = "Sheet 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("unknown sheet `{0}`")]
    UnknownSheet(String),
    #[error("a workspace needs at least one sheet")]
    NoSheets,
}

/// All sheets plus the active one and its transient view state.
///
/// Mutating methods take `&mut self` and are not reentrant; the UI owns the
/// workspace behind a single signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Workspace {
    sheets: Vec<Sheet>,
    active: usize,
    view: ViewState,
}

impl Workspace {
    /// Builds one sheet per configured tab. An empty configuration still yields a
    /// single blank sheet.
    pub fn from_seed(seed: &SeedConfig) -> Self {
        let headers = seed.column_names();
        let groups: Vec<HeaderGroup> = seed
            .header_groups
            .iter()
            .filter_map(|group| {
                let indices: Vec<usize> = group
                    .columns
                    .iter()
                    .filter_map(|name| seed.column_index(name))
                    .collect();
                Some(HeaderGroup {
                    label: group.label.clone(),
                    from_column: *indices.iter().min()?,
                    to_column: *indices.iter().max()?,
                    color: group.color.clone(),
                })
            })
            .collect();

        let mut sheets: Vec<Sheet> = seed
            .tabs
            .iter()
            .map(|tab| {
                let header_rows = seed.header_rows.clamp(1, 2);
                let rows = (tab.rows.len() + header_rows).max(seed.min_rows);
                let mut sheet = Sheet::new(&tab.id, &tab.name, &headers, header_rows, rows)
                    .with_header_groups(groups.clone());
                for (offset, values) in tab.rows.iter().enumerate() {
                    for (column, value) in values.iter().enumerate() {
                        let kind = seed.columns.get(column).map(|c| c.kind).unwrap_or_default();
                        sheet.put_cell(header_rows + offset, column, Cell::new(value.clone(), kind));
                    }
                }
                sheet
            })
            .collect();

        if sheets.is_empty() {
            sheets.push(Sheet::new(
                FALLBACK_SHEET_ID,
                FALLBACK_SHEET_NAME,
                &headers,
                seed.header_rows,
                seed.min_rows,
            ));
        }

        let view = ViewState::with_selected_cell(default_selection(&sheets[0]));
        Self {
            sheets,
            active: 0,
            view,
        }
    }

    /// Wraps existing sheets; the first one starts active.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Result<Self, WorkspaceError> {
        let first = sheets.first().ok_or(WorkspaceError::NoSheets)?;
        let view = ViewState::with_selected_cell(default_selection(first));
        Ok(Self {
            sheets,
            active: 0,
            view,
        })
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, id: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.id() == id)
    }

    pub fn active_sheet(&self) -> &Sheet {
        &self.sheets[self.active]
    }

    pub fn active_sheet_id(&self) -> &str {
        self.active_sheet().id()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Switches sheets and resets the view state. Unknown ids are ignored.
    pub fn set_active_sheet(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!(sheet = id, "ignoring switch to unknown sheet");
            return false;
        };
        self.active = index;
        self.reset_view();
        debug!(sheet = id, "switched active sheet");
        true
    }

    /// Writes `value` into sheet `sheet_id`. Unknown ids leave the workspace unchanged.
    pub fn set_cell_value(
        &mut self,
        sheet_id: &str,
        row: usize,
        column: usize,
        value: CellValue,
    ) -> bool {
        match self.sheet_mut(sheet_id) {
            Some(sheet) => sheet.set_cell_value(row, column, value),
            None => false,
        }
    }

    /// Appends a column to `sheet_id` and returns its index.
    pub fn append_column(
        &mut self,
        sheet_id: &str,
        header: &str,
        group: Option<&str>,
    ) -> Result<usize, WorkspaceError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(WorkspaceError::EmptyName);
        }
        let sheet = self
            .sheet_mut(sheet_id)
            .ok_or_else(|| WorkspaceError::UnknownSheet(sheet_id.to_string()))?;
        let index = sheet.append_column(header, group);
        info!(sheet = sheet_id, column = index, header, "appended column");
        Ok(index)
    }

    /// Appends a column to the active sheet.
    pub fn add_column(&mut self, group: Option<&str>, header: &str) -> Result<usize, WorkspaceError> {
        let id = self.active_sheet_id().to_string();
        self.append_column(&id, header, group)
    }

    /// Creates a sheet copying the header rows and dimensions of `copy_from`, with an
    /// id built from the slugged name and `created_at_millis`. The new sheet becomes
    /// active.
    pub fn append_sheet(
        &mut self,
        name: &str,
        copy_from: &str,
        created_at_millis: u128,
    ) -> Result<String, WorkspaceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::EmptyName);
        }
        let source = self
            .sheet(copy_from)
            .ok_or_else(|| WorkspaceError::UnknownSheet(copy_from.to_string()))?;

        let id = self.unique_id(format!("{}-{created_at_millis}", slugify(name)));
        let sheet = source.clone_headers(id.clone(), name);
        self.sheets.push(sheet);
        self.active = self.sheets.len() - 1;
        self.reset_view();
        info!(sheet = %id, name, "appended sheet");
        Ok(id)
    }

    /// Appends a sheet cloned from the active one.
    pub fn add_sheet(&mut self, name: &str, created_at_millis: u128) -> Result<String, WorkspaceError> {
        let source = self.active_sheet_id().to_string();
        self.append_sheet(name, &source, created_at_millis)
    }

    pub fn projected_view(&self) -> ProjectedView {
        projection::project(
            self.active_sheet(),
            self.view.hidden_columns(),
            self.view.sort_spec(),
        )
    }

    pub fn visible_columns(&self) -> Vec<usize> {
        projection::visible_columns(self.active_sheet().column_count(), self.view.hidden_columns())
    }

    /// Clamps to the active sheet before selecting.
    pub fn select_cell(&mut self, row: usize, column: usize) {
        let sheet = self.active_sheet();
        let row = row.min(sheet.row_count().saturating_sub(1));
        let column = column.min(sheet.column_count().saturating_sub(1));
        self.view.select_cell(row, column);
    }

    pub fn double_click_cell(&mut self, row: usize, column: usize) {
        self.view.double_click_cell(row, column);
    }

    /// Applies a navigation key to the selected cell.
    pub fn handle_key(&mut self, key: NavKey) -> SelectedCell {
        let visible = self.visible_columns();
        let next = navigation::next_selection(
            self.view.selected_cell(),
            key,
            &visible,
            self.active_sheet().row_count(),
        );
        debug!(?key, row = next.row, column = next.column, "navigate");
        self.view.select_cell(next.row, next.column);
        next
    }

    /// Commits editor input at a display position. The display row is mapped back to
    /// its canonical row first, so edits land on the right record while sorted.
    pub fn commit_edit(&mut self, row: usize, column: usize, input: &str) -> bool {
        let view = self.projected_view();
        if view.display(row, column) == input {
            return false;
        }
        let Some(source_row) = view.source_row(row) else {
            return false;
        };
        let id = self.active_sheet_id().to_string();
        self.set_cell_value(&id, source_row, column, CellValue::from_input(input))
    }

    pub fn clear_cell(&mut self, row: usize, column: usize) -> bool {
        self.commit_edit(row, column, "")
    }

    pub fn toggle_sort_indicator(&mut self, column: usize) {
        self.view.toggle_sort_indicator(column);
        debug!(column, spec = ?self.view.sort_spec(), "toggled sort indicator");
    }

    pub fn clear_sort_for_column(&mut self, column: usize) {
        self.view.clear_sort_for_column(column);
    }

    pub fn hide_selected_columns(&mut self) -> bool {
        self.view.hide_selected_columns()
    }

    pub fn show_all_columns(&mut self) {
        self.view.show_all_columns();
    }

    pub fn sort_selected_columns(&mut self) -> bool {
        self.view.sort_selected_columns()
    }

    pub fn set_search(&mut self, query: String) {
        self.view.set_search(query);
    }

    /// Address of the selected cell, for the status bar.
    pub fn selected_address(&self) -> String {
        let selected = self.view.selected_cell();
        address::encode(selected.row, selected.column)
    }

    pub fn total_cells(&self) -> usize {
        let sheet = self.active_sheet();
        sheet.row_count() * sheet.column_count()
    }

    fn reset_view(&mut self) {
        let search = self.view.search_query().to_string();
        self.view = ViewState::with_selected_cell(default_selection(self.active_sheet()));
        self.view.set_search(search);
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.sheets.iter().position(|sheet| sheet.id() == id)
    }

    fn sheet_mut(&mut self, id: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.id() == id)
    }

    fn unique_id(&self, base: String) -> String {
        if self.index_of(&base).is_none() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.index_of(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Lowercases and joins whitespace-separated words with `-`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn default_selection(sheet: &Sheet) -> SelectedCell {
    SelectedCell::new(sheet.header_rows().min(sheet.row_count().saturating_sub(1)), 0)
}
