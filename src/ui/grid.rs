use dioxus::prelude::{Key, *};

use crate::state::cell::{self, Cell, CellKind, PriorityTone, StatusTone};
use crate::state::navigation::NavKey;
use crate::state::projection::ProjectedView;
use crate::state::sheet::Sheet;
use crate::state::view_state::{SelectedCell, SortDirection, ViewState};
use crate::state::workspace::Workspace;

#[derive(Clone, PartialEq)]
struct EditingCell {
    row: usize,
    column: usize,
    draft: String,
}

#[derive(Clone, PartialEq)]
struct HeaderBand {
    label: String,
    color: String,
    span: usize,
}

#[component]
pub fn Grid(workspace: Signal<Workspace>, on_add_column: EventHandler<()>) -> Element {
    let editing = use_signal::<Option<EditingCell>>(|| None);
    let snapshot = workspace.read().clone();
    let view = snapshot.projected_view();
    let state = snapshot.view().clone();
    let columns = view.visible_columns().to_vec();
    let bands = header_bands(snapshot.active_sheet(), &columns);

    rsx! {
        div {
            class: "grid-container",
            id: "grid-container",
            tabindex: "0",
            onkeydown: move |evt| handle_grid_key(evt, workspace, editing),
            table { class: "grid",
                thead {
                    if !bands.is_empty() {
                        tr { class: "group-row",
                            th { class: "row-number" }
                            for band in bands.iter() {
                                th {
                                    class: "group-band group-{band.color}",
                                    colspan: "{band.span}",
                                    "{band.label}"
                                }
                            }
                            th { class: "add-column-cell" }
                        }
                    }
                    tr {
                        th { class: "row-number", "#" }
                        for column in columns.iter().copied() {
                            HeaderCell {
                                column,
                                label: view.display(0, column),
                                badge: view.sort_badge(column),
                                is_selected: state.is_column_selected(column),
                                workspace,
                            }
                        }
                        th { class: "add-column-cell",
                            button {
                                class: "add-column-btn",
                                id: "btn-add-column",
                                title: "Add Column",
                                onclick: move |_| on_add_column.call(()),
                                "+"
                            }
                        }
                    }
                }
                tbody {
                    for row in 1..view.row_count() {
                        GridRow {
                            row,
                            cells: row_cells(&view, row),
                            sub_header: row < view.header_rows(),
                            view_state: state.clone(),
                            workspace,
                            editing,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn HeaderCell(
    column: usize,
    label: String,
    #[props(!optional)]
    badge: Option<(SortDirection, usize)>,
    is_selected: bool,
    workspace: Signal<Workspace>,
) -> Element {
    let label = if label.trim().is_empty() {
        format!("Column {}", column + 1)
    } else {
        label
    };
    let class = if is_selected {
        "header-cell selected-col"
    } else {
        "header-cell"
    };

    rsx! {
        th {
            class,
            id: "col-{column}",
            onclick: move |_| {
                workspace.with_mut(|ws| ws.select_cell(0, column));
            },
            ondoubleclick: move |_| {
                workspace.with_mut(|ws| ws.double_click_cell(0, column));
            },
            span { class: "header-label", "{label}" }
            if let Some((direction, priority)) = badge {
                span {
                    class: "sort-badge",
                    id: "sort-badge-{column}",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        workspace.with_mut(|ws| ws.toggle_sort_indicator(column));
                    },
                    "{direction.glyph()}"
                    span { class: "sort-priority", "{priority}" }
                }
                button {
                    class: "clear-sort-btn",
                    title: "Clear sort",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        workspace.with_mut(|ws| ws.clear_sort_for_column(column));
                    },
                    "\u{2715}"
                }
            }
        }
    }
}

#[component]
fn GridRow(
    row: usize,
    cells: Vec<(usize, Cell)>,
    sub_header: bool,
    view_state: ViewState,
    workspace: Signal<Workspace>,
    editing: Signal<Option<EditingCell>>,
) -> Element {
    let row_class = if sub_header { "sub-header-row" } else { "body-row" };
    let selected = view_state.selected_cell();
    let search_query = view_state.search_query().to_string();

    rsx! {
        tr { class: row_class, id: "row-{row}",
            td { class: "row-number", "{row}" }
            for (column, cell) in cells.into_iter() {
                if editing
                    .read()
                    .as_ref()
                    .map(|edit| edit.row == row && edit.column == column)
                    .unwrap_or(false)
                {
                    td { class: "editing-cell",
                        input {
                            class: "cell-input",
                            id: "cell-input-{row}-{column}",
                            value: "{editing.read().as_ref().map(|edit| edit.draft.clone()).unwrap_or_default()}",
                            autofocus: true,
                            oninput: move |evt| {
                                let value = evt.value();
                                editing.with_mut(|edit| {
                                    if let Some(edit) = edit {
                                        edit.draft = value;
                                    }
                                });
                            },
                            onblur: move |_| commit_edit(workspace, editing),
                            onkeydown: move |evt| {
                                evt.stop_propagation();
                                match evt.key() {
                                    Key::Enter => {
                                        evt.prevent_default();
                                        commit_edit(workspace, editing);
                                    }
                                    Key::Escape => {
                                        evt.prevent_default();
                                        editing.set(None);
                                    }
                                    Key::Tab => {
                                        evt.prevent_default();
                                        commit_edit(workspace, editing);
                                        let key = if evt.modifiers().shift() {
                                            NavKey::ShiftTab
                                        } else {
                                            NavKey::Tab
                                        };
                                        workspace.with_mut(|ws| ws.handle_key(key));
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                } else {
                    td {
                        class: cell_class(
                            selected == SelectedCell::new(row, column),
                            view_state.is_column_selected(column),
                            view_state.matches_search(&cell.display()),
                        ),
                        id: "cell-{row}-{column}",
                        onclick: move |_| {
                            workspace.with_mut(|ws| ws.select_cell(row, column));
                        },
                        ondoubleclick: {
                            let draft = cell.display();
                            move |_| {
                                workspace.with_mut(|ws| ws.double_click_cell(row, column));
                                editing.set(Some(EditingCell {
                                    row,
                                    column,
                                    draft: draft.clone(),
                                }));
                            }
                        },
                        CellContent { cell: cell.clone(), search_query: search_query.clone() }
                    }
                }
            }
            td { class: "add-column-cell" }
        }
    }
}

#[component]
fn CellContent(cell: Cell, search_query: String) -> Element {
    let text = cell.display();
    if text.is_empty() {
        return rsx! {};
    }
    let segments = highlight_segments(&text, &search_query);
    let body = rsx! {
        for (part, matched) in segments.into_iter() {
            if matched {
                mark { class: "search-mark", "{part}" }
            } else {
                "{part}"
            }
        }
    };

    let status = status_class(cell::status_tone(&text));
    let priority = priority_class(cell::priority_tone(&text));

    match cell.classify() {
        CellKind::Url => rsx! {
            a {
                class: "cell-link",
                href: "{text}",
                target: "_blank",
                rel: "noopener noreferrer",
                onclick: move |evt| evt.stop_propagation(),
                {body}
            }
        },
        CellKind::Status => rsx! {
            span { class: "status-badge {status}", {body} }
        },
        CellKind::Priority => rsx! {
            span { class: "priority {priority}", {body} }
        },
        CellKind::Number => rsx! {
            span { class: "cell-number", {body} }
        },
        CellKind::Text | CellKind::Date => rsx! {
            span { class: "cell-text", {body} }
        },
    }
}

fn handle_grid_key(
    evt: Event<KeyboardData>,
    mut workspace: Signal<Workspace>,
    mut editing: Signal<Option<EditingCell>>,
) {
    if editing.read().is_some() {
        return;
    }
    let key = evt.key();
    let modifiers = evt.modifiers();

    if let Some(nav) = NavKey::from_key_name(&key.to_string(), modifiers.shift(), modifiers.ctrl()) {
        evt.prevent_default();
        workspace.with_mut(|ws| ws.handle_key(nav));
        return;
    }

    let selected = workspace.read().view().selected_cell();
    if selected.row == 0 {
        return;
    }

    match key {
        Key::Enter | Key::F2 => {
            evt.prevent_default();
            let draft = workspace
                .read()
                .projected_view()
                .display(selected.row, selected.column);
            editing.set(Some(EditingCell {
                row: selected.row,
                column: selected.column,
                draft,
            }));
        }
        Key::Delete | Key::Backspace => {
            evt.prevent_default();
            workspace.with_mut(|ws| ws.clear_cell(selected.row, selected.column));
        }
        Key::Character(ch) if !modifiers.ctrl() && !modifiers.meta() && !modifiers.alt() => {
            evt.prevent_default();
            editing.set(Some(EditingCell {
                row: selected.row,
                column: selected.column,
                draft: ch,
            }));
        }
        _ => {}
    }
}

fn commit_edit(mut workspace: Signal<Workspace>, mut editing: Signal<Option<EditingCell>>) {
    let edit = editing.read().as_ref().cloned();
    if let Some(edit) = edit {
        workspace.with_mut(|ws| {
            ws.commit_edit(edit.row, edit.column, &edit.draft);
        });
    }
    editing.set(None);
}

fn row_cells(view: &ProjectedView, row: usize) -> Vec<(usize, Cell)> {
    view.visible_columns()
        .iter()
        .map(|&column| (column, view.cell(row, column).cloned().unwrap_or_default()))
        .collect()
}

/// Collapses consecutive visible columns belonging to the same band.
fn header_bands(sheet: &Sheet, columns: &[usize]) -> Vec<HeaderBand> {
    if sheet.header_groups().is_empty() {
        return Vec::new();
    }
    let mut bands: Vec<(Option<usize>, HeaderBand)> = Vec::new();
    for &column in columns {
        let group = sheet.header_group_for(column);
        let key = group.map(|g| g.from_column);
        match bands.last_mut() {
            Some((last_key, band)) if *last_key == key => band.span += 1,
            _ => bands.push((
                key,
                HeaderBand {
                    label: group.map(|g| g.label.clone()).unwrap_or_default(),
                    color: group
                        .and_then(|g| g.color.clone())
                        .unwrap_or_else(|| "default".to_string()),
                    span: 1,
                },
            )),
        }
    }
    bands.into_iter().map(|(_, band)| band).collect()
}

fn cell_class(is_selected: bool, column_selected: bool, search_match: bool) -> String {
    let mut classes = vec!["cell"];
    if is_selected {
        classes.push("selected-cell");
    } else if column_selected {
        classes.push("selected-col");
    }
    if search_match {
        classes.push("search-match");
    }
    classes.join(" ")
}

fn status_class(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::InProgress => "status-in-progress",
        StatusTone::NotStarted => "status-not-started",
        StatusTone::Complete => "status-complete",
        StatusTone::Blocked => "status-blocked",
        StatusTone::Neutral => "status-neutral",
    }
}

fn priority_class(tone: PriorityTone) -> &'static str {
    match tone {
        PriorityTone::High => "priority-high",
        PriorityTone::Medium => "priority-medium",
        PriorityTone::Low => "priority-low",
        PriorityTone::Neutral => "priority-neutral",
    }
}

/// Splits `text` into runs, flagging the case-insensitive matches of `query`.
fn highlight_segments(text: &str, query: &str) -> Vec<(String, bool)> {
    if query.trim().is_empty() {
        return vec![(text.to_string(), false)];
    }
    let needle = query.to_lowercase();

    // Lowercasing can change byte lengths, so keep each lowered byte's source offset.
    let mut haystack = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len() + 1);
    for (offset, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            haystack.push(lower);
            origin.extend(std::iter::repeat(offset).take(lower.len_utf8()));
        }
    }
    origin.push(text.len());

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut emitted = 0;
    while let Some(found) = haystack[cursor..].find(&needle) {
        let start = origin[cursor + found].max(emitted);
        cursor += found + needle.len();
        let end = origin[cursor];
        if end <= start {
            continue;
        }
        if start > emitted {
            segments.push((text[emitted..start].to_string(), false));
        }
        segments.push((text[start..end].to_string(), true));
        emitted = end;
    }
    if emitted < text.len() {
        segments.push((text[emitted..].to_string(), false));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_marks_every_case_insensitive_match() {
        assert_eq!(
            highlight_segments("Alpha alp", "ALP"),
            vec![
                ("Alp".to_string(), true),
                ("ha ".to_string(), false),
                ("alp".to_string(), true),
            ]
        );
        assert_eq!(highlight_segments("abc", ""), vec![("abc".to_string(), false)]);
        assert_eq!(highlight_segments("abc", "  "), vec![("abc".to_string(), false)]);
    }

    #[test]
    fn highlight_keeps_original_text_for_non_ascii_matches() {
        assert_eq!(
            highlight_segments("Café ÉCOLE", "école"),
            vec![("Café ".to_string(), false), ("ÉCOLE".to_string(), true)]
        );
        assert_eq!(
            highlight_segments("İx", "x"),
            vec![("İ".to_string(), false), ("x".to_string(), true)]
        );
    }
}
