use dioxus::prelude::*;

use crate::state::workspace::Workspace;

#[component]
pub fn StatusBar(workspace: Signal<Workspace>) -> Element {
    let ws = workspace.read();
    let address = ws.selected_address();
    let total_cells = ws.total_cells();
    let sorted_by = ws.view().sort_spec().len();

    rsx! {
        div { class: "status-bar",
            span { id: "status-cell", "Cell: {address}" }
            if sorted_by > 0 {
                span { "Sorted by {sorted_by} column(s)" }
            }
            span { class: "status-right", "Total cells: {total_cells}" }
        }
    }
}
