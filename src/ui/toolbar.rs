use dioxus::prelude::*;

use crate::state::workspace::Workspace;
use crate::ui::actions;

#[component]
pub fn Toolbar(
    workspace: Signal<Workspace>,
    error_message: Signal<Option<String>>,
    export_success: Signal<bool>,
) -> Element {
    let snapshot = workspace.read().clone();
    let view = snapshot.view();
    let has_selection = !view.selected_columns().is_empty();
    let hidden_count = view.hidden_columns().len();
    let search_query_value = view.search_query().to_string();

    rsx! {
        div { class: "toolbar",
            // Column group
            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-hide-fields",
                    disabled: !has_selection,
                    onclick: move |_| {
                        workspace.with_mut(|ws| ws.hide_selected_columns());
                    },
                    "\u{1F441} Hide fields"
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-show-all",
                    disabled: hidden_count == 0,
                    onclick: move |_| {
                        workspace.with_mut(|ws| ws.show_all_columns());
                    },
                    if hidden_count > 0 {
                        "Show all ({hidden_count})"
                    } else {
                        "Show all"
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-sort",
                    disabled: !has_selection,
                    onclick: move |_| {
                        workspace.with_mut(|ws| ws.sort_selected_columns());
                    },
                    "\u{21C5} Sort"
                }
            }
            div { class: "toolbar-separator" }

            // Search group
            div { class: "toolbar-group",
                input {
                    class: "toolbar-input",
                    id: "input-search-query",
                    placeholder: "Search within sheet",
                    value: "{search_query_value}",
                    oninput: move |evt| {
                        let query = evt.value();
                        workspace.with_mut(|ws| ws.set_search(query));
                    }
                }
            }
            div { class: "toolbar-separator" }

            // Export group
            div { class: "toolbar-group",
                button {
                    class: "toolbar-btn",
                    id: "btn-export",
                    onclick: move |_| {
                        spawn(async move {
                            if actions::export_csv(workspace, error_message).await {
                                export_success.set(true);
                                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                                export_success.set(false);
                            }
                        });
                    },
                    "\u{2B07} Export"
                }
                if *export_success.read() {
                    span { class: "save-success", "\u{2714} Exported" }
                }
            }

            div { class: "toolbar-info",
                if let Some(err) = error_message.read().as_ref() {
                    span { class: "error-message", "{err}" }
                }
            }
        }
    }
}

#[component]
pub fn AddColumnDialog(
    workspace: Signal<Workspace>,
    error_message: Signal<Option<String>>,
    open: Signal<bool>,
) -> Element {
    let mut group_name = use_signal(String::new);
    let mut column_name = use_signal(String::new);

    if !*open.read() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| open.set(false),
            div {
                class: "modal",
                id: "add-column-dialog",
                onclick: move |evt| evt.stop_propagation(),
                h2 { "Add New Column" }
                input {
                    class: "toolbar-input",
                    id: "input-column-group",
                    placeholder: "Enter group name (Optional)",
                    value: "{group_name.read()}",
                    autofocus: true,
                    oninput: move |evt| group_name.set(evt.value()),
                }
                input {
                    class: "toolbar-input",
                    id: "input-column-name",
                    placeholder: "Enter column name",
                    value: "{column_name.read()}",
                    oninput: move |evt| column_name.set(evt.value()),
                }
                div { class: "modal-actions",
                    button {
                        class: "toolbar-btn",
                        onclick: move |_| open.set(false),
                        "Cancel"
                    }
                    button {
                        class: "toolbar-btn toolbar-btn-primary",
                        id: "btn-confirm-add-column",
                        onclick: move |_| {
                            let group = group_name.read().clone();
                            let header = column_name.read().clone();
                            if actions::add_column(workspace, error_message, &group, &header) {
                                group_name.set(String::new());
                                column_name.set(String::new());
                                open.set(false);
                            }
                        },
                        "Add Column"
                    }
                }
            }
        }
    }
}
