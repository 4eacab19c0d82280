use dioxus::prelude::{Key, *};

use crate::state::workspace::Workspace;
use crate::ui::actions;

#[component]
pub fn SheetTabs(workspace: Signal<Workspace>, error_message: Signal<Option<String>>) -> Element {
    let mut adding = use_signal(|| false);
    let mut new_sheet = use_signal(String::new);

    let snapshot = workspace.read().clone();
    let active_id = snapshot.active_sheet_id().to_string();
    let tabs: Vec<(String, String)> = snapshot
        .sheets()
        .iter()
        .map(|sheet| (sheet.id().to_string(), sheet.name().to_string()))
        .collect();

    let mut submit = move || {
        let name = new_sheet.read().clone();
        if actions::add_sheet(workspace, error_message, &name) {
            new_sheet.set(String::new());
            adding.set(false);
        }
    };

    rsx! {
        div { class: "sheet-tabs",
            for (id, name) in tabs.into_iter() {
                button {
                    class: if id == active_id { "sheet-tab active" } else { "sheet-tab" },
                    id: "tab-{id}",
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            workspace.with_mut(|ws| ws.set_active_sheet(&id));
                        }
                    },
                    "{name}"
                }
            }
            if *adding.read() {
                input {
                    class: "toolbar-input",
                    id: "input-new-sheet",
                    placeholder: "Sheet name",
                    value: "{new_sheet.read()}",
                    autofocus: true,
                    oninput: move |evt| new_sheet.set(evt.value()),
                    onkeydown: move |evt| match evt.key() {
                        Key::Enter => submit(),
                        Key::Escape => adding.set(false),
                        _ => {}
                    }
                }
                button {
                    class: "toolbar-btn",
                    id: "btn-confirm-add-sheet",
                    onclick: move |_| submit(),
                    "Add"
                }
            } else {
                button {
                    class: "sheet-tab-add",
                    id: "btn-add-sheet",
                    title: "Add Sheet",
                    onclick: move |_| adding.set(true),
                    "+"
                }
            }
        }
    }
}
