use dioxus::prelude::*;

use crate::state::seed::SeedConfig;
use crate::state::workspace::Workspace;
use crate::ui::grid::Grid;
use crate::ui::sheet_tabs::SheetTabs;
use crate::ui::status_bar::StatusBar;
use crate::ui::toolbar::{AddColumnDialog, Toolbar};

const STYLES: Asset = asset!("/assets/styles.css");

#[component]
pub fn App() -> Element {
    let workspace = use_signal(|| Workspace::from_seed(&SeedConfig::from_env()));
    let error_message = use_signal::<Option<String>>(|| None);
    let export_success = use_signal(|| false);
    let mut add_column_open = use_signal(|| false);

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            Toolbar { workspace, error_message, export_success }
            Grid {
                key: "{workspace.read().active_sheet_id()}",
                workspace,
                on_add_column: move |_| add_column_open.set(true),
            }
            StatusBar { workspace }
            SheetTabs { workspace, error_message }
            AddColumnDialog { workspace, error_message, open: add_column_open }
        }
    }
}
