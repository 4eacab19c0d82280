use std::time::{SystemTime, UNIX_EPOCH};

use dioxus::prelude::*;
use tracing::warn;

use crate::io::csv_export;
use crate::state::workspace::Workspace;

/// Asks for a destination and writes the active sheet's projected view as CSV.
/// Returns `true` once the file is written.
pub async fn export_csv(
    workspace: Signal<Workspace>,
    mut error_message: Signal<Option<String>>,
) -> bool {
    let (file_name, content) = {
        let ws = workspace.read();
        let view = ws.projected_view();
        (
            csv_export::export_file_name(ws.active_sheet().name()),
            csv_export::to_csv(&view),
        )
    };
    let content = match content {
        Ok(content) => content,
        Err(err) => {
            warn!(error = %err, "csv serialization failed");
            error_message.set(Some(err.to_string()));
            return false;
        }
    };

    let Some(handle) = rfd::AsyncFileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(file_name)
        .save_file()
        .await
    else {
        return false;
    };

    match csv_export::save_csv(handle.path(), &content) {
        Ok(()) => {
            error_message.set(None);
            true
        }
        Err(err) => {
            warn!(error = %err, "csv export failed");
            error_message.set(Some(err.to_string()));
            false
        }
    }
}

pub fn add_column(
    mut workspace: Signal<Workspace>,
    mut error_message: Signal<Option<String>>,
    group: &str,
    header: &str,
) -> bool {
    let group = Some(group).filter(|g| !g.trim().is_empty());
    match workspace.with_mut(|ws| ws.add_column(group, header)) {
        Ok(_) => {
            error_message.set(None);
            true
        }
        Err(err) => {
            error_message.set(Some(format!("Column {err}")));
            false
        }
    }
}

pub fn add_sheet(
    mut workspace: Signal<Workspace>,
    mut error_message: Signal<Option<String>>,
    name: &str,
) -> bool {
    match workspace.with_mut(|ws| ws.add_sheet(name, now_millis())) {
        Ok(_) => {
            error_message.set(None);
            true
        }
        Err(err) => {
            error_message.set(Some(format!("Sheet {err}")));
            false
        }
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
