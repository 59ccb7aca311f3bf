use training_dashboard::HistoryExport;

use crate::routes::{json_download_response, not_found, BodyResponse};
use crate::state::SharedState;

/// `GET /export`: the loss/metrics history as a JSON download.
///
/// While a run is in progress the history is read back from the table it
/// last rendered.
pub fn handle_export(state: SharedState) -> BodyResponse {
    let export = {
        let st = state.lock().unwrap();
        match (&st.history, &st.view) {
            (Some(history), _) => Some(history.clone()),
            (None, Some(view)) => Some(HistoryExport::from_table(&view.table)),
            (None, None) => None,
        }
    };

    match export.map(|e| e.to_json()) {
        Some(Ok(json)) => json_download_response(json, "history.json"),
        _ => not_found(),
    }
}
