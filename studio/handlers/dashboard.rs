use crate::render::dashboard_page;
use crate::routes::{html_response, BodyResponse};
use crate::state::SharedState;

/// `GET /`: the dashboard page with the current run replayed into it.
pub fn handle_get(state: SharedState) -> BodyResponse {
    let html = {
        let st = state.lock().unwrap();
        dashboard_page(&st)
    };
    html_response(html)
}
