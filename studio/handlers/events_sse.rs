use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;
use tiny_http::Request;

use crate::state::SharedState;
use crate::util::sse::{format_sse_keepalive, write_sse, SSE_HEAD};

/// `GET /events`: Server-Sent Events handler.
///
/// Takes ownership of `request` so the raw stream can be written directly.
/// After the head, the current layout and status are replayed; then every
/// broadcast frame is forwarded, with a `: ping` comment after 500 ms of
/// silence. Returns once the client goes away.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();
    if !write_sse(&mut writer, SSE_HEAD) {
        return;
    }

    let (replay, rx) = {
        let mut st = state.lock().unwrap();
        (st.replay(), st.subscribe())
    };

    for frame in &replay {
        if !write_sse(&mut writer, frame) {
            return;
        }
    }

    loop {
        let msg = match rx.recv_timeout(Duration::from_millis(500)) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => format_sse_keepalive().to_owned(),
            Err(RecvTimeoutError::Disconnected) => return,
        };
        if !write_sse(&mut writer, &msg) {
            // The next broadcast drops our sender.
            return;
        }
    }
}
