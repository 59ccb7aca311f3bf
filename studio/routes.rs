use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::state::SharedState;
use crate::handlers;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub type BodyResponse = Response<Cursor<Vec<u8>>>;

fn header(name: &str, value: &str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}

fn body_response(status: u16, headers: Vec<Header>, body: Vec<u8>) -> BodyResponse {
    let len = body.len();
    Response::new(StatusCode(status), headers, Cursor::new(body), Some(len), None)
}

pub fn html_response(body: String) -> BodyResponse {
    body_response(200, vec![header("Content-Type", "text/html; charset=utf-8")], body.into_bytes())
}

/// `303 See Other`, so a form POST lands back on a GET page.
pub fn redirect(location: &str) -> BodyResponse {
    body_response(303, vec![header("Location", location)], Vec::new())
}

pub fn json_download_response(body: String, filename: &str) -> BodyResponse {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    body_response(
        200,
        vec![
            header("Content-Type", "application/json"),
            header("Content-Disposition", &disposition),
        ],
        body.into_bytes(),
    )
}

pub fn not_found() -> BodyResponse {
    body_response(404, vec![header("Content-Type", "text/plain")], b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// The SSE handler takes ownership of the request to stream into it; every
/// other handler returns a response that is sent from here.
pub fn dispatch(request: Request, state: SharedState) {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_owned();

    if method == Method::Get && path == "/events" {
        handlers::events_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get,  "/")            => handlers::dashboard::handle_get(state),
        (Method::Post, "/train/start") => handlers::train::handle_start(state),
        (Method::Post, "/train/stop")  => handlers::train::handle_stop(state),
        (Method::Get,  "/export")      => handlers::export::handle_export(state),
        _ => not_found(),
    };

    let _ = request.respond(response);
}
