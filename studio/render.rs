//! Page and SSE frame rendering for the studio.
//!
//! The page itself comes from the library's dashboard template; the studio
//! only fills in the controls, the status line and the `EventSource` script
//! that swaps fragments in place by element id.

use serde_json::json;
use training_dashboard::render::{html_escape, render_chart_svg, render_layout_html, render_page};
use training_dashboard::SurfaceEvent;

use crate::state::{LiveView, StudioState, TrainingStatus};
use crate::util::sse::format_sse_event;

const SCRIPT: &str = r#"<script>
(function () {
  var source = new EventSource('/events');
  function swap(e) {
    var frame = JSON.parse(e.data);
    var el = document.getElementById(frame.slot);
    if (el) { el.innerHTML = frame.html; }
  }
  function status(e) {
    var frame = JSON.parse(e.data);
    var el = document.getElementById('status');
    if (el) { el.textContent = frame.text; }
    var running = frame.kind === 'running';
    document.getElementById('start').disabled = running;
    document.getElementById('stop').disabled = !running;
  }
  ['layout', 'chart', 'table'].forEach(function (name) {
    source.addEventListener(name, swap);
  });
  ['status', 'done', 'stopped', 'failed'].forEach(function (name) {
    source.addEventListener(name, status);
  });
})();
</script>"#;

/// Full studio page, showing whatever the current run last displayed.
pub fn dashboard_page(st: &StudioState) -> String {
    let body = match &st.view {
        Some(view) => render_layout_html(&view.layout, &view.charts, &view.table),
        None => "<p class=\"hint\">No run yet. Press Start to begin a synthetic training run.</p>".to_owned(),
    };
    let controls = controls_html(st.training.is_running());
    let status = html_escape(&status_text(&st.training));

    render_page("Training dashboard", |tmpl| {
        tmpl.replace("{{CONTROLS}}", &controls)
            .replace("{{STATUS}}", &status)
            .replace("{{BODY}}", &body)
            .replace("{{SCRIPT}}", SCRIPT)
    })
}

fn controls_html(running: bool) -> String {
    let (start, stop) = if running { (" disabled", "") } else { ("", " disabled") };
    format!(
        r#"<div class="controls">
  <form method="post" action="/train/start"><button id="start" type="submit"{start}>Start</button></form>
  <form method="post" action="/train/stop"><button id="stop" class="stop" type="submit"{stop}>Stop</button></form>
  <form method="get" action="/export"><button type="submit">Export JSON</button></form>
</div>"#,
        start = start,
        stop = stop,
    )
}

// ---------------------------------------------------------------------------
// SSE frames
// ---------------------------------------------------------------------------

fn fragment_frame(event: &str, slot: &str, html: String) -> String {
    let data = json!({ "slot": slot, "html": html });
    format_sse_event(event, &data.to_string())
}

pub fn layout_frame(view: &LiveView) -> String {
    fragment_frame("layout", "dashboard", render_layout_html(&view.layout, &view.charts, &view.table))
}

/// Frame for one dashboard event.
pub fn event_frame(event: &SurfaceEvent) -> String {
    match event {
        SurfaceEvent::Display { layout, charts, table } => {
            fragment_frame("layout", "dashboard", render_layout_html(layout, charts, table))
        }
        SurfaceEvent::Chart { slot, chart } => {
            fragment_frame("chart", &slot.dom_id(), render_chart_svg(chart))
        }
        SurfaceEvent::Table { table } => fragment_frame("table", "history-table", table.to_html()),
    }
}

/// Frame announcing the training status; finished runs use `done`,
/// `stopped` or `failed` as the event name.
pub fn status_frame(status: &TrainingStatus) -> String {
    let kind = match status {
        TrainingStatus::Idle                                => "idle",
        TrainingStatus::Running { .. }                      => "running",
        TrainingStatus::Done { was_stopped: false, .. }     => "done",
        TrainingStatus::Done { was_stopped: true, .. }      => "stopped",
        TrainingStatus::Failed { .. }                       => "failed",
    };
    let event = match kind {
        "idle" | "running" => "status",
        other => other,
    };
    let data = json!({ "kind": kind, "text": status_text(status) });
    format_sse_event(event, &data.to_string())
}

pub fn status_text(status: &TrainingStatus) -> String {
    match status {
        TrainingStatus::Idle => "Idle".to_owned(),
        TrainingStatus::Running { .. } => "Training...".to_owned(),
        TrainingStatus::Done { epochs_completed, elapsed_total_ms, was_stopped } => format!(
            "{} after {} epoch(s) in {:.1}s",
            if *was_stopped { "Stopped" } else { "Done" },
            epochs_completed,
            *elapsed_total_ms as f64 / 1000.0,
        ),
        TrainingStatus::Failed { reason } => format!("Failed: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RunOptions;
    use training_dashboard::RunConfig;

    #[test]
    fn idle_page_has_controls_and_no_raw_tokens() {
        let st = StudioState::new(RunConfig::new(), RunOptions::default());
        let html = dashboard_page(&st);
        assert!(html.contains("action=\"/train/start\""));
        assert!(html.contains("new EventSource('/events')"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn finished_runs_use_their_own_event_name() {
        let stopped = TrainingStatus::Done { epochs_completed: 3, elapsed_total_ms: 1500, was_stopped: true };
        let frame = status_frame(&stopped);
        assert!(frame.starts_with("event: stopped\n"));
        assert!(frame.contains("Stopped after 3 epoch(s) in 1.5s"));

        let failed = status_frame(&TrainingStatus::Failed { reason: "boom".into() });
        assert!(failed.starts_with("event: failed\n"));
    }
}
