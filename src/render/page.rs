//! Page assembly for the HTML renderers.
//!
//! The page template (`assets/dashboard.html`) is embedded at compile time and
//! carries `{{TOKEN}}` placeholders. Tokens the caller does not fill are
//! blanked so raw `{{TOKEN}}` strings never reach the browser.

use crate::chart::{ChartSet, ChartSlot};
use crate::render::layout::{Layout, LayoutRow};
use crate::render::svg::render_chart_svg;
use crate::table::StyledTable;

const TEMPLATE: &str = include_str!("assets/dashboard.html");

/// Escapes text for element content and attribute values. Braces are
/// escaped too so inserted text can never form a template token.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// Renders the chart grid and the table below it.
///
/// Every chart is wrapped in an element whose id is its slot's `dom_id`, and
/// the table in `#history-table`, so a live page can swap them in place.
pub fn render_layout_html(layout: &Layout, charts: &ChartSet, table: &StyledTable) -> String {
    let chart_cell = |slot: ChartSlot, class: &str| -> String {
        let svg = charts.get(slot).map(render_chart_svg).unwrap_or_default();
        format!("<div class=\"{}\" id=\"{}\">{}</div>", class, slot.dom_id(), svg)
    };

    let rows: String = layout.rows.iter().map(|row| match *row {
        LayoutRow::Pair { left, right } => format!(
            "<div class=\"row pair\">{}{}</div>\n",
            chart_cell(left, "pane"),
            chart_cell(right, "pane"),
        ),
        LayoutRow::Centered { chart } => format!(
            "<div class=\"row centered\">{}</div>\n",
            chart_cell(chart, "pane"),
        ),
    }).collect();

    format!(
        "{}<div class=\"table-box\" id=\"history-table\">{}</div>",
        rows,
        table.to_html()
    )
}

/// Renders the full page.
///
/// `{{TITLE}}` is resolved here; `fill` substitutes the remaining tokens
/// (`{{BODY}}`, `{{REFRESH}}`, `{{STATUS}}`, `{{CONTROLS}}`, `{{SCRIPT}}`).
pub fn render_page<F>(title: &str, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let html = TEMPLATE.replace("{{TITLE}}", &html_escape(title));
    blank_remaining(fill(html))
}

/// Meta tag that makes a browser reload the page every `secs` seconds.
pub fn meta_refresh(secs: u32) -> String {
    format!("<meta http-equiv=\"refresh\" content=\"{}\">", secs)
}

/// Blanks the template's own tokens that `fill` left in place. Only token
/// names present in `TEMPLATE` are touched, so braces inside inserted
/// content survive.
fn blank_remaining(mut html: String) -> String {
    for token in template_tokens() {
        html = html.replace(token, "");
    }
    html
}

fn template_tokens() -> Vec<&'static str> {
    let mut tokens = Vec::new();
    let mut rest = TEMPLATE;
    while let Some(start) = rest.find("{{") {
        let Some(end) = rest[start..].find("}}") else { break };
        let abs_end = start + end + 2;
        tokens.push(&rest[start..abs_end]);
        rest = &rest[abs_end..];
    }
    tokens
}
