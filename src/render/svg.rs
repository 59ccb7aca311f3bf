use crate::chart::{Chart, GridLines, Side};
use crate::render::page::html_escape;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 280.0;
const PAD_T: f64 = 30.0;
const PAD_B: f64 = 56.0;
const PAD_SIDE: f64 = 60.0;
const PAD_NARROW: f64 = 16.0;
const TICKS: usize = 4;

const GREY_GRID: &str = "#e3e6eb";
const GREY_TEXT: &str = "#888";
const DARK_TEXT: &str = "#333";

/// Renders a chart as a self-contained inline SVG.
///
/// Ordinal x positions are evenly spaced in insertion order. Each y axis is
/// resolved from its scale and the lines plotted against it; left axes put
/// their tick labels on the left, right axes on the right.
pub fn render_chart_svg(chart: &Chart) -> String {
    let has_right = chart.y_axes.iter().any(|a| a.side == Side::Right);
    let pad_l = PAD_SIDE;
    let pad_r = if has_right { PAD_SIDE } else { PAD_NARROW };
    let plot_w = WIDTH - pad_l - pad_r;
    let plot_h = HEIGHT - PAD_T - PAD_B;
    let n = chart.x.len();

    let px = |i: usize| -> f64 {
        if n <= 1 {
            pad_l + plot_w / 2.0
        } else {
            pad_l + (i as f64 / (n - 1) as f64) * plot_w
        }
    };

    let ranges: Vec<(f64, f64)> = chart.y_axes.iter().enumerate()
        .map(|(i, axis)| axis.scale.resolve(&chart.values_on_axis(i)))
        .collect();

    let py = |axis: usize, v: f64| -> f64 {
        let (lo, hi) = ranges[axis];
        PAD_T + (hi - v) / (hi - lo) * plot_h
    };

    let mut parts: Vec<String> = Vec::new();

    // Title.
    parts.push(format!(
        "<text x=\"{:.1}\" y=\"18\" text-anchor=\"middle\" fill=\"{}\" font-size=\"13\" font-weight=\"bold\">{}</text>",
        WIDTH / 2.0, DARK_TEXT, html_escape(&chart.title)
    ));

    // Y axes: grid lines, tick labels, axis label.
    for (a, axis) in chart.y_axes.iter().enumerate() {
        let (lo, hi) = ranges[a];
        let right = axis.side == Side::Right;
        let (tick_x, anchor) = if right { (WIDTH - pad_r + 4.0, "start") } else { (pad_l - 4.0, "end") };

        for g in 0..=TICKS {
            let frac = g as f64 / TICKS as f64;
            let val = lo + (hi - lo) * frac;
            let y = PAD_T + (1.0 - frac) * plot_h;
            parts.push(format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" fill=\"{}\" font-size=\"10\">{}</text>",
                tick_x, y + 3.5, anchor, GREY_TEXT, format_tick(val)
            ));
            if let Some(dash) = grid_dash(axis.grid_lines) {
                parts.push(format!(
                    "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"{}/>",
                    pad_l, y, WIDTH - pad_r, y, GREY_GRID, dash
                ));
            }
        }

        let (lx, rot) = if right { (WIDTH - 10.0, 90) } else { (12.0, -90) };
        let ly = PAD_T + plot_h / 2.0;
        parts.push(format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\" transform=\"rotate({} {:.1} {:.1})\">{}</text>",
            lx, ly, DARK_TEXT, rot, lx, ly, html_escape(&axis.label)
        ));
    }

    // X axis: baseline, up to three tick labels, axis label.
    let base_y = PAD_T + plot_h;
    parts.push(format!(
        "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>",
        pad_l, base_y, WIDTH - pad_r, base_y, GREY_TEXT
    ));
    if n > 0 {
        let mut ticks = vec![0, n / 2, n - 1];
        ticks.dedup();
        for i in ticks {
            parts.push(format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\">{}</text>",
                px(i), base_y + 14.0, GREY_TEXT, chart.x[i]
            ));
        }
    }
    parts.push(format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\">{}</text>",
        pad_l + plot_w / 2.0, base_y + 28.0, DARK_TEXT, html_escape(&chart.x_axis.label)
    ));

    // Lines.
    for line in &chart.lines {
        if line.y.is_empty() {
            continue;
        }
        let mut path = String::new();
        let mut pen_down = false;
        for (i, &v) in line.y.iter().enumerate() {
            if !v.is_finite() {
                pen_down = false;
                continue;
            }
            let cmd = if pen_down { " L" } else { " M" };
            path.push_str(&format!("{}{:.1},{:.1}", cmd, px(i), py(line.y_axis, v)));
            pen_down = true;
        }
        if line.y.len() == 1 && line.y[0].is_finite() {
            parts.push(format!(
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{}\"/>",
                px(0), py(line.y_axis, line.y[0]), html_escape(&line.color)
            ));
        }
        parts.push(format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"2\" fill=\"none\"/>",
            path.trim_start(), html_escape(&line.color)
        ));
    }

    // Legend, bottom.
    let legend_y = HEIGHT - 10.0;
    let mut lx = pad_l;
    for line in &chart.lines {
        parts.push(format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"18\" height=\"4\" fill=\"{}\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"10\">{}</text>",
            lx, legend_y - 6.0, html_escape(&line.color),
            lx + 22.0, legend_y, DARK_TEXT, html_escape(&line.label)
        ));
        lx += 30.0 + 7.0 * line.label.chars().count() as f64;
    }

    format!(
        "<svg class=\"chart-svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n{}\n</svg>",
        WIDTH, HEIGHT, WIDTH, HEIGHT, parts.join("\n")
    )
}

fn grid_dash(grid: GridLines) -> Option<&'static str> {
    match grid {
        GridLines::Solid  => Some(""),
        GridLines::Dashed => Some(" stroke-dasharray=\"4,3\""),
        GridLines::None   => None,
    }
}

fn format_tick(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e4 || v.abs() < 1e-3) {
        format!("{:.2e}", v)
    } else {
        format!("{:.3}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_live_epoch_chart, build_loss_chart};
    use crate::config::Palette;

    #[test]
    fn empty_chart_renders_title_and_axes() {
        let chart = build_loss_chart(true, None, None, &Palette::default());
        let svg = render_chart_svg(&chart);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Loss</text>"));
        assert!(svg.contains(">epoch</text>"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn one_path_per_populated_line() {
        let mut chart = build_loss_chart(true, None, None, &Palette::default());
        chart.push_point(0, &[0.9, 1.0]);
        chart.push_point(1, &[0.7, 0.8]);
        let svg = render_chart_svg(&chart);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("stroke=\"green\""));
    }

    #[test]
    fn live_chart_with_metric_labels_right_axis() {
        let mut chart = build_live_epoch_chart(
            Some("accuracy"), None, None, Some(0.0), Some(1.0), &Palette::default(),
        );
        chart.push_point(0, &[2.0, 0.5]);
        let svg = render_chart_svg(&chart);
        assert!(svg.contains(">training_accuracy</text>"));
        assert!(svg.contains("rotate(90"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn non_finite_values_break_the_path() {
        let mut chart = build_loss_chart(false, None, None, &Palette::default());
        for (i, v) in [1.0, f64::NAN, 0.5, 0.4].into_iter().enumerate() {
            chart.push_point(i, &[v]);
        }
        let svg = render_chart_svg(&chart);
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches(" M").count() + svg.matches("d=\"M").count(), 2);
    }
}
