use std::collections::BTreeMap;

use crate::chart::axis::{Axis, GridLines, Scale, Side};
use crate::chart::chart::Chart;
use crate::chart::line::Line;
use crate::config::Palette;

/// Builds the intra-epoch chart, reset at the start of every epoch.
///
/// The x axis is the batch index. The loss line sits on the left axis,
/// scaled to `[min_loss, max_loss]`. When `metric` is given a second line
/// labeled with it is drawn against its own right-hand axis, scaled to
/// `[min_metric, max_metric]`, so a metric of a different magnitude can be
/// followed alongside the loss.
pub fn build_live_epoch_chart(
    metric: Option<&str>,
    min_loss: Option<f64>,
    max_loss: Option<f64>,
    min_metric: Option<f64>,
    max_metric: Option<f64>,
    palette: &Palette,
) -> Chart {
    let mut y_axes = vec![Axis::new(
        "training_loss",
        Scale::linear(min_loss, max_loss),
        Side::Left,
        GridLines::Dashed,
    )];
    let mut lines = vec![Line::new("loss", palette.live_loss.clone(), 0)];

    if let Some(metric) = metric {
        y_axes.push(Axis::new(
            format!("training_{}", metric),
            Scale::linear(min_metric, max_metric),
            Side::Right,
            GridLines::Solid,
        ));
        lines.push(Line::new(metric, palette.live_metric.clone(), 1));
    }

    Chart {
        title: "Epoch 0".into(),
        x_axis: Axis::new("batch", Scale::Ordinal, Side::Bottom, GridLines::Solid),
        x: Vec::new(),
        y_axes,
        lines,
    }
}

/// Builds the cross-epoch loss chart with a `train` line and, when
/// `validation` is set, a `val` line on the same axis.
pub fn build_loss_chart(
    validation: bool,
    min_loss: Option<f64>,
    max_loss: Option<f64>,
    palette: &Palette,
) -> Chart {
    epoch_chart("Loss", "loss", validation, Scale::linear(min_loss, max_loss), palette)
}

/// Builds one cross-epoch chart per metric, in the order given. Each has
/// its own y axis bounded by that metric's entries in the bound maps.
pub fn build_metric_charts(
    metrics: &[String],
    validation: bool,
    min_bounds: &BTreeMap<String, f64>,
    max_bounds: &BTreeMap<String, f64>,
    palette: &Palette,
) -> Vec<Chart> {
    metrics.iter()
        .map(|metric| {
            let scale = Scale::linear(
                min_bounds.get(metric).copied(),
                max_bounds.get(metric).copied(),
            );
            epoch_chart(metric, metric, validation, scale, palette)
        })
        .collect()
}

fn epoch_chart(title: &str, y_label: &str, validation: bool, scale: Scale, palette: &Palette) -> Chart {
    let mut lines = vec![Line::new("train", palette.train.clone(), 0)];
    if validation {
        lines.push(Line::new("val", palette.val.clone(), 0));
    }

    Chart {
        title: title.into(),
        x_axis: Axis::new("epoch", Scale::Ordinal, Side::Bottom, GridLines::Solid),
        x: Vec::new(),
        y_axes: vec![Axis::new(y_label, scale, Side::Left, GridLines::Solid)],
        lines,
    }
}
