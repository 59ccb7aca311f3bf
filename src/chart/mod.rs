pub mod axis;
pub mod line;
pub mod chart;
pub mod factory;

pub use axis::{Axis, GridLines, Scale, Side};
pub use line::Line;
pub use chart::{Chart, ChartSet, ChartSlot};
pub use factory::{build_live_epoch_chart, build_loss_chart, build_metric_charts};
