pub mod loss_history;
pub mod metrics_history;
pub mod live_series;
pub mod export;

pub use loss_history::LossHistory;
pub use metrics_history::{MetricSeries, MetricsHistory, Split};
pub use live_series::LiveEpochSeries;
pub use export::HistoryExport;
