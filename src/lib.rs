pub mod error;
pub mod config;
pub mod logs;
pub mod highlight;
pub mod chart;
pub mod history;
pub mod table;
pub mod render;
pub mod callback;
pub mod dashboard;
pub mod train;

// Convenience re-exports
pub use error::{DashboardError, Result};
pub use config::RunConfig;
pub use logs::{logs, Logs};
pub use highlight::{highlight_min_max, CellStyle};
pub use chart::{Chart, ChartSet, ChartSlot};
pub use history::HistoryExport;
pub use table::{SnapshotTable, StyledTable};
pub use render::{ChannelSurface, HtmlFileSurface, Layout, RecordingSurface, Surface, SurfaceEvent};
pub use callback::TrainingCallback;
pub use dashboard::{Phase, TrainingDashboard};
pub use train::{train_loop, LogSource, SyntheticRun, TrainConfig};
