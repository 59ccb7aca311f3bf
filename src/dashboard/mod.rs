pub mod phase;
pub mod dashboard;

pub use phase::Phase;
pub use dashboard::TrainingDashboard;
