pub mod dashboard;
pub mod events_sse;
pub mod export;
pub mod train;
