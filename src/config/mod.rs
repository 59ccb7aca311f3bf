pub mod run_config;
pub mod palette;

pub use run_config::RunConfig;
pub use palette::{HighlightColors, Palette};
