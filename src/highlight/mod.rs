pub mod highlighter;

pub use highlighter::{highlight_min_max, CellStyle};
