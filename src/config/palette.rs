use serde::{Serialize, Deserialize};

/// Line colors for every chart the dashboard draws.
///
/// - `live_loss` / `live_metric`: the two lines of the intra-epoch chart
/// - `train` / `val`            : the two lines of every cross-epoch chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub live_loss: String,
    pub live_metric: String,
    pub train: String,
    pub val: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            live_loss: "red".into(),
            live_metric: "blue".into(),
            train: "red".into(),
            val: "green".into(),
        }
    }
}

/// Background colors for the min/max cells of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightColors {
    pub min: String,
    pub max: String,
}

impl Default for HighlightColors {
    fn default() -> Self {
        HighlightColors { min: "#5fba7d".into(), max: "#e67575".into() }
    }
}
