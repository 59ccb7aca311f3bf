use serde::{Serialize, Deserialize};

use crate::chart::ChartSlot;

/// One row of the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum LayoutRow {
    /// Two charts side by side, equal width.
    Pair { left: ChartSlot, right: ChartSlot },
    /// A single chart, half width, centered.
    Centered { chart: ChartSlot },
}

/// Chart arrangement; the summary table always sits centered below the last row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: Vec<LayoutRow>,
}

impl Layout {
    /// Live chart beside the loss chart, then metric charts two per row with
    /// an odd one out centered on its own row.
    pub fn for_metrics(metric_count: usize) -> Layout {
        let mut rows = vec![LayoutRow::Pair { left: ChartSlot::Live, right: ChartSlot::Loss }];

        for i in (0..metric_count).step_by(2) {
            if i + 1 < metric_count {
                rows.push(LayoutRow::Pair {
                    left: ChartSlot::Metric(i),
                    right: ChartSlot::Metric(i + 1),
                });
            } else {
                rows.push(LayoutRow::Centered { chart: ChartSlot::Metric(i) });
            }
        }

        Layout { rows }
    }

    pub fn slots(&self) -> Vec<ChartSlot> {
        self.rows.iter()
            .flat_map(|row| match *row {
                LayoutRow::Pair { left, right } => vec![left, right],
                LayoutRow::Centered { chart }   => vec![chart],
            })
            .collect()
    }
}
