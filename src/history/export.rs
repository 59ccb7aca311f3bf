use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::history::loss_history::LossHistory;
use crate::history::metrics_history::{MetricsHistory, Split};
use crate::table::StyledTable;

/// Serializable view of everything recorded so far, keyed by log name
/// (`loss`, `val_loss`, `accuracy`, `val_accuracy`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryExport {
    pub epochs: usize,
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl HistoryExport {
    pub fn new(loss: &LossHistory, metrics: &MetricsHistory, validation: bool) -> Self {
        let mut columns = BTreeMap::new();
        columns.insert("loss".to_owned(), loss.loss.clone());
        if validation {
            columns.insert("val_loss".to_owned(), loss.val_loss.clone());
        }
        for series in metrics.series() {
            columns.insert(Split::Train.key(&series.name), series.train.clone());
            if validation {
                columns.insert(Split::Validation.key(&series.name), series.val.clone());
            }
        }
        HistoryExport { epochs: loss.len(), columns }
    }

    /// Recovers the history from a rendered table, whose columns carry the
    /// same names and values.
    pub fn from_table(table: &StyledTable) -> Self {
        let columns = table.columns.iter()
            .map(|c| (c.name.clone(), c.values.clone()))
            .collect();
        HistoryExport { epochs: table.rows(), columns }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightColors;
    use crate::logs::MetricValues;
    use crate::table::SnapshotTable;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_matches_table_view() {
        let metrics = vec!["accuracy".to_string()];
        let mut loss = LossHistory::new();
        let mut m = MetricsHistory::new(&metrics);
        loss.record(0.5, Some(0.6));
        m.record(&[MetricValues { train: 0.9, val: Some(0.85) }]);

        let export = HistoryExport::new(&loss, &m, true);
        assert_eq!(export.epochs, 1);
        assert_eq!(export.columns["val_accuracy"], vec![0.85]);

        let table = SnapshotTable::from_histories(&loss, &m, true)
            .style(&HighlightColors::default())
            .unwrap();
        assert_eq!(HistoryExport::from_table(&table), export);
    }

    #[test]
    fn json_is_keyed_by_log_name() {
        let export = HistoryExport::new(&LossHistory::new(), &MetricsHistory::new(&[]), false);
        let json = export.to_json().unwrap();
        assert!(json.contains("\"loss\""));
        assert!(!json.contains("val_loss"));
    }
}
