use serde::{Serialize, Deserialize};

use crate::config::HighlightColors;
use crate::error::Result;
use crate::highlight::highlight_min_max;
use crate::history::{LossHistory, MetricsHistory, Split};
use crate::table::styled::{StyledColumn, StyledTable};

/// Row-per-epoch view of the loss and metric histories.
///
/// Column order: `loss`, `val_loss`, every metric, then `val_<metric>` for
/// every metric. Validation columns only exist when validation is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTable {
    pub columns: Vec<(String, Vec<f64>)>,
}

impl SnapshotTable {
    pub fn from_histories(loss: &LossHistory, metrics: &MetricsHistory, validation: bool) -> Self {
        let mut columns = vec![("loss".to_owned(), loss.loss.clone())];
        if validation {
            columns.push(("val_loss".to_owned(), loss.val_loss.clone()));
        }

        let splits: &[Split] = if validation {
            &[Split::Train, Split::Validation]
        } else {
            &[Split::Train]
        };
        for &split in splits {
            for series in metrics.series() {
                let values = match split {
                    Split::Train      => series.train.clone(),
                    Split::Validation => series.val.clone(),
                };
                columns.push((split.key(&series.name), values));
            }
        }

        SnapshotTable { columns }
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_slice())
    }

    /// Applies min/max highlighting column by column. An empty table is
    /// styled without consulting the highlighter.
    pub fn style(&self, colors: &HighlightColors) -> Result<StyledTable> {
        let columns = self.columns.iter()
            .map(|(name, values)| {
                let styles = if values.is_empty() {
                    Vec::new()
                } else {
                    highlight_min_max(values)?
                };
                Ok(StyledColumn { name: name.clone(), values: values.clone(), styles })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StyledTable { columns, colors: colors.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::CellStyle;
    use crate::logs::MetricValues;
    use pretty_assertions::assert_eq;

    fn histories() -> (LossHistory, MetricsHistory) {
        let metrics = vec!["accuracy".to_string(), "auc".to_string()];
        let mut loss = LossHistory::new();
        let mut m = MetricsHistory::new(&metrics);
        for (l, a) in [(0.9, 0.5), (0.6, 0.7), (0.7, 0.8)] {
            loss.record(l, Some(l + 0.1));
            m.record(&[
                MetricValues { train: a, val: Some(a - 0.1) },
                MetricValues { train: a / 2.0, val: Some(a / 3.0) },
            ]);
        }
        (loss, m)
    }

    #[test]
    fn column_order_matches_log_layout() {
        let (loss, metrics) = histories();
        let table = SnapshotTable::from_histories(&loss, &metrics, true);
        let names: Vec<_> = table.columns.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["loss", "val_loss", "accuracy", "auc", "val_accuracy", "val_auc"]);
        assert_eq!(table.rows(), 3);
    }

    #[test]
    fn no_validation_columns_without_validation() {
        let (loss, metrics) = histories();
        let table = SnapshotTable::from_histories(&loss, &metrics, false);
        let names: Vec<_> = table.columns.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["loss", "accuracy", "auc"]);
    }

    #[test]
    fn style_highlights_each_column() {
        let (loss, metrics) = histories();
        let styled = SnapshotTable::from_histories(&loss, &metrics, true)
            .style(&HighlightColors::default())
            .unwrap();
        assert_eq!(styled.columns[0].styles, vec![CellStyle::Max, CellStyle::Min, CellStyle::None]);
        assert_eq!(styled.columns[2].styles, vec![CellStyle::Min, CellStyle::None, CellStyle::Max]);
    }

    #[test]
    fn empty_table_styles_without_error() {
        let table = SnapshotTable::from_histories(&LossHistory::new(), &MetricsHistory::new(&[]), true);
        let styled = table.style(&HighlightColors::default()).unwrap();
        assert_eq!(styled.rows(), 0);
        assert_eq!(styled.columns.len(), 2);
    }
}
