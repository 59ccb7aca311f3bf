use crate::config::RunConfig;
use crate::error::{DashboardError, Result};
use crate::logs::{val_key, Logs};

/// What the live chart needs from one train-batch-end payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchRecord {
    pub loss: f64,
    /// Value of the first configured metric; `None` when no metric is configured.
    pub metric: Option<f64>,
}

impl BatchRecord {
    /// Pulls `loss` and, when configured, the first metric out of `logs`.
    pub fn parse(logs: &Logs, config: &RunConfig) -> Result<BatchRecord> {
        let loss = require(logs, "loss", "batch")?;
        let metric = match config.first_metric() {
            Some(name) => Some(require(logs, name, "batch")?),
            None => None,
        };
        Ok(BatchRecord { loss, metric })
    }
}

/// Train (and validation, if configured) value of one metric at epoch end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValues {
    pub train: f64,
    pub val: Option<f64>,
}

/// A fully checked epoch-end payload.
///
/// `metrics` is parallel to `RunConfig::metrics`.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochRecord {
    pub loss: f64,
    pub val_loss: Option<f64>,
    pub metrics: Vec<MetricValues>,
}

impl EpochRecord {
    /// Reads every key the configuration asks for, or fails on the first
    /// absent one without touching anything.
    pub fn parse(logs: &Logs, config: &RunConfig) -> Result<EpochRecord> {
        let loss = require(logs, "loss", "epoch")?;
        let val_loss = if config.validation {
            Some(require(logs, "val_loss", "epoch")?)
        } else {
            None
        };

        let metrics = config.metrics.iter()
            .map(|metric| {
                let train = require(logs, metric, "epoch")?;
                let val = if config.validation {
                    Some(require(logs, &val_key(metric), "epoch")?)
                } else {
                    None
                };
                Ok(MetricValues { train, val })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EpochRecord { loss, val_loss, metrics })
    }
}

fn require(logs: &Logs, key: &str, event: &'static str) -> Result<f64> {
    logs.get(key).copied().ok_or_else(|| DashboardError::missing(key, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::logs;
    use pretty_assertions::assert_eq;

    #[test]
    fn batch_record_without_metrics_only_needs_loss() {
        let config = RunConfig::new();
        let record = BatchRecord::parse(&logs([("loss", 0.3)]), &config).unwrap();
        assert_eq!(record, BatchRecord { loss: 0.3, metric: None });
    }

    #[test]
    fn batch_record_reads_first_metric_only() {
        let config = RunConfig::new()
            .with_metric("accuracy", None, None)
            .with_metric("auc", None, None);
        let record = BatchRecord::parse(&logs([("loss", 0.3), ("accuracy", 0.7)]), &config).unwrap();
        assert_eq!(record.metric, Some(0.7));
    }

    #[test]
    fn batch_record_missing_metric() {
        let config = RunConfig::new().with_metric("accuracy", None, None);
        let err = BatchRecord::parse(&logs([("loss", 0.3)]), &config).unwrap_err();
        match err {
            DashboardError::MissingKey { key, event } => {
                assert_eq!(key, "accuracy");
                assert_eq!(event, "batch");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn epoch_record_with_validation() {
        let config = RunConfig::new()
            .with_validation(true)
            .with_metric("accuracy", None, None);
        let payload = logs([
            ("loss", 0.5),
            ("val_loss", 0.6),
            ("accuracy", 0.9),
            ("val_accuracy", 0.85),
        ]);
        let record = EpochRecord::parse(&payload, &config).unwrap();
        assert_eq!(record, EpochRecord {
            loss: 0.5,
            val_loss: Some(0.6),
            metrics: vec![MetricValues { train: 0.9, val: Some(0.85) }],
        });
    }

    #[test]
    fn epoch_record_ignores_validation_keys_when_disabled() {
        let config = RunConfig::new().with_metric("accuracy", None, None);
        let record = EpochRecord::parse(&logs([("loss", 0.5), ("accuracy", 0.9)]), &config).unwrap();
        assert_eq!(record.val_loss, None);
        assert_eq!(record.metrics[0].val, None);
    }

    #[test]
    fn epoch_record_missing_val_loss() {
        let config = RunConfig::new().with_validation(true);
        let err = EpochRecord::parse(&logs([("loss", 0.5)]), &config).unwrap_err();
        assert!(matches!(err, DashboardError::MissingKey { ref key, .. } if key == "val_loss"));
    }
}
