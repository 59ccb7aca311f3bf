/// Batch-level samples of the epoch in progress.
///
/// Cleared at every epoch start; grows in batch order until the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveEpochSeries {
    pub batches: Vec<usize>,
    pub loss: Vec<f64>,
    /// Only present when at least one metric is configured.
    pub metric: Option<Vec<f64>>,
}

impl LiveEpochSeries {
    pub fn new(tracks_metric: bool) -> Self {
        LiveEpochSeries {
            batches: Vec::new(),
            loss: Vec::new(),
            metric: tracks_metric.then(Vec::new),
        }
    }

    pub fn reset(&mut self) {
        self.batches.clear();
        self.loss.clear();
        if let Some(m) = &mut self.metric {
            m.clear();
        }
    }

    pub fn push(&mut self, batch: usize, loss: f64, metric: Option<f64>) {
        self.batches.push(batch);
        self.loss.push(loss);
        if let (Some(series), Some(v)) = (&mut self.metric, metric) {
            series.push(v);
        }
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
