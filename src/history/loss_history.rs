use serde::{Serialize, Deserialize};

/// Per-epoch loss values, indexed by epoch order.
///
/// `val_loss` stays empty when validation is not configured; otherwise it
/// always has the same length as `loss`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossHistory {
    pub loss: Vec<f64>,
    pub val_loss: Vec<f64>,
}

impl LossHistory {
    pub fn new() -> Self {
        LossHistory::default()
    }

    pub fn record(&mut self, loss: f64, val_loss: Option<f64>) {
        self.loss.push(loss);
        if let Some(v) = val_loss {
            self.val_loss.push(v);
        }
    }

    /// Number of completed epochs.
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }
}
