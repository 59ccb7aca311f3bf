use std::sync::{Arc, atomic::AtomicBool};
use std::time::Duration;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`           : total number of epochs to drive
/// - `batches_per_epoch`: train-batch-end events per epoch
/// - `stop_flag`        : optional atomic flag; when set to `true` from
///                         another thread the loop stops at the next batch
///                         boundary and still reports train-end
/// - `batch_delay`      : optional pause after every batch, so a synthetic
///                         run is slow enough to watch
pub struct TrainConfig {
    pub epochs: usize,
    pub batches_per_epoch: usize,
    pub stop_flag: Option<Arc<AtomicBool>>,
    pub batch_delay: Option<Duration>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no stop flag and no delay.
    pub fn new(epochs: usize, batches_per_epoch: usize) -> Self {
        TrainConfig {
            epochs,
            batches_per_epoch,
            stop_flag: None,
            batch_delay: None,
        }
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = Some(delay);
        self
    }
}
