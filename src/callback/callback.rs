use crate::error::Result;
use crate::logs::Logs;

/// Lifecycle hooks a training loop calls, in this order:
///
/// ```text
/// on_train_begin
///   (on_epoch_begin  on_train_batch_end*  on_epoch_end)*
/// on_train_end
/// ```
///
/// Calls are synchronous and never overlap. Every hook defaults to a no-op,
/// so an implementor only writes the events it cares about. An `Err`
/// aborts that one call; the loop decides whether to keep going.
pub trait TrainingCallback {
    fn on_train_begin(&mut self) -> Result<()> {
        Ok(())
    }

    /// `epoch` is 0-based.
    fn on_epoch_begin(&mut self, _epoch: usize) -> Result<()> {
        Ok(())
    }

    /// `batch` is the 0-based index within the current epoch.
    fn on_train_batch_end(&mut self, _batch: usize, _logs: &Logs) -> Result<()> {
        Ok(())
    }

    fn on_epoch_end(&mut self, _epoch: usize, _logs: &Logs) -> Result<()> {
        Ok(())
    }

    fn on_train_end(&mut self) -> Result<()> {
        Ok(())
    }

    /// Name used in log lines.
    fn name(&self) -> &'static str {
        "TrainingCallback"
    }
}

impl<C: TrainingCallback + ?Sized> TrainingCallback for &mut C {
    fn on_train_begin(&mut self) -> Result<()> {
        (**self).on_train_begin()
    }

    fn on_epoch_begin(&mut self, epoch: usize) -> Result<()> {
        (**self).on_epoch_begin(epoch)
    }

    fn on_train_batch_end(&mut self, batch: usize, logs: &Logs) -> Result<()> {
        (**self).on_train_batch_end(batch, logs)
    }

    fn on_epoch_end(&mut self, epoch: usize, logs: &Logs) -> Result<()> {
        (**self).on_epoch_end(epoch, logs)
    }

    fn on_train_end(&mut self) -> Result<()> {
        (**self).on_train_end()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
