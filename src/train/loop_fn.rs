use std::sync::atomic::Ordering;
use std::time::Instant;

use log::info;

use crate::callback::TrainingCallback;
use crate::error::Result;
use crate::logs::Logs;
use crate::train::train_config::TrainConfig;

/// Supplies the log payloads a training loop would report.
pub trait LogSource {
    /// Logs reported after batch `batch` of epoch `epoch`.
    fn batch_logs(&mut self, epoch: usize, batch: usize) -> Logs;

    /// Logs reported at the end of epoch `epoch`.
    fn epoch_logs(&mut self, epoch: usize) -> Logs;
}

/// Outcome of a `train_loop` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainSummary {
    pub epochs_completed: usize,
    /// True when the stop flag ended the run early.
    pub stopped: bool,
    pub elapsed_ms: u64,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Drives `callback` through a full training lifecycle, pulling payloads
/// from `source`.
///
/// # Early termination
/// The loop stops early if:
/// - `config.stop_flag` is set (checked before every batch), in which case
///   `on_train_end` is still delivered, **or**
/// - any callback returns an error, which is returned as-is without
///   `on_train_end`.
pub fn train_loop<L, C>(source: &mut L, callback: &mut C, config: &TrainConfig) -> Result<TrainSummary>
where
    L: LogSource + ?Sized,
    C: TrainingCallback + ?Sized,
{
    let t_start = Instant::now();
    let mut epochs_completed = 0;
    let mut stopped = false;

    callback.on_train_begin()?;

    'epochs: for epoch in 0..config.epochs {
        if stop_requested(config) {
            stopped = true;
            break;
        }

        callback.on_epoch_begin(epoch)?;

        for batch in 0..config.batches_per_epoch {
            if stop_requested(config) {
                stopped = true;
                break 'epochs;
            }

            let logs = source.batch_logs(epoch, batch);
            callback.on_train_batch_end(batch, &logs)?;

            if let Some(delay) = config.batch_delay {
                std::thread::sleep(delay);
            }
        }

        let logs = source.epoch_logs(epoch);
        callback.on_epoch_end(epoch, &logs)?;
        epochs_completed += 1;
    }

    callback.on_train_end()?;

    let elapsed_ms = t_start.elapsed().as_millis() as u64;
    info!(
        "{}: {} epoch(s) in {} ms{}",
        callback.name(),
        epochs_completed,
        elapsed_ms,
        if stopped { " (stopped)" } else { "" }
    );

    Ok(TrainSummary { epochs_completed, stopped, elapsed_ms })
}

fn stop_requested(config: &TrainConfig) -> bool {
    config.stop_flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::logs;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, atomic::AtomicBool};

    struct Constant;

    impl LogSource for Constant {
        fn batch_logs(&mut self, _epoch: usize, batch: usize) -> Logs {
            logs([("loss", batch as f64)])
        }

        fn epoch_logs(&mut self, epoch: usize) -> Logs {
            logs([("loss", epoch as f64)])
        }
    }

    /// Records the lifecycle as a flat list of event names.
    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
        stop_at_batch: Option<(usize, Arc<AtomicBool>)>,
    }

    impl TrainingCallback for Trace {
        fn on_train_begin(&mut self) -> Result<()> {
            self.events.push("train_begin".into());
            Ok(())
        }

        fn on_epoch_begin(&mut self, epoch: usize) -> Result<()> {
            self.events.push(format!("epoch_begin {}", epoch));
            Ok(())
        }

        fn on_train_batch_end(&mut self, batch: usize, _logs: &Logs) -> Result<()> {
            self.events.push(format!("batch {}", batch));
            if let Some((at, flag)) = &self.stop_at_batch {
                if *at == batch {
                    flag.store(true, Ordering::Relaxed);
                }
            }
            Ok(())
        }

        fn on_epoch_end(&mut self, epoch: usize, _logs: &Logs) -> Result<()> {
            self.events.push(format!("epoch_end {}", epoch));
            Ok(())
        }

        fn on_train_end(&mut self) -> Result<()> {
            self.events.push("train_end".into());
            Ok(())
        }
    }

    #[test]
    fn drives_full_lifecycle_in_order() {
        let mut trace = Trace::default();
        let summary = train_loop(&mut Constant, &mut trace, &TrainConfig::new(2, 2)).unwrap();

        assert_eq!(trace.events, vec![
            "train_begin",
            "epoch_begin 0", "batch 0", "batch 1", "epoch_end 0",
            "epoch_begin 1", "batch 0", "batch 1", "epoch_end 1",
            "train_end",
        ]);
        assert_eq!(summary.epochs_completed, 2);
        assert!(!summary.stopped);
    }

    #[test]
    fn stop_flag_ends_at_batch_boundary() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut trace = Trace { stop_at_batch: Some((1, flag.clone())), ..Trace::default() };
        let config = TrainConfig::new(3, 4).with_stop_flag(flag);

        let summary = train_loop(&mut Constant, &mut trace, &config).unwrap();

        assert!(summary.stopped);
        assert_eq!(summary.epochs_completed, 0);
        assert_eq!(trace.events.last().map(String::as_str), Some("train_end"));
        assert!(!trace.events.iter().any(|e| e.starts_with("epoch_end")));
    }

    #[test]
    fn callback_error_aborts_the_run() {
        struct Failing;
        impl TrainingCallback for Failing {
            fn on_epoch_end(&mut self, _epoch: usize, _logs: &Logs) -> Result<()> {
                Err(crate::error::DashboardError::SurfaceClosed)
            }
        }

        let result = train_loop(&mut Constant, &mut Failing, &TrainConfig::new(3, 1));
        assert!(result.is_err());
    }
}
