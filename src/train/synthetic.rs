use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::RunConfig;
use crate::logs::{val_key, Logs};
use crate::train::loop_fn::LogSource;

/// A made-up training run: loss decays exponentially, metrics climb towards
/// 1.0, both with a little noise. Useful for demos and for exercising a
/// dashboard without a real model.
pub struct SyntheticRun {
    metrics: Vec<String>,
    validation: bool,
    batches_per_epoch: usize,
    /// Loss at step 0.
    pub initial_loss: f64,
    /// Exponential decay rate per epoch.
    pub decay: f64,
    /// Standard deviation-ish amplitude of the uniform noise.
    pub noise: f64,
    rng: StdRng,
}

impl SyntheticRun {
    pub fn new(config: &RunConfig, batches_per_epoch: usize) -> Self {
        SyntheticRun {
            metrics: config.metrics.clone(),
            validation: config.validation,
            batches_per_epoch: batches_per_epoch.max(1),
            initial_loss: 2.0,
            decay: 0.35,
            noise: 0.04,
            rng: StdRng::from_entropy(),
        }
    }

    /// Makes the run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn jitter(&mut self) -> f64 {
        if self.noise > 0.0 {
            self.rng.gen_range(-self.noise..self.noise)
        } else {
            0.0
        }
    }

    fn loss_at(&mut self, t: f64) -> f64 {
        let clean = self.initial_loss * (-self.decay * t).exp();
        (clean * (1.0 + self.jitter())).max(0.0)
    }

    /// Metric `i` saturates a little below 1.0, later metrics lower.
    fn metric_at(&mut self, i: usize, t: f64) -> f64 {
        let ceiling = 0.98 - 0.05 * i as f64;
        let clean = ceiling * (1.0 - 0.9 * (-self.decay * t).exp());
        (clean + self.jitter() * 0.25).clamp(0.0, 1.0)
    }

    fn sample(&mut self, t: f64, with_validation: bool) -> Logs {
        let mut logs = Logs::new();
        let loss = self.loss_at(t);
        logs.insert("loss".into(), loss);
        if with_validation {
            let gap = 1.08 + self.jitter();
            logs.insert("val_loss".into(), loss * gap);
        }

        for i in 0..self.metrics.len() {
            let value = self.metric_at(i, t);
            let name = self.metrics[i].clone();
            if with_validation {
                let val = (value - 0.03 + self.jitter() * 0.25).clamp(0.0, 1.0);
                logs.insert(val_key(&name), val);
            }
            logs.insert(name, value);
        }
        logs
    }
}

impl LogSource for SyntheticRun {
    fn batch_logs(&mut self, epoch: usize, batch: usize) -> Logs {
        let t = epoch as f64 + batch as f64 / self.batches_per_epoch as f64;
        self.sample(t, false)
    }

    fn epoch_logs(&mut self, epoch: usize) -> Logs {
        let validation = self.validation;
        self.sample(epoch as f64 + 1.0, validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunConfig {
        RunConfig::new()
            .with_validation(true)
            .with_metric("accuracy", None, None)
            .with_metric("auc", None, None)
    }

    #[test]
    fn epoch_logs_carry_every_configured_key() {
        let mut run = SyntheticRun::new(&config(), 10).with_seed(7);
        let logs = run.epoch_logs(0);
        for key in ["loss", "val_loss", "accuracy", "val_accuracy", "auc", "val_auc"] {
            assert!(logs.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn batch_logs_skip_validation() {
        let mut run = SyntheticRun::new(&config(), 10).with_seed(7);
        let logs = run.batch_logs(0, 3);
        assert!(logs.contains_key("accuracy"));
        assert!(!logs.contains_key("val_loss"));
    }

    #[test]
    fn loss_trends_down_without_noise() {
        let mut run = SyntheticRun::new(&RunConfig::new(), 5);
        run.noise = 0.0;
        let first = run.epoch_logs(0)["loss"];
        let last = run.epoch_logs(9)["loss"];
        assert!(last < first);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = SyntheticRun::new(&config(), 4).with_seed(42);
        let mut b = SyntheticRun::new(&config(), 4).with_seed(42);
        assert_eq!(a.epoch_logs(2), b.epoch_logs(2));
    }
}
