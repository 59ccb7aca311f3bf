use std::collections::HashMap;

pub mod record;

pub use record::{BatchRecord, EpochRecord, MetricValues};

/// The untyped payload a training loop hands to every batch/epoch callback.
pub type Logs = HashMap<String, f64>;

/// Builds a `Logs` map from borrowed keys.
pub fn logs<'a, I>(pairs: I) -> Logs
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

/// Key under which the validation counterpart of `key` is reported.
pub fn val_key(key: &str) -> String {
    format!("val_{}", key)
}
