/// Where a dashboard is in the training lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built, nothing displayed yet.
    Uninitialized,
    /// Displayed, between epochs.
    Ready,
    /// Inside the given (0-based) epoch.
    InEpoch(usize),
    /// Training has ended; no further events are accepted.
    Finished,
}

impl Phase {
    pub fn describe(self) -> String {
        match self {
            Phase::Uninitialized => "training has not begun".into(),
            Phase::Ready         => "no epoch is open".into(),
            Phase::InEpoch(e)    => format!("epoch {} is still open", e),
            Phase::Finished      => "training has already ended".into(),
        }
    }
}
