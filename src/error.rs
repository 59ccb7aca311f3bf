/// Every failure the dashboard can report.
///
/// Nothing here is retried or recovered internally; each variant is returned
/// synchronously to whoever invoked the failing call.
#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    /// A lifecycle payload lacked a field the configuration requires.
    #[error("missing key `{key}` in {event} logs")]
    MissingKey { key: String, event: &'static str },

    /// Rejected at construction; never deferred to first use.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A lifecycle method was invoked out of order.
    #[error("`{call}` called out of sequence: {reason}")]
    SequenceCall { call: &'static str, reason: String },

    /// Min/max highlighting is undefined for an empty column.
    #[error("cannot highlight an empty column")]
    EmptyColumn,

    /// The receiving end of a channel-backed surface has gone away.
    #[error("display surface disconnected")]
    SurfaceClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub(crate) fn missing(key: impl Into<String>, event: &'static str) -> Self {
        DashboardError::MissingKey { key: key.into(), event }
    }

    pub(crate) fn sequence(call: &'static str, reason: impl Into<String>) -> Self {
        DashboardError::SequenceCall { call, reason: reason.into() }
    }
}
