use thiserror::Error;

/// Malformed SLA policy. Fatal for the affected order only; the run continues.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("total SLA duration must be positive, got {0} days")]
    NonPositiveDuration(i32),
    #[error("warning threshold must be within (0, 100], got {0}")]
    ThresholdOutOfRange(f64),
}

/// The order's requester has no deliverable email address. Treated as a skip,
/// never retried.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("no deliverable address for requester '{requester}': {reason}")]
pub struct InvalidRecipientError {
    pub requester: String,
    pub reason: String,
}

/// A single notification could not be handed to the email provider. Recorded
/// as a per-recipient failure in the run report; never propagates.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("send timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("provider rejected message: {0}")]
    Provider(String),
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("run deadline exceeded before dispatch")]
    Deadline,
}

/// The candidate set or policy table could not be read at all. The only class
/// of error that aborts a whole run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to load candidate orders: {0}")]
    Orders(#[source] sea_orm::DbErr),
    #[error("failed to load SLA policies: {0}")]
    Policies(#[source] sea_orm::DbErr),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
