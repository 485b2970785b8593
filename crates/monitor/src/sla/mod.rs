//! SLA deadline monitoring pipeline.
//!
//! One run walks candidate orders through: policy lookup → deadline
//! arithmetic → classification → re-alert gate → composition → concurrent
//! dispatch, folding every per-order and per-recipient outcome into a
//! [`report::RunReport`].
//!
//! ## Submodules
//!
//! - `policy` - per-run snapshot of the SLA policy table
//! - `deadline` - time-remaining / percent-consumed arithmetic
//! - `classify` - nominal / warning / breach decision and the re-alert gate
//! - `compose` - recipient-addressed message building (pure, no I/O)
//! - `dispatch` - bounded concurrent fan-out to the email provider
//! - `report` - run report types
//! - `run` - the orchestrator driving one invocation end to end

pub mod classify;
pub mod compose;
pub mod deadline;
pub mod dispatch;
pub mod policy;
pub mod report;
pub mod run;

pub use classify::{AlertEvent, AlertSeverity, Classification, classify, should_notify};
pub use compose::{Notification, compose};
pub use deadline::{DeadlineEval, evaluate};
pub use dispatch::{AlertTransport, DispatchResult, dispatch_all};
pub use policy::{PolicyStore, SlaPolicy};
pub use report::{FailedNotification, RunReport, SentNotification, SkipReason, SkippedOrder};
pub use run::{RunSettings, fetch_candidates, run};
