//! Service layer: check orchestration and periodic monitoring.
//!
//! [`CheckService`] coordinates one check invocation over the domain
//! functions and collaborator ports; [`MonitorService`] drives it
//! periodically for every monitored email.

pub mod check_service;
pub mod email_locks;
pub mod monitor;

pub use check_service::{CheckOutcome, CheckService, normalize_email};
pub use monitor::{CycleStats, MonitorService};
