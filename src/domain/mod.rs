//! Domain layer: the breach normalizer, risk scorer, recommendation
//! engine, and delta detector, plus the event system they feed.
//!
//! Everything here is a pure function or an in-process primitive: the
//! modules take their inputs as arguments (including the previous stored
//! result and the scoring date) and read no ambient state.

pub mod alert;
pub mod breach;
pub mod check_result;
pub mod delta;
pub mod event_bus;
pub mod monitor_event;
pub mod recommendation;
pub mod risk;

pub use alert::{AlertEvent, AlertId};
pub use breach::{BreachDate, BreachRecord, RawBreachEntry, normalize_entries};
pub use check_result::{CheckResult, RiskCategory};
pub use delta::detect_new_breaches;
pub use event_bus::EventBus;
pub use monitor_event::MonitorEvent;
