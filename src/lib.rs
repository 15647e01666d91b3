//! # breachwatch
//!
//! REST API and WebSocket service for email breach monitoring, risk
//! scoring, and alerting.
//!
//! The core is the risk-scoring and alert-delta engine in [`domain`]:
//! given a normalized set of breach records for an email it computes a
//! deterministic 0–100 risk score, derives remediation recommendations,
//! and decides whether the result constitutes a *new* breach event
//! relative to the last stored result — so an alert fires exactly once
//! per newly observed breach, not on every re-check.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── CheckService / MonitorService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Normalizer · Scorer · Recommendations · Delta (domain/)
//!     ├── Breach sources: HIBP + simulated catalog (source/)
//!     ├── Alert dispatch: SMTP (alerting/)
//!     │
//!     └── PostgreSQL / in-memory persistence (persistence/)
//! ```

pub mod alerting;
pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod source;
pub mod ws;
