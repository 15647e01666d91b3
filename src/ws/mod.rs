//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams monitor events (checks
//! completing, alerts being raised, cycles finishing) filtered by
//! per-connection email subscriptions.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
