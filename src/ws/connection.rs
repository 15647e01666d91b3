//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming subscribe/unsubscribe commands and forwarding
//! filtered monitor events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::MonitorEvent;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and updates the subscription set.
/// - Forwards matching events from the [`broadcast::Receiver`] to the
///   client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<MonitorEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(monitor_event) => {
                        if subs.matches(&monitor_event) {
                            let msg = WsMessage {
                                id: uuid::Uuid::new_v4().to_string(),
                                msg_type: WsMessageType::Event,
                                timestamp: chrono::Utc::now(),
                                payload: serde_json::to_value(&monitor_event).unwrap_or_default(),
                            };
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        let err = WsMessage {
            id: String::new(),
            msg_type: WsMessageType::Error,
            timestamp: chrono::Utc::now(),
            payload: serde_json::json!({
                "code": 400,
                "message": "malformed JSON"
            }),
        };
        return serde_json::to_string(&err).ok();
    };

    if let Some(emails_val) = msg.payload.get("emails").and_then(|v| v.as_array()) {
        let command = msg
            .payload
            .get("command")
            .and_then(|v| v.as_str())
            .unwrap_or("subscribe");

        match command {
            "subscribe" => {
                let mut emails = Vec::new();
                let mut wildcard = false;
                for value in emails_val {
                    if let Some(s) = value.as_str() {
                        if s == "*" {
                            wildcard = true;
                        } else {
                            emails.push(s.to_string());
                        }
                    }
                }
                subs.subscribe(&emails, wildcard);
                let response = WsMessage {
                    id: msg.id,
                    msg_type: WsMessageType::Response,
                    timestamp: chrono::Utc::now(),
                    payload: serde_json::json!({
                        "subscribed": emails,
                        "count": subs.count(),
                        "wildcard": subs.is_subscribed_all(),
                    }),
                };
                return serde_json::to_string(&response).ok();
            }
            "unsubscribe" => {
                let emails: Vec<String> = emails_val
                    .iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect();
                subs.unsubscribe(&emails);
                let response = WsMessage {
                    id: msg.id,
                    msg_type: WsMessageType::Response,
                    timestamp: chrono::Utc::now(),
                    payload: serde_json::json!({
                        "unsubscribed": emails,
                        "remaining_count": subs.count(),
                    }),
                };
                return serde_json::to_string(&response).ok();
            }
            _ => {}
        }
    }

    // Unknown command
    let err = WsMessage {
        id: msg.id,
        msg_type: WsMessageType::Error,
        timestamp: chrono::Utc::now(),
        payload: serde_json::json!({
            "code": 404,
            "message": "unknown command"
        }),
    };
    serde_json::to_string(&err).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_gets_error_response() {
        let mut subs = SubscriptionManager::new();
        let response = handle_text_message("not json", &mut subs);
        let Some(response) = response else {
            panic!("expected an error response");
        };
        assert!(response.contains("malformed JSON"));
    }

    #[test]
    fn subscribe_command_updates_subscriptions() {
        let mut subs = SubscriptionManager::new();
        let command = serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": {"command": "subscribe", "emails": ["user@example.com"]}
        })
        .to_string();

        let response = handle_text_message(&command, &mut subs);
        let Some(response) = response else {
            panic!("expected a response");
        };
        assert!(response.contains("\"count\":1"));
        assert_eq!(subs.count(), 1);
    }

    #[test]
    fn wildcard_subscription_is_flagged() {
        let mut subs = SubscriptionManager::new();
        let command = serde_json::json!({
            "id": "req-2",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": {"command": "subscribe", "emails": ["*"]}
        })
        .to_string();

        let _ = handle_text_message(&command, &mut subs);
        assert!(subs.is_subscribed_all());
    }

    #[test]
    fn unknown_command_gets_error() {
        let mut subs = SubscriptionManager::new();
        let command = serde_json::json!({
            "id": "req-3",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": {"command": "frobnicate"}
        })
        .to_string();

        let response = handle_text_message(&command, &mut subs);
        let Some(response) = response else {
            panic!("expected an error response");
        };
        assert!(response.contains("unknown command"));
    }
}
