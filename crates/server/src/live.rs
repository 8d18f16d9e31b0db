// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live port event streaming for dashboards.
//!
//! Events are published after a successful write and fanned out to every
//! connected WebSocket client. They are informational only: clients must
//! query the HTTP API for authoritative data.
//!
//! # Architecture
//!
//! - Events are broadcast to all connected clients
//! - Slow clients lose the oldest buffered events
//! - No commands are executed over WebSocket connections

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use portlink::{EventNotifier, PortEvent};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
const EVENT_BUFFER_SIZE: usize = 100;

/// The frame sent to clients: the topic name plus the event payload.
#[derive(Debug, Serialize)]
pub struct LiveFrame<'a> {
    pub topic: &'static str,
    pub event: &'a PortEvent,
}

impl<'a> LiveFrame<'a> {
    #[must_use]
    pub const fn new(event: &'a PortEvent) -> Self {
        Self {
            topic: event.topic(),
            event,
        }
    }
}

/// Broadcast-backed notifier shared by the booking service and the
/// WebSocket handler.
#[derive(Clone)]
pub struct LiveNotifier {
    tx: broadcast::Sender<PortEvent>,
}

impl LiveNotifier {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PortEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EventNotifier for LiveNotifier {
    fn publish(&self, event: PortEvent) {
        let topic: &'static str = event.topic();
        match self.tx.send(event) {
            Ok(receivers) => debug!(topic, receivers, "Broadcast live event"),
            Err(_) => debug!(topic, "No receivers for live event"),
        }
    }
}

/// Upgrades the connection and streams live events to the client.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `notifier` - The live notifier from application state
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(notifier): AxumState<LiveNotifier>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, notifier))
}

async fn send_event<S>(sender: &mut S, event: &PortEvent) -> bool
where
    S: SinkExt<Message> + Unpin,
{
    match serde_json::to_string(&LiveFrame::new(event)) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            error!(?e, "Failed to serialize live event");
            true
        }
    }
}

async fn handle_socket(socket: WebSocket, notifier: LiveNotifier) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<PortEvent> = notifier.subscribe();

    let connected: PortEvent = PortEvent::Connected {
        message: String::from("Connected to port operations stream"),
    };
    if !send_event(&mut sender, &connected).await {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if !send_event(&mut sender, &event).await {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagging, dropped oldest events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_publish_without_receivers() {
        let notifier: LiveNotifier = LiveNotifier::new();
        notifier.publish(PortEvent::BerthDeleted { berth_id: 1 });
        assert_eq!(notifier.tx.receiver_count(), 0);
    }

    #[test]
    fn test_every_subscriber_receives_event() {
        let notifier: LiveNotifier = LiveNotifier::new();
        let mut rx1: broadcast::Receiver<PortEvent> = notifier.subscribe();
        let mut rx2: broadcast::Receiver<PortEvent> = notifier.subscribe();

        notifier.publish(PortEvent::PortCallDeleted { port_call_id: 9 });

        assert_eq!(
            rx1.try_recv().unwrap(),
            PortEvent::PortCallDeleted { port_call_id: 9 }
        );
        assert_eq!(
            rx2.try_recv().unwrap(),
            PortEvent::PortCallDeleted { port_call_id: 9 }
        );
    }

    #[test]
    fn test_slow_subscriber_loses_oldest_events() {
        let notifier: LiveNotifier = LiveNotifier::new();
        let mut rx: broadcast::Receiver<PortEvent> = notifier.subscribe();

        for vessel_id in 0..=100 {
            notifier.publish(PortEvent::VesselDeleted { vessel_id });
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(
            rx.try_recv().unwrap(),
            PortEvent::VesselDeleted { vessel_id: 1 }
        );
    }

    #[test]
    fn test_frame_carries_topic() {
        let event: PortEvent = PortEvent::BerthDeleted { berth_id: 4 };
        let json: serde_json::Value = serde_json::to_value(LiveFrame::new(&event)).unwrap();

        assert_eq!(json["topic"], "BerthDeleted");
        assert_eq!(json["event"]["type"], "berth_deleted");
        assert_eq!(json["event"]["berth_id"], 4);
    }
}
