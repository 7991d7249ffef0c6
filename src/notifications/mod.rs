// ABOUTME: Notification events emitted after analyses and block applications
// ABOUTME: Async dispatcher trait with tracing and tokio broadcast implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::{AlertType, Severity, TrendAlertType};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

/// Default capacity of the broadcast channel
pub const NOTIFICATION_CHANNEL_SIZE: usize = 128;

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationKind {
    /// An overload analysis produced an alert
    OverloadDetected {
        /// Diet analysed
        diet_id: String,
        /// Owner of the diet
        client_id: String,
        /// Alert id
        alert_id: String,
        /// Rule that fired
        alert_type: AlertType,
        /// Severity of the alert
        severity: Severity,
    },
    /// A trend analysis produced an alert
    TrendAlertRaised {
        /// Client analysed
        client_id: String,
        /// Alert id
        alert_id: String,
        /// Rule that fired
        alert_type: TrendAlertType,
        /// Severity of the alert
        severity: Severity,
    },
    /// A preventive block was applied to a diet
    BlockApplied {
        /// Diet the block was applied to
        diet_id: String,
        /// Block id
        block_id: String,
        /// Alert the block belongs to
        alert_id: String,
    },
}

/// A notification with its identity and emission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Unique event id
    pub id: Uuid,
    /// Payload
    #[serde(flatten)]
    pub kind: NotificationKind,
    /// When the event was emitted
    pub emitted_at: DateTime<Utc>,
}

impl NotificationEvent {
    /// New event with a random id
    #[must_use]
    pub fn new(kind: NotificationKind, emitted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            emitted_at,
        }
    }
}

/// Notification dispatcher
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one event
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be handed to the transport
    async fn notify(&self, event: NotificationEvent) -> AppResult<()>;
}

/// Writes every event to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: NotificationEvent) -> AppResult<()> {
        let payload = serde_json::to_string(&event.kind)?;
        info!(event_id = %event.id, emitted_at = %event.emitted_at, %payload, "Notification emitted");
        Ok(())
    }
}

/// Fans events out to in-process subscribers
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<NotificationEvent>,
}

impl BroadcastNotifier {
    /// Notifier with a channel of `capacity` events
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_CHANNEL_SIZE)
    }
}

#[async_trait::async_trait]
impl Notifier for BroadcastNotifier {
    async fn notify(&self, event: NotificationEvent) -> AppResult<()> {
        // Nobody listening is not a failure.
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|e| AppError::external_service("notifications", format!("send failed: {e}")))
    }
}
