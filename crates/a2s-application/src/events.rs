//! Notifications published by [`crate::ShowroomUseCase`].

use std::time::Duration;

use a2s_core::Screen;
use a2s_core::pricing::{OrderSummary, PaymentMethod};
use a2s_core::workflow::GateDenial;
use a2s_execution::TaskId;
use chrono::{DateTime, Days, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Serialize;

pub const ORDER_PREFIX: &str = "A2S-";
pub const DELIVERY_ESTIMATE: &str = "2-3 business days";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: ChatSender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Receipt shown once a simulated payment completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    pub payment_method: PaymentMethod,
    pub delivery_slot: String,
    pub summary: OrderSummary,
    pub delivery_estimate: String,
    /// Calendar window two to three days after confirmation, e.g. "Oct 21-22".
    pub delivery_window: String,
    pub confirmed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    pub fn new(
        payment_method: PaymentMethod,
        delivery_slot: String,
        summary: OrderSummary,
        confirmed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_number: order_number(),
            payment_method,
            delivery_slot,
            summary,
            delivery_estimate: DELIVERY_ESTIMATE.to_string(),
            delivery_window: delivery_window(confirmed_at),
            confirmed_at,
        }
    }

    pub fn total(&self) -> f64 {
        self.summary.total
    }
}

/// `A2S-` followed by six random upper-case alphanumerics.
pub fn order_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}{}", ORDER_PREFIX, suffix)
}

fn delivery_window(from: DateTime<Utc>) -> String {
    let start = from.checked_add_days(Days::new(2)).unwrap_or(from);
    let end = from.checked_add_days(Days::new(3)).unwrap_or(from);
    if start.format("%b").to_string() == end.format("%b").to_string() {
        format!("{}-{}", start.format("%b %-d"), end.format("%-d"))
    } else {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShowroomEvent {
    ScreenChanged {
        from: Screen,
        to: Screen,
    },
    NavigationDenied {
        denial: GateDenial,
    },
    EscalatedToExpert {
        from: Screen,
    },
    HandoffScheduled {
        task: TaskId,
        to: Screen,
        delay: Duration,
    },
    UploadStarted {
        task: TaskId,
    },
    /// Fired when the upload delay elapses; `moved` is false when the
    /// onboarding gate refused the room screen.
    UploadCompleted {
        moved: bool,
    },
    PaymentStarted {
        task: TaskId,
        method: PaymentMethod,
    },
    PaymentCompleted {
        confirmation: OrderConfirmation,
    },
    Chat {
        message: ChatMessage,
    },
    TaskCancelled {
        task: TaskId,
    },
}
