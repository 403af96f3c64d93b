//! Operator notifications for payment confirmations and support requests.
//!
//! Best-effort: a failed send is logged and dropped, never surfaced to the
//! user and never retried.

use std::sync::Arc;

use crate::catalog::{MINI_COURSE_CHAT_URL, PAY_URL};
use crate::channels::{Channel, IncomingMessage};

/// Something the operator should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorEvent {
    /// User pressed "I paid".
    PaymentConfirmed,
    /// User asked for a human. Carries the raw message text.
    SupportRequested { message: String },
}

impl OperatorEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PaymentConfirmed => "payment_confirmed",
            Self::SupportRequested { .. } => "support_requested",
        }
    }
}

/// Who triggered the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i64,
    pub username: Option<String>,
    pub chat_id: i64,
}

impl From<&IncomingMessage> for UserIdentity {
    fn from(msg: &IncomingMessage) -> Self {
        Self {
            user_id: msg.user_id,
            username: msg.username.clone(),
            chat_id: msg.chat_id,
        }
    }
}

/// Render the operator message for `event`.
pub fn format_notification(event: &OperatorEvent, who: &UserIdentity) -> String {
    let headline = match event {
        OperatorEvent::PaymentConfirmed => "✅ Нажатие: «Я оплатила»",
        OperatorEvent::SupportRequested { .. } => "🙋 Запрос: «Поддержка»",
    };
    let username = match who.username.as_deref() {
        Some(handle) => format!("• Username: @{handle}"),
        None => "• Username: (не указан)".to_string(),
    };

    let mut lines = vec![
        headline.to_string(),
        format!("• TG user id: {}", who.user_id),
        username,
        format!("• Chat id: {}", who.chat_id),
    ];
    match event {
        OperatorEvent::PaymentConfirmed => {
            lines.push(format!("• Оплата: {PAY_URL}"));
            lines.push(format!("• Чат мини-курса: {MINI_COURSE_CHAT_URL}"));
        }
        OperatorEvent::SupportRequested { message } => {
            lines.push(format!("• Сообщение: {message}"));
        }
    }
    lines.join("\n")
}

/// Sends operator events to the configured destination chat.
pub struct Notifier {
    channel: Arc<dyn Channel>,
    admin_chat_id: i64,
}

impl Notifier {
    pub fn new(channel: Arc<dyn Channel>, admin_chat_id: i64) -> Self {
        Self {
            channel,
            admin_chat_id,
        }
    }

    /// Fire-and-forget. Returns whether delivery succeeded, for logging and tests.
    pub async fn notify(&self, event: &OperatorEvent, who: &UserIdentity) -> bool {
        let text = format_notification(event, who);
        match self.channel.send_to_chat(self.admin_chat_id, &text).await {
            Ok(()) => {
                tracing::info!(
                    event = event.kind(),
                    user_id = who.user_id,
                    "Operator notified"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    event = event.kind(),
                    user_id = who.user_id,
                    error = %e,
                    "Operator notification failed; dropping"
                );
                false
            }
        }
    }
}
