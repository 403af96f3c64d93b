//! Channel trait and the message types that cross it.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;

/// Stream of inbound messages produced by a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A text message received from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Channel that received it.
    pub channel: String,
    /// Chat to reply into.
    pub chat_id: i64,
    /// Numeric user identity. Sessions are keyed by this.
    pub user_id: i64,
    /// Public handle, if the user has one.
    pub username: Option<String>,
    /// Raw message text.
    pub text: String,
}

impl IncomingMessage {
    pub fn new(
        channel: impl Into<String>,
        chat_id: i64,
        user_id: i64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            chat_id,
            user_id,
            username: None,
            text: text.into(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        let trimmed = username.trim();
        self.username = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

/// How the transport should interpret the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Markdown,
}

/// A URL button attached to a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

impl LinkButton {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Persistent reply options shown under the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    pub fn new<R, L>(rows: R) -> Self
    where
        R: IntoIterator<Item = L>,
        L: IntoIterator<Item = &'static str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    /// Whether `label` is one of the buttons.
    pub fn contains(&self, label: &str) -> bool {
        self.rows.iter().flatten().any(|l| l == label)
    }
}

/// Affordances attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Markup {
    /// Leave whatever keyboard the user currently has.
    #[default]
    None,
    /// Replace the user's reply keyboard.
    Keyboard(Keyboard),
    /// External links, one button each. Transports that can't show buttons
    /// render them as text instead, never both.
    Links(Vec<LinkButton>),
}

/// One outbound message, independent of transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
    pub markup: Markup,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            markup: Markup::None,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            format: TextFormat::Markdown,
            ..Self::text(text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.markup = Markup::Keyboard(keyboard);
        self
    }

    pub fn with_links(mut self, links: Vec<LinkButton>) -> Self {
        self.markup = if links.is_empty() {
            Markup::None
        } else {
            Markup::Links(links)
        };
        self
    }

    /// The keyboard this reply installs, if any.
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match &self.markup {
            Markup::Keyboard(kb) => Some(kb),
            _ => None,
        }
    }

    /// Link buttons on this reply (empty if none).
    pub fn links(&self) -> &[LinkButton] {
        match &self.markup {
            Markup::Links(links) => links,
            _ => &[],
        }
    }
}

/// A reply addressed to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub reply: Reply,
}

impl OutgoingMessage {
    pub fn new(chat_id: i64, reply: Reply) -> Self {
        Self { chat_id, reply }
    }
}

/// A bidirectional messaging transport.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Start receiving. The stream ends when the channel stops.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Deliver one reply.
    async fn send(&self, message: OutgoingMessage) -> Result<(), ChannelError>;

    /// Send plain text to a fixed chat (the operator destination).
    async fn send_to_chat(&self, chat_id: i64, text: &str) -> Result<(), ChannelError>;

    async fn health_check(&self) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
