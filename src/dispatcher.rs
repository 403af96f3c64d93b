//! Main loop — pulls messages off the channel and runs one task per message.
//!
//! Each user with messages in flight gets a lane: an ordered queue drained by
//! a single task that awaits every message's task before starting the next.
//! A user's inputs are therefore never reordered; different users run
//! concurrently. A lane is dropped as soon as its last message is processed.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::channels::{Channel, IncomingMessage, OutgoingMessage};
use crate::menu::MenuRouter;
use crate::notify::{Notifier, UserIdentity};
use crate::session::UserId;

/// Processes a single inbound message end to end.
pub struct UpdateHandler {
    channel: Arc<dyn Channel>,
    router: MenuRouter,
    notifier: Notifier,
}

impl UpdateHandler {
    pub fn new(channel: Arc<dyn Channel>, router: MenuRouter, notifier: Notifier) -> Self {
        Self {
            channel,
            router,
            notifier,
        }
    }

    /// Route, reply, then notify the operator if the turn asked for it.
    pub async fn process(&self, message: IncomingMessage) {
        tracing::debug!(
            user_id = message.user_id,
            chat_id = message.chat_id,
            chars = message.text.chars().count(),
            "Received message"
        );

        let turn = self.router.handle(message.user_id, &message.text);

        for reply in turn.replies {
            if let Err(e) = self
                .channel
                .send(OutgoingMessage::new(message.chat_id, reply))
                .await
            {
                tracing::warn!(
                    chat_id = message.chat_id,
                    error = %e,
                    "Failed to deliver reply"
                );
            }
        }

        if let Some(event) = turn.event {
            self.notifier
                .notify(&event, &UserIdentity::from(&message))
                .await;
        }
    }
}

/// Drives the channel stream and fans messages out into per-user lanes.
pub struct Dispatcher {
    channel: Arc<dyn Channel>,
    handler: Arc<UpdateHandler>,
}

impl Dispatcher {
    pub fn new(channel: Arc<dyn Channel>, handler: UpdateHandler) -> Self {
        Self {
            channel,
            handler: Arc::new(handler),
        }
    }

    /// Run until Ctrl+C or until the channel's stream ends. Messages already
    /// queued are finished before returning.
    pub async fn run(self) -> crate::error::Result<()> {
        let mut stream = self.channel.start().await?;
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut lanes = Lanes::new(Arc::clone(&self.handler), done_tx);

        tracing::info!(channel = self.channel.name(), "Bot ready and listening");

        loop {
            tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received, shutting down...");
                    break;
                }
                Some(user) = done_rx.recv() => lanes.finished(user),
                Some(result) = lanes.tasks.join_next(), if !lanes.tasks.is_empty() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Lane task failed");
                    }
                }
                msg = stream.next() => match msg {
                    Some(m) => lanes.dispatch(m),
                    None => {
                        tracing::info!("Channel stream ended, shutting down...");
                        break;
                    }
                }
            }
        }

        tracing::debug!(open_lanes = lanes.len(), "Draining lanes");
        lanes.close().await;

        self.channel.shutdown().await?;
        tracing::info!("Bot stopped");
        Ok(())
    }
}

/// A user's queue and the number of its messages not yet fully processed.
struct Lane {
    tx: mpsc::UnboundedSender<IncomingMessage>,
    pending: usize,
}

/// Open lanes. A lane exists only while it has pending messages, so idle
/// users cost nothing here.
struct Lanes {
    open: HashMap<UserId, Lane>,
    handler: Arc<UpdateHandler>,
    done: mpsc::UnboundedSender<UserId>,
    tasks: JoinSet<()>,
}

impl Lanes {
    fn new(handler: Arc<UpdateHandler>, done: mpsc::UnboundedSender<UserId>) -> Self {
        Self {
            open: HashMap::new(),
            handler,
            done,
            tasks: JoinSet::new(),
        }
    }

    /// Queue `message` behind the user's earlier messages.
    fn dispatch(&mut self, message: IncomingMessage) {
        let user = message.user_id;
        let message = match self.open.get_mut(&user) {
            Some(lane) => match lane.tx.send(message) {
                Ok(()) => {
                    lane.pending += 1;
                    return;
                }
                Err(mpsc::error::SendError(message)) => {
                    tracing::error!(user_id = user, "Lane task gone; reopening");
                    message
                }
            },
            None => message,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver was just created, so this send cannot fail.
        let _ = tx.send(message);
        self.open.insert(user, Lane { tx, pending: 1 });
        self.tasks.spawn(drain_lane(
            user,
            rx,
            Arc::clone(&self.handler),
            self.done.clone(),
        ));
    }

    /// One of `user`'s messages has been processed. Closes the lane once
    /// nothing is left in it.
    fn finished(&mut self, user: UserId) {
        let Some(lane) = self.open.get_mut(&user) else {
            return;
        };
        lane.pending = lane.pending.saturating_sub(1);
        if lane.pending == 0 {
            // Dropping the sender ends the lane task.
            self.open.remove(&user);
        }
    }

    fn len(&self) -> usize {
        self.open.len()
    }

    /// Stop accepting messages and wait for every queued one to finish.
    async fn close(mut self) {
        self.open.clear();
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Lane task failed");
            }
        }
    }
}

/// Process one user's messages strictly in arrival order. Each message runs in
/// its own task so a panic is contained to that update.
async fn drain_lane(
    user: UserId,
    mut rx: mpsc::UnboundedReceiver<IncomingMessage>,
    handler: Arc<UpdateHandler>,
    done: mpsc::UnboundedSender<UserId>,
) {
    while let Some(message) = rx.recv().await {
        let handler = Arc::clone(&handler);
        let task = tokio::spawn(async move { handler.process(message).await });
        if let Err(e) = task.await {
            tracing::error!(user_id = user, error = %e, "Update processing failed");
        }
        // The dispatcher may already be shutting down.
        let _ = done.send(user);
    }
}
