//! CLI channel — stdin/stdout REPL for local testing.
//!
//! Buttons can't be clicked in a terminal, so link buttons are printed as
//! `label: url` lines and the keyboard as a list of labels to type.

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::channels::{Channel, IncomingMessage, Markup, MessageStream, OutgoingMessage, Reply};
use crate::error::ChannelError;

/// Identity used for the single local user.
pub const LOCAL_USER_ID: i64 = 1;

/// A simple CLI channel that reads from stdin and writes to stdout.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            eprint!("> ");

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            eprint!("> ");
                            continue;
                        }
                        let msg = IncomingMessage::new("cli", LOCAL_USER_ID, LOCAL_USER_ID, line)
                            .with_username("local");
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), ChannelError> {
        println!("\n{}", render(&message.reply));
        eprint!("> ");
        Ok(())
    }

    async fn send_to_chat(&self, chat_id: i64, text: &str) -> Result<(), ChannelError> {
        eprintln!("\n📣 [operator {chat_id}]\n{text}\n");
        Ok(())
    }
}

/// Plain-text rendering of a reply.
pub fn render(reply: &Reply) -> String {
    let mut out = reply.text.clone();
    match &reply.markup {
        Markup::None => {}
        Markup::Links(links) => {
            for link in links {
                out.push_str(&format!("\n{}: {}", link.label, link.url));
            }
        }
        Markup::Keyboard(kb) => {
            out.push('\n');
            for row in &kb.rows {
                let row: Vec<String> = row.iter().map(|label| format!("[{label}]")).collect();
                out.push_str(&format!("\n  {}", row.join(" ")));
            }
        }
    }
    out
}
