//! Scripted menu — the per-user conversation state machine.
//!
//! Each flow (videos, FAQ, qualifier, cases) is its own small machine over
//! [`FlowState`](crate::session::FlowState). Transition functions are pure:
//! they take the current [`Session`] and the user's input and return a
//! [`Turn`] describing the next session, the replies, and any operator event.
//! [`MenuRouter`] wraps them with the session store.

pub mod actions;
pub mod cases;
pub mod faq;
pub mod keyboards;
pub mod qualifier;
pub mod router;
pub mod videos;

pub use router::{Input, MenuRouter, transition};

use crate::channels::Reply;
use crate::notify::OperatorEvent;
use crate::session::Session;

/// Outcome of one user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Session to store for the user.
    pub session: Session,
    /// Replies to send, in order.
    pub replies: Vec<Reply>,
    /// Operator notification to emit after the replies.
    pub event: Option<OperatorEvent>,
}

impl Turn {
    pub fn new(session: Session, replies: Vec<Reply>) -> Self {
        Self {
            session,
            replies,
            event: None,
        }
    }

    pub fn with_event(mut self, event: OperatorEvent) -> Self {
        self.event = Some(event);
        self
    }
}

/// Leave any flow: back to `Idle` with the main menu.
pub(crate) fn back_to_main(session: Session, prompt: &str) -> Turn {
    Turn::new(
        session.into_idle(),
        vec![Reply::text(prompt).with_keyboard(keyboards::main_menu())],
    )
}
