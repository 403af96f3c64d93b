//! Menu router — picks the flow for the user's current state.
//!
//! Precedence: "back" label → current flow's own validator → (idle only)
//! main-menu entries and direct actions → generic nudge.

use std::sync::Arc;

use crate::catalog::{
    BACK, GREETING, IDLE_NUDGE, MAIN_PROMPT, MainOption, MenuOption, PAID, START_COMMAND,
};
use crate::channels::Reply;
use crate::session::{FlowState, Session, SessionStore, UserId};

use super::keyboards::main_menu;
use super::{Turn, actions, back_to_main, cases, faq, qualifier, videos};

/// Parsed user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// The entry command.
    Start,
    /// Any other text, as received. Matching trims it.
    Text(&'a str),
}

impl<'a> Input<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let text = raw.trim();
        if text == START_COMMAND || text.starts_with("/start ") || text.starts_with("/start@") {
            Input::Start
        } else {
            Input::Text(raw)
        }
    }
}

/// Pure transition function: no I/O, no store.
pub fn transition(session: Session, input: Input<'_>) -> Turn {
    let raw = match input {
        Input::Start => {
            return Turn::new(
                Session::idle(),
                vec![Reply::text(GREETING).with_keyboard(main_menu())],
            );
        }
        Input::Text(raw) => raw,
    };
    let text = raw.trim();

    if text == BACK {
        return back_to_main(session, MAIN_PROMPT);
    }

    match session.state {
        FlowState::Idle => idle(session, text, raw),
        FlowState::InVideos => videos::handle(session, text),
        FlowState::InFaq => faq::handle(session, text),
        FlowState::AwaitingQualifierQ1 => qualifier::answer_blog(session, text),
        FlowState::AwaitingQualifierQ2 => qualifier::answer_goal(session, text),
        FlowState::InCases => cases::handle(session, text),
    }
}

fn idle(session: Session, text: &str, raw: &str) -> Turn {
    if let Some(option) = MainOption::from_label(text) {
        return match option {
            MainOption::Videos => videos::enter(session),
            MainOption::Faq => faq::enter(session),
            MainOption::Qualifier => qualifier::enter(session),
            MainOption::Cases => cases::enter(session),
            MainOption::Pay => actions::pay(session),
            MainOption::Support => actions::support(session, raw),
        };
    }

    if text == PAID {
        return actions::paid(session);
    }

    Turn::new(
        session,
        vec![Reply::text(IDLE_NUDGE).with_keyboard(main_menu())],
    )
}

/// Applies [`transition`] against the session store.
pub struct MenuRouter {
    sessions: Arc<SessionStore>,
}

impl MenuRouter {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Route one input for `user`, storing the resulting session.
    pub fn handle(&self, user: UserId, raw: &str) -> Turn {
        let before = self.sessions.get(user);
        let turn = transition(before, Input::parse(raw));
        self.sessions.set(user, turn.session);

        if before.state != turn.session.state {
            tracing::debug!(
                user_id = user,
                from = %before.state,
                to = %turn.session.state,
                "Session transition"
            );
        }
        turn
    }
}
