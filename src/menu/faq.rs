//! FAQ flow: same shape as videos, but each answer carries 0..N links.

use crate::catalog::{FAQ_INTRO, FAQ_NEXT, FAQ_RETRY, FaqQuestion, MenuOption, WATCH_BUTTON};
use crate::channels::{LinkButton, Reply};
use crate::session::{FlowState, Session};

use super::Turn;
use super::keyboards::faq_menu;

pub fn enter(session: Session) -> Turn {
    Turn::new(
        session.with_state(FlowState::InFaq),
        vec![Reply::text(FAQ_INTRO).with_keyboard(faq_menu())],
    )
}

pub fn handle(session: Session, text: &str) -> Turn {
    let Some(question) = FaqQuestion::from_label(text) else {
        return Turn::new(
            session,
            vec![Reply::text(FAQ_RETRY).with_keyboard(faq_menu())],
        );
    };

    Turn::new(
        session,
        vec![
            Reply::markdown(question.answer()).with_links(link_buttons(question.links())),
            Reply::text(FAQ_NEXT).with_keyboard(faq_menu()),
        ],
    )
}

/// One link gets a plain "watch" button; several get numbered buttons,
/// one per row.
pub fn link_buttons(links: &[&str]) -> Vec<LinkButton> {
    match links {
        [] => Vec::new(),
        [only] => vec![LinkButton::new(WATCH_BUTTON, *only)],
        many => many
            .iter()
            .enumerate()
            .map(|(i, url)| LinkButton::new(format!("▶️ Видео {}", i + 1), *url))
            .collect(),
    }
}
