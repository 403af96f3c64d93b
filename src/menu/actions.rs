//! Direct actions from the idle main menu. None of them change state.

use crate::catalog::{
    COURSE_BUTTON, MAIN_PROMPT, MINI_COURSE_CHAT_URL, PAID_CONFIRMATION, PAY_BUTTON,
    PAY_INSTRUCTIONS, PAY_PROMPT, PAY_URL, SUPPORT_ACK,
};
use crate::channels::{LinkButton, Reply};
use crate::notify::OperatorEvent;
use crate::session::Session;

use super::Turn;
use super::keyboards::{after_pay, main_menu};

/// Pay link plus a persistent "I paid" option.
pub fn pay(session: Session) -> Turn {
    Turn::new(
        session,
        vec![
            Reply::text(PAY_PROMPT).with_links(vec![LinkButton::new(PAY_BUTTON, PAY_URL)]),
            Reply::markdown(PAY_INSTRUCTIONS).with_keyboard(after_pay()),
        ],
    )
}

/// Confirmation, course access link, main menu, and an operator event.
pub fn paid(session: Session) -> Turn {
    Turn::new(
        session,
        vec![
            Reply::text(PAID_CONFIRMATION)
                .with_links(vec![LinkButton::new(COURSE_BUTTON, MINI_COURSE_CHAT_URL)]),
            Reply::text(MAIN_PROMPT).with_keyboard(main_menu()),
        ],
    )
    .with_event(OperatorEvent::PaymentConfirmed)
}

/// Acknowledge and page a human.
pub fn support(session: Session, text: &str) -> Turn {
    Turn::new(
        session,
        vec![Reply::text(SUPPORT_ACK).with_keyboard(main_menu())],
    )
    .with_event(OperatorEvent::SupportRequested {
        message: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PAID;
    use crate::session::FlowState;

    #[test]
    fn pay_offers_link_and_paid_keyboard() {
        let turn = pay(Session::idle());
        assert_eq!(turn.session.state, FlowState::Idle);
        assert_eq!(turn.replies[0].links()[0].url, PAY_URL);
        assert!(turn.replies[1].keyboard().unwrap().contains(PAID));
        assert!(turn.event.is_none());
    }

    #[test]
    fn paid_emits_course_link_and_event() {
        let turn = paid(Session::idle());
        assert_eq!(turn.replies[0].links()[0].url, MINI_COURSE_CHAT_URL);
        assert_eq!(turn.replies[1].keyboard(), Some(&main_menu()));
        assert_eq!(turn.event, Some(OperatorEvent::PaymentConfirmed));
    }

    #[test]
    fn support_carries_message_text() {
        let turn = support(Session::idle(), "🤝 Поддержка");
        assert_eq!(turn.replies[0].text, SUPPORT_ACK);
        assert_eq!(
            turn.event,
            Some(OperatorEvent::SupportRequested {
                message: "🤝 Поддержка".into()
            })
        );
    }
}
