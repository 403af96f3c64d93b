//! Qualifier flow: two fixed-choice questions, then three articles.
//!
//! `Idle -> AwaitingQualifierQ1 -> AwaitingQualifierQ2 -> Idle`. An invalid
//! answer repeats the same question. Entering clears previous answers.

use crate::catalog::{
    BACK_TO_MENU, BlogAnswer, GoalAnswer, MenuOption, QUALIFIER_ARTICLES, QUALIFIER_INTRO,
    QUALIFIER_Q1, QUALIFIER_Q2, QUALIFIER_RESULT, QUALIFIER_RETRY,
};
use crate::channels::{LinkButton, Reply};
use crate::session::{FlowState, QualifierAnswers, Session};

use super::keyboards::{qualifier_blog, qualifier_goal};
use super::{Turn, back_to_main};

pub fn enter(session: Session) -> Turn {
    let session = Session {
        state: FlowState::AwaitingQualifierQ1,
        qualifier: QualifierAnswers::default(),
        ..session
    };
    Turn::new(
        session,
        vec![
            Reply::text(format!("{QUALIFIER_INTRO}\n\n{QUALIFIER_Q1}"))
                .with_keyboard(qualifier_blog()),
        ],
    )
}

/// Handle input while `AwaitingQualifierQ1`.
pub fn answer_blog(session: Session, text: &str) -> Turn {
    let Some(blog) = BlogAnswer::from_label(text) else {
        return Turn::new(
            session,
            vec![Reply::text(QUALIFIER_RETRY).with_keyboard(qualifier_blog())],
        );
    };

    let session = Session {
        state: FlowState::AwaitingQualifierQ2,
        qualifier: QualifierAnswers {
            blog: Some(blog),
            ..session.qualifier
        },
        ..session
    };
    Turn::new(
        session,
        vec![Reply::text(QUALIFIER_Q2).with_keyboard(qualifier_goal())],
    )
}

/// Handle input while `AwaitingQualifierQ2`. A valid answer finishes the flow.
pub fn answer_goal(session: Session, text: &str) -> Turn {
    let Some(goal) = GoalAnswer::from_label(text) else {
        return Turn::new(
            session,
            vec![Reply::text(QUALIFIER_RETRY).with_keyboard(qualifier_goal())],
        );
    };

    let session = Session {
        qualifier: QualifierAnswers {
            goal: Some(goal),
            ..session.qualifier
        },
        ..session
    };
    tracing::info!(
        blog = ?session.qualifier.blog,
        goal = ?goal,
        "Qualifier completed"
    );

    let mut turn = back_to_main(session, BACK_TO_MENU);
    turn.replies.insert(0, Reply::markdown(QUALIFIER_RESULT).with_links(articles()));
    turn
}

fn articles() -> Vec<LinkButton> {
    QUALIFIER_ARTICLES
        .iter()
        .map(|(label, url)| LinkButton::new(*label, *url))
        .collect()
}
