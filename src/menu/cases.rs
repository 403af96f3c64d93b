//! Cases flow: one direct item plus narratives played one step per "next".

use crate::catalog::{
    CASE_NEXT, CASE_WEEK_BUTTON, CASE_WEEK_TEXT, CASE_WEEK_URL, CASES_FINISHED, CASES_INTRO,
    CASES_NEXT, CASES_PICK_FIRST, CASES_RETRY, CaseItem, CaseStory, MenuOption,
};
use crate::channels::{LinkButton, Reply};
use crate::session::{CaseProgress, FlowState, Session};

use super::keyboards::{case_playback, cases_menu};
use super::{Turn, back_to_main};

pub fn enter(session: Session) -> Turn {
    let session = Session {
        state: FlowState::InCases,
        case: None,
        ..session
    };
    Turn::new(
        session,
        vec![Reply::text(CASES_INTRO).with_keyboard(cases_menu())],
    )
}

pub fn handle(session: Session, text: &str) -> Turn {
    if text == CASE_NEXT {
        return advance(session);
    }

    match CaseItem::from_label(text) {
        Some(CaseItem::NoBlogWeek) => Turn::new(
            session,
            vec![
                Reply::markdown(CASE_WEEK_TEXT)
                    .with_links(vec![LinkButton::new(CASE_WEEK_BUTTON, CASE_WEEK_URL)]),
                Reply::text(CASES_NEXT).with_keyboard(cases_menu()),
            ],
        ),
        Some(CaseItem::Story(story)) => start_story(session, story),
        None => reprompt(session, CASES_RETRY),
    }
}

/// Picking a story always restarts it from step 0.
fn start_story(session: Session, story: CaseStory) -> Turn {
    let session = Session {
        case: Some(CaseProgress { story, step: 0 }),
        ..session
    };
    let first = story.step(0).unwrap_or_default();
    Turn::new(
        session,
        vec![Reply::markdown(first).with_keyboard(case_playback())],
    )
}

fn advance(session: Session) -> Turn {
    let Some(progress) = session.case else {
        return reprompt(session, CASES_PICK_FIRST);
    };

    let step = progress.step + 1;
    match progress.story.step(step) {
        Some(text) => Turn::new(
            Session {
                case: Some(CaseProgress { step, ..progress }),
                ..session
            },
            vec![Reply::markdown(text).with_keyboard(case_playback())],
        ),
        None => back_to_main(session, CASES_FINISHED),
    }
}

fn reprompt(session: Session, prompt: &str) -> Turn {
    Turn::new(
        session,
        vec![Reply::text(prompt).with_keyboard(cases_menu())],
    )
}
