//! Videos flow: `Idle -> InVideos`, self-looping until "back".

use crate::catalog::{MenuOption, VIDEOS_INTRO, VIDEOS_NEXT, VIDEOS_RETRY, Video, WATCH_BUTTON};
use crate::channels::{LinkButton, Reply};
use crate::session::{FlowState, Session};

use super::Turn;
use super::keyboards::videos_menu;

pub fn enter(session: Session) -> Turn {
    Turn::new(
        session.with_state(FlowState::InVideos),
        vec![Reply::text(VIDEOS_INTRO).with_keyboard(videos_menu())],
    )
}

/// Handle input while `InVideos`. Never leaves the flow; "back" is handled
/// by the router before this is called.
pub fn handle(session: Session, text: &str) -> Turn {
    let Some(video) = Video::from_label(text) else {
        return Turn::new(
            session,
            vec![Reply::text(VIDEOS_RETRY).with_keyboard(videos_menu())],
        );
    };

    Turn::new(
        session,
        vec![
            Reply::markdown(video.caption())
                .with_links(vec![LinkButton::new(WATCH_BUTTON, video.url())]),
            Reply::text(VIDEOS_NEXT).with_keyboard(videos_menu()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_videos() -> Session {
        Session::idle().with_state(FlowState::InVideos)
    }

    #[test]
    fn enter_shows_intro_with_menu() {
        let turn = enter(Session::idle());
        assert_eq!(turn.session.state, FlowState::InVideos);
        assert_eq!(turn.replies.len(), 1);
        assert_eq!(turn.replies[0].text, VIDEOS_INTRO);
        assert_eq!(turn.replies[0].keyboard(), Some(&videos_menu()));
    }

    #[test]
    fn known_video_sends_caption_and_single_button() {
        let turn = handle(in_videos(), Video::LaunchMistakes.label());
        assert_eq!(turn.session.state, FlowState::InVideos);
        assert_eq!(turn.replies.len(), 2);

        let links = turn.replies[0].links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, Video::LaunchMistakes.url());
        assert_eq!(links[0].label, WATCH_BUTTON);
        assert!(!turn.replies[0].text.contains(Video::LaunchMistakes.url()));

        assert_eq!(turn.replies[1].text, VIDEOS_NEXT);
        assert_eq!(turn.replies[1].keyboard(), Some(&videos_menu()));
    }

    #[test]
    fn unknown_input_reprompts_without_transition() {
        let turn = handle(in_videos(), "what?");
        assert_eq!(turn.session, in_videos());
        assert_eq!(turn.replies, vec![Reply::text(VIDEOS_RETRY).with_keyboard(videos_menu())]);
        assert!(turn.event.is_none());
    }
}
