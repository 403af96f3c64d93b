//! Per-user conversation sessions.
//!
//! Sessions are created lazily in `Idle` and live for the process lifetime.
//! The store is sharded (`DashMap`), so users never contend on a single lock;
//! a user's own updates are serialized upstream by the dispatcher, which makes
//! last-write-wins `set` safe.

use std::fmt;

use dashmap::DashMap;

use crate::catalog::{BlogAnswer, CaseStory, GoalAnswer};

/// Opaque numeric user identity from the transport.
pub type UserId = i64;

/// Which menu the user is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    InVideos,
    InFaq,
    AwaitingQualifierQ1,
    AwaitingQualifierQ2,
    InCases,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::InVideos => "in_videos",
            Self::InFaq => "in_faq",
            Self::AwaitingQualifierQ1 => "awaiting_qualifier_q1",
            Self::AwaitingQualifierQ2 => "awaiting_qualifier_q2",
            Self::InCases => "in_cases",
        };
        write!(f, "{s}")
    }
}

/// Answers captured by the qualifier. Stored for analytics only; nothing
/// branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QualifierAnswers {
    pub blog: Option<BlogAnswer>,
    pub goal: Option<GoalAnswer>,
}

/// Narrative playback position inside the cases menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseProgress {
    pub story: CaseStory,
    /// 0-based index of the step last shown.
    pub step: usize,
}

/// One user's conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub state: FlowState,
    /// Set only while `state == InCases` and a story has been picked.
    pub case: Option<CaseProgress>,
    pub qualifier: QualifierAnswers,
}

impl Session {
    /// The session everyone starts with.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Move to `Idle`, dropping flow-scoped case playback. Qualifier answers
    /// survive until the next qualifier entry clears them.
    pub fn into_idle(self) -> Self {
        Self {
            state: FlowState::Idle,
            case: None,
            ..self
        }
    }

    pub fn with_state(self, state: FlowState) -> Self {
        Self { state, ..self }
    }
}

/// Keyed store of sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session for `user`, creating an idle one if absent.
    pub fn get(&self, user: UserId) -> Session {
        *self.sessions.entry(user).or_insert_with(Session::idle)
    }

    /// Replace `user`'s session.
    pub fn set(&self, user: UserId, session: Session) {
        self.sessions.insert(user, session);
    }

    /// Number of users seen so far.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn get_creates_idle_session_lazily() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let session = store.get(42);
        assert_eq!(session, Session::idle());
        assert_eq!(session.state, FlowState::Idle);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn set_replaces_whole_session() {
        let store = SessionStore::new();
        let session = Session {
            state: FlowState::InCases,
            case: Some(CaseProgress {
                story: CaseStory::Elena,
                step: 2,
            }),
            qualifier: QualifierAnswers::default(),
        };
        store.set(7, session);
        assert_eq!(store.get(7), session);

        store.set(7, Session::idle());
        assert_eq!(store.get(7).case, None);
    }

    #[test]
    fn users_are_isolated() {
        let store = SessionStore::new();
        store.set(1, Session::idle().with_state(FlowState::InFaq));
        assert_eq!(store.get(2).state, FlowState::Idle);
        assert_eq!(store.get(1).state, FlowState::InFaq);
    }

    #[test]
    fn into_idle_clears_case_but_keeps_answers() {
        let session = Session {
            state: FlowState::InCases,
            case: Some(CaseProgress {
                story: CaseStory::Julia,
                step: 1,
            }),
            qualifier: QualifierAnswers {
                blog: Some(BlogAnswer::HasBlog),
                goal: None,
            },
        };
        let idle = session.into_idle();
        assert_eq!(idle.state, FlowState::Idle);
        assert_eq!(idle.case, None);
        assert_eq!(idle.qualifier.blog, Some(BlogAnswer::HasBlog));
    }

    #[tokio::test]
    async fn concurrent_users_do_not_corrupt_each_other() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();
        for user in 0..32_i64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for step in 0..50 {
                    let session = store.get(user);
                    let next = Session {
                        case: Some(CaseProgress {
                            story: CaseStory::Darya,
                            step,
                        }),
                        ..session.with_state(FlowState::InCases)
                    };
                    store.set(user, next);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 32);
        for user in 0..32_i64 {
            let session = store.get(user);
            assert_eq!(session.state, FlowState::InCases);
            assert_eq!(session.case.map(|c| c.step), Some(49));
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(FlowState::Idle.to_string(), "idle");
        assert_eq!(FlowState::AwaitingQualifierQ2.to_string(), "awaiting_qualifier_q2");
    }
}
