pub mod challenge;
pub mod content;
pub mod drill;
pub mod lesson;

use std::time::Duration;

use crate::editor::modal::ModalEditor;
use crate::engine::recognizer::MatchOutcome;
use crate::keyboard::key::Key;

pub use challenge::ChallengeSession;
pub use drill::DrillSession;
pub use lesson::LessonSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    Lesson,
    Drill,
    Challenge,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Lesson => "lesson",
            SessionKind::Drill => "drill",
            SessionKind::Challenge => "challenge",
        }
    }
}

/// Notifications a session emits for its host to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Outcome(MatchOutcome),
    ScoreChanged { delta: i64, total: u32 },
    StepSatisfied,
    StepStarted { index: usize, total: usize },
    RoundStarted { target: String },
    ChallengeStarted { index: usize, total: usize },
    LessonComplete,
    ChallengesFinished { score: u32 },
    HandOffToDrill,
}

/// A training session driven one key at a time.
///
/// `now` is the host's timeline (see [`crate::engine::timer::Clock`]).
/// Deadlines that have passed are honored before a key is processed.
pub trait Session {
    fn kind(&self) -> SessionKind;

    fn handle_key(&mut self, key: Key, now: Duration) -> Vec<SessionEvent>;

    /// Fire due deadlines without input.
    fn tick(&mut self, now: Duration) -> Vec<SessionEvent>;

    /// Cancel every pending deadline and ignore further input.
    fn stop(&mut self);

    fn is_active(&self) -> bool;

    fn editor(&self) -> &ModalEditor;

    fn instruction(&self) -> String;

    /// Short progress text for the header, e.g. `Step 2/4` or `Score: 30`.
    fn progress_label(&self) -> String;

    /// Target the host should highlight on its key strip, if any.
    fn highlighted_target(&self) -> Option<&str> {
        None
    }

    fn score(&self) -> Option<u32> {
        None
    }
}
