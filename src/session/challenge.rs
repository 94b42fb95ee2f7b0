use std::time::Duration;

use tracing::info;

use crate::editor::buffer::CursorPosition;
use crate::editor::modal::ModalEditor;
use crate::engine::recognizer::{MatchOutcome, Recognizer, RecognizerPolicy, SequenceSpec};
use crate::engine::scoring::{self, CHALLENGE_POINTS};
use crate::engine::timer::{Timer, Timings};
use crate::keyboard::key::Key;
use crate::session::content::{CHALLENGE_FILE, CHALLENGES, Challenge, FINISHED_TEXT};
use crate::session::{Session, SessionEvent, SessionKind};

/// Ordered multi-key challenges. Misses are never penalized; stray keys
/// are absorbed by the recognizer's grow-then-trim buffer.
pub struct ChallengeSession {
    challenges: &'static [Challenge],
    index: usize,
    score: u32,
    finished: bool,
    active: bool,
    recognizer: Recognizer,
    editor: ModalEditor,
    pause: Timer,
    challenge_pause: Duration,
}

fn spec_for(challenge: &Challenge) -> SequenceSpec {
    SequenceSpec::parse(challenge.primary, challenge.alternates)
}

impl ChallengeSession {
    pub fn new(timings: Timings) -> Self {
        Self::with_challenges(CHALLENGES, timings)
    }

    pub fn with_challenges(challenges: &'static [Challenge], timings: Timings) -> Self {
        let spec = challenges
            .first()
            .map_or_else(|| SequenceSpec::new(Vec::new()), spec_for);
        let mut session = Self {
            challenges,
            index: 0,
            score: 0,
            finished: false,
            active: true,
            recognizer: Recognizer::new(spec, RecognizerPolicy::GrowThenTrim, timings.partial_timeout),
            editor: ModalEditor::new(timings.prefix_timeout),
            pause: Timer::new(),
            challenge_pause: timings.challenge_pause,
        };
        info!(count = challenges.len(), "challenges started");
        if challenges.is_empty() {
            session.finish();
        } else {
            session.load_current();
        }
        session
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_confirming(&self) -> bool {
        self.pause.is_armed()
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    pub fn current(&self) -> Option<&'static Challenge> {
        if self.finished {
            None
        } else {
            self.challenges.get(self.index)
        }
    }

    fn load_current(&mut self) {
        let challenge = &self.challenges[self.index];
        self.editor
            .load(challenge.code, CHALLENGE_FILE, CursorPosition::default());
        self.recognizer.set_spec(spec_for(challenge));
        info!(index = self.index, primary = challenge.primary, "challenge loaded");
    }

    fn finish(&mut self) -> SessionEvent {
        self.finished = true;
        self.recognizer.reset();
        self.editor
            .load(FINISHED_TEXT, CHALLENGE_FILE, CursorPosition::default());
        info!(score = self.score, "challenges finished");
        SessionEvent::ChallengesFinished { score: self.score }
    }

    fn advance(&mut self) -> SessionEvent {
        self.index += 1;
        if self.index >= self.challenges.len() {
            return self.finish();
        }
        self.load_current();
        SessionEvent::ChallengeStarted {
            index: self.index,
            total: self.challenges.len(),
        }
    }
}

impl Session for ChallengeSession {
    fn kind(&self) -> SessionKind {
        SessionKind::Challenge
    }

    fn handle_key(&mut self, key: Key, now: Duration) -> Vec<SessionEvent> {
        if !self.active {
            return Vec::new();
        }
        let mut events = self.tick(now);

        if !self.finished && !self.pause.is_armed() {
            let outcome = self.recognizer.consume(key, now);
            events.push(SessionEvent::Outcome(outcome));
            if outcome == MatchOutcome::Exact {
                let applied = scoring::apply_delta(&mut self.score, CHALLENGE_POINTS as i64);
                events.push(SessionEvent::ScoreChanged {
                    delta: applied,
                    total: self.score,
                });
                self.pause.arm(now, self.challenge_pause);
            }
        }

        self.editor.handle_key(key, now);
        events
    }

    fn tick(&mut self, now: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if !self.active {
            return events;
        }
        self.editor.tick(now);
        if self.pause.fire_if_due(now) {
            events.push(self.advance());
        }
        events
    }

    fn stop(&mut self) {
        self.active = false;
        self.pause.cancel();
        self.recognizer.reset();
        self.editor.cancel_pending();
        info!(index = self.index, score = self.score, "challenges stopped");
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn editor(&self) -> &ModalEditor {
        &self.editor
    }

    fn instruction(&self) -> String {
        if self.finished {
            format!("Challenge complete! Final score: {}", self.score)
        } else if self.pause.is_armed() {
            "Correct! Next challenge...".to_string()
        } else {
            self.challenges[self.index].instruction.to_string()
        }
    }

    fn progress_label(&self) -> String {
        if self.finished {
            format!("Score: {}", self.score)
        } else {
            format!(
                "Challenge {}/{}  Score: {}",
                self.index + 1,
                self.challenges.len(),
                self.score
            )
        }
    }

    fn score(&self) -> Option<u32> {
        Some(self.score)
    }
}
