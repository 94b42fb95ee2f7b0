use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;

use crate::editor::modal::ModalEditor;
use crate::engine::recognizer::{MatchOutcome, Recognizer, RecognizerPolicy, SequenceSpec};
use crate::engine::scoring::{self, DRILL_HIT_POINTS, DRILL_MISS_PENALTY};
use crate::engine::timer::{Timer, Timings};
use crate::keyboard::key::Key;
use crate::keyboard::keyset::{Difficulty, KeySet, KeyTarget};
use crate::session::content::DRILL_SNIPPET;
use crate::session::{Session, SessionEvent, SessionKind};

/// Endless randomized practice over a key set.
pub struct DrillSession {
    key_set: KeySet,
    target: usize,
    score: u32,
    rounds: u32,
    active: bool,
    recognizer: Recognizer,
    editor: ModalEditor,
    pause: Timer,
    drill_pause: Duration,
    rng: SmallRng,
}

impl DrillSession {
    pub fn new(key_set: KeySet, timings: Timings) -> Self {
        Self::with_rng(key_set, timings, SmallRng::from_entropy())
    }

    pub fn with_seed(key_set: KeySet, timings: Timings, seed: u64) -> Self {
        Self::with_rng(key_set, timings, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(key_set: KeySet, timings: Timings, rng: SmallRng) -> Self {
        let key_set = if key_set.is_empty() {
            Difficulty::Easy.key_set()
        } else {
            key_set
        };
        let mut editor = ModalEditor::new(timings.prefix_timeout);
        editor.load(DRILL_SNIPPET.code, DRILL_SNIPPET.file, DRILL_SNIPPET.cursor);
        let spec = SequenceSpec::new(key_set.targets()[0].keys.clone());

        let mut drill = Self {
            key_set,
            target: 0,
            score: 0,
            rounds: 0,
            active: true,
            recognizer: Recognizer::new(spec, RecognizerPolicy::PenalizeOnMiss, timings.partial_timeout),
            editor,
            pause: Timer::new(),
            drill_pause: timings.drill_pause,
            rng,
        };
        drill.next_round();
        info!(keys = drill.key_set.len(), "drill started");
        drill
    }

    pub fn target(&self) -> &KeyTarget {
        &self.key_set.targets()[self.target]
    }

    pub fn key_set(&self) -> &KeySet {
        &self.key_set
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_confirming(&self) -> bool {
        self.pause.is_armed()
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    fn next_round(&mut self) -> SessionEvent {
        self.target = self.rng.gen_range(0..self.key_set.len());
        self.rounds += 1;
        let target = self.target().clone();
        self.recognizer.set_spec(SequenceSpec::new(target.keys));
        info!(round = self.rounds, target = %target.notation, "drill round started");
        SessionEvent::RoundStarted {
            target: target.notation,
        }
    }

    fn adjust_score(&mut self, delta: i64) -> SessionEvent {
        let applied = scoring::apply_delta(&mut self.score, delta);
        SessionEvent::ScoreChanged {
            delta: applied,
            total: self.score,
        }
    }
}

impl Session for DrillSession {
    fn kind(&self) -> SessionKind {
        SessionKind::Drill
    }

    fn handle_key(&mut self, key: Key, now: Duration) -> Vec<SessionEvent> {
        if !self.active {
            return Vec::new();
        }
        let mut events = self.tick(now);

        // Recognition is suspended while a hit is being confirmed
        if !self.pause.is_armed() {
            let outcome = self.recognizer.consume(key, now);
            events.push(SessionEvent::Outcome(outcome));
            match outcome {
                MatchOutcome::Exact => {
                    events.push(self.adjust_score(DRILL_HIT_POINTS as i64));
                    self.pause.arm(now, self.drill_pause);
                }
                MatchOutcome::NoMatch if self.recognizer.policy().penalizes() => {
                    events.push(self.adjust_score(-(DRILL_MISS_PENALTY as i64)));
                }
                _ => {}
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
        self.recognizer.tick(now);
        self.editor.tick(now);
        if self.pause.fire_if_due(now) {
            events.push(self.next_round());
        }
        events
    }

    fn stop(&mut self) {
        self.active = false;
        self.pause.cancel();
        self.recognizer.reset();
        self.editor.cancel_pending();
        info!(score = self.score, rounds = self.rounds, "drill stopped");
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn editor(&self) -> &ModalEditor {
        &self.editor
    }

    fn instruction(&self) -> String {
        format!("Do: {}", self.target().notation)
    }

    fn progress_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    fn highlighted_target(&self) -> Option<&str> {
        Some(&self.target().notation)
    }

    fn score(&self) -> Option<u32> {
        Some(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::buffer::CursorPosition;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn single(notation: &str) -> DrillSession {
        DrillSession::with_seed(KeySet::from_notations(&[notation]), Timings::default(), 7)
    }

    #[test]
    fn test_hit_scores_and_pauses() {
        let mut drill = single("j");
        let events = drill.handle_key(Key::Char('j'), ms(0));
        assert_eq!(
            events,
            vec![
                SessionEvent::Outcome(MatchOutcome::Exact),
                SessionEvent::ScoreChanged { delta: 10, total: 10 },
            ]
        );
        assert!(drill.is_confirming());
        assert_eq!(drill.editor().cursor(), CursorPosition::new(2, 4));
    }

    #[test]
    fn test_keys_during_pause_are_not_scored() {
        let mut drill = single("j");
        drill.handle_key(Key::Char('j'), ms(0));
        assert!(drill.handle_key(Key::Char('x'), ms(100)).is_empty());
        assert_eq!(drill.score(), Some(10));
    }

    #[test]
    fn test_new_round_after_pause() {
        let mut drill = single("j");
        drill.handle_key(Key::Char('j'), ms(0));
        assert!(drill.tick(ms(199)).is_empty());
        assert_eq!(
            drill.tick(ms(200)),
            vec![SessionEvent::RoundStarted { target: "j".to_string() }]
        );
        assert_eq!(drill.rounds(), 2);
        assert!(!drill.is_confirming());
    }

    #[test]
    fn test_key_after_pause_fires_round_first() {
        let mut drill = single("j");
        drill.handle_key(Key::Char('j'), ms(0));
        let events = drill.handle_key(Key::Char('j'), ms(500));
        assert_eq!(events[0], SessionEvent::RoundStarted { target: "j".to_string() });
        assert_eq!(events[1], SessionEvent::Outcome(MatchOutcome::Exact));
        assert_eq!(drill.score(), Some(20));
    }

    #[test]
    fn test_miss_penalty_floors_at_zero() {
        let mut drill = single("j");
        let events = drill.handle_key(Key::Char('k'), ms(0));
        assert_eq!(
            events,
            vec![
                SessionEvent::Outcome(MatchOutcome::NoMatch),
                SessionEvent::ScoreChanged { delta: 0, total: 0 },
            ]
        );
        drill.handle_key(Key::Char('j'), ms(10));
        drill.tick(ms(300));
        drill.handle_key(Key::Char('j'), ms(310));
        drill.tick(ms(600));
        assert_eq!(drill.score(), Some(20));
        drill.handle_key(Key::Char('h'), ms(700));
        assert_eq!(drill.score(), Some(10));
    }

    #[test]
    fn test_partial_is_not_penalized() {
        let mut drill = single("gg");
        assert_eq!(
            drill.handle_key(Key::Char('g'), ms(0)),
            vec![SessionEvent::Outcome(MatchOutcome::Partial)]
        );
        assert_eq!(drill.score(), Some(0));
        // Partial buffer expires silently
        assert!(drill.tick(ms(800)).is_empty());
        assert!(drill.recognizer().buffer().is_empty());
    }

    #[test]
    fn test_miss_after_partial_is_penalized() {
        let mut drill = single("gg");
        drill.handle_key(Key::Char('g'), ms(0));
        drill.handle_key(Key::Char('g'), ms(10));
        drill.tick(ms(300));
        assert_eq!(drill.score(), Some(10));

        assert_eq!(
            drill.handle_key(Key::Char('g'), ms(400)),
            vec![SessionEvent::Outcome(MatchOutcome::Partial)]
        );
        assert_eq!(
            drill.handle_key(Key::Char('h'), ms(410)),
            vec![
                SessionEvent::Outcome(MatchOutcome::NoMatch),
                SessionEvent::ScoreChanged { delta: -10, total: 0 },
            ]
        );
        assert!(drill.recognizer().buffer().is_empty());
        assert!(!drill.recognizer().expiry().is_armed());
    }

    #[test]
    fn test_targets_come_from_key_set() {
        let set = Difficulty::Medium.key_set();
        let mut drill = DrillSession::with_seed(set.clone(), Timings::default(), 42);
        for round in 0..50u64 {
            assert!(set.contains(&drill.target().notation));
            let keys = drill.target().keys.clone();
            for &k in &keys {
                drill.handle_key(k, ms(round * 1000));
            }
            drill.tick(ms(round * 1000 + 500));
        }
        assert_eq!(drill.score(), Some(500));
    }

    #[test]
    fn test_empty_key_set_falls_back_to_easy() {
        let drill = DrillSession::with_seed(KeySet::default(), Timings::default(), 1);
        assert_eq!(drill.key_set().len(), 4);
    }

    #[test]
    fn test_stop_cancels_pause() {
        let mut drill = single("j");
        drill.handle_key(Key::Char('j'), ms(0));
        drill.stop();
        assert!(!drill.is_confirming());
        assert!(drill.tick(ms(1000)).is_empty());
        assert!(drill.handle_key(Key::Char('j'), ms(1100)).is_empty());
        assert_eq!(drill.rounds(), 1);
    }
}
