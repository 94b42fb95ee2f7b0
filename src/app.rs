use std::time::Duration;

use tracing::info;

use vimtype::config::Config;
use vimtype::engine::recognizer::MatchOutcome;
use vimtype::engine::timer::{Clock, SystemClock};
use vimtype::keyboard::key::Key;
use vimtype::keyboard::keyset::{Difficulty, KeySet};
use vimtype::session::{
    ChallengeSession, DrillSession, LessonSession, Session, SessionEvent, SessionKind,
};

use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

/// How long outcome colors and the pressed-key flash stay visible.
pub const FLASH_DURATION: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Session,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Miss,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub difficulty: Difficulty,
    pub key_set: KeySet,
    pub menu: Menu,
    pub theme: Theme,
    pub session: Option<Box<dyn Session>>,
    pub should_quit: bool,
    feedback: Option<(Feedback, Duration)>,
    pressed: Option<(Key, Duration)>,
    seed: Option<u64>,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        Self::with_clock(config, seed, Box::new(SystemClock::new()))
    }

    pub fn with_clock(config: Config, seed: Option<u64>, clock: Box<dyn Clock>) -> Self {
        let difficulty = config.difficulty();
        Self {
            screen: AppScreen::Menu,
            config,
            difficulty,
            key_set: difficulty.key_set(),
            menu: Menu::default(),
            theme: Theme::default(),
            session: None,
            should_quit: false,
            feedback: None,
            pressed: None,
            seed,
            clock,
        }
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.key_set = difficulty.key_set();
        self.config.set_difficulty(difficulty);
        info!(%difficulty, "difficulty changed");
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback.map(|(f, _)| f)
    }

    pub fn pressed_key(&self) -> Option<Key> {
        self.pressed.map(|(k, _)| k)
    }

    pub fn session_kind(&self) -> Option<SessionKind> {
        self.session.as_ref().map(|s| s.kind())
    }

    pub fn start_session(&mut self, kind: SessionKind) {
        if let Some(mut old) = self.session.take() {
            old.stop();
        }
        let timings = self.config.timings();
        let session: Box<dyn Session> = match kind {
            SessionKind::Lesson => Box::new(LessonSession::new(self.difficulty, timings)),
            SessionKind::Drill => {
                let key_set = self.key_set.clone();
                match self.seed {
                    Some(seed) => Box::new(DrillSession::with_seed(key_set, timings, seed)),
                    None => Box::new(DrillSession::new(key_set, timings)),
                }
            }
            SessionKind::Challenge => Box::new(ChallengeSession::new(timings)),
        };
        info!(kind = kind.as_str(), difficulty = %self.difficulty, "session started");
        self.session = Some(session);
        self.feedback = None;
        self.pressed = None;
        self.screen = AppScreen::Session;
    }

    pub fn leave_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
        self.feedback = None;
        self.pressed = None;
        self.screen = AppScreen::Menu;
    }

    pub fn handle_session_key(&mut self, key: Key) {
        let now = self.now();
        self.pressed = Some((key, now + FLASH_DURATION));
        let events = match self.session.as_mut() {
            Some(session) => session.handle_key(key, now),
            None => return,
        };
        self.apply_events(events, now);
    }

    pub fn tick(&mut self) {
        let now = self.now();
        if self.feedback.is_some_and(|(_, until)| now >= until) {
            self.feedback = None;
        }
        if self.pressed.is_some_and(|(_, until)| now >= until) {
            self.pressed = None;
        }
        let events = match self.session.as_mut() {
            Some(session) => session.tick(now),
            None => return,
        };
        self.apply_events(events, now);
    }

    fn apply_events(&mut self, events: Vec<SessionEvent>, now: Duration) {
        let kind = self.session_kind();
        let mut hand_off = false;
        for event in events {
            match event {
                SessionEvent::Outcome(MatchOutcome::Exact) => {
                    self.feedback = Some((Feedback::Success, now + FLASH_DURATION));
                }
                // Stray keys are part of solving a challenge
                SessionEvent::Outcome(MatchOutcome::NoMatch)
                    if kind != Some(SessionKind::Challenge) =>
                {
                    self.feedback = Some((Feedback::Miss, now + FLASH_DURATION));
                }
                SessionEvent::HandOffToDrill => hand_off = true,
                _ => {}
            }
        }
        if hand_off {
            self.start_session(SessionKind::Drill);
        }
    }
}
