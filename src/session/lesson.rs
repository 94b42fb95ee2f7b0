use std::time::Duration;

use tracing::info;

use crate::editor::modal::ModalEditor;
use crate::engine::recognizer::{MatchOutcome, Recognizer, RecognizerPolicy, SequenceSpec};
use crate::engine::timer::Timings;
use crate::keyboard::key::{self, ADVANCE, Key};
use crate::keyboard::keyset::Difficulty;
use crate::session::content::{self, LESSON_SNIPPET, LessonStep};
use crate::session::{Session, SessionEvent, SessionKind};

pub struct LessonSession {
    steps: Vec<&'static LessonStep>,
    index: usize,
    satisfied: bool,
    complete: bool,
    active: bool,
    recognizer: Recognizer,
    editor: ModalEditor,
}

impl LessonSession {
    pub fn new(difficulty: Difficulty, timings: Timings) -> Self {
        let steps = content::lesson_steps_for(difficulty);
        let spec = SequenceSpec::new(key::parse_sequence(steps[0].key));
        let mut editor = ModalEditor::new(timings.prefix_timeout);
        editor.load(LESSON_SNIPPET.code, LESSON_SNIPPET.file, LESSON_SNIPPET.cursor);
        // A `gg` step must stay open for as long as the editor would still complete `gg`
        let partial_timeout = timings.partial_timeout.max(timings.prefix_timeout);
        info!(%difficulty, steps = steps.len(), "lesson started");
        Self {
            steps,
            index: 0,
            satisfied: false,
            complete: false,
            active: true,
            recognizer: Recognizer::new(spec, RecognizerPolicy::HardReset, partial_timeout),
            editor,
        }
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> Option<&'static LessonStep> {
        if self.complete {
            None
        } else {
            self.steps.get(self.index).copied()
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    /// Explicit confirm action. Moves on only once the step is satisfied;
    /// on the completion screen it hands off to a drill.
    pub fn confirm(&mut self) -> Vec<SessionEvent> {
        if !self.active {
            return Vec::new();
        }
        if self.complete {
            info!("lesson handing off to drill");
            return vec![SessionEvent::HandOffToDrill];
        }
        if !self.satisfied {
            return Vec::new();
        }
        self.advance()
    }

    fn advance(&mut self) -> Vec<SessionEvent> {
        self.index += 1;
        self.satisfied = false;
        if self.index >= self.steps.len() {
            self.complete = true;
            self.recognizer.reset();
            info!("lesson complete");
            return vec![SessionEvent::LessonComplete];
        }
        let step = self.steps[self.index];
        self.recognizer
            .set_spec(SequenceSpec::new(key::parse_sequence(step.key)));
        info!(index = self.index, key = step.key, "lesson step started");
        vec![SessionEvent::StepStarted {
            index: self.index,
            total: self.steps.len(),
        }]
    }
}

impl Session for LessonSession {
    fn kind(&self) -> SessionKind {
        SessionKind::Lesson
    }

    fn handle_key(&mut self, key: Key, now: Duration) -> Vec<SessionEvent> {
        if !self.active {
            return Vec::new();
        }
        if key == ADVANCE {
            return self.confirm();
        }

        let mut events = Vec::new();
        if !self.complete {
            let outcome = self.recognizer.consume(key, now);
            events.push(SessionEvent::Outcome(outcome));
            if outcome == MatchOutcome::Exact && !self.satisfied {
                self.satisfied = true;
                events.push(SessionEvent::StepSatisfied);
            }
        }
        self.editor.handle_key(key, now);
        events
    }

    fn tick(&mut self, now: Duration) -> Vec<SessionEvent> {
        if self.active {
            self.recognizer.tick(now);
            self.editor.tick(now);
        }
        Vec::new()
    }

    fn stop(&mut self) {
        self.active = false;
        self.recognizer.reset();
        self.editor.cancel_pending();
        info!(step = self.index, "lesson stopped");
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn editor(&self) -> &ModalEditor {
        &self.editor
    }

    fn instruction(&self) -> String {
        if self.complete {
            "Tutorial complete! You're ready to practice.".to_string()
        } else if self.satisfied {
            "Correct! Press Space to continue.".to_string()
        } else {
            self.steps[self.index].text.to_string()
        }
    }

    fn progress_label(&self) -> String {
        if self.complete {
            "Done".to_string()
        } else {
            format!("Step {}/{}", self.index + 1, self.steps.len())
        }
    }

    fn highlighted_target(&self) -> Option<&str> {
        self.current_step().map(|s| s.key)
    }
}
