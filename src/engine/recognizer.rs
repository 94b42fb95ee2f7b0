use std::time::Duration;

use tracing::debug;

use crate::engine::timer::Timer;
use crate::keyboard::key::{self, Key};

/// Accepted token sequences for one training step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceSpec {
    pub primary: Vec<Key>,
    pub alternates: Vec<Vec<Key>>,
}

impl SequenceSpec {
    pub fn new(primary: Vec<Key>) -> Self {
        Self {
            primary,
            alternates: Vec::new(),
        }
    }

    /// Build from notation strings, e.g. `("jjw", &["2jw", "/total<Enter>"])`.
    pub fn parse(primary: &str, alternates: &[&str]) -> Self {
        Self {
            primary: key::parse_sequence(primary),
            alternates: alternates.iter().map(|a| key::parse_sequence(a)).collect(),
        }
    }

    pub fn accepted(&self) -> impl Iterator<Item = &[Key]> {
        std::iter::once(self.primary.as_slice()).chain(self.alternates.iter().map(Vec::as_slice))
    }

    pub fn max_len(&self) -> usize {
        self.accepted().map(<[Key]>::len).max().unwrap_or(0)
    }

    fn matches(&self, buffer: &[Key]) -> bool {
        self.accepted().any(|seq| seq == buffer)
    }

    fn is_strict_prefix(&self, buffer: &[Key]) -> bool {
        self.accepted()
            .any(|seq| seq.len() > buffer.len() && seq.starts_with(buffer))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Exact,
    Partial,
    NoMatch,
}

/// How a recognizer recovers from partial and failed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecognizerPolicy {
    /// Clear on miss; partial buffers expire after inactivity.
    HardReset,
    /// As `HardReset`, and the owner applies a penalty on miss.
    PenalizeOnMiss,
    /// Keep growing on miss; trim to the last key once the buffer is
    /// longer than the longest accepted sequence plus two.
    GrowThenTrim,
}

impl RecognizerPolicy {
    pub fn arms_partial_timeout(self) -> bool {
        !matches!(self, RecognizerPolicy::GrowThenTrim)
    }

    pub fn penalizes(self) -> bool {
        matches!(self, RecognizerPolicy::PenalizeOnMiss)
    }
}

/// Slack on top of the longest accepted sequence before a
/// `GrowThenTrim` buffer is cut back.
const GROW_SLACK: usize = 2;

pub struct Recognizer {
    spec: SequenceSpec,
    policy: RecognizerPolicy,
    buffer: Vec<Key>,
    expiry: Timer,
    partial_timeout: Duration,
}

impl Recognizer {
    pub fn new(spec: SequenceSpec, policy: RecognizerPolicy, partial_timeout: Duration) -> Self {
        Self {
            spec,
            policy,
            buffer: Vec::new(),
            expiry: Timer::new(),
            partial_timeout,
        }
    }

    pub fn spec(&self) -> &SequenceSpec {
        &self.spec
    }

    pub fn policy(&self) -> RecognizerPolicy {
        self.policy
    }

    pub fn buffer(&self) -> &[Key] {
        &self.buffer
    }

    pub fn expiry(&self) -> &Timer {
        &self.expiry
    }

    /// Start a new step with a different target.
    pub fn set_spec(&mut self, spec: SequenceSpec) {
        self.spec = spec;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.expiry.cancel();
    }

    /// Drop an expired partial buffer. Returns `true` if it was dropped.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.expiry.fire_if_due(now) {
            debug!(buffer = %key::format_sequence(&self.buffer), "partial input expired");
            self.buffer.clear();
            true
        } else {
            false
        }
    }

    pub fn consume(&mut self, key: Key, now: Duration) -> MatchOutcome {
        self.tick(now);
        self.expiry.cancel();
        self.buffer.push(key);

        let outcome = if self.spec.matches(&self.buffer) {
            self.buffer.clear();
            MatchOutcome::Exact
        } else if self.spec.is_strict_prefix(&self.buffer) {
            if self.policy.arms_partial_timeout() {
                self.expiry.arm(now, self.partial_timeout);
            }
            MatchOutcome::Partial
        } else {
            match self.policy {
                RecognizerPolicy::HardReset | RecognizerPolicy::PenalizeOnMiss => {
                    self.buffer.clear();
                }
                RecognizerPolicy::GrowThenTrim => {
                    if self.buffer.len() > self.spec.max_len() + GROW_SLACK {
                        let last = self.buffer.len() - 1;
                        self.buffer.drain(..last);
                    }
                }
            }
            MatchOutcome::NoMatch
        };

        debug!(
            %key,
            ?outcome,
            buffer = %key::format_sequence(&self.buffer),
            "recognizer consumed key"
        );
        outcome
    }
}
