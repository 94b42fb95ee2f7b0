pub mod recognizer;
pub mod scoring;
pub mod timer;

pub use recognizer::{MatchOutcome, Recognizer, RecognizerPolicy, SequenceSpec};
pub use timer::{Clock, ManualClock, SystemClock, Timer, Timings};
