use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keyboard::key::{self, Key};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Meister,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("unknown difficulty '{0}' (expected easy, medium, hard or meister)")]
    Unknown(String),
}

pub const ALL_DIFFICULTIES: &[Difficulty] = &[
    Difficulty::Easy,
    Difficulty::Medium,
    Difficulty::Hard,
    Difficulty::Meister,
];

const EASY_KEYS: &[&str] = &["h", "j", "k", "l"];

const MEDIUM_KEYS: &[&str] = &["h", "j", "k", "l", "w", "b", "$", "%", "gg", "G"];

const HARD_KEYS: &[&str] = &[
    "h", "j", "k", "l", "w", "b", "$", "%", "gg", "G", "0", "^", "e", "ge", "{", "}", "(", ")",
];

const MEISTER_KEYS: &[&str] = &[
    // basic
    "h", "j", "k", "l",
    // words
    "w", "b", "e", "ge",
    // line
    "0", "^", "$",
    // document
    "gg", "G", "{", "}", "(", ")",
    // screen
    "H", "M", "L",
    // find / till
    "f", "F", "t", "T",
    // search
    "*", "#", "n", "N", "/", "?",
    // matching
    "%",
    // jumps
    "''", "``",
    // scrolling
    "Ctrl+d", "Ctrl+u", "Ctrl+f", "Ctrl+b", "Ctrl+e", "Ctrl+y",
];

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Meister => "meister",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Meister => "Meister",
        }
    }

    /// Ordinal used to filter lesson steps.
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Meister => 4,
        }
    }

    /// The accepted targets for this tier, in declared order, as notation.
    pub fn key_notations(self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => EASY_KEYS,
            Difficulty::Medium => MEDIUM_KEYS,
            Difficulty::Hard => HARD_KEYS,
            Difficulty::Meister => MEISTER_KEYS,
        }
    }

    pub fn key_set(self) -> KeySet {
        KeySet::from_notations(self.key_notations())
    }

    /// Lenient lookup: unknown names fall back to `Easy`.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or(Difficulty::Easy)
    }

    pub fn next(self) -> Self {
        let idx = ALL_DIFFICULTIES.iter().position(|&d| d == self).unwrap_or(0);
        ALL_DIFFICULTIES[(idx + 1) % ALL_DIFFICULTIES.len()]
    }

    pub fn prev(self) -> Self {
        let idx = ALL_DIFFICULTIES.iter().position(|&d| d == self).unwrap_or(0);
        ALL_DIFFICULTIES[(idx + ALL_DIFFICULTIES.len() - 1) % ALL_DIFFICULTIES.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "meister" => Ok(Difficulty::Meister),
            _ => Err(DifficultyError::Unknown(s.to_string())),
        }
    }
}

/// One allow-list entry: its display notation and parsed tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyTarget {
    pub notation: String,
    pub keys: Vec<Key>,
}

/// Ordered, de-duplicated allow-list of training targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySet {
    targets: Vec<KeyTarget>,
}

impl KeySet {
    pub fn from_notations(notations: &[&str]) -> Self {
        let mut targets: Vec<KeyTarget> = Vec::with_capacity(notations.len());
        for &notation in notations {
            if notation.is_empty() || targets.iter().any(|t| t.notation == notation) {
                continue;
            }
            targets.push(KeyTarget {
                notation: notation.to_string(),
                keys: key::parse_sequence(notation),
            });
        }
        Self { targets }
    }

    pub fn targets(&self) -> &[KeyTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, notation: &str) -> bool {
        self.targets.iter().any(|t| t.notation == notation)
    }
}
