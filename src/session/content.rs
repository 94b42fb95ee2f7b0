//! Built-in training material: lesson steps, challenges and the code
//! snippets each session's editor starts from.

use crate::editor::buffer::CursorPosition;
use crate::keyboard::keyset::Difficulty;

pub struct LessonStep {
    pub text: &'static str,
    pub key: &'static str,
    pub difficulty: Difficulty,
}

pub const LESSON_STEPS: &[LessonStep] = &[
    LessonStep {
        text: "Welcome! Press 'h' to move left.",
        key: "h",
        difficulty: Difficulty::Easy,
    },
    LessonStep {
        text: "Very good! Press 'j' to move down.",
        key: "j",
        difficulty: Difficulty::Easy,
    },
    LessonStep {
        text: "Perfect. Press 'k' to move up.",
        key: "k",
        difficulty: Difficulty::Easy,
    },
    LessonStep {
        text: "Great. Press 'l' to move right.",
        key: "l",
        difficulty: Difficulty::Easy,
    },
    LessonStep {
        text: "Those are the basics! Press 'w' to jump one word forward.",
        key: "w",
        difficulty: Difficulty::Medium,
    },
    LessonStep {
        text: "And 'b' to jump one word back.",
        key: "b",
        difficulty: Difficulty::Medium,
    },
    LessonStep {
        text: "Press '$' to jump to the end of the line.",
        key: "$",
        difficulty: Difficulty::Medium,
    },
    LessonStep {
        text: "Press '%' to jump to the matching bracket.",
        key: "%",
        difficulty: Difficulty::Medium,
    },
    LessonStep {
        text: "'gg' jumps to the start of the document. (Press g twice)",
        key: "gg",
        difficulty: Difficulty::Medium,
    },
    LessonStep {
        text: "'G' jumps to the end of the document.",
        key: "G",
        difficulty: Difficulty::Medium,
    },
    LessonStep {
        text: "Press '0' to jump to the start of the line.",
        key: "0",
        difficulty: Difficulty::Hard,
    },
    LessonStep {
        text: "Press '^' to jump to the first non-blank character.",
        key: "^",
        difficulty: Difficulty::Hard,
    },
    LessonStep {
        text: "Press 'e' to jump to the end of the next word.",
        key: "e",
        difficulty: Difficulty::Hard,
    },
];

/// Steps for one difficulty, in declared order.
///
/// Only steps tagged with exactly this difficulty are shown. A tier with
/// no steps of its own gets the full list.
pub fn lesson_steps_for(difficulty: Difficulty) -> Vec<&'static LessonStep> {
    let steps: Vec<&'static LessonStep> = LESSON_STEPS
        .iter()
        .filter(|s| s.difficulty.level() == difficulty.level())
        .collect();
    if steps.is_empty() {
        LESSON_STEPS.iter().collect()
    } else {
        steps
    }
}

pub struct Snippet {
    pub code: &'static str,
    pub file: &'static str,
    pub cursor: CursorPosition,
}

pub const LESSON_SNIPPET: Snippet = Snippet {
    code: "def tutorial():\n    print(\"Welcome to vimtype\")\n    # Follow the instructions above\n    return True",
    file: "tutorial.py",
    cursor: CursorPosition { line: 1, col: 10 },
};

pub const DRILL_SNIPPET: Snippet = Snippet {
    code: "def practice():\n    # Type the keys shown above\n    pass",
    file: "practice.py",
    cursor: CursorPosition { line: 2, col: 4 },
};

pub const CHALLENGE_FILE: &str = "main.py";
pub const FINISHED_TEXT: &str = "Great job!";

pub struct Challenge {
    pub instruction: &'static str,
    pub code: &'static str,
    pub primary: &'static str,
    pub alternates: &'static [&'static str],
}

pub const CHALLENGES: &[Challenge] = &[
    Challenge {
        instruction: "Navigate to the word 'total' (line 2)",
        code: "def calculate_sum(numbers):\n    total = 0\n    for num in numbers:\n        total += num\n    return total",
        primary: "jjw",
        alternates: &["2jw", "/total<Enter>"],
    },
    Challenge {
        instruction: "Delete the line containing 'print'",
        code: "result = calculate_sum([1, 2, 3])\nprint(f\"Sum: {result}\")\n# End of script",
        primary: "jdd",
        alternates: &["Gdd", "/print<Enter>dd"],
    },
    Challenge {
        instruction: "Change 'num' to 'n' (in the loop)",
        code: "    for num in numbers:\n        total += num",
        primary: "wcwn<Esc>",
        alternates: &["dwian<Esc>"],
    },
    Challenge {
        instruction: "Jump to the end of the file",
        code: "import os\n\ndef main():\n    print(\"Hello\")\n\nif __name__ == \"__main__\":\n    main()",
        primary: "G",
        alternates: &[":$"],
    },
    Challenge {
        instruction: "Yank the first line",
        code: "def copy_me():\n    pass",
        primary: "yy",
        alternates: &["Y"],
    },
];
