//! Cursor motions.
//!
//! Every motion is a pure function of buffer and cursor. Out-of-range
//! moves leave the cursor where it is, and the result is always clamped
//! into the NORMAL-mode column range of the line it lands on.

use crate::editor::buffer::{CursorPosition, TextBuffer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Down,
    Up,
    WordForward,
    WordBackward,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    MatchBracket,
}

impl Motion {
    /// Single-key motions. `gg` is reached through the pending-prefix path.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'h' => Some(Motion::Left),
            'l' => Some(Motion::Right),
            'j' => Some(Motion::Down),
            'k' => Some(Motion::Up),
            'w' => Some(Motion::WordForward),
            'b' => Some(Motion::WordBackward),
            '0' => Some(Motion::LineStart),
            '$' => Some(Motion::LineEnd),
            'G' => Some(Motion::DocumentEnd),
            '%' => Some(Motion::MatchBracket),
            _ => None,
        }
    }
}

pub fn apply_motion(buffer: &TextBuffer, cursor: CursorPosition, motion: Motion) -> CursorPosition {
    let mut pos = cursor;
    let len = buffer.line_len(pos.line);

    match motion {
        Motion::Left => pos.col = pos.col.saturating_sub(1),
        Motion::Right => {
            if pos.col + 1 < len {
                pos.col += 1;
            }
        }
        Motion::Down => {
            if pos.line + 1 < buffer.line_count() {
                pos.line += 1;
            }
        }
        Motion::Up => pos.line = pos.line.saturating_sub(1),
        Motion::WordForward => pos.col = word_forward(&buffer.line_chars(pos.line), pos.col),
        Motion::WordBackward => pos.col = word_backward(&buffer.line_chars(pos.line), pos.col),
        Motion::LineStart => pos.col = 0,
        Motion::LineEnd => pos.col = buffer.last_col(pos.line),
        Motion::DocumentStart => pos = CursorPosition::new(0, 0),
        Motion::DocumentEnd => pos = CursorPosition::new(buffer.line_count() - 1, 0),
        Motion::MatchBracket => {
            if let Some(found) = find_matching_bracket(buffer, pos) {
                pos = found;
            }
        }
    }

    buffer.clamp_normal(pos)
}

/// Next word start on the same line, or the last column if there is none.
fn word_forward(line: &[char], col: usize) -> usize {
    if col + 1 >= line.len() {
        return col;
    }
    match line[col + 1..].iter().position(|&c| c == ' ') {
        Some(offset) => col + 1 + offset + 1,
        None => line.len() - 1,
    }
}

/// Start of the current or previous word on the same line.
fn word_backward(line: &[char], col: usize) -> usize {
    if col == 0 || line.is_empty() {
        return col;
    }
    let mut c = (col - 1).min(line.len() - 1);
    while c > 0 && line[c] == ' ' {
        c -= 1;
    }
    while c > 0 && line[c - 1] != ' ' {
        c -= 1;
    }
    c
}

fn bracket_partner(ch: char) -> Option<(char, isize)> {
    match ch {
        '(' => Some((')', 1)),
        '[' => Some((']', 1)),
        '{' => Some(('}', 1)),
        ')' => Some(('(', -1)),
        ']' => Some(('[', -1)),
        '}' => Some(('{', -1)),
        _ => None,
    }
}

/// Position of the bracket matching the one under `from`.
///
/// The scan walks across line boundaries and tracks nesting of the same
/// bracket kind. Returns `None` when `from` is not on a bracket or no
/// partner exists.
pub fn find_matching_bracket(buffer: &TextBuffer, from: CursorPosition) -> Option<CursorPosition> {
    let open = buffer.char_at(from)?;
    let (target, step) = bracket_partner(open)?;

    let lines: Vec<Vec<char>> = (0..buffer.line_count()).map(|i| buffer.line_chars(i)).collect();
    let mut depth = 0usize;
    let mut line = from.line as isize;
    let mut col = from.col as isize + step;

    while line >= 0 && (line as usize) < lines.len() {
        let current = &lines[line as usize];
        if col < 0 {
            line -= 1;
            if line >= 0 {
                col = lines[line as usize].len() as isize - 1;
            }
            continue;
        }
        if col as usize >= current.len() {
            line += 1;
            col = 0;
            continue;
        }

        let ch = current[col as usize];
        if ch == open {
            depth += 1;
        } else if ch == target {
            if depth == 0 {
                return Some(CursorPosition::new(line as usize, col as usize));
            }
            depth -= 1;
        }
        col += step;
    }
    None
}
