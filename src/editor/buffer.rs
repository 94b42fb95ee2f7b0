/// Cursor location in char units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CursorPosition {
    pub line: usize,
    pub col: usize,
}

impl CursorPosition {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Line-oriented text. Never holds zero lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        if lines.is_empty() {
            return Self::from_text("");
        }
        Self {
            lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map_or("", String::as_str)
    }

    pub fn line_chars(&self, idx: usize) -> Vec<char> {
        self.line(idx).chars().collect()
    }

    /// Length of a line in chars.
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).chars().count()
    }

    pub fn char_at(&self, pos: CursorPosition) -> Option<char> {
        self.line(pos.line).chars().nth(pos.col)
    }

    /// Highest column a NORMAL/VISUAL cursor may occupy on `line`.
    pub fn last_col(&self, line: usize) -> usize {
        self.line_len(line).saturating_sub(1)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub(crate) fn line_mut(&mut self, idx: usize) -> &mut String {
        &mut self.lines[idx]
    }

    pub(crate) fn remove_line(&mut self, idx: usize) -> String {
        if self.lines.len() == 1 {
            return std::mem::take(&mut self.lines[0]);
        }
        self.lines.remove(idx)
    }

    /// Clamp into the NORMAL-mode range.
    pub fn clamp_normal(&self, pos: CursorPosition) -> CursorPosition {
        let line = pos.line.min(self.lines.len() - 1);
        CursorPosition::new(line, pos.col.min(self.last_col(line)))
    }

    /// Clamp into the INSERT-mode range (one past the last char allowed).
    pub fn clamp_insert(&self, pos: CursorPosition) -> CursorPosition {
        let line = pos.line.min(self.lines.len() - 1);
        CursorPosition::new(line, pos.col.min(self.line_len(line)))
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

/// Byte offset of the `col`-th char in `s`, or `s.len()` past the end.
pub(crate) fn byte_offset(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map_or(s.len(), |(i, _)| i)
}
