use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::editor::buffer::{CursorPosition, TextBuffer};
use crate::editor::motion::{self, Motion};
use crate::editor::mutate;
use crate::editor::status::StatusLine;
use crate::engine::timer::Timer;
use crate::keyboard::key::Key;

pub const DEFAULT_FILE_LABEL: &str = "main.py";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Normal,
    Insert,
    Visual,
}

impl EditorMode {
    pub fn name(self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Visual => "VISUAL",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A buffered first key of a two-key motion, waiting for its second key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPrefix {
    pub key: char,
    pub expiry: Timer,
}

/// Simulated modal editor: buffer, cursor, mode and the `g` prefix.
pub struct ModalEditor {
    buffer: TextBuffer,
    cursor: CursorPosition,
    mode: EditorMode,
    anchor: Option<CursorPosition>,
    pending: Option<PendingPrefix>,
    file_label: String,
    prefix_timeout: Duration,
}

impl ModalEditor {
    pub fn new(prefix_timeout: Duration) -> Self {
        Self {
            buffer: TextBuffer::default(),
            cursor: CursorPosition::default(),
            mode: EditorMode::Normal,
            anchor: None,
            pending: None,
            file_label: DEFAULT_FILE_LABEL.to_string(),
            prefix_timeout,
        }
    }

    /// Replace the content and return to NORMAL mode.
    pub fn load(&mut self, text: &str, file_label: &str, cursor: CursorPosition) {
        self.buffer = TextBuffer::from_text(text);
        self.file_label = file_label.to_string();
        self.cursor = self.buffer.clamp_normal(cursor);
        self.mode = EditorMode::Normal;
        self.anchor = None;
        self.pending = None;
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn anchor(&self) -> Option<CursorPosition> {
        self.anchor
    }

    pub fn pending(&self) -> Option<&PendingPrefix> {
        self.pending.as_ref()
    }

    pub fn file_label(&self) -> &str {
        &self.file_label
    }

    pub fn status(&self) -> StatusLine {
        StatusLine::new(self.mode, &self.file_label, self.cursor, self.buffer.line_count())
    }

    /// Ordered selection bounds while in VISUAL mode.
    pub fn selection(&self) -> Option<(CursorPosition, CursorPosition)> {
        let anchor = self.anchor?;
        if self.mode != EditorMode::Visual {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// Drop an expired pending prefix. Returns `true` if one was dropped.
    pub fn tick(&mut self, now: Duration) -> bool {
        let expired = self
            .pending
            .as_mut()
            .is_some_and(|p| p.expiry.fire_if_due(now));
        if expired {
            debug!("pending prefix expired");
            self.pending = None;
        }
        expired
    }

    /// Drop all in-flight state tied to deferrals.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn handle_key(&mut self, key: Key, now: Duration) {
        self.tick(now);
        match self.mode {
            EditorMode::Normal => self.handle_normal(key, now),
            EditorMode::Insert => self.handle_insert(key),
            EditorMode::Visual => self.handle_visual(key, now),
        }
    }

    fn handle_normal(&mut self, key: Key, now: Duration) {
        if self.handle_motion_key(key, now) {
            return;
        }
        match key {
            Key::Char('i') => self.mode = EditorMode::Insert,
            Key::Char('a') => {
                if self.cursor.col < self.buffer.line_len(self.cursor.line) {
                    self.cursor.col += 1;
                }
                self.mode = EditorMode::Insert;
            }
            Key::Char('v') => {
                self.anchor = Some(self.cursor);
                self.mode = EditorMode::Visual;
            }
            Key::Char('x') => mutate::delete_char_at_cursor(&mut self.buffer, &mut self.cursor),
            _ => {}
        }
    }

    fn handle_insert(&mut self, key: Key) {
        match key {
            Key::Esc => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
                self.cursor = self.buffer.clamp_normal(self.cursor);
                self.mode = EditorMode::Normal;
            }
            Key::Backspace => mutate::backspace(&mut self.buffer, &mut self.cursor),
            Key::Char(ch) if !ch.is_control() => {
                mutate::insert_char(&mut self.buffer, &mut self.cursor, ch)
            }
            _ => {}
        }
    }

    fn handle_visual(&mut self, key: Key, now: Duration) {
        if self.handle_motion_key(key, now) {
            return;
        }
        match key {
            Key::Char('x') | Key::Char('d') => {
                mutate::delete_selection(&mut self.buffer, &mut self.cursor);
                self.anchor = None;
                self.mode = EditorMode::Normal;
            }
            Key::Esc => {
                self.anchor = None;
                self.mode = EditorMode::Normal;
            }
            _ => {}
        }
    }

    /// Motions shared by NORMAL and VISUAL, including the `gg` prefix.
    /// Returns `true` if the key was consumed.
    fn handle_motion_key(&mut self, key: Key, now: Duration) -> bool {
        let had_prefix = self.pending.take().is_some();

        if key == Key::Char('g') {
            if had_prefix {
                self.apply(Motion::DocumentStart);
            } else {
                let mut expiry = Timer::new();
                expiry.arm(now, self.prefix_timeout);
                self.pending = Some(PendingPrefix { key: 'g', expiry });
                debug!("armed g prefix");
            }
            return true;
        }

        match key.as_char().and_then(Motion::from_char) {
            Some(m) => {
                self.apply(m);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, m: Motion) {
        self.cursor = motion::apply_motion(&self.buffer, self.cursor, m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn editor(text: &str, line: usize, col: usize) -> ModalEditor {
        let mut ed = ModalEditor::new(ms(1000));
        ed.load(text, "test.py", CursorPosition::new(line, col));
        ed
    }

    fn type_keys(ed: &mut ModalEditor, keys: &[Key], at: Duration) {
        for &k in keys {
            ed.handle_key(k, at);
        }
    }

    #[test]
    fn test_load_clamps_cursor() {
        let ed = editor("ab\ncd", 7, 7);
        assert_eq!(ed.cursor(), CursorPosition::new(1, 1));
        assert_eq!(ed.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_insert_and_escape() {
        let mut ed = editor("pss", 0, 1);
        type_keys(&mut ed, &[Key::Char('i'), Key::Char('a'), Key::Esc], ms(0));
        assert_eq!(ed.lines(), &["pass"]);
        assert_eq!(ed.mode(), EditorMode::Normal);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 1));
    }

    #[test]
    fn test_append_moves_past_cursor() {
        let mut ed = editor("ab", 0, 1);
        ed.handle_key(Key::Char('a'), ms(0));
        assert_eq!(ed.mode(), EditorMode::Insert);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 2));
        ed.handle_key(Key::Char('c'), ms(0));
        assert_eq!(ed.lines(), &["abc"]);
    }

    #[test]
    fn test_append_on_empty_line_stays_at_zero() {
        let mut ed = editor("", 0, 0);
        ed.handle_key(Key::Char('a'), ms(0));
        assert_eq!(ed.cursor(), CursorPosition::new(0, 0));
    }

    #[test]
    fn test_insert_backspace_joins_lines() {
        let mut ed = editor("abc\ndef", 1, 0);
        type_keys(&mut ed, &[Key::Char('i'), Key::Backspace], ms(0));
        assert_eq!(ed.lines(), &["abcdef"]);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 3));
    }

    #[test]
    fn test_insert_ignores_named_and_modified_keys() {
        let mut ed = editor("abc", 0, 0);
        type_keys(&mut ed, &[Key::Char('i'), Key::Enter, Key::Tab, Key::Ctrl('d')], ms(0));
        assert_eq!(ed.lines(), &["abc"]);
        assert_eq!(ed.mode(), EditorMode::Insert);
    }

    #[test]
    fn test_x_deletes_in_normal() {
        let mut ed = editor("abc", 0, 2);
        ed.handle_key(Key::Char('x'), ms(0));
        assert_eq!(ed.lines(), &["ab"]);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 1));
    }

    #[test]
    fn test_visual_motion_and_delete() {
        let mut ed = editor("abcdef", 0, 1);
        type_keys(&mut ed, &[Key::Char('v'), Key::Char('l'), Key::Char('l')], ms(0));
        assert_eq!(ed.mode(), EditorMode::Visual);
        assert_eq!(ed.anchor(), Some(CursorPosition::new(0, 1)));
        assert_eq!(
            ed.selection(),
            Some((CursorPosition::new(0, 1), CursorPosition::new(0, 3)))
        );
        ed.handle_key(Key::Char('d'), ms(0));
        assert_eq!(ed.lines(), &["abcef"]);
        assert_eq!(ed.mode(), EditorMode::Normal);
        assert_eq!(ed.anchor(), None);
        assert_eq!(ed.selection(), None);
    }

    #[test]
    fn test_visual_escape_clears_anchor() {
        let mut ed = editor("abc", 0, 2);
        type_keys(&mut ed, &[Key::Char('v'), Key::Char('h'), Key::Esc], ms(0));
        assert_eq!(ed.mode(), EditorMode::Normal);
        assert_eq!(ed.anchor(), None);
        assert_eq!(ed.lines(), &["abc"]);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 1));
    }

    #[test]
    fn test_selection_is_ordered() {
        let mut ed = editor("abc\ndef", 1, 2);
        type_keys(&mut ed, &[Key::Char('v'), Key::Char('k')], ms(0));
        assert_eq!(
            ed.selection(),
            Some((CursorPosition::new(0, 2), CursorPosition::new(1, 2)))
        );
    }

    #[test]
    fn test_gg_within_window() {
        let mut ed = editor("one\ntwo\nthree", 2, 3);
        ed.handle_key(Key::Char('g'), ms(0));
        assert!(ed.pending().is_some());
        assert_eq!(ed.cursor(), CursorPosition::new(2, 3));
        ed.handle_key(Key::Char('g'), ms(999));
        assert_eq!(ed.cursor(), CursorPosition::new(0, 0));
        assert!(ed.pending().is_none());
    }

    #[test]
    fn test_g_expires_without_motion() {
        let mut ed = editor("one\ntwo", 1, 1);
        ed.handle_key(Key::Char('g'), ms(0));
        assert!(!ed.tick(ms(999)));
        assert!(ed.tick(ms(1000)));
        assert!(ed.pending().is_none());
        ed.handle_key(Key::Char('g'), ms(1500));
        assert_eq!(ed.cursor(), CursorPosition::new(1, 1));
        assert!(ed.pending().is_some());
    }

    #[test]
    fn test_late_second_g_rearms_instead_of_jumping() {
        let mut ed = editor("one\ntwo", 1, 1);
        ed.handle_key(Key::Char('g'), ms(0));
        ed.handle_key(Key::Char('g'), ms(1200));
        assert_eq!(ed.cursor(), CursorPosition::new(1, 1));
        assert!(ed.pending().is_some());
    }

    #[test]
    fn test_unrelated_key_discards_prefix_and_still_applies() {
        let mut ed = editor("one\ntwo", 1, 1);
        ed.handle_key(Key::Char('g'), ms(0));
        ed.handle_key(Key::Char('h'), ms(10));
        assert!(ed.pending().is_none());
        assert_eq!(ed.cursor(), CursorPosition::new(1, 0));
        ed.handle_key(Key::Char('g'), ms(20));
        assert_eq!(ed.cursor(), CursorPosition::new(1, 0));
    }

    #[test]
    fn test_gg_in_visual_mode() {
        let mut ed = editor("one\ntwo", 1, 2);
        type_keys(&mut ed, &[Key::Char('v'), Key::Char('g'), Key::Char('g')], ms(0));
        assert_eq!(ed.mode(), EditorMode::Visual);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 0));
    }

    #[test]
    fn test_unknown_keys_are_noops() {
        let mut ed = editor("abc", 0, 1);
        type_keys(&mut ed, &[Key::Char('z'), Key::Enter, Key::Ctrl('d'), Key::Esc], ms(0));
        assert_eq!(ed.lines(), &["abc"]);
        assert_eq!(ed.cursor(), CursorPosition::new(0, 1));
        assert_eq!(ed.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_cursor_invariants_under_mixed_input() {
        let mut ed = editor("def f(a, b):\n    return (a+b)\n\nx", 1, 11);
        let script = "jjkk%wb$0Gggvlld ixy\u{8}\u{1b}xxxhjkl";
        for (i, ch) in script.chars().enumerate() {
            let key = match ch {
                '\u{8}' => Key::Backspace,
                '\u{1b}' => Key::Esc,
                c => Key::Char(c),
            };
            ed.handle_key(key, ms(i as u64 * 10));
            let c = ed.cursor();
            let buf = ed.buffer();
            assert!(c.line < buf.line_count());
            match ed.mode() {
                EditorMode::Insert => assert!(c.col <= buf.line_len(c.line)),
                _ => assert!(c.col <= buf.last_col(c.line)),
            }
        }
    }
}
