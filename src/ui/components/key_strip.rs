use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;
use vimtype::keyboard::key::Key;
use vimtype::keyboard::keyset::{KeySet, KeyTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCellState {
    Idle,
    Target,
    Pressed,
}

/// How a single key-set entry should be drawn. A press flash wins over the
/// target highlight so the user sees their input land.
pub fn cell_state(target: &KeyTarget, highlighted: Option<&str>, pressed: Option<Key>) -> KeyCellState {
    if pressed.is_some_and(|k| target.keys.first() == Some(&k)) {
        KeyCellState::Pressed
    } else if highlighted == Some(target.notation.as_str()) {
        KeyCellState::Target
    } else {
        KeyCellState::Idle
    }
}

/// Block title; echoes the last key pressed while its flash lasts.
pub fn strip_title(pressed: Option<Key>) -> String {
    match pressed {
        Some(key) => format!(" Keys [{}] ", key.short_label()),
        None => " Keys ".to_string(),
    }
}

/// Virtual keyboard row showing the active difficulty's key set.
pub struct KeyStrip<'a> {
    key_set: &'a KeySet,
    highlighted: Option<&'a str>,
    pressed: Option<Key>,
    theme: &'a Theme,
}

impl<'a> KeyStrip<'a> {
    pub fn new(
        key_set: &'a KeySet,
        highlighted: Option<&'a str>,
        pressed: Option<Key>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            key_set,
            highlighted,
            pressed,
            theme,
        }
    }
}

impl Widget for KeyStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(strip_title(self.pressed))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::with_capacity(self.key_set.len() * 2);
        for target in self.key_set.targets() {
            let style = match cell_state(target, self.highlighted, self.pressed) {
                KeyCellState::Pressed => Style::default()
                    .fg(colors.bg())
                    .bg(colors.focused_key())
                    .add_modifier(Modifier::BOLD),
                KeyCellState::Target => Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent()),
                KeyCellState::Idle => Style::default().fg(colors.fg()).bg(colors.accent_dim()),
            };
            spans.push(Span::styled(format!(" {} ", target.notation), style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(notation: &str) -> KeyTarget {
        KeySet::from_notations(&[notation]).targets()[0].clone()
    }

    #[test]
    fn test_highlighted_target() {
        assert_eq!(cell_state(&target("gg"), Some("gg"), None), KeyCellState::Target);
        assert_eq!(cell_state(&target("G"), Some("gg"), None), KeyCellState::Idle);
    }

    #[test]
    fn test_press_flash_matches_first_key() {
        assert_eq!(cell_state(&target("gg"), None, Some(Key::Char('g'))), KeyCellState::Pressed);
        assert_eq!(
            cell_state(&target("Ctrl+d"), Some("Ctrl+d"), Some(Key::Ctrl('d'))),
            KeyCellState::Pressed
        );
        assert_eq!(cell_state(&target("j"), None, Some(Key::Char('k'))), KeyCellState::Idle);
    }

    #[test]
    fn test_title_echoes_pressed_key() {
        assert_eq!(strip_title(None), " Keys ");
        assert_eq!(strip_title(Some(Key::Char('w'))), " Keys [w] ");
        assert_eq!(strip_title(Some(Key::Char(' '))), " Keys [Spc] ");
        assert_eq!(strip_title(Some(Key::Enter)), " Keys [Ent] ");
    }
}
