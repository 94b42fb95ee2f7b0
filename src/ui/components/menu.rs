use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;
use vimtype::keyboard::keyset::{ALL_DIFFICULTIES, Difficulty};
use vimtype::session::SessionKind;

pub struct MenuItem {
    pub key: char,
    pub kind: SessionKind,
    pub label: &'static str,
    pub description: &'static str,
}

pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem {
        key: '1',
        kind: SessionKind::Lesson,
        label: "Lesson",
        description: "Step-by-step tutorial of the motions in your tier",
    },
    MenuItem {
        key: '2',
        kind: SessionKind::Drill,
        label: "Drill",
        description: "Random targets from your key set, scored",
    },
    MenuItem {
        key: '3',
        kind: SessionKind::Challenge,
        label: "Challenge",
        description: "Multi-key navigation puzzles on real code",
    },
];

#[derive(Debug, Default)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % MENU_ITEMS.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = MENU_ITEMS.len() - 1;
        }
    }

    pub fn selected_kind(&self) -> SessionKind {
        MENU_ITEMS[self.selected].kind
    }

    pub fn kind_for_key(ch: char) -> Option<SessionKind> {
        MENU_ITEMS.iter().find(|item| item.key == ch).map(|item| item.kind)
    }
}

pub struct MenuView<'a> {
    menu: &'a Menu,
    difficulty: Difficulty,
    theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(menu: &'a Menu, difficulty: Difficulty, theme: &'a Theme) -> Self {
        Self {
            menu,
            difficulty,
            theme,
        }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "vimtype",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Modal Editor Navigation Trainer",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let mut tiers = vec![Span::styled("Difficulty: ", Style::default().fg(colors.fg()))];
        for &tier in ALL_DIFFICULTIES {
            let style = if tier == self.difficulty {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_pending())
            };
            tiers.push(Span::styled(format!(" {} ", tier.label()), style));
            tiers.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(tiers))
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                MENU_ITEMS
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            let lines = vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, item.label),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("     {}", item.description),
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < item_layout.len() {
                Paragraph::new(lines).render(item_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_wraps_both_ways() {
        let mut menu = Menu::default();
        menu.prev();
        assert_eq!(menu.selected_kind(), SessionKind::Challenge);
        menu.next();
        assert_eq!(menu.selected_kind(), SessionKind::Lesson);
        menu.next();
        assert_eq!(menu.selected_kind(), SessionKind::Drill);
    }

    #[test]
    fn test_shortcut_keys() {
        assert_eq!(Menu::kind_for_key('1'), Some(SessionKind::Lesson));
        assert_eq!(Menu::kind_for_key('3'), Some(SessionKind::Challenge));
        assert_eq!(Menu::kind_for_key('9'), None);
    }
}
