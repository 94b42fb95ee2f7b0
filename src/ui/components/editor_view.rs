use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::components::highlight::{self, TokenKind};
use crate::ui::theme::{Theme, ThemeColors};
use vimtype::editor::buffer::CursorPosition;
use vimtype::editor::modal::{EditorMode, ModalEditor};

const GUTTER_WIDTH: usize = 4;

/// Renders the simulated buffer with a line-number gutter, the cursor,
/// the visual selection, and a status line on the last row.
pub struct EditorView<'a> {
    editor: &'a ModalEditor,
    theme: &'a Theme,
}

impl<'a> EditorView<'a> {
    pub fn new(editor: &'a ModalEditor, theme: &'a Theme) -> Self {
        Self { editor, theme }
    }
}

/// First buffer line to draw so the cursor line stays visible.
pub fn scroll_offset(cursor_line: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        0
    } else {
        (cursor_line + 1).saturating_sub(visible_rows)
    }
}

fn in_selection(selection: Option<(CursorPosition, CursorPosition)>, pos: CursorPosition) -> bool {
    selection.is_some_and(|(start, end)| start <= pos && pos <= end)
}

fn token_style(colors: &ThemeColors, kind: TokenKind) -> Style {
    let fg = match kind {
        TokenKind::Plain => colors.fg(),
        TokenKind::Keyword => colors.syntax_keyword(),
        TokenKind::Str => colors.syntax_string(),
        TokenKind::Comment => colors.syntax_comment(),
        TokenKind::Number => colors.syntax_number(),
        TokenKind::Function => colors.syntax_function(),
    };
    let style = Style::default().fg(fg);
    if kind == TokenKind::Keyword {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

impl EditorView<'_> {
    fn buffer_line(&self, idx: usize) -> Line<'static> {
        let colors = &self.theme.colors;
        let text = &self.editor.lines()[idx];
        let kinds = highlight::classify_line(text);
        let cursor = self.editor.cursor();
        let selection = self.editor.selection();
        let cursor_style = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());

        let mut spans = vec![Span::styled(
            format!("{:>width$} ", idx + 1, width = GUTTER_WIDTH - 1),
            Style::default().fg(colors.text_pending()),
        )];

        let mut drew_cursor = false;
        for (col, (ch, kind)) in text.chars().zip(kinds).enumerate() {
            let pos = CursorPosition::new(idx, col);
            let style = if pos == cursor {
                drew_cursor = true;
                cursor_style
            } else if in_selection(selection, pos) {
                token_style(colors, kind).bg(colors.selection_bg())
            } else {
                token_style(colors, kind)
            };
            spans.push(Span::styled(ch.to_string(), style));
        }

        // Empty lines and the INSERT append position still show a cursor cell
        if cursor.line == idx && !drew_cursor {
            spans.push(Span::styled(" ", cursor_style));
        }
        Line::from(spans)
    }

    fn status_line(&self, width: u16) -> Line<'static> {
        let colors = &self.theme.colors;
        let status = self.editor.status();
        let mode_bg = match status.mode {
            EditorMode::Normal => colors.accent(),
            EditorMode::Insert => colors.success(),
            EditorMode::Visual => colors.warning(),
        };

        let mode = format!(" {} ", status.mode.name());
        let file = format!(" {} ", status.file);
        let right = format!(" {}  {} ", status.scroll, status.coords);
        let used = mode.chars().count() + file.chars().count() + right.chars().count();
        let fill = " ".repeat((width as usize).saturating_sub(used));

        let bar = Style::default().fg(colors.header_fg()).bg(colors.header_bg());
        Line::from(vec![
            Span::styled(
                mode,
                Style::default()
                    .fg(colors.bg())
                    .bg(mode_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(file, bar),
            Span::styled(fill, bar),
            Span::styled(right, bar),
        ])
    }
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let text_rows = inner.height.saturating_sub(1) as usize;
        let offset = scroll_offset(self.editor.cursor().line, text_rows);
        let line_count = self.editor.lines().len();

        let lines: Vec<Line> = (offset..line_count)
            .take(text_rows)
            .map(|idx| self.buffer_line(idx))
            .collect();
        let text_area = Rect::new(inner.x, inner.y, inner.width, text_rows as u16);
        Paragraph::new(lines).render(text_area, buf);

        let status_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        Paragraph::new(self.status_line(inner.width)).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(12, 5), 8);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn test_selection_bounds_are_inclusive() {
        let sel = Some((CursorPosition::new(0, 2), CursorPosition::new(1, 1)));
        assert!(in_selection(sel, CursorPosition::new(0, 2)));
        assert!(in_selection(sel, CursorPosition::new(0, 9)));
        assert!(in_selection(sel, CursorPosition::new(1, 1)));
        assert!(!in_selection(sel, CursorPosition::new(1, 2)));
        assert!(!in_selection(None, CursorPosition::new(0, 0)));
    }

    #[test]
    fn test_render_shows_status_line() {
        let theme = Theme::default();
        let mut editor = ModalEditor::new(Duration::from_millis(1000));
        editor.load("x = 1\ny = 2", "main.py", CursorPosition::new(1, 0));

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        EditorView::new(&editor, &theme).render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(1).contains("1 x = 1"));
        assert!(row(2).contains("2 y = 2"));
        let status = row(4);
        assert!(status.contains("NORMAL"));
        assert!(status.contains("main.py"));
        assert!(status.contains("Bot"));
        assert!(status.contains("2:1"));
    }
}
