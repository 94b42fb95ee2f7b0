use crate::editor::buffer::CursorPosition;
use crate::editor::modal::EditorMode;

/// Status-line summary shown under the simulated buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub mode: EditorMode,
    pub file: String,
    /// `Top`, `Bot` or a percentage such as `50%`.
    pub scroll: String,
    /// 1-based `line:col`.
    pub coords: String,
}

impl StatusLine {
    pub fn new(mode: EditorMode, file: &str, cursor: CursorPosition, line_count: usize) -> Self {
        Self {
            mode,
            file: file.to_string(),
            scroll: scroll_label(cursor.line, line_count),
            coords: format!("{}:{}", cursor.line + 1, cursor.col + 1),
        }
    }
}

pub fn scroll_label(line: usize, line_count: usize) -> String {
    if line == 0 {
        "Top".to_string()
    } else if line + 1 >= line_count {
        "Bot".to_string()
    } else {
        let pct = ((line + 1) as f64 / line_count as f64 * 100.0).round() as u32;
        format!("{pct}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_label() {
        assert_eq!(scroll_label(0, 1), "Top");
        assert_eq!(scroll_label(0, 10), "Top");
        assert_eq!(scroll_label(9, 10), "Bot");
        assert_eq!(scroll_label(1, 4), "50%");
        assert_eq!(scroll_label(1, 3), "67%");
    }

    #[test]
    fn test_coords_are_one_based() {
        let status = StatusLine::new(EditorMode::Insert, "tutorial.py", CursorPosition::new(1, 10), 4);
        assert_eq!(status.coords, "2:11");
        assert_eq!(status.scroll, "50%");
        assert_eq!(status.mode.name(), "INSERT");
        assert_eq!(status.file, "tutorial.py");
    }
}
