use ratatui::layout::{Constraint, Direction, Layout, Rect};

const KEY_STRIP_HEIGHT: u16 = 5;

pub struct AppLayout {
    pub header: Rect,
    pub instruction: Rect,
    pub editor: Rect,
    pub keys: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, show_keyboard: bool) -> Self {
        // The key strip is dropped first when the terminal is short
        let keys_fit = show_keyboard && area.height >= 20;
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(if keys_fit { KEY_STRIP_HEIGHT } else { 0 }),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            instruction: vertical[1],
            editor: vertical[2],
            keys: keys_fit.then_some(vertical[3]),
            footer: vertical[4],
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 16;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
