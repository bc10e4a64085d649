use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Standard screen frame: one-line header band, main content, footer
/// hint line.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 12;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 120, 40);
        let popup = centered_rect(50, 50, area);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }

    #[test]
    fn centered_rect_clamps_on_tiny_terminal() {
        let area = Rect::new(0, 0, 30, 8);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 8);
    }
}
