use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Bordered bar labelled either as a percentage or as `done/total`,
/// used for day completion and card position.
pub struct ProgressBar<'a> {
    pub title: String,
    pub done: usize,
    pub total: usize,
    pub show_counts: bool,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn percentage(title: &str, ratio: f64, theme: &'a Theme) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        Self {
            title: title.to_string(),
            done: (ratio * 100.0).round() as usize,
            total: 100,
            show_counts: false,
            theme,
        }
    }

    pub fn counts(title: &str, done: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            title: title.to_string(),
            done: done.min(total),
            total,
            show_counts: true,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let ratio = self.ratio();
        let filled_width = (ratio * inner.width as f64) as u16;
        let label = if self.show_counts {
            format!("{}/{}", self.done, self.total)
        } else {
            format!("{:.0}%", ratio * 100.0)
        };

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
