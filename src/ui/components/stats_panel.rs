use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::stats::Summary;
use crate::store::schema::DayStatus;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct StatsPanel<'a> {
    summary: &'a Summary,
    user: &'a str,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(summary: &'a Summary, user: &'a str, theme: &'a Theme) -> Self {
        Self {
            summary,
            user,
            theme,
        }
    }

    fn day_line(&self, day: u32, status: DayStatus) -> Line<'_> {
        let colors = &self.theme.colors;
        let (tag, style) = match status {
            DayStatus::Completed => ("completed", Style::default().fg(colors.success())),
            DayStatus::InProgress => ("in progress", Style::default().fg(colors.warning())),
            DayStatus::NotStarted => ("not started", Style::default().fg(colors.muted())),
        };
        Line::from(vec![
            Span::styled(format!(" Day {day:>3}  "), Style::default().fg(colors.fg())),
            Span::styled(tag, style),
        ])
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Statistics  user: {} ", self.user))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let counters = format!(
            " {} days completed | {} words studied | {} mastered",
            self.summary.completed_days, self.summary.studied_words, self.summary.mastered_words,
        );
        Paragraph::new(Line::from(Span::styled(
            counters,
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )))
        .render(layout[0], buf);

        ProgressBar::percentage("Mastery", self.summary.mastery_rate as f64 / 100.0, self.theme)
            .render(layout[1], buf);
        ProgressBar::percentage("Coverage", self.summary.coverage as f64 / 100.0, self.theme)
            .render(layout[2], buf);

        let lines: Vec<Line> = self
            .summary
            .days
            .iter()
            .take(layout[3].height as usize)
            .map(|(day, status)| self.day_line(*day, *status))
            .collect();
        Paragraph::new(lines).render(layout[3], buf);
    }
}
