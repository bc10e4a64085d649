use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::daily::DailySession;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Flashcard face for the daily pass: spelling up top, meaning covered
/// until revealed, grade hints underneath.
pub struct DailyCard<'a> {
    session: &'a DailySession,
    theme: &'a Theme,
}

impl<'a> DailyCard<'a> {
    pub fn new(session: &'a DailySession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

impl Widget for DailyCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Day {} ", self.session.day))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(word) = self.session.current() else {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No words for this day",
                Style::default().fg(colors.warning()),
            )))
            .alignment(Alignment::Center);
            empty.render(inner, buf);
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(2),
                Constraint::Length(3),
            ])
            .split(inner);

        let spelling = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                &*word.word,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        spelling.render(layout[0], buf);

        let pos = Paragraph::new(Line::from(Span::styled(
            &*word.pos,
            Style::default().fg(colors.muted()),
        )))
        .alignment(Alignment::Center);
        pos.render(layout[1], buf);

        let meaning_line = if self.session.meaning_revealed {
            Line::from(Span::styled(
                &*word.meaning,
                Style::default().fg(colors.fg()),
            ))
        } else {
            Line::from(Span::styled(
                "[ Space to reveal ]",
                Style::default().fg(colors.accent_dim()),
            ))
        };
        Paragraph::new(meaning_line)
            .alignment(Alignment::Center)
            .render(layout[3], buf);

        let bar = ProgressBar::counts(
            "Card",
            self.session.index + 1,
            self.session.word_count(),
            self.theme,
        );
        bar.render(layout[4], buf);
    }
}
