use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::matching::{Card, CardState, Column, MatchingSession};
use crate::ui::theme::Theme;

/// Two-column matching board: spellings left, meanings right, one cursor
/// shared across both columns.
pub struct MatchingBoard<'a> {
    session: &'a MatchingSession,
    cursor: (Column, usize),
    theme: &'a Theme,
}

impl<'a> MatchingBoard<'a> {
    pub fn new(session: &'a MatchingSession, cursor: (Column, usize), theme: &'a Theme) -> Self {
        Self {
            session,
            cursor,
            theme,
        }
    }

    fn card_line(&self, card: &Card, under_cursor: bool) -> Line<'_> {
        let colors = &self.theme.colors;
        let marker = if under_cursor { "> " } else { "  " };

        let style = match card.state {
            CardState::Matched => Style::default()
                .fg(colors.accent_dim())
                .add_modifier(Modifier::CROSSED_OUT),
            CardState::Selected => Style::default()
                .fg(colors.selection_fg())
                .bg(colors.selection_bg())
                .add_modifier(Modifier::BOLD),
            CardState::Idle if under_cursor => Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
            CardState::Idle => Style::default().fg(colors.fg()),
        };

        Line::from(vec![
            Span::styled(marker, Style::default().fg(colors.accent())),
            Span::styled(card.content.clone(), style),
        ])
    }

    fn column_lines(&self, cards: &[Card], column: Column) -> Vec<Line<'_>> {
        cards
            .iter()
            .enumerate()
            .map(|(i, card)| self.card_line(card, self.cursor == (column, i)))
            .collect()
    }
}

impl Widget for MatchingBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = if self.session.is_complete() {
            format!(" Matching  score {}  Complete! ", self.session.score)
        } else {
            format!(
                " Matching  score {}  {}/{} pairs ",
                self.session.score,
                self.session.matched_pairs,
                self.session.pool_size(),
            )
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner);

        Paragraph::new(self.column_lines(&self.session.left, Column::Left))
            .render(columns[0], buf);
        Paragraph::new(self.column_lines(&self.session.right, Column::Right))
            .render(columns[1], buf);
    }
}
