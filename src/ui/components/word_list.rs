use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::list::ListRow;
use crate::store::schema::WordStatus;
use crate::ui::theme::Theme;

/// Scrolling word table with the search bar on top. Each row carries a
/// status tag driven by the three-way grade keys.
pub struct WordList<'a> {
    rows: &'a [ListRow],
    selected: usize,
    query: &'a str,
    day_filter: Option<u32>,
    search_active: bool,
    theme: &'a Theme,
}

impl<'a> WordList<'a> {
    pub fn new(
        rows: &'a [ListRow],
        selected: usize,
        query: &'a str,
        day_filter: Option<u32>,
        search_active: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            rows,
            selected,
            query,
            day_filter,
            search_active,
            theme,
        }
    }

    fn status_span(&self, status: Option<WordStatus>) -> Span<'static> {
        let colors = &self.theme.colors;
        match status {
            Some(WordStatus::Mastered) => {
                Span::styled("[mastered]", Style::default().fg(colors.success()))
            }
            Some(WordStatus::Correct) => {
                Span::styled("[correct] ", Style::default().fg(colors.accent()))
            }
            Some(WordStatus::Wrong) => {
                Span::styled("[wrong]   ", Style::default().fg(colors.error()))
            }
            None => Span::styled("          ", Style::default()),
        }
    }
}

impl Widget for WordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let day_label = match self.day_filter {
            Some(day) => format!("day {day}"),
            None => "all days".to_string(),
        };
        let block = Block::bordered()
            .title(format!(" Word List  {} words  {} ", self.rows.len(), day_label))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let search_style = if self.search_active {
            Style::default().fg(colors.border_focused())
        } else {
            Style::default().fg(colors.muted())
        };
        let search_line = Line::from(vec![
            Span::styled(" / ", search_style.add_modifier(Modifier::BOLD)),
            Span::styled(self.query, Style::default().fg(colors.fg())),
            if self.search_active {
                Span::styled("█", Style::default().fg(colors.accent()))
            } else {
                Span::raw("")
            },
        ]);
        Paragraph::new(search_line).render(layout[0], buf);

        let visible = layout[1].height as usize;
        if visible == 0 {
            return;
        }
        // Keep the selection inside the window
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, row)| {
                let is_selected = i == self.selected;
                let base = if is_selected {
                    Style::default()
                        .fg(colors.selection_fg())
                        .bg(colors.selection_bg())
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(vec![
                    Span::styled(format!(" {:>3}  ", row.day), base.fg(colors.muted())),
                    Span::styled(
                        format!("{:<14}", row.word.word),
                        base.add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Span::styled(format!("{:<6}", row.word.pos), base.fg(colors.muted())),
                    Span::styled(format!("{:<24}", row.word.meaning), base),
                    self.status_span(row.status),
                ])
            })
            .collect();

        Paragraph::new(lines).render(layout[1], buf);
    }
}
