use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct UsersPanel<'a> {
    pub names: &'a [String],
    pub active: &'a str,
    pub selected: usize,
    /// Some while the create-profile field is open.
    pub create_input: Option<&'a LineInput>,
    pub confirm_delete: bool,
    pub notice: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for UsersPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Users ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let lines: Vec<Line> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let is_selected = i == self.selected;
                let is_active = name == self.active;
                let marker = if is_selected { ">" } else { " " };
                let active_tag = if is_active { "  (active)" } else { "" };

                let style = if is_selected {
                    Style::default()
                        .fg(colors.selection_fg())
                        .bg(colors.selection_bg())
                        .add_modifier(Modifier::BOLD)
                } else if is_active {
                    Style::default().fg(colors.accent())
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(Span::styled(format!(" {marker} {name}{active_tag}"), style))
            })
            .collect();
        Paragraph::new(lines).render(layout[0], buf);

        if let Some(input) = self.create_input {
            let line = Line::from(vec![
                Span::styled(" New profile: ", Style::default().fg(colors.accent())),
                Span::styled(input.value(), Style::default().fg(colors.fg())),
                Span::styled("█", Style::default().fg(colors.accent())),
            ]);
            Paragraph::new(line).render(layout[1], buf);
        } else if self.confirm_delete {
            let line = Line::from(Span::styled(
                " Delete this profile and its progress? [y/n]",
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(line).render(layout[1], buf);
        } else if let Some(notice) = self.notice {
            Paragraph::new(Line::from(Span::styled(
                format!(" {notice}"),
                Style::default().fg(colors.warning()),
            )))
            .render(layout[1], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            " [Enter] Switch  [n] New  [x] Delete  [Esc] Back",
            Style::default().fg(colors.muted()),
        )))
        .render(layout[2], buf);
    }
}
