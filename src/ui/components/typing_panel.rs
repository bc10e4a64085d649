use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::typing::TypingSession;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Typing drill panel: meaning as the prompt, the answer field, and the
/// feedback/stat lines.
pub struct TypingPanel<'a> {
    session: &'a TypingSession,
    input: &'a LineInput,
    theme: &'a Theme,
}

impl<'a> TypingPanel<'a> {
    pub fn new(session: &'a TypingSession, input: &'a LineInput, theme: &'a Theme) -> Self {
        Self {
            session,
            input,
            theme,
        }
    }

    fn feedback_line(&self) -> Line<'_> {
        let colors = &self.theme.colors;
        let word = self.session.current();

        if self.session.answer_revealed {
            return Line::from(vec![
                Span::styled("Answer: ", Style::default().fg(colors.muted())),
                Span::styled(
                    &*word.word,
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
        }
        if self.session.answered {
            if self.session.is_correct {
                return Line::from(Span::styled(
                    "Correct!",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                ));
            }
            let mut spans = vec![Span::styled(
                "Wrong  [r] retry  [h] hint  [a] answer",
                Style::default().fg(colors.error()),
            )];
            if self.session.hint_revealed {
                if let Some(first) = word.word.chars().next() {
                    spans.push(Span::styled(
                        format!("  starts with '{}'", first.to_uppercase()),
                        Style::default().fg(colors.warning()),
                    ));
                }
            }
            return Line::from(spans);
        }
        Line::from(Span::styled(
            "Type the word and press Enter",
            Style::default().fg(colors.muted()),
        ))
    }
}

impl Widget for TypingPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let word = self.session.current();

        let block = Block::bordered()
            .title(format!(
                " Typing Drill  {}/{} ",
                self.session.index + 1,
                self.session.pool_len()
            ))
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
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let prompt = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("Day {}  ", self.session.current_day()),
                    Style::default().fg(colors.muted()),
                ),
                Span::styled(&*word.pos, Style::default().fg(colors.muted())),
            ]),
        ])
        .alignment(Alignment::Center);
        prompt.render(layout[0], buf);

        let meaning = Paragraph::new(Line::from(Span::styled(
            &*word.meaning,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        meaning.render(layout[1], buf);

        let input_block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let input_inner = input_block.inner(layout[2]);
        input_block.render(layout[2], buf);
        let field = Paragraph::new(Line::from(vec![
            Span::styled(self.input.value(), Style::default().fg(colors.fg())),
            Span::styled("█", Style::default().fg(colors.accent())),
        ]));
        field.render(input_inner, buf);

        Paragraph::new(self.feedback_line())
            .alignment(Alignment::Center)
            .render(layout[3], buf);

        let stats = format!(
            " {}/{} correct | {}% accuracy | {} wpm",
            self.session.correct_count,
            self.session.total_count,
            self.session.accuracy(),
            self.session.wpm(),
        );
        Paragraph::new(Line::from(Span::styled(
            stats,
            Style::default().fg(colors.muted()),
        )))
        .render(layout[5], buf);
    }
}
