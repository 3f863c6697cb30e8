use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use crate::{share, App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Answering => render_question(self, area, buf),
            AppState::Results => render_result(self, area, buf),
        }
    }
}

fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(view) = &app.view else {
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let highlight_style = Style::default().patch(bold_style).fg(Color::Magenta);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let question_lines =
        ((view.text.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // progress header
            Constraint::Length(1),
            Constraint::Length(question_lines),
            Constraint::Length(1),
            Constraint::Min(view.choices.len() as u16),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let header = Paragraph::new(Span::styled(
        format!("Question {} of {}", view.number, view.total),
        dim_style,
    ))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let question = Paragraph::new(Span::styled(view.text.clone(), bold_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    question.render(chunks[2], buf);

    let rows = view
        .choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            if idx == app.selected {
                Line::from(Span::styled(format!("❯ {}", choice.text), highlight_style))
            } else {
                Line::from(Span::styled(format!("  {}", choice.text), dim_style))
            }
        })
        .collect::<Vec<Line>>();

    Paragraph::new(rows).render(chunks[4], buf);

    let legend = Paragraph::new(Span::styled(
        "(↑/↓) move / (enter) answer / (esc)ape",
        italic_style,
    ));
    legend.render(chunks[5], buf);
}

fn render_result(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(sign) = app.quiz.result() else {
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let sign_style = Style::default().patch(bold_style).fg(Color::Magenta);

    // Signs that never came up say nothing about the player
    let breakdown = app
        .quiz
        .tally()
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .collect::<Vec<_>>();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1),
            Constraint::Length(1), // the sign
            Constraint::Length(1),
            Constraint::Min(breakdown.len() as u16),
            Constraint::Length(1), // share text
            Constraint::Length(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(Span::styled("Your Zodiac Sign", dim_style))
        .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    let reveal = Paragraph::new(Span::styled(sign.to_string().to_uppercase(), sign_style))
        .alignment(Alignment::Center);
    reveal.render(chunks[2], buf);

    let rows = breakdown
        .iter()
        .map(|(sign, count)| {
            Line::from(Span::styled(format!("{sign} ×{count}"), dim_style))
        })
        .collect::<Vec<Line>>();
    Paragraph::new(rows)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let share_line = Paragraph::new(Span::styled(share::text(sign), italic_style))
        .alignment(Alignment::Center);
    share_line.render(chunks[5], buf);

    let legend = Paragraph::new(Span::styled(
        String::from(if Browser::is_available() {
            "(s)hare / (r)etake / (esc)ape"
        } else {
            "(r)etake / (esc)ape"
        }),
        italic_style,
    ));
    legend.render(chunks[7], buf);
}
