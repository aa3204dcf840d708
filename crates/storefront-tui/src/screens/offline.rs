//! Offline overlay — shown over the product list while connectivity is
//! Unavailable. The Retry key is bound to a real fetch; there is no
//! automatic retry policy behind it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::theme;

pub fn render_offline_overlay(frame: &mut Frame, area: Rect) {
    let dialog = centered(area, 46, 7);
    frame.render_widget(Clear, dialog);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "  Please check your internet connection",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(Span::styled(
            "  and try again.",
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("retry  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]),
    ];

    let block = Block::default()
        .title(" No Internet Connection ")
        .title_style(Style::default().fg(theme::ERROR_RED))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ERROR_RED));

    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [horizontal] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(horizontal);
    rect
}
