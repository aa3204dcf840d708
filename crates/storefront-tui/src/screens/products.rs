//! Product list screen — the start destination.
//!
//! One row per product in server order, favorite markers, a loading
//! throbber while a fetch is in flight, and a failure banner when the last
//! fetch settled in `Failed`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use storefront_core::{FetchErrorKind, FetchState, ProductId};

use crate::theme;

use super::ViewCtx;

pub struct ProductsScreen {
    selected: usize,
    throbber: ThrobberState,
}

impl ProductsScreen {
    pub fn new() -> Self {
        Self {
            selected: 0,
            throbber: ThrobberState::default(),
        }
    }

    /// Id of the currently selected product, if the list is non-empty.
    pub fn selected_id(&self, ctx: &ViewCtx) -> Option<ProductId> {
        ctx.products.get(self.selected).map(|p| p.id)
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the list after a replacement shrinks it.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn on_tick(&mut self) {
        self.throbber.calc_next();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewCtx) {
        let title = format!(" Products ({}) ", ctx.products.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // status line
            Constraint::Min(1),    // rows
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_status(frame, layout[0], ctx);
        self.render_rows(frame, layout[1], ctx);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("detail  ", theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("favorite  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
            Span::styled("p ", theme::key_hint_key()),
            Span::styled("profile  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewCtx) {
        match ctx.fetch_state {
            FetchState::Loading => {
                let throbber = Throbber::default()
                    .label("fetching catalog…")
                    .style(Style::default().fg(theme::ACCENT));
                frame.render_stateful_widget(throbber, area, &mut self.throbber);
            }
            FetchState::Failed { kind } => {
                let reason = match kind {
                    FetchErrorKind::Network => "network error",
                    FetchErrorKind::Decode => "catalog format error",
                };
                let line = Line::from(vec![
                    Span::styled("  ✗ fetch failed: ", Style::default().fg(theme::ERROR_RED)),
                    Span::styled(reason, Style::default().fg(theme::ERROR_RED)),
                    Span::styled("  (press r to retry)", theme::key_hint()),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            FetchState::Loaded => {
                let line = Line::from(Span::styled(
                    format!("  ♥ {} favorited", ctx.favorites.len()),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ));
                frame.render_widget(Paragraph::new(line), area);
            }
            FetchState::Idle => {}
        }
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, ctx: &ViewCtx) {
        if ctx.products.is_empty() {
            let empty = match ctx.fetch_state {
                FetchState::Loading => "  Loading…",
                _ => "  No products.",
            };
            let para = Paragraph::new(Line::from(Span::styled(
                empty,
                Style::default().fg(theme::MUTED_GRAY),
            )));
            frame.render_widget(para, area);
            return;
        }

        let visible = usize::from(area.height);
        // Keep the selected row on screen.
        let start = self.selected.saturating_sub(visible.saturating_sub(1));

        let mut lines: Vec<Line> = Vec::new();
        for (idx, product) in ctx.products.iter().enumerate().skip(start).take(visible) {
            let marker = if ctx.favorites.contains(&product.id) {
                Span::styled("♥ ", Style::default().fg(theme::PRICE_RED))
            } else {
                Span::raw("  ")
            };

            let name_width = 28;
            let name: String = product.name.chars().take(name_width).collect();
            let desc_width = usize::from(area.width).saturating_sub(58).max(8);
            let desc: String = product.description.chars().take(desc_width).collect();

            let row_style = if idx == self.selected {
                theme::row_selected()
            } else {
                Style::default()
            };

            lines.push(
                Line::from(vec![
                    marker,
                    Span::styled(format!("{name:<name_width$}  "), row_style),
                    Span::styled(format!("{:>8}  ", product.display_price()), theme::price_style()),
                    Span::styled(format!("★ {:<6}  ", product.rating), theme::rating_style()),
                    Span::styled(desc, Style::default().fg(theme::MUTED_GRAY)),
                ])
                .style(row_style),
            );
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Default for ProductsScreen {
    fn default() -> Self {
        Self::new()
    }
}
