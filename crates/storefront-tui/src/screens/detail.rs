//! Product detail screen.
//!
//! Rendered entirely from `product_by_id` output captured at navigation
//! time plus the live favorite set. The image URL is shown as text; image
//! fetching stays a collaborator concern.

use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use storefront_core::Product;

use crate::theme;

use super::ViewCtx;

pub struct DetailScreen {
    product: Option<Arc<Product>>,
}

impl DetailScreen {
    pub fn new() -> Self {
        Self { product: None }
    }

    pub fn open(&mut self, product: Arc<Product>) {
        self.product = Some(product);
    }

    pub fn product(&self) -> Option<&Arc<Product>> {
        self.product.as_ref()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &ViewCtx) {
        let Some(product) = &self.product else {
            // Navigating here without a product means the id vanished from
            // the list; show absence instead of panicking.
            let para = Paragraph::new(Line::from(Span::styled(
                "  Product not found.",
                Style::default().fg(theme::MUTED_GRAY),
            )))
            .block(
                Block::default()
                    .title(" Detail ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default()),
            );
            frame.render_widget(para, area);
            return;
        };

        let favorited = ctx.favorites.contains(&product.id);
        let fav_line = if favorited {
            Span::styled("♥ favorited", Style::default().fg(theme::PRICE_RED))
        } else {
            Span::styled("♡ not favorited", Style::default().fg(theme::MUTED_GRAY))
        };

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("  {}", product.name),
                theme::title_style(),
            )),
            Line::default(),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(product.display_price(), theme::price_style()),
                Span::raw("    "),
                Span::styled(format!("★ {}", product.rating), theme::rating_style()),
                Span::raw("    "),
                fav_line,
            ]),
            Line::default(),
            Line::from(Span::styled(
                format!("  image: {}", product.image_url),
                Style::default().fg(theme::MUTED_GRAY),
            )),
            Line::default(),
            Line::from(Span::raw(format!("  {}", product.description))),
            Line::default(),
            Line::from(vec![
                Span::styled("  f ", theme::key_hint_key()),
                Span::styled("toggle favorite  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("back", theme::key_hint()),
            ]),
        ];

        let block = Block::default()
            .title(format!(" Product #{} ", product.id))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
    }
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self::new()
    }
}
