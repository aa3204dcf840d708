//! Profile screen — static identity plus the persisted avatar reference.
//!
//! The avatar is the one piece of locally persisted state: loaded on
//! entry, written when the user confirms a new path. Everything else here
//! is static display.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::warn;

use storefront_config::{ProfileIdentity, ProfileStore};

use crate::theme;

/// Static menu rows, mirroring the source app's profile page.
const MENU: &[(&str, &str)] = &[
    ("Account", "Manage your account"),
    ("Orders", "Orders history"),
    ("Addresses", "Your saved addresses"),
    ("Saved Cards", "Your saved debit/credit cards"),
    ("Settings", "App notification settings"),
    ("Help Center", "FAQs and customer support"),
];

pub struct ProfileScreen {
    store: ProfileStore,
    identity: ProfileIdentity,
    avatar: Option<String>,
    editing: bool,
    input: String,
    notice: Option<String>,
}

impl ProfileScreen {
    pub fn new(store: ProfileStore, identity: ProfileIdentity) -> Self {
        Self {
            store,
            identity,
            avatar: None,
            editing: false,
            input: String::new(),
            notice: None,
        }
    }

    /// Re-read the persisted avatar reference on every entry.
    pub fn on_enter(&mut self) {
        self.avatar = self.store.load_avatar();
        self.notice = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
        self.input = self.avatar.clone().unwrap_or_default();
        self.notice = None;
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.input.clear();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Persist the entered reference and leave edit mode.
    pub fn commit_edit(&mut self) {
        let reference = self.input.trim().to_owned();
        self.editing = false;

        if reference.is_empty() {
            return;
        }

        match self.store.save_avatar(&reference) {
            Ok(()) => {
                self.avatar = Some(reference);
                self.notice = Some("avatar updated".into());
            }
            Err(e) => {
                warn!(error = %e, "failed to persist avatar reference");
                self.notice = Some(format!("could not save avatar: {e}"));
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::default()];

        let avatar_line = match (&self.editing, &self.avatar) {
            (true, _) => Line::from(vec![
                Span::styled("  avatar path: ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(self.input.clone(), theme::title_style()),
                Span::styled("▏", Style::default().fg(theme::ACCENT)),
            ]),
            (false, Some(reference)) => Line::from(vec![
                Span::styled("  ◉ ", Style::default().fg(theme::ACCENT)),
                Span::styled(reference.clone(), Style::default().fg(theme::DIM_WHITE)),
            ]),
            // No stored reference: placeholder instead of an image.
            (false, None) => Line::from(Span::styled(
                "  ◌ no avatar chosen",
                Style::default().fg(theme::MUTED_GRAY),
            )),
        };

        lines.push(avatar_line);
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("  {}", self.identity.display_name),
            theme::title_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", self.identity.email),
            Style::default().fg(theme::MUTED_GRAY),
        )));
        lines.push(Line::default());

        if let Some(notice) = &self.notice {
            lines.push(Line::from(Span::styled(
                format!("  {notice}"),
                Style::default().fg(theme::STAR_YELLOW),
            )));
            lines.push(Line::default());
        }

        for (title, subtitle) in MENU {
            lines.push(Line::from(vec![
                Span::styled(format!("  {title:<14}"), Style::default().fg(theme::DIM_WHITE)),
                Span::styled(*subtitle, Style::default().fg(theme::MUTED_GRAY)),
                Span::styled("  ›", Style::default().fg(theme::BORDER_GRAY)),
            ]));
        }

        lines.push(Line::default());
        lines.push(if self.editing {
            Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  e ", theme::key_hint_key()),
                Span::styled("edit avatar  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("back", theme::key_hint()),
            ])
        });

        let block = Block::default()
            .title(" Profile ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
