//! Application core — event loop, navigation, action dispatch.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use storefront_core::{CatalogController, ConnectivityMonitor, ProductRepository};

use crate::action::Action;
use crate::bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::{
    DetailScreen, ProductsScreen, ProfileScreen, ViewCtx, render_offline_overlay,
};
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    controller: CatalogController<ProductRepository>,
    monitor: Arc<ConnectivityMonitor>,
    active: ScreenId,
    products: ProductsScreen,
    detail: DetailScreen,
    profile: ProfileScreen,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel: CancellationToken,
}

impl App {
    pub fn new(
        controller: CatalogController<ProductRepository>,
        monitor: Arc<ConnectivityMonitor>,
        profile: ProfileScreen,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            controller,
            monitor,
            active: ScreenId::Products,
            products: ProductsScreen::new(),
            detail: DetailScreen::new(),
            profile,
            running: true,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        spawn_data_bridge(
            self.controller.clone(),
            Arc::clone(&self.monitor),
            self.action_tx.clone(),
            self.cancel.clone(),
        );

        // Fetch on entry; suppressed inside process_action while offline.
        self.action_tx.send(Action::Refresh)?;

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key(key) {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action);

                if action == Action::Render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.cancel.cancel();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Read-only snapshot of core state for this frame.
    fn view_ctx(&self) -> ViewCtx {
        ViewCtx {
            products: self.controller.products(),
            fetch_state: self.controller.fetch_state(),
            favorites: self.controller.favorites(),
            connectivity: self.monitor.current(),
        }
    }

    // ── Key handling ─────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Profile edit mode captures all typing, including 'q'.
        if self.active == ScreenId::Profile && self.profile.is_editing() {
            match key.code {
                KeyCode::Esc => self.profile.cancel_edit(),
                KeyCode::Enter => self.profile.commit_edit(),
                KeyCode::Backspace => self.profile.pop_char(),
                KeyCode::Char(c) => self.profile.push_char(c),
                _ => {}
            }
            return None;
        }

        // Global quit
        if key.code == KeyCode::Char('q')
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Some(Action::Quit);
        }

        // Offline overlay replaces the product list, like the source app's
        // no-connection screen. Retry is the only action it offers.
        if self.active == ScreenId::Products && !self.monitor.current().is_available() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('r') => Some(Action::Refresh),
                KeyCode::Char('p') => Some(Action::SwitchScreen(ScreenId::Profile)),
                _ => None,
            };
        }

        match self.active {
            ScreenId::Products => self.handle_products_key(key),
            ScreenId::Detail => self.handle_detail_key(key),
            ScreenId::Profile => match key.code {
                KeyCode::Char('e') => {
                    self.profile.begin_edit();
                    None
                }
                KeyCode::Esc => Some(Action::Back),
                _ => None,
            },
        }
    }

    fn handle_products_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctx = self.view_ctx();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.products.select_next(ctx.products.len());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.products.select_prev();
                None
            }
            KeyCode::Enter => self.products.selected_id(&ctx).map(Action::OpenDetail),
            KeyCode::Char('f') => self.products.selected_id(&ctx).map(Action::ToggleFavorite),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('p') => Some(Action::SwitchScreen(ScreenId::Profile)),
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('f') => self
                .detail
                .product()
                .map(|p| Action::ToggleFavorite(p.id)),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            _ => None,
        }
    }

    // ── Action processing ────────────────────────────────────────

    fn process_action(&mut self, action: &Action) {
        match action {
            Action::Quit => self.running = false,

            Action::SwitchScreen(screen) => {
                if *screen == ScreenId::Profile {
                    self.profile.on_enter();
                }
                self.active = *screen;
            }

            Action::Back => self.active = ScreenId::Products,

            Action::Refresh => {
                if self.monitor.current().is_available() {
                    let controller = self.controller.clone();
                    tokio::spawn(async move {
                        controller.fetch_products().await;
                    });
                } else {
                    debug!("fetch suppressed while offline");
                }
            }

            Action::ToggleFavorite(id) => {
                if self.controller.is_favorite(*id) {
                    self.controller.remove_from_favorites(*id);
                } else {
                    self.controller.add_to_favorites(*id);
                }
            }

            Action::OpenDetail(id) => {
                // Absence is handled by the detail screen, not an error.
                if let Some(product) = self.controller.product_by_id(*id) {
                    self.detail.open(product);
                }
                self.active = ScreenId::Detail;
            }

            Action::Tick => self.products.on_tick(),

            Action::StateChanged => {
                self.products.clamp_selection(self.controller.products().len());
            }

            Action::Render | Action::Resize(..) => {}
        }
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let ctx = self.view_ctx();

        let layout =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(frame.area());

        self.render_header(frame, layout[0], &ctx);

        match self.active {
            ScreenId::Products => self.products.render(frame, layout[1], &ctx),
            ScreenId::Detail => self.detail.render(frame, layout[1], &ctx),
            ScreenId::Profile => self.profile.render(frame, layout[1]),
        }

        if self.active == ScreenId::Products && !ctx.connectivity.is_available() {
            render_offline_overlay(frame, layout[1]);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, ctx: &ViewCtx) {
        let connectivity = if ctx.connectivity.is_available() {
            Span::styled("online", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled("offline", Style::default().fg(theme::ERROR_RED))
        };

        let header = Line::from(vec![
            Span::styled(" storefront ", theme::title_style()),
            Span::styled(format!("· {} ", self.active), Style::default().fg(theme::DIM_WHITE)),
            Span::styled(
                format!("· ♥ {} ", ctx.favorites.len()),
                Style::default().fg(theme::PRICE_RED),
            ),
            Span::raw("· "),
            connectivity,
        ]);

        frame.render_widget(Paragraph::new(header), area);
    }
}
