//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: input handling, service calls, and rendering.
//!
//! Service calls run as spawned tasks. Their results come back through a
//! channel and are applied between input events, so they never interleave
//! with a drag gesture.

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use hourglass_protocol::{Message, ScheduleState, SchedulerConfig};
use hourglass_service::{
    ConfigService, ForcedStateService, Result as ServiceResult, SelectionProvider, engine,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::{
    component::Component,
    event::{event_to_message, poll_event},
    force::{ForceChange, ForceStartToggle},
    layout::{FOOTER_HEIGHT, HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH},
    page::PreferencesPage,
    terminal::AppTerminal,
    widgets::{Footer, StatusMessage, render_help_overlay, render_status_bar},
};

/// The result of a service call, delivered back to the UI loop.
#[derive(Debug)]
pub enum ServiceEvent {
    /// `get_config` completed.
    ConfigLoaded(ServiceResult<SchedulerConfig>),
    /// `set_config` completed for `record`.
    ConfigApplied {
        /// The record that was sent.
        record: SchedulerConfig,
        /// The outcome.
        result: ServiceResult<()>,
    },
    /// `get_forced` completed for the selection.
    ForcedLoaded(ServiceResult<Vec<bool>>),
    /// `set_forced` completed.
    ForcedSet {
        /// The change that was requested.
        change: ForceChange,
        /// The outcome.
        result: ServiceResult<()>,
    },
}

/// The main application struct.
///
/// Owns the preferences page and the force-start toggle, and the service
/// handles they are wired to.
pub struct App {
    page: PreferencesPage,
    force: ForceStartToggle,
    config_service: Arc<dyn ConfigService>,
    forced_service: Arc<dyn ForcedStateService>,
    selection: Arc<dyn SelectionProvider>,
    events_tx: mpsc::UnboundedSender<ServiceEvent>,
    events_rx: mpsc::UnboundedReceiver<ServiceEvent>,
    /// Service calls whose result has not been applied yet.
    pending: usize,
    /// The record last loaded from or applied to the service.
    effective: Option<SchedulerConfig>,
    status: Option<StatusMessage>,
    help_visible: bool,
    should_quit: bool,
    /// Whether the header was shown in the last render.
    header_visible: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("page", &self.page)
            .field("force", &self.force)
            .field("pending", &self.pending)
            .field("status", &self.status)
            .field("help_visible", &self.help_visible)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates the application on its services.
    ///
    /// Nothing is requested until [`show`](Self::show).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use hourglass_service::{LocalService, StaticSelection};
    /// use hourglass_tui::App;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let service = Arc::new(LocalService::open("/tmp/hourglass".into()).await?);
    /// let selection = Arc::new(StaticSelection::from_strings(["4f3c"]));
    /// let mut app = App::new(service.clone(), service, selection);
    /// app.show();
    /// app.settle().await;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn new(
        config_service: Arc<dyn ConfigService>,
        forced_service: Arc<dyn ForcedStateService>,
        selection: Arc<dyn SelectionProvider>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            page: PreferencesPage::default(),
            force: ForceStartToggle::default(),
            config_service,
            forced_service,
            selection,
            events_tx,
            events_rx,
            pending: 0,
            effective: None,
            status: None,
            help_visible: false,
            should_quit: false,
            header_visible: false,
        }
    }

    /// Returns the preferences page.
    #[must_use]
    pub fn page(&self) -> &PreferencesPage {
        &self.page
    }

    /// Returns the force-start toggle.
    #[must_use]
    pub fn force(&self) -> &ForceStartToggle {
        &self.force
    }

    /// Returns the latest status message.
    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns `true` while the help overlay is shown.
    #[must_use]
    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    /// Returns the state the schedule puts in effect now.
    ///
    /// `Normal` until a record was loaded.
    #[must_use]
    pub fn active_state(&self) -> ScheduleState {
        self.effective
            .as_ref()
            .map_or(ScheduleState::Normal, |record| {
                engine::current_state(record, &Local::now())
            })
    }

    /// Loads the page from the services, as when it is first shown.
    pub fn show(&mut self) {
        self.request_load();
        self.request_forced();
    }

    /// Requests the configuration record.
    pub fn request_load(&mut self) {
        let service = Arc::clone(&self.config_service);
        self.spawn(async move { ServiceEvent::ConfigLoaded(service.get_config().await) });
    }

    /// Sends the page's record to the configuration service.
    #[instrument(skip(self))]
    pub fn request_apply(&mut self) {
        let record = self.page.to_config();
        let service = Arc::clone(&self.config_service);
        self.spawn(async move {
            let result = service.set_config(record.clone()).await;
            ServiceEvent::ConfigApplied { record, result }
        });
    }

    /// Requests the forced flags of the selection.
    pub fn request_forced(&mut self) {
        let ids = self.selection.selected_ids();
        let service = Arc::clone(&self.forced_service);
        self.spawn(async move { ServiceEvent::ForcedLoaded(service.get_forced(&ids).await) });
    }

    /// Flips the force-start toggle and requests the change.
    #[instrument(skip(self))]
    pub fn toggle_force_start(&mut self) {
        let ids = self.selection.selected_ids();
        if ids.is_empty() {
            self.status = Some(StatusMessage::Info("No items selected".to_string()));
            return;
        }

        let change = self.force.toggle();
        let service = Arc::clone(&self.forced_service);
        self.spawn(async move {
            let result = service.set_forced(&ids, change.value).await;
            ServiceEvent::ForcedSet { change, result }
        });
    }

    fn spawn<F>(&mut self, call: F)
    where
        F: Future<Output = ServiceEvent> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            // The receiver lives as long as the app
            let _ = tx.send(call.await);
        });
    }

    /// Applies every service result that has arrived.
    pub fn drain_service_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_service_event(event);
        }
    }

    /// Waits until every outstanding service call has been applied.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.handle_service_event(event),
                None => break,
            }
        }
    }

    /// Applies one service result.
    pub fn handle_service_event(&mut self, event: ServiceEvent) {
        self.pending = self.pending.saturating_sub(1);
        match event {
            ServiceEvent::ConfigLoaded(Ok(record)) => {
                debug!("configuration loaded");
                self.page.load_config(&record);
                self.effective = Some(record);
                self.status = Some(StatusMessage::Info("Settings loaded".to_string()));
            }
            ServiceEvent::ConfigLoaded(Err(e)) => {
                warn!(error = %e, "loading configuration failed");
                self.status = Some(StatusMessage::Error(format!("Load failed: {e}")));
            }
            ServiceEvent::ConfigApplied { record, result } => match result {
                Ok(()) => {
                    info!("configuration applied");
                    self.page.mark_applied(&record);
                    self.effective = Some(record);
                    self.status = Some(StatusMessage::Info("Settings applied".to_string()));
                }
                Err(e) => {
                    warn!(error = %e, "applying configuration failed");
                    self.status = Some(StatusMessage::Error(format!("Apply failed: {e}")));
                }
            },
            ServiceEvent::ForcedLoaded(Ok(flags)) => {
                // a toggle in flight is newer than this answer
                if self.force.is_pending() {
                    debug!("forced flags ignored while a change is pending");
                } else {
                    self.force.refresh(&flags);
                }
            }
            ServiceEvent::ForcedLoaded(Err(e)) => {
                warn!(error = %e, "querying forced flags failed");
                self.status = Some(StatusMessage::Error(format!("Force start: {e}")));
            }
            ServiceEvent::ForcedSet { change, result } => {
                if let Err(e) = &result {
                    warn!(error = %e, value = change.value, "setting forced flags failed");
                    self.status = Some(StatusMessage::Error(format!("Force start: {e}")));
                }
                self.force.resolve(change, result.is_ok());
            }
        }
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, key messages dismiss it instead of
    /// their normal action; only `Quit` works normally. Pointer motion is
    /// ignored while help is shown.
    pub fn update(&mut self, msg: Message) {
        if self.help_visible {
            match msg {
                Message::Quit => self.should_quit = true,
                Message::PointerDrag { .. }
                | Message::PointerMove { .. }
                | Message::PointerRelease { .. } => {}
                _ => self.help_visible = false,
            }
            return;
        }

        if self.page.form().is_editing() {
            match msg {
                Message::Quit => self.should_quit = true,
                Message::SettingsConfirm => {
                    if !self.page.form_mut().confirm_edit() {
                        self.status =
                            Some(StatusMessage::Error("Not a whole number".to_string()));
                    }
                }
                Message::SettingsCancel | Message::Escape => self.page.form_mut().cancel_edit(),
                Message::SettingsInput { ch } => self.page.form_mut().input_char(ch),
                Message::SettingsBackspace => self.page.form_mut().backspace(),
                msg if msg.is_pointer() => self.handle_pointer(msg),
                _ => {}
            }
            return;
        }

        match msg {
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.help_visible = true,
            Message::Escape => {
                if !self.page.schedule_mut().cancel_drag() {
                    self.status = None;
                }
            }
            Message::Apply => self.request_apply(),
            Message::Reload => {
                self.request_load();
                self.request_forced();
            }
            Message::ToggleForceStart => self.toggle_force_start(),
            Message::SelectBrush { state } => {
                self.page.schedule_mut().select_brush(state);
            }
            Message::NextBrush => self.page.schedule_mut().next_brush(),
            Message::SettingsNavigate { delta } => self.page.form_mut().navigate(delta),
            Message::SettingsEdit => self.page.form_mut().start_edit(),
            msg if msg.is_pointer() => self.handle_pointer(msg),
            _ => {}
        }
    }

    fn handle_pointer(&mut self, msg: Message) {
        let schedule = self.page.schedule_mut();
        match msg {
            Message::PointerPress { column, row } => schedule.pointer_press(column, row),
            Message::PointerDrag { column, row } | Message::PointerMove { column, row } => {
                schedule.pointer_move(column, row);
            }
            Message::PointerRelease { column, row } => schedule.pointer_release(column, row),
            _ => {}
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            Self::render_terminal_too_small(frame, area);
            return;
        }

        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        self.header_visible = show_header;

        let header_height = if show_header { HEADER_HEIGHT } else { 0 };
        let [header_area, page_area, footer_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .areas(area);

        if show_header {
            Self::render_header(frame, header_area);
        }

        let active = self.active_state();
        let selected = self.selection.selected_ids().len();
        let buf = frame.buffer_mut();
        self.page.render(page_area, buf);

        let footer = Footer {
            force: &self.force,
            selected,
            active,
            brush: self.page.schedule().brush().brush(),
            message: self.status.as_ref(),
        };
        render_status_bar(&footer, footer_area, buf);

        if self.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: false });

        // Center the message vertically
        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Renders the header bar with title and help cue.
    fn render_header(frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "hourglass",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("Weekly Scheduler", Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop.
    ///
    /// Loads the page, then polls for input, applies service results, and
    /// renders until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        self.show();

        loop {
            self.drain_service_events();
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()? {
                let is_editing = self.page.form().is_editing();
                if let Some(msg) = event_to_message(&event, is_editing) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}
