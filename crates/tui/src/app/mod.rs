pub mod form;
pub mod report;
pub mod store;
pub mod table;

use std::{collections::VecDeque, future::Future, time::Duration};

use api_types::{stats::Stats, transaction::Transaction};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::{
    client::{ApiError, Client},
    config::AppConfig,
    error::{AppError, Result},
    session::SessionGate,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use form::{FormField, FormState, today};
use report::{Charts, SummaryCards};
use table::TableState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Search,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Form(field) => field.next().map(Self::Form).unwrap_or(Self::Search),
            Self::Search => Self::Table,
            Self::Table => Self::Form(FormField::Date),
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Form(field) => field.prev().map(Self::Form).unwrap_or(Self::Table),
            Self::Search => Self::Form(FormField::Type),
            Self::Table => Self::Search,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub password: String,
    pub message: Option<String>,
}

/// Everything the dashboard shows. Rebuilt from nothing on logout.
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub form: FormState,
    pub focus: Focus,
    pub table: TableState,
    pub summary: Option<SummaryCards>,
    pub charts: Charts,
    /// Blocking messages, oldest first; input is swallowed until dismissed.
    pub alerts: VecDeque<String>,
    pub endpoint: String,
    pub last_refresh: Option<DateTime<Local>>,
    pub busy: bool,
}

impl AppState {
    pub fn new(endpoint: String) -> Self {
        Self {
            screen: Screen::Login,
            login: LoginState::default(),
            form: FormState::new(today()),
            focus: Focus::Form(FormField::Date),
            table: TableState::default(),
            summary: None,
            charts: Charts::default(),
            alerts: VecDeque::new(),
            endpoint,
            last_refresh: None,
            busy: false,
        }
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push_back(message.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Save,
    Delete,
}

#[derive(Debug)]
pub enum EventKind {
    ListLoaded(std::result::Result<Vec<Transaction>, ApiError>),
    StatsLoaded(std::result::Result<Stats, ApiError>),
    CommandFinished {
        kind: CommandKind,
        result: std::result::Result<(), ApiError>,
    },
    TaskFinished,
}

/// Result of a background request, tagged with the session it belongs to.
#[derive(Debug)]
pub struct AppEvent {
    epoch: u64,
    kind: EventKind,
}

/// Root controller: owns the client, the session gate and the state.
///
/// Requests run on spawned tasks and report back through a channel, so a
/// slow request never freezes input. State is only touched here, between
/// events.
pub struct App {
    client: Client,
    session: SessionGate,
    pub state: AppState,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    in_flight: usize,
    epoch: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let session = SessionGate::from_config(config)?;
        Self::with_session(config, session)
    }

    pub fn with_session(config: &AppConfig, session: SessionGate) -> Result<Self> {
        let client = Client::new(&config.api_url)?;
        let state = AppState::new(endpoint_label(&client));
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            session,
            state,
            events_tx,
            events_rx,
            in_flight: 0,
            epoch: 0,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.start();
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    /// Opens the dashboard straight away when the session already holds a password.
    pub fn start(&mut self) {
        if self.session.is_open() {
            tracing::info!("cached session found");
            self.enter_dashboard();
        } else {
            self.state.screen = Screen::Login;
        }
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(50);

        while !self.should_quit {
            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_event(event);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Waits until no request is outstanding, applying results as they land.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Login => self.handle_login_action(action),
            Screen::Dashboard => self.handle_dashboard_action(action),
        }
    }

    fn handle_login_action(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Input(ch) => self.state.login.password.push(ch),
            AppAction::Backspace => {
                self.state.login.password.pop();
            }
            AppAction::Cancel => self.state.login.password.clear(),
            AppAction::Submit => self.attempt_login()?,
            _ => {}
        }
        Ok(())
    }

    fn attempt_login(&mut self) -> Result<()> {
        let password = std::mem::take(&mut self.state.login.password);
        if !self.session.login(&password)? {
            self.state.login.message = Some("Enter the password.".to_string());
            return Ok(());
        }
        self.state.login.message = None;
        self.enter_dashboard();
        Ok(())
    }

    fn enter_dashboard(&mut self) {
        self.state.screen = Screen::Dashboard;
        self.boot();
    }

    fn boot(&mut self) {
        self.state.form.reset(today());
        self.state.focus = Focus::Form(FormField::Date);
        self.reload();
    }

    /// Logs out and drops all loaded data; late responses are ignored.
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.epoch += 1;
        self.state = AppState::new(self.state.endpoint.clone());
        Ok(())
    }

    fn handle_dashboard_action(&mut self, action: AppAction) -> Result<()> {
        if !self.state.alerts.is_empty() {
            if matches!(action, AppAction::Submit | AppAction::Cancel) {
                self.state.alerts.pop_front();
            }
            return Ok(());
        }

        if self.state.table.pending_delete.is_some() {
            match action {
                AppAction::Input('y' | 'Y') | AppAction::Submit => self.confirm_delete(),
                AppAction::Input('n' | 'N') | AppAction::Cancel => {
                    self.state.table.pending_delete = None;
                }
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Logout => return self.logout(),
            AppAction::ResetForm => {
                self.state.form.reset(today());
                self.state.focus = Focus::Form(FormField::Date);
            }
            AppAction::Reload => self.reload(),
            AppAction::NextField => self.state.focus = self.state.focus.next(),
            AppAction::PrevField => self.state.focus = self.state.focus.prev(),
            _ => match self.state.focus {
                Focus::Form(field) => self.handle_form_action(field, action),
                Focus::Search => self.handle_search_action(action),
                Focus::Table => self.handle_table_action(action),
            },
        }
        Ok(())
    }

    fn handle_form_action(&mut self, field: FormField, action: AppAction) {
        match action {
            AppAction::Submit => self.submit_form(),
            AppAction::Up => {
                if let Some(prev) = field.prev() {
                    self.state.focus = Focus::Form(prev);
                }
            }
            AppAction::Down => {
                if let Some(next) = field.next() {
                    self.state.focus = Focus::Form(next);
                }
            }
            AppAction::Left | AppAction::Right | AppAction::Input(_)
                if field == FormField::Type =>
            {
                self.state.form.toggle_kind();
            }
            AppAction::Input(ch) => {
                if let Some(text) = self.state.form.text_mut(field) {
                    text.push(ch);
                }
            }
            AppAction::Backspace => {
                if let Some(text) = self.state.form.text_mut(field) {
                    text.pop();
                }
            }
            _ => {}
        }
    }

    fn handle_search_action(&mut self, action: AppAction) {
        let table = &mut self.state.table;
        match action {
            AppAction::Input(ch) => table.push_query(ch),
            AppAction::Backspace => table.pop_query(),
            AppAction::Cancel => table.clear_query(),
            AppAction::Submit | AppAction::Down => self.state.focus = Focus::Table,
            _ => {}
        }
    }

    fn handle_table_action(&mut self, action: AppAction) {
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.table.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.state.table.select_next(),
            AppAction::Submit | AppAction::Input('e') => self.edit_selected(),
            AppAction::Input('d') => self.request_delete(),
            AppAction::Input('/') => self.state.focus = Focus::Search,
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Loads the selected row into the form and jumps there.
    pub fn edit_selected(&mut self) {
        let Some(tx) = self.state.table.selected_transaction().cloned() else {
            return;
        };
        self.state.form.load(&tx);
        self.state.focus = Focus::Form(FormField::Date);
    }

    pub fn request_delete(&mut self) {
        let Some(id) = self
            .state
            .table
            .selected_transaction()
            .map(|tx| tx.id.clone())
        else {
            return;
        };
        self.state.table.pending_delete = Some(id);
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.state.table.pending_delete.take() else {
            return;
        };
        let Some(credential) = self.session.credential().cloned() else {
            self.state.alert("Not logged in.");
            return;
        };

        tracing::info!(id = id.as_str(), "deleting transaction");
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let epoch = self.epoch;
        self.spawn(async move {
            let result = client.delete(&id, &credential).await;
            let _ = tx.send(AppEvent {
                epoch,
                kind: EventKind::CommandFinished {
                    kind: CommandKind::Delete,
                    result,
                },
            });
        });
    }

    /// Sends the form as `create` or `update`; bad input never leaves the client.
    pub fn submit_form(&mut self) {
        let draft = match self.state.form.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                self.state.alert(message);
                return;
            }
        };
        let Some(credential) = self.session.credential().cloned() else {
            self.state.alert("Not logged in.");
            return;
        };

        tracing::info!(editing = self.state.form.is_editing(), "saving transaction");
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let epoch = self.epoch;
        self.spawn(async move {
            let result = client.save(draft, &credential).await;
            let _ = tx.send(AppEvent {
                epoch,
                kind: EventKind::CommandFinished {
                    kind: CommandKind::Save,
                    result,
                },
            });
        });
    }

    /// Full refresh: list first, then stats. Stats are skipped if the list fails.
    pub fn reload(&mut self) {
        tracing::debug!("reloading");
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let epoch = self.epoch;
        self.spawn(async move {
            let list = client.list().await;
            let failed = list.is_err();
            let _ = tx.send(AppEvent {
                epoch,
                kind: EventKind::ListLoaded(list),
            });
            if failed {
                return;
            }
            let stats = client.stats().await;
            let _ = tx.send(AppEvent {
                epoch,
                kind: EventKind::StatsLoaded(stats),
            });
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.in_flight += 1;
        self.state.busy = true;
        let tx = self.events_tx.clone();
        let epoch = self.epoch;
        tokio::spawn(async move {
            task.await;
            let _ = tx.send(AppEvent {
                epoch,
                kind: EventKind::TaskFinished,
            });
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        if let EventKind::TaskFinished = event.kind {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.state.busy = self.in_flight > 0;
            return;
        }
        if event.epoch != self.epoch {
            tracing::debug!("dropping response from a closed session");
            return;
        }

        match event.kind {
            EventKind::ListLoaded(Ok(items)) => {
                tracing::info!(count = items.len(), "transactions loaded");
                self.state.table.replace(items);
                self.state.last_refresh = Some(Local::now());
            }
            EventKind::StatsLoaded(Ok(stats)) => {
                self.state.summary = Some(SummaryCards::from_stats(&stats));
                self.state.charts.rebuild(&stats);
            }
            EventKind::ListLoaded(Err(err)) | EventKind::StatsLoaded(Err(err)) => {
                tracing::warn!("reload failed: {err}");
                self.state.alert(err.to_string());
            }
            EventKind::CommandFinished { kind, result: Ok(()) } => {
                if kind == CommandKind::Save {
                    self.state.form.reset(today());
                }
                self.reload();
            }
            EventKind::CommandFinished {
                kind,
                result: Err(err),
            } => {
                tracing::warn!(?kind, "command failed: {err}");
                self.state.alert(err.to_string());
            }
            EventKind::TaskFinished => {}
        }
    }
}

fn endpoint_label(client: &Client) -> String {
    client
        .endpoint()
        .host_str()
        .unwrap_or("endpoint")
        .to_string()
}
