use std::io;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, error};

use crate::action::{Action, ActionKind};
use crate::channels::{Channels, EventChannels, UiEvent};
use crate::config::GroupConfig;
use crate::model::ObjectId;
use crate::ref_view::{RefListener, RefView, default_groups};
use crate::repo::{LoadEvent, RepoData};

use super::input::Input;
use super::keymap::{self, KeyCommand};
use super::render;

fn status_format() -> Option<&'static [FormatItem<'static>]> {
    static FMT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();
    FMT.get_or_init(|| time::format_description::parse("[hour]:[minute]:[second]Z").ok())
        .as_deref()
}

fn now_ts() -> String {
    let now = OffsetDateTime::now_utc();
    status_format()
        .and_then(|fmt| now.format(fmt).ok())
        .unwrap_or_default()
}

/// Reports the selected ref on the status line.
pub struct StatusListener {
    channels: EventChannels,
}

impl StatusListener {
    pub fn new(channels: EventChannels) -> Self {
        Self { channels }
    }
}

impl RefListener for StatusListener {
    fn on_ref_select(&self, ref_name: &str, oid: &ObjectId) -> Result<()> {
        self.channels
            .report_status(format!("Selected {} ({})", ref_name, oid.short()));
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct StatusEntry {
    pub(super) ts: String,
    pub(super) text: String,
    pub(super) is_error: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PromptKind {
    Filter,
    Search,
}

impl PromptKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            PromptKind::Filter => "filter> ",
            PromptKind::Search => "search> ",
        }
    }
}

pub(super) struct App {
    pub(super) view: Arc<RefView>,
    ui_rx: UnboundedReceiver<UiEvent>,
    loads_rx: UnboundedReceiver<LoadEvent>,
    pub(super) status: Option<StatusEntry>,
    pub(super) prompt: Option<PromptKind>,
    pub(super) input: Input,
    quit: bool,
    dirty: bool,
}

impl App {
    pub(super) fn new(repo_data: Arc<dyn RepoData>, groups: GroupConfig) -> Result<Self> {
        let (channels, ui_rx) = EventChannels::new();
        let view = Arc::new(
            RefView::new(repo_data, Arc::new(channels.clone()))
                .with_groups(default_groups(&groups)),
        );
        view.register_ref_listener(Arc::new(StatusListener::new(channels)));
        view.on_active_change(true);

        let (loads_tx, loads_rx) = unbounded_channel();
        view.initialise(&loads_tx).context("initialise ref view")?;

        Ok(Self {
            view,
            ui_rx,
            loads_rx,
            status: None,
            prompt: None,
            input: Input::default(),
            quit: false,
            dirty: true,
        })
    }

    pub(super) fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            self.drain_events();
            if self.dirty {
                terminal
                    .draw(|f| render::draw(f, self))
                    .context("draw")?;
                self.dirty = false;
            }
            if self.quit {
                return Ok(());
            }

            if event::poll(Duration::from_millis(50)).context("poll")? {
                match event::read().context("read event")? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => self.handle_key(k),
                    Event::Resize(..) => self.dirty = true,
                    _ => {}
                }
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.loads_rx.try_recv() {
            self.view.on_load_event(event);
        }
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Redraw => self.dirty = true,
                UiEvent::Status(text) => self.set_status(text, false),
                UiEvent::Errors(errors) => self.set_status(errors.join("; "), true),
            }
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        if is_error {
            error!(%text, "status error");
        }
        self.status = Some(StatusEntry {
            ts: now_ts(),
            text,
            is_error,
        });
        self.dirty = true;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(kind) = self.prompt {
            self.handle_prompt_key(kind, key);
            return;
        }

        match keymap::command_for(key) {
            Some(KeyCommand::Quit) => self.quit = true,
            Some(KeyCommand::ToggleActive) => {
                let active = !self.view.is_active();
                self.view.on_active_change(active);
                self.dirty = true;
            }
            Some(KeyCommand::Action(action)) => match action.kind {
                ActionKind::FilterPrompt => self.open_prompt(PromptKind::Filter),
                ActionKind::SearchPrompt => self.open_prompt(PromptKind::Search),
                _ => self.dispatch(action),
            },
            None => {}
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        debug!(?kind, "opening prompt");
        self.input.clear();
        self.prompt = Some(kind);
        self.dirty = true;
    }

    fn handle_prompt_key(&mut self, kind: PromptKind, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input.clear();
                self.prompt = None;
            }
            KeyCode::Enter => {
                let text = self.input.submit();
                self.prompt = None;
                if !text.is_empty() {
                    let action = match kind {
                        PromptKind::Filter => Action::add_filter(text),
                        PromptKind::Search => Action::search(text),
                    };
                    self.dispatch(action);
                }
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Up => self.input.history_up(),
            KeyCode::Down => self.input.history_down(),
            KeyCode::Char(c) => self.input.insert_char(c),
            _ => {}
        }
        self.dirty = true;
    }

    fn dispatch(&mut self, action: Action) {
        if let Err(err) = self.view.handle_action(action) {
            self.set_status(format!("{:#}", err), true);
        }
    }
}
