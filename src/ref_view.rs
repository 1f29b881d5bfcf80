//! Grouped, filterable list of branches and tags. All view state lives behind one mutex.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::action::{Action, ActionKind};
use crate::channels::Channels;
use crate::config::GroupConfig;
use crate::model::ObjectId;
use crate::ref_filter::{FilterCompiler, QueryCompiler};
use crate::repo::{LoadEvent, LoadSender, RepoData};
use crate::search::{SearchOutcome, ViewSearch};
use crate::window::{RenderWindow, ThemeComponent, ViewDimension};

mod chain;
mod cursor;
mod footer;
mod groups;
mod handlers;
mod row;

pub use chain::{FilterChain, RowPredicate};
pub use cursor::ViewCursor;
pub use groups::{Group, RowGenerator, default_groups, detached_head_label};
pub use row::{DisplayRow, GroupId, GroupKind, RowKind};

pub const TITLE: &str = "Refs";

/// Notified when a ref entry is selected.
///
/// Listeners run while the view lock is held and must not call back into the view.
pub trait RefListener: Send + Sync {
    fn on_ref_select(&self, ref_name: &str, oid: &ObjectId) -> Result<()>;
}

struct RefViewState {
    groups: Vec<Group>,
    chain: FilterChain,
    cursor: ViewCursor,
    dimension: ViewDimension,
    active: bool,
    listeners: Vec<Arc<dyn RefListener>>,
    search: ViewSearch,
}

pub struct RefView {
    repo_data: Arc<dyn RepoData>,
    channels: Arc<dyn Channels>,
    compiler: Box<dyn FilterCompiler>,
    state: Mutex<RefViewState>,
}

impl RefView {
    pub fn new(repo_data: Arc<dyn RepoData>, channels: Arc<dyn Channels>) -> Self {
        Self {
            repo_data,
            channels,
            compiler: Box::new(QueryCompiler),
            state: Mutex::new(RefViewState {
                groups: default_groups(&GroupConfig::default()),
                chain: FilterChain::new(),
                cursor: ViewCursor::new(),
                dimension: ViewDimension::default(),
                active: false,
                listeners: Vec::new(),
                search: ViewSearch::new(),
            }),
        }
    }

    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.state_mut().groups = groups;
        self
    }

    pub fn with_filter_compiler(mut self, compiler: Box<dyn FilterCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    fn state_mut(&mut self) -> &mut RefViewState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, RefViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load completions arrive on `loads`; feed them to [`RefView::on_load_event`].
    pub fn initialise(&self, loads: &LoadSender) -> Result<()> {
        info!("Initialising RefView");
        self.repo_data.load_head()?;
        self.repo_data.load_branches(loads.clone())?;
        self.repo_data.load_local_tags(loads.clone())?;

        let mut state = self.lock();
        state.regenerate(&*self.repo_data);

        match self.repo_data.head() {
            Some(head) => {
                let name = match &head.branch {
                    Some(branch) => branch.name.clone(),
                    None => detached_head_label(&head.oid),
                };
                state.notify_listeners(&name, &head.oid)
            }
            None => {
                warn!("HEAD not available after load");
                Ok(())
            }
        }
    }

    pub fn register_ref_listener(&self, listener: Arc<dyn RefListener>) {
        self.lock().listeners.push(listener);
    }

    pub fn on_load_event(&self, event: LoadEvent) {
        {
            let mut state = self.lock();
            match event {
                LoadEvent::Branches => {
                    debug!("Branches loaded");
                    state.regenerate(&*self.repo_data);
                    state.select_head_branch(&*self.repo_data);
                }
                LoadEvent::LocalTags => {
                    debug!("Local tags loaded");
                    state.regenerate(&*self.repo_data);
                }
                LoadEvent::Failed { source, error } => {
                    error!(%source, "load failed: {}", error);
                    self.channels
                        .report_errors(vec![format!("Failed to load {}: {}", source, error)]);
                    state.regenerate(&*self.repo_data);
                }
            }
        }
        self.channels.update_display();
    }

    pub fn render(&self, win: &mut dyn RenderWindow) -> Result<()> {
        debug!("Rendering RefView");
        let mut guard = self.lock();
        let state = &mut *guard;

        state.dimension = win.view_dimensions();
        let rows = win.rows().saturating_sub(2);
        let visible = state.chain.visible_rows();
        let total = visible.len();

        state.cursor.determine_view_start(rows, total);
        let start_column = state.cursor.view_start_column();

        let window_rows = visible.iter().skip(state.cursor.view_start_index()).take(rows);
        for (win_row_index, row) in window_rows.enumerate() {
            win.set_row(
                win_row_index + 1,
                start_column,
                row.kind.theme_component(),
                &row.text,
            )?;
        }

        if total > 0 {
            win.set_selected_row(state.cursor.selected_row_in_view() + 1, state.active)?;
        }

        win.draw_border();
        win.set_title(ThemeComponent::RefviewTitle, TITLE)?;

        if let Some(footer) = state.footer(&*self.repo_data) {
            win.set_footer(ThemeComponent::RefviewFooter, &footer)?;
        }

        if let Some((pattern, true)) = state.search.search_active() {
            win.highlight(pattern, ThemeComponent::SearchMatch)?;
        }

        Ok(())
    }

    pub fn handle_action(&self, action: Action) -> Result<()> {
        debug!(%action, "RefView handling action");
        let mut guard = self.lock();
        let state = &mut *guard;

        if let Some(handler) = handlers::handler(action.kind) {
            return handler(self, state, &action);
        }

        let lines: Vec<&str> = state
            .chain
            .visible_rows()
            .iter()
            .map(|row| row.text.as_str())
            .collect();
        let outcome = state
            .search
            .handle_action(&action, &lines, state.cursor.selected_index())?;

        match outcome {
            SearchOutcome::Match(index) => {
                state.select_search_match(index);
                self.channels.update_display();
            }
            SearchOutcome::Handled => self.channels.update_display(),
            SearchOutcome::Unhandled => debug!(%action, "RefView ignoring action"),
        }
        Ok(())
    }

    pub fn on_active_change(&self, active: bool) {
        debug!(active, "RefView active");
        self.lock().active = active;
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    pub fn on_search_match(&self, line_index: usize) {
        self.lock().select_search_match(line_index);
    }

    pub fn view_pos(&self) -> ViewCursor {
        self.lock().cursor
    }

    pub fn line(&self, line_index: usize) -> String {
        let state = self.lock();
        match state.chain.visible_rows().get(line_index) {
            Some(row) => row.text.clone(),
            None => {
                error!(line_index, "Invalid lineIndex");
                String::new()
            }
        }
    }

    pub fn line_count(&self) -> usize {
        self.lock().chain.visible_rows().len()
    }

    pub fn rows(&self) -> Vec<DisplayRow> {
        self.lock()
            .chain
            .visible_rows()
            .iter()
            .map(|row| DisplayRow::clone(row))
            .collect()
    }

    pub fn filter_depth(&self) -> usize {
        self.lock().chain.filter_depth()
    }

    pub fn help_entries() -> &'static [(ActionKind, &'static str)] {
        &[
            (ActionKind::Select, "Select"),
            (ActionKind::FilterPrompt, "Add Filter"),
            (ActionKind::RemoveFilter, "Remove Filter"),
        ]
    }
}

impl RefViewState {
    fn regenerate(&mut self, repo_data: &dyn RepoData) {
        debug!("Generating rendered refs");
        self.chain.clear();
        let last = self.groups.len().saturating_sub(1);

        for (index, group) in self.groups.iter().enumerate() {
            let id = GroupId(index);
            self.chain.add(DisplayRow::header(group, id));
            if group.is_expanded() {
                group.generate(id, repo_data, &mut self.chain);
            }
            if index != last {
                self.chain.add(DisplayRow::spacer());
            }
        }

        self.clamp_cursor();
    }

    // current row if selectable, else nearest after, else nearest before
    fn clamp_cursor(&mut self) {
        let rows = self.chain.visible_rows();
        if rows.is_empty() {
            self.cursor.set_selected_index(0);
            return;
        }

        let start = self.cursor.selected_index().min(rows.len() - 1);
        let target = (start..rows.len())
            .find(|&i| rows[i].is_selectable())
            .or_else(|| (0..start).rev().find(|&i| rows[i].is_selectable()))
            .unwrap_or(start);
        self.cursor.set_selected_index(target);
    }

    fn select_head_branch(&mut self, repo_data: &dyn RepoData) {
        let Some(head) = repo_data.head() else {
            return;
        };
        let target = match &head.branch {
            Some(branch) => branch.name.clone(),
            None => detached_head_label(&head.oid),
        };

        let position = self
            .chain
            .visible_rows()
            .iter()
            .position(|row| row.kind == RowKind::LocalBranch && row.name() == target);
        match position {
            Some(index) => {
                debug!(branch = %target, "Setting HEAD branch as selected row");
                self.cursor.set_selected_index(index);
            }
            None => debug!(branch = %target, "HEAD branch not visible"),
        }
    }

    fn select_search_match(&mut self, line_index: usize) {
        match self.chain.visible_rows().get(line_index) {
            Some(row) if row.is_selectable() => self.cursor.set_selected_index(line_index),
            Some(_) => debug!(
                line_index,
                "Unable to select search match as it is not a selectable row"
            ),
            None => error!(line_index, "Search match out of range"),
        }
    }

    fn notify_listeners(&self, ref_name: &str, oid: &ObjectId) -> Result<()> {
        debug!(%ref_name, %oid, "Notifying RefListeners of selected ref");
        for listener in &self.listeners {
            listener.on_ref_select(ref_name, oid)?;
        }
        Ok(())
    }
}
