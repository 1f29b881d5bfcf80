use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::action::{Action, ActionKind};

use super::row::{GroupId, RowKind};
use super::{RefView, RefViewState};

pub(super) type Handler = fn(&RefView, &mut RefViewState, &Action) -> Result<()>;

pub(super) fn handler(kind: ActionKind) -> Option<Handler> {
    let handler: Handler = match kind {
        ActionKind::PrevLine => move_up_ref,
        ActionKind::NextLine => move_down_ref,
        ActionKind::PrevPage => move_up_ref_page,
        ActionKind::NextPage => move_down_ref_page,
        ActionKind::ScrollRight => scroll_right,
        ActionKind::ScrollLeft => scroll_left,
        ActionKind::FirstLine => move_to_first_ref,
        ActionKind::LastLine => move_to_last_ref,
        ActionKind::Select => select_ref,
        ActionKind::AddFilter => add_ref_filter,
        ActionKind::RemoveFilter => remove_ref_filter,
        _ => return None,
    };
    Some(handler)
}

impl RefViewState {
    /// Moves to the nearest selectable row above. Returns false if there is none.
    fn step_up(&mut self) -> bool {
        let rows = self.chain.visible_rows();
        let start = self.cursor.selected_index().min(rows.len());
        match (0..start).rev().find(|&i| rows[i].is_selectable()) {
            Some(index) => {
                self.cursor.set_selected_index(index);
                true
            }
            None => {
                debug!("No valid ref entry to move to");
                false
            }
        }
    }

    /// Moves to the nearest selectable row below. Returns false if there is none.
    fn step_down(&mut self) -> bool {
        let rows = self.chain.visible_rows();
        let start = self.cursor.selected_index() + 1;
        match (start..rows.len()).find(|&i| rows[i].is_selectable()) {
            Some(index) => {
                self.cursor.set_selected_index(index);
                true
            }
            None => {
                debug!("No valid ref entry to move to");
                false
            }
        }
    }

    fn page_size(&self) -> usize {
        self.dimension.rows.saturating_sub(2)
    }
}

fn move_up_ref(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    if state.step_up() {
        debug!("Moved up one ref");
        view.channels.update_display();
    }
    Ok(())
}

fn move_down_ref(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    if state.step_down() {
        debug!("Moved down one ref");
        view.channels.update_display();
    }
    Ok(())
}

fn move_up_ref_page(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    let mut moved = 0;
    while moved < state.page_size() && state.step_up() {
        moved += 1;
    }
    if moved > 0 {
        debug!(moved, "Moved up a page");
        view.channels.update_display();
    }
    Ok(())
}

fn move_down_ref_page(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    let mut moved = 0;
    while moved < state.page_size() && state.step_down() {
        moved += 1;
    }
    if moved > 0 {
        debug!(moved, "Moved down a page");
        view.channels.update_display();
    }
    Ok(())
}

fn scroll_right(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    state.cursor.move_page_right(state.dimension.cols);
    debug!(
        column = state.cursor.view_start_column(),
        "Scrolling right"
    );
    view.channels.update_display();
    Ok(())
}

fn scroll_left(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    if state.cursor.move_page_left(state.dimension.cols) {
        debug!(column = state.cursor.view_start_column(), "Scrolling left");
        view.channels.update_display();
    }
    Ok(())
}

fn move_to_first_ref(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    if state.cursor.move_to_first_line() {
        state.clamp_cursor();
        debug!("Moving to first ref");
        view.channels.update_display();
    }
    Ok(())
}

fn move_to_last_ref(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    let total = state.chain.visible_rows().len();
    if state.cursor.move_to_last_line(total) {
        state.clamp_cursor();
        debug!("Moving to last ref");
        view.channels.update_display();
    }
    Ok(())
}

fn select_ref(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    let Some(row) = state
        .chain
        .visible_rows()
        .get(state.cursor.selected_index())
        .cloned()
    else {
        debug!("No ref to select");
        return Ok(());
    };

    match row.kind {
        RowKind::GroupHeader(_) => {
            let Some(group) = row
                .group
                .and_then(|GroupId(index)| state.groups.get_mut(index))
            else {
                warn!(text = %row.text, "Group header without a group");
                return Ok(());
            };
            group.toggle();
            debug!(
                group = group.name(),
                expanded = group.is_expanded(),
                "Setting ref group expanded"
            );
            state.regenerate(&*view.repo_data);
            view.channels.update_display();
        }
        RowKind::LocalBranch | RowKind::RemoteBranch | RowKind::Tag => {
            let Some(oid) = &row.oid else {
                warn!(text = %row.text, "Ref entry without an object id");
                return Ok(());
            };
            debug!(ref_name = row.name(), %oid, "Selecting ref");
            state.notify_listeners(row.name(), oid)?;
            view.channels.update_display();
        }
        RowKind::Spacer | RowKind::Loading => {
            warn!(kind = ?row.kind, "Unexpected ref type selected");
        }
    }

    Ok(())
}

fn add_ref_filter(view: &RefView, state: &mut RefViewState, action: &Action) -> Result<()> {
    let query = match action.args.as_slice() {
        [arg] => match arg.as_str() {
            Some(query) => query,
            None => bail!("Expected filter query argument to have type string"),
        },
        [] => bail!("Expected filter query argument"),
        _ => bail!("Expected a single filter query argument"),
    };

    let predicate = match view.compiler.compile(query) {
        Ok(predicate) => predicate,
        Err(errors) => {
            debug!(%query, errors = errors.len(), "Filter query failed to compile");
            view.channels
                .report_errors(errors.iter().map(ToString::to_string).collect());
            return Ok(());
        }
    };

    let before = state.chain.visible_rows().len();
    state.chain.add_filter(predicate);
    let after = state.chain.visible_rows().len();
    state.clamp_cursor();
    info!(%query, before, after, "Added ref filter");

    if after < before {
        view.channels.report_status("Filter applied".to_string());
    } else {
        view.channels.report_status("Filter had no effect".to_string());
    }
    view.channels.update_display();
    Ok(())
}

fn remove_ref_filter(view: &RefView, state: &mut RefViewState, _action: &Action) -> Result<()> {
    if state.chain.remove_filter() {
        state.clamp_cursor();
        info!(remaining = state.chain.filter_depth(), "Removed ref filter");
        view.channels.report_status("Removed ref filter".to_string());
        view.channels.update_display();
    } else {
        view.channels
            .report_status("No ref filter applied to remove".to_string());
    }
    Ok(())
}
