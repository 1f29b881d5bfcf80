use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{debug, info};

use crate::action::Action;
use crate::channels::{EventChannels, UiEvent};
use crate::config::GroupConfig;
use crate::ref_view::{RefView, default_groups};
use crate::repo::RepoData;

const LOAD_COUNT: usize = 2;

/// Must not be called from inside a tokio runtime.
pub fn list_refs(
    repo_data: Arc<dyn RepoData>,
    groups: GroupConfig,
    filters: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    let (channels, mut ui_rx) = EventChannels::new();
    let view = RefView::new(repo_data, Arc::new(channels)).with_groups(default_groups(&groups));

    let (loads_tx, mut loads_rx) = unbounded_channel();
    view.initialise(&loads_tx).context("initialise ref view")?;
    drop(loads_tx);

    for _ in 0..LOAD_COUNT {
        match loads_rx.blocking_recv() {
            Some(event) => view.on_load_event(event),
            None => break,
        }
    }
    take_errors(&mut ui_rx)?;

    for query in filters {
        view.handle_action(Action::add_filter(query.clone()))
            .with_context(|| format!("apply filter {:?}", query))?;
        take_errors(&mut ui_rx).with_context(|| format!("invalid filter {:?}", query))?;
    }

    info!(rows = view.line_count(), "Listing refs");
    for index in 0..view.line_count() {
        writeln!(out, "{}", view.line(index)).context("write output")?;
    }
    Ok(())
}

fn take_errors(ui_rx: &mut UnboundedReceiver<UiEvent>) -> Result<()> {
    let mut errors = Vec::new();
    while let Ok(event) = ui_rx.try_recv() {
        match event {
            UiEvent::Errors(errs) => errors.extend(errs),
            UiEvent::Status(status) => debug!(%status, "status"),
            UiEvent::Redraw => {}
        }
    }
    if !errors.is_empty() {
        bail!("{}", errors.join("; "));
    }
    Ok(())
}
