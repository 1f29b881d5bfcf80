use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

/// One-way signals from views to whoever drives the UI.
pub trait Channels: Send + Sync {
    fn update_display(&self);

    fn report_status(&self, status: String);

    fn report_errors(&self, errors: Vec<String>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Redraw,
    Status(String),
    Errors(Vec<String>),
}

/// `Channels` that forwards every signal as a [`UiEvent`].
#[derive(Clone, Debug)]
pub struct EventChannels {
    tx: UnboundedSender<UiEvent>,
}

impl EventChannels {
    pub fn new() -> (Self, UnboundedReceiver<UiEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            debug!("ui event receiver dropped");
        }
    }
}

impl Channels for EventChannels {
    fn update_display(&self) {
        self.send(UiEvent::Redraw);
    }

    fn report_status(&self, status: String) {
        self.send(UiEvent::Status(status));
    }

    fn report_errors(&self, errors: Vec<String>) {
        self.send(UiEvent::Errors(errors));
    }
}
