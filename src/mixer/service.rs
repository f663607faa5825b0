use async_trait::async_trait;
use tokio::sync::mpsc;

use super::context::MixerContext;
use super::MixerEvent;
use crate::error::MixerError;

/// Sending side of the mixer's event loop. Cheap to clone; hand one to every
/// producer that lives outside the loop.
#[derive(Clone, Debug)]
pub struct MixerHandle {
    tx: mpsc::UnboundedSender<MixerEvent>,
}

impl MixerHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MixerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, event: MixerEvent) -> Result<(), MixerError> {
        self.tx.send(event).map_err(|_| MixerError::ChannelClosed)
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<MixerEvent> {
        self.tx.clone()
    }
}

/// A producer of mixer events running on its own task.
#[async_trait]
pub trait EventFeed: Send {
    async fn feed(&mut self, handle: MixerHandle) -> Result<(), MixerError>;
}

/// Drains `events` into `ctx` one at a time until a `Shutdown` arrives or
/// every sender is gone. Returns how many events were handled.
pub async fn run(ctx: &mut MixerContext, mut events: mpsc::UnboundedReceiver<MixerEvent>) -> usize {
    let mut handled = 0;
    while let Some(event) = events.recv().await {
        handled += 1;
        if !ctx.dispatch(event) {
            tracing::debug!("Mixer loop shutting down");
            break;
        }
    }
    handled
}
