use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::backend::AudioBackend;
use super::event::{SinkEvent, SinkUpdate};
use super::volume::ChannelVolumes;
use crate::mixer::MixerEvent;

/// Server-side view of the sinks, as last announced to the mixer.
#[derive(Clone, Debug, Default)]
pub struct SinkTable {
    sinks: Arc<Mutex<HashMap<u32, SinkUpdate>>>,
}

impl SinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event on its way to the mixer.
    pub fn observe(&self, event: &SinkEvent) {
        let Ok(mut sinks) = self.sinks.lock() else {
            return;
        };
        match event {
            SinkEvent::DefaultChanged(update) | SinkEvent::Added(update) => {
                sinks.entry(update.index).or_insert_with(|| update.clone());
            }
            SinkEvent::Changed(update) => {
                if let Some(sink) = sinks.get_mut(&update.index) {
                    sink.volume = update.volume.clone();
                    sink.mute = update.mute;
                }
            }
            SinkEvent::Removed(index) => {
                sinks.remove(index);
            }
            SinkEvent::Disconnected => sinks.clear(),
        }
    }

    fn apply(&self, index: u32, f: impl FnOnce(&mut SinkUpdate)) -> Option<SinkUpdate> {
        let mut sinks = self.sinks.lock().ok()?;
        let sink = sinks.get_mut(&index)?;
        f(sink);
        Some(SinkUpdate::new(sink.index, sink.volume.clone(), sink.mute))
    }
}

/// Backend that acts as its own audio server: every accepted request is
/// echoed back to the mixer as a `Changed` event.
#[derive(Debug)]
pub struct LoopbackBackend {
    table: SinkTable,
    events: mpsc::UnboundedSender<MixerEvent>,
}

impl LoopbackBackend {
    pub fn new(table: SinkTable, events: mpsc::UnboundedSender<MixerEvent>) -> Self {
        Self { table, events }
    }

    fn echo(&self, update: Option<SinkUpdate>) -> bool {
        match update {
            Some(update) => {
                tracing::debug!("Loopback echoing sink {} ({}%, mute={})",
                    update.index, update.volume.percent(), update.mute);
                self.events.send(MixerEvent::Sink(SinkEvent::Changed(update))).is_ok()
            }
            None => false,
        }
    }
}

impl AudioBackend for LoopbackBackend {
    fn set_volume(&mut self, index: u32, volume: &ChannelVolumes) -> bool {
        let update = self.table.apply(index, |sink| sink.volume = volume.clone());
        self.echo(update)
    }

    fn set_mute(&mut self, index: u32, mute: bool) -> bool {
        let update = self.table.apply(index, |sink| sink.mute = mute);
        self.echo(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn added(index: u32, percent: u32) -> SinkEvent {
        SinkEvent::Added(
            SinkUpdate::new(index, ChannelVolumes::from_percent(2, percent), false)
                .with_name(format!("sink-{index}")),
        )
    }

    #[test]
    fn test_loopback_echoes_accepted_requests() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let table = SinkTable::new();
        table.observe(&added(3, 40));
        let mut backend = LoopbackBackend::new(table, tx);

        assert!(backend.set_mute(3, true));
        match rx.try_recv() {
            Ok(MixerEvent::Sink(SinkEvent::Changed(update))) => {
                assert_eq!(update.index, 3);
                assert!(update.mute);
                assert_eq!(update.volume.percent(), 40);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_loopback_rejects_unknown_sink() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut backend = LoopbackBackend::new(SinkTable::new(), tx);

        assert!(!backend.set_volume(9, &ChannelVolumes::from_percent(2, 10)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_table_forgets_removed_sinks() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let table = SinkTable::new();
        table.observe(&added(1, 40));
        table.observe(&SinkEvent::Removed(1));
        let mut backend = LoopbackBackend::new(table, tx);

        assert!(!backend.set_mute(1, true));
    }
}
