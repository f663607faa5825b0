use super::context::MixerContext;
use super::registry::Sink;
use crate::notify::VolumeNotification;
use crate::pulse::{SinkEvent, SinkUpdate};

impl MixerContext {
    pub fn on_sink_event(&mut self, event: SinkEvent) {
        tracing::debug!("Sink event: {}", event.kind());
        match event {
            SinkEvent::DefaultChanged(update) => self.sink_default_changed(update),
            SinkEvent::Changed(update) => self.sink_changed(update),
            SinkEvent::Added(update) => self.sink_added(update),
            SinkEvent::Removed(index) => self.sink_removed(index),
            SinkEvent::Disconnected => self.disconnected(),
        }
    }

    /// Unknown indices are taken as a new sink.
    fn sink_default_changed(&mut self, update: SinkUpdate) {
        if !self.registry.contains(update.index) {
            self.registry.insert(Sink::from_update(&update));
        }
        self.registry.set_default(update.index);
        tracing::info!("Default sink is now {}", update.index);
        self.refresh_view();
    }

    fn sink_changed(&mut self, update: SinkUpdate) {
        let Some(sink) = self.registry.get_mut(update.index) else {
            tracing::debug!("Change for unknown sink {}, dropping", update.index);
            return;
        };

        let changed = sink.mute != update.mute || sink.volume != update.volume;
        sink.mute = update.mute;
        sink.volume = update.volume;
        let percent = if sink.mute { 0 } else { sink.percent() };

        if !self.registry.is_default(update.index) {
            return;
        }
        self.refresh_view();
        if changed {
            self.notify(percent);
        }
    }

    fn sink_added(&mut self, update: SinkUpdate) {
        if self.registry.insert(Sink::from_update(&update)) {
            tracing::info!("Sink {} added", update.index);
        }
    }

    fn sink_removed(&mut self, index: u32) {
        let was_default = self.registry.is_default(index);
        let removed = self.registry.remove(index);
        if removed == 0 {
            tracing::debug!("Removal of unknown sink {}", index);
        }

        if was_default {
            match self.registry.promote_first() {
                Some(next) => tracing::info!("Default sink {} removed, falling back to {}", index, next),
                None => tracing::info!("Default sink {} removed, no sinks left", index),
            }
            self.refresh_view();
        }
    }

    fn disconnected(&mut self) {
        tracing::warn!("Disconnected from the audio server");
        self.registry.clear();
        self.refresh_view();
    }

    pub(crate) fn notify(&mut self, percent: u32) {
        let Some(notification) = VolumeNotification::for_volume(percent) else {
            return;
        };
        if let Err(e) = self.notifier.send(&notification, self.notification_id) {
            tracing::warn!("Failed to send volume notification: {}", e);
        }
    }
}
