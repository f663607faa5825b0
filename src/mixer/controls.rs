use super::context::MixerContext;
use crate::actions::Action;

impl MixerContext {
    pub fn run_action(&mut self, action: Action) {
        match action {
            Action::VolumeIncrease => self.volume_increase(),
            Action::VolumeDecrease => self.volume_decrease(),
            Action::MuteToggle => self.volume_mute_toggle(),
        }
    }

    /// Local state is left alone; the server's `Changed` event brings it in.
    pub fn volume_increase(&mut self) {
        let Some(sink) = self.registry.default_sink() else {
            return;
        };
        let mut volume = sink.volume.clone();
        volume.increase(self.volume_step);
        if !self.backend.set_volume(sink.index, &volume) {
            tracing::warn!("Could not raise volume of sink {}", sink.index);
        }
    }

    pub fn volume_decrease(&mut self) {
        let Some(sink) = self.registry.default_sink() else {
            return;
        };
        let mut volume = sink.volume.clone();
        volume.decrease(self.volume_step);
        if !self.backend.set_volume(sink.index, &volume) {
            tracing::warn!("Could not lower volume of sink {}", sink.index);
        }
    }

    pub fn volume_mute_toggle(&mut self) {
        let Some(sink) = self.registry.default_sink() else {
            return;
        };
        if !self.backend.set_mute(sink.index, !sink.mute) {
            tracing::warn!("Could not mute the sink: {}", sink.index);
        }
    }

    /// Starts the external mixer unless one is already running.
    pub fn launch_mixer(&mut self) {
        match self.launcher.launch() {
            Ok(true) => {}
            Ok(false) => tracing::debug!("External mixer already running"),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}
