use std::path::PathBuf;

use super::registry::SinkRegistry;
use super::{InputEvent, MixerEvent};
use crate::actions::ActionRegistry;
use crate::config::Config;
use crate::gadget::{GadgetContainer, Instance, InstanceId};
use crate::launcher::{MixerLauncher, ProcessSpawner};
use crate::notify::Notifier;
use crate::pulse::AudioBackend;

/// The host-owned capabilities the mixer talks to.
pub struct HostServices {
    pub backend: Box<dyn AudioBackend>,
    pub notifier: Box<dyn Notifier>,
    pub spawner: Box<dyn ProcessSpawner>,
    pub container: Box<dyn GadgetContainer>,
    pub actions: Box<dyn ActionRegistry>,
}

/// Process-wide mixer state. Every handler takes it by `&mut self`; the
/// event loop in `service` is its only owner.
pub struct MixerContext {
    pub(crate) registry: SinkRegistry,
    pub(crate) instances: Vec<Instance>,
    pub(crate) backend: Box<dyn AudioBackend>,
    pub(crate) notifier: Box<dyn Notifier>,
    pub(crate) container: Box<dyn GadgetContainer>,
    pub(crate) actions: Box<dyn ActionRegistry>,
    pub(crate) launcher: MixerLauncher,
    pub(crate) notification_id: Option<u32>,
    pub(crate) volume_step: u32,
    pub(crate) module_dir: PathBuf,
    next_instance: u32,
}

impl MixerContext {
    pub fn new(config: &Config, host: HostServices) -> Self {
        Self {
            registry: SinkRegistry::new(),
            instances: Vec::new(),
            backend: host.backend,
            notifier: host.notifier,
            container: host.container,
            actions: host.actions,
            launcher: MixerLauncher::new(config.mixer.program.clone(), host.spawner),
            notification_id: None,
            volume_step: config.volume_step(),
            module_dir: config.module_dir(),
            next_instance: 0,
        }
    }

    pub fn registry(&self) -> &SinkRegistry {
        &self.registry
    }

    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    pub fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id() == id)
    }

    pub(crate) fn instance_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.iter_mut().find(|i| i.id() == id)
    }

    pub(crate) fn next_instance_id(&mut self) -> InstanceId {
        self.next_instance += 1;
        InstanceId(self.next_instance)
    }

    pub fn launcher(&self) -> &MixerLauncher {
        &self.launcher
    }

    /// Handles one event. Returns `false` once the loop should stop.
    pub fn dispatch(&mut self, event: MixerEvent) -> bool {
        match event {
            MixerEvent::Sink(event) => self.on_sink_event(event),
            MixerEvent::Input(id, input) => self.on_input(id, input),
            MixerEvent::Action(action) => self.run_action(action),
            MixerEvent::LauncherExited(pid) => {
                if self.launcher.exited(pid) {
                    tracing::debug!("External mixer {} exited", pid);
                }
            }
            MixerEvent::NotificationShown(id) => self.notification_id = Some(id),
            MixerEvent::Shutdown => return false,
        }
        true
    }

    fn on_input(&mut self, id: InstanceId, input: InputEvent) {
        if self.instance(id).is_none() {
            tracing::debug!("Input for unknown gadget instance {:?}", id);
            return;
        }
        match input {
            InputEvent::MouseDown { button, x, y } => self.mouse_down(id, button, x, y),
            InputEvent::Wheel { z } => self.wheel(z),
            InputEvent::SliderChanged(percent) => self.slider_changed(percent),
            InputEvent::MuteToggled => self.mute_checked(),
            InputEvent::SinkSelected(index) => self.select_sink(index),
            InputEvent::ConfigureClicked => self.configure_clicked(id),
            InputEvent::PopupFocusLost => self.popup_focus_lost(id),
            InputEvent::MenuActivated(action) => self.menu_activated(id, action),
        }
    }
}

impl std::fmt::Debug for MixerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixerContext")
            .field("registry", &self.registry)
            .field("instances", &self.instances)
            .field("launcher", &self.launcher)
            .field("notification_id", &self.notification_id)
            .finish_non_exhaustive()
    }
}
