use super::context::MixerContext;
use super::MouseButton;
use crate::gadget::{
    ClientSpec, GadgetClass, GadgetState, GadgetSurface, IconRef, Instance, InstanceId, Menu,
    MenuAction, Orient, Popup, Size,
};
use crate::pulse::Volume;

pub const GADGET_CLASS_NAME: &str = "pulse_mixer";
pub const GADGET_LABEL: &str = "Pulse Mixer";

impl MixerContext {
    /// Pushes the default sink's state to every instance. Closes popups when
    /// there is no default sink.
    pub fn refresh_view(&mut self) {
        let current = self
            .registry
            .default_sink()
            .map(|sink| GadgetState::new(sink.mute, sink.percent()));

        for instance in &mut self.instances {
            match current {
                None => {
                    instance.close_popup();
                    instance.render(GadgetState::NO_SINK);
                }
                Some(state) => {
                    instance.sync_popup(state.muted, state.volume());
                    instance.render(state);
                }
            }
        }
    }

    pub(crate) fn mouse_down(&mut self, id: InstanceId, button: MouseButton, x: i32, y: i32) {
        match button {
            MouseButton::Left => self.toggle_popup(id),
            MouseButton::Middle => self.volume_mute_toggle(),
            MouseButton::Right => self.open_menu(id, x, y),
            MouseButton::Other(n) => tracing::debug!("Ignoring mouse button {}", n),
        }
    }

    pub(crate) fn wheel(&mut self, z: i32) {
        if z > 0 {
            self.volume_decrease();
        } else if z < 0 {
            self.volume_increase();
        }
    }

    fn toggle_popup(&mut self, id: InstanceId) {
        let popup = Popup::from_registry(&self.registry);
        let Some(instance) = self.instance_mut(id) else {
            return;
        };
        if instance.close_popup() {
            return;
        }
        match popup {
            Some(popup) => instance.open_popup(popup),
            None => tracing::debug!("No default sink, not opening popup"),
        }
    }

    pub(crate) fn popup_focus_lost(&mut self, id: InstanceId) {
        if let Some(instance) = self.instance_mut(id) {
            instance.close_popup();
        }
    }

    fn open_menu(&mut self, id: InstanceId, x: i32, y: i32) {
        let menu = Menu::context(self.container.menu_items(id));
        if let Some(instance) = self.instance_mut(id) {
            instance.surface_mut().show_menu(&menu, x, y);
        }
    }

    pub(crate) fn menu_activated(&mut self, id: InstanceId, action: MenuAction) {
        match action {
            MenuAction::LaunchMixer => self.configure_clicked(id),
            MenuAction::Host(name) => tracing::debug!("Menu item {} belongs to the host", name),
        }
    }

    pub(crate) fn configure_clicked(&mut self, id: InstanceId) {
        if let Some(instance) = self.instance_mut(id) {
            instance.close_popup();
        }
        self.launch_mixer();
    }

    /// Sets every channel of the default sink to the slider's level.
    pub(crate) fn slider_changed(&mut self, percent: u32) {
        let Some(sink) = self.registry.default_sink_mut() else {
            return;
        };
        sink.volume.set_all(Volume::from_percent(percent));
        let (index, volume) = (sink.index, sink.volume.clone());
        if !self.backend.set_volume(index, &volume) {
            tracing::warn!("Could not set volume of sink {}", index);
        }
    }

    /// Mute checkbox: flips the flag locally first and rolls back if the
    /// server refuses.
    pub(crate) fn mute_checked(&mut self) {
        let Some(sink) = self.registry.default_sink_mut() else {
            return;
        };
        sink.mute = !sink.mute;
        let (index, mute) = (sink.index, sink.mute);

        if !self.backend.set_mute(index, mute) {
            tracing::warn!("Could not mute the sink: {}", index);
            if let Some(sink) = self.registry.get_mut(index) {
                sink.mute = !mute;
            }
            return;
        }
        self.refresh_view();
    }

    pub(crate) fn select_sink(&mut self, index: u32) {
        if !self.registry.set_default(index) {
            tracing::debug!("Selected unknown sink {}", index);
            return;
        }
        tracing::info!("Sink {} selected as default", index);
        self.refresh_view();
    }
}

impl GadgetClass for MixerContext {
    fn name(&self) -> &'static str {
        GADGET_CLASS_NAME
    }

    fn init(&mut self, spec: ClientSpec, surface: Box<dyn GadgetSurface>) -> InstanceId {
        let id = self.next_instance_id();
        tracing::debug!("Creating gadget instance {:?} ({})", id, spec.id);
        self.instances.push(Instance::new(id, spec, surface));
        if self.registry.default_sink().is_some() {
            self.refresh_view();
        }
        id
    }

    fn shutdown(&mut self, id: InstanceId) {
        if let Some(pos) = self.instances.iter().position(|i| i.id() == id) {
            let mut instance = self.instances.remove(pos);
            instance.close_popup();
            tracing::debug!("Gadget instance {:?} destroyed", id);
        }
    }

    fn orient(&mut self, id: InstanceId, orient: Orient) -> Option<Size> {
        let instance = self.instance_mut(id)?;
        instance.set_orient(orient);
        instance.orient().preferred_size()
    }

    fn label(&self) -> &'static str {
        GADGET_LABEL
    }

    fn icon(&self) -> IconRef {
        IconRef {
            file: self.module_dir.join("mixer.edj"),
            group: "icon",
        }
    }
}
