use std::fmt;

use super::{ClientSpec, GadgetState, GadgetSurface, InstanceId, Orient};
use crate::mixer::SinkRegistry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupSink {
    pub index: u32,
    pub name: String,
}

/// Contents of an open popup: the sink chooser, the slider and the mute box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Popup {
    pub sinks: Vec<PopupSink>,
    pub selected: Option<usize>,
    pub slider: u32,
    pub mute: bool,
}

impl Popup {
    /// Builds the popup for the registry's default sink, if there is one.
    pub fn from_registry(registry: &SinkRegistry) -> Option<Self> {
        let default = registry.default_sink()?;
        let sinks: Vec<PopupSink> = registry
            .iter()
            .map(|s| PopupSink { index: s.index, name: s.name.clone() })
            .collect();
        let selected = sinks.iter().position(|s| s.index == default.index);
        Some(Self {
            sinks,
            selected,
            slider: default.percent(),
            mute: default.mute,
        })
    }

    pub fn sync(&mut self, mute: bool, volume: u32) {
        self.mute = mute;
        self.slider = volume;
    }
}

/// One placement of the gadget on a panel.
pub struct Instance {
    id: InstanceId,
    spec: ClientSpec,
    orient: Orient,
    surface: Box<dyn GadgetSurface>,
    rendered: Option<GadgetState>,
    popup: Option<Popup>,
}

impl Instance {
    pub fn new(id: InstanceId, spec: ClientSpec, surface: Box<dyn GadgetSurface>) -> Self {
        Self {
            id,
            spec,
            orient: Orient::default(),
            surface,
            rendered: None,
            popup: None,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn spec(&self) -> &ClientSpec {
        &self.spec
    }

    pub fn orient(&self) -> Orient {
        self.orient
    }

    pub fn set_orient(&mut self, orient: Orient) {
        if orient != Orient::Last {
            self.orient = orient;
        }
    }

    /// Last state pushed to the surface, `None` before the first render.
    pub fn rendered(&self) -> Option<GadgetState> {
        self.rendered
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn has_popup(&self) -> bool {
        self.popup.is_some()
    }

    pub fn render(&mut self, state: GadgetState) {
        self.surface.render(&state);
        self.rendered = Some(state);
    }

    pub fn open_popup(&mut self, popup: Popup) {
        self.surface.show_popup(&popup);
        self.popup = Some(popup);
    }

    pub fn sync_popup(&mut self, mute: bool, volume: u32) {
        if let Some(popup) = self.popup.as_mut() {
            popup.sync(mute, volume);
            self.surface.sync_popup(popup);
        }
    }

    /// Returns whether a popup was actually open.
    pub fn close_popup(&mut self) -> bool {
        if self.popup.take().is_some() {
            self.surface.hide_popup();
            return true;
        }
        false
    }

    pub fn surface_mut(&mut self) -> &mut dyn GadgetSurface {
        self.surface.as_mut()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("spec", &self.spec)
            .field("orient", &self.orient)
            .field("rendered", &self.rendered)
            .field("popup", &self.popup)
            .finish_non_exhaustive()
    }
}
