//! Panel-side state of the mixer gadget and the host container contract.

pub mod class;
pub mod instance;
pub mod menu;

pub use class::{ClientSpec, GadgetClass, IconRef, Orient, Size};
pub use instance::{Instance, Popup, PopupSink};
pub use menu::{Menu, MenuAction, MenuItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

/// What the gadget's theme is told to draw. The theme message carries the
/// mute flag followed by a left and right level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GadgetState {
    pub muted: bool,
    pub left: u32,
    pub right: u32,
}

impl GadgetState {
    pub const NO_SINK: GadgetState = GadgetState { muted: true, left: 0, right: 0 };

    pub fn new(muted: bool, volume: u32) -> Self {
        Self { muted, left: volume, right: volume }
    }

    pub fn volume(&self) -> u32 {
        self.left
    }
}

/// Drawing surface the host hands to each gadget instance.
pub trait GadgetSurface {
    fn render(&mut self, state: &GadgetState);
    fn show_popup(&mut self, popup: &Popup);
    fn sync_popup(&mut self, popup: &Popup);
    fn hide_popup(&mut self);
    fn show_menu(&mut self, menu: &Menu, x: i32, y: i32);
}

/// The window manager's gadget container.
pub trait GadgetContainer {
    fn register_provider(&mut self, class_name: &str, label: &str);
    fn unregister_provider(&mut self, class_name: &str);

    /// Items the container appends to every gadget's context menu.
    fn menu_items(&self, _instance: InstanceId) -> Vec<MenuItem> {
        Vec::new()
    }
}
