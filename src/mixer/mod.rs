//! The mixer core: sink registry, event bridge, view refresh and controls,
//! all driven from one serial event loop.

pub mod bridge;
pub mod context;
pub mod controls;
pub mod registry;
pub mod service;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{HostServices, MixerContext};
pub use registry::{Sink, SinkRegistry};
pub use service::{EventFeed, MixerHandle};

use crate::actions::Action;
use crate::gadget::{InstanceId, MenuAction};
use crate::pulse::SinkEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u32),
}

impl MouseButton {
    pub fn from_number(button: u32) -> Self {
        match button {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            n => MouseButton::Other(n),
        }
    }
}

/// Pointer and popup interaction on one gadget instance.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown { button: MouseButton, x: i32, y: i32 },
    /// Positive `z` scrolls down.
    Wheel { z: i32 },
    SliderChanged(u32),
    MuteToggled,
    SinkSelected(u32),
    ConfigureClicked,
    PopupFocusLost,
    MenuActivated(MenuAction),
}

/// Everything the mixer reacts to, marshalled onto a single loop.
#[derive(Clone, Debug, PartialEq)]
pub enum MixerEvent {
    Sink(SinkEvent),
    Input(InstanceId, InputEvent),
    Action(Action),
    LauncherExited(u32),
    /// The desktop accepted a notification under this id.
    NotificationShown(u32),
    Shutdown,
}
