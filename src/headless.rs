//! Host capabilities for running the mixer without a window manager: every
//! call becomes a log line.

use crate::actions::ActionRegistry;
use crate::gadget::{GadgetContainer, GadgetState, GadgetSurface, Menu, Popup};

#[derive(Debug, Default)]
pub struct LogSurface {
    label: String,
}

impl LogSurface {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl GadgetSurface for LogSurface {
    fn render(&mut self, state: &GadgetState) {
        tracing::info!("[{}] {}", self.label, describe(state));
    }

    fn show_popup(&mut self, popup: &Popup) {
        let names: Vec<&str> = popup.sinks.iter().map(|s| s.name.as_str()).collect();
        tracing::info!("[{}] popup opened: sinks={:?} slider={} mute={}",
            self.label, names, popup.slider, popup.mute);
    }

    fn sync_popup(&mut self, popup: &Popup) {
        tracing::debug!("[{}] popup slider={} mute={}", self.label, popup.slider, popup.mute);
    }

    fn hide_popup(&mut self) {
        tracing::info!("[{}] popup closed", self.label);
    }

    fn show_menu(&mut self, menu: &Menu, x: i32, y: i32) {
        let labels: Vec<&str> = menu.items.iter().map(|i| i.label.as_str()).collect();
        tracing::info!("[{}] menu at ({}, {}): {:?}", self.label, x, y, labels);
    }
}

/// A muted sink at 0% and "no sink" draw identically, so they log identically.
fn describe(state: &GadgetState) -> String {
    format!("volume {}/{}%{}", state.left, state.right, if state.muted { " (muted)" } else { "" })
}

#[derive(Debug, Default)]
pub struct LogContainer;

impl GadgetContainer for LogContainer {
    fn register_provider(&mut self, class_name: &str, label: &str) {
        tracing::info!("Registered gadget provider {} ({})", class_name, label);
    }

    fn unregister_provider(&mut self, class_name: &str) {
        tracing::info!("Unregistered gadget provider {}", class_name);
    }
}

#[derive(Debug, Default)]
pub struct LogActionRegistry;

impl ActionRegistry for LogActionRegistry {
    fn add(&mut self, name: &str, category: &str, label: &str) -> bool {
        tracing::debug!("Action {} registered under {} as {:?}", name, category, label);
        true
    }

    fn remove(&mut self, name: &str, category: &str, _label: &str) {
        tracing::debug!("Action {} removed from {}", name, category);
    }

    fn regrab_keys(&mut self) {
        tracing::debug!("Key bindings regrabbed");
    }
}
