//! Recording doubles for the host capabilities.

use std::cell::RefCell;
use std::rc::Rc;

use super::context::{HostServices, MixerContext};
use super::MixerEvent;
use crate::actions::ActionRegistry;
use crate::config::Config;
use crate::error::MixerError;
use crate::gadget::{
    ClientSpec, GadgetClass, GadgetContainer, GadgetState, GadgetSurface, InstanceId, Menu,
    MenuAction, MenuItem, Popup,
};
use crate::launcher::ProcessSpawner;
use crate::notify::{Notifier, VolumeNotification};
use crate::pulse::{AudioBackend, ChannelVolumes, SinkEvent, SinkUpdate};

pub fn update(index: u32, percent: u32, mute: bool) -> SinkUpdate {
    SinkUpdate::new(index, ChannelVolumes::from_percent(2, percent), mute)
}

pub fn default_changed(index: u32, percent: u32, mute: bool, name: &str) -> SinkEvent {
    SinkEvent::DefaultChanged(update(index, percent, mute).with_name(name))
}

pub fn added(index: u32, percent: u32, mute: bool, name: &str) -> SinkEvent {
    SinkEvent::Added(update(index, percent, mute).with_name(name))
}

pub fn changed(index: u32, percent: u32, mute: bool) -> SinkEvent {
    SinkEvent::Changed(update(index, percent, mute))
}

#[derive(Debug)]
pub struct BackendLog {
    pub volumes: Vec<(u32, ChannelVolumes)>,
    pub mutes: Vec<(u32, bool)>,
    pub accept: bool,
}

impl Default for BackendLog {
    fn default() -> Self {
        Self { volumes: Vec::new(), mutes: Vec::new(), accept: true }
    }
}

#[derive(Default)]
pub struct MockBackend {
    pub log: Rc<RefCell<BackendLog>>,
}

impl AudioBackend for MockBackend {
    fn set_volume(&mut self, index: u32, volume: &ChannelVolumes) -> bool {
        let mut log = self.log.borrow_mut();
        log.volumes.push((index, volume.clone()));
        log.accept
    }

    fn set_mute(&mut self, index: u32, mute: bool) -> bool {
        let mut log = self.log.borrow_mut();
        log.mutes.push((index, mute));
        log.accept
    }
}

pub type SentNotification = (VolumeNotification, Option<u32>);

#[derive(Default)]
pub struct MockNotifier {
    pub sent: Rc<RefCell<Vec<SentNotification>>>,
}

impl Notifier for MockNotifier {
    fn send(&mut self, notification: &VolumeNotification, replaces: Option<u32>) -> Result<(), MixerError> {
        self.sent.borrow_mut().push((notification.clone(), replaces));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSpawner {
    pub spawned: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl MockSpawner {
    pub fn failing() -> Self {
        Self { spawned: Rc::default(), fail: true }
    }
}

impl ProcessSpawner for MockSpawner {
    fn spawn(&mut self, program: &str) -> std::io::Result<u32> {
        if self.fail {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"));
        }
        let mut spawned = self.spawned.borrow_mut();
        spawned.push(program.to_string());
        Ok(1000 + spawned.len() as u32)
    }
}

#[derive(Default)]
pub struct MockContainer {
    pub providers: Rc<RefCell<Vec<String>>>,
}

impl GadgetContainer for MockContainer {
    fn register_provider(&mut self, class_name: &str, _label: &str) {
        self.providers.borrow_mut().push(class_name.to_string());
    }

    fn unregister_provider(&mut self, class_name: &str) {
        self.providers.borrow_mut().retain(|p| p != class_name);
    }

    fn menu_items(&self, _instance: InstanceId) -> Vec<MenuItem> {
        vec![MenuItem::new("Settings", MenuAction::Host("settings".into()))]
    }
}

#[derive(Debug, Default)]
pub struct ActionLog {
    pub added: Vec<(String, String)>,
    pub removed: Vec<String>,
    pub regrabs: usize,
}

#[derive(Default)]
pub struct MockActions {
    pub log: Rc<RefCell<ActionLog>>,
    refuse: Option<&'static str>,
}

impl MockActions {
    pub fn refusing(name: &'static str) -> Self {
        Self { log: Rc::default(), refuse: Some(name) }
    }
}

impl ActionRegistry for MockActions {
    fn add(&mut self, name: &str, category: &str, _label: &str) -> bool {
        if self.refuse == Some(name) {
            return false;
        }
        self.log.borrow_mut().added.push((name.to_string(), category.to_string()));
        true
    }

    fn remove(&mut self, name: &str, _category: &str, _label: &str) {
        self.log.borrow_mut().removed.push(name.to_string());
    }

    fn regrab_keys(&mut self) {
        self.log.borrow_mut().regrabs += 1;
    }
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub renders: Vec<GadgetState>,
    pub popups_shown: usize,
    pub popups_synced: usize,
    pub popups_hidden: usize,
    pub menus: Vec<(Menu, i32, i32)>,
}

pub struct MockSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl GadgetSurface for MockSurface {
    fn render(&mut self, state: &GadgetState) {
        self.log.borrow_mut().renders.push(*state);
    }

    fn show_popup(&mut self, _popup: &Popup) {
        self.log.borrow_mut().popups_shown += 1;
    }

    fn sync_popup(&mut self, _popup: &Popup) {
        self.log.borrow_mut().popups_synced += 1;
    }

    fn hide_popup(&mut self) {
        self.log.borrow_mut().popups_hidden += 1;
    }

    fn show_menu(&mut self, menu: &Menu, x: i32, y: i32) {
        self.log.borrow_mut().menus.push((menu.clone(), x, y));
    }
}

pub struct Harness {
    pub ctx: MixerContext,
    backend: Rc<RefCell<BackendLog>>,
    notifications: Rc<RefCell<Vec<SentNotification>>>,
    spawned: Rc<RefCell<Vec<String>>>,
    surfaces: Vec<(InstanceId, Rc<RefCell<SurfaceLog>>)>,
}

impl Harness {
    pub fn new() -> Self {
        let (host, harness_parts) = Self::host();
        let ctx = MixerContext::new(&Config::default(), host);
        let (backend, notifications, spawned, _, _) = harness_parts;
        Self {
            ctx,
            backend,
            notifications,
            spawned,
            surfaces: Vec::new(),
        }
    }

    #[allow(clippy::type_complexity)]
    pub fn host() -> (
        HostServices,
        (
            Rc<RefCell<BackendLog>>,
            Rc<RefCell<Vec<SentNotification>>>,
            Rc<RefCell<Vec<String>>>,
            Rc<RefCell<Vec<String>>>,
            Rc<RefCell<ActionLog>>,
        ),
    ) {
        let backend = MockBackend::default();
        let notifier = MockNotifier::default();
        let spawner = MockSpawner::default();
        let container = MockContainer::default();
        let actions = MockActions::default();
        let parts = (
            backend.log.clone(),
            notifier.sent.clone(),
            spawner.spawned.clone(),
            container.providers.clone(),
            actions.log.clone(),
        );
        let host = HostServices {
            backend: Box::new(backend),
            notifier: Box::new(notifier),
            spawner: Box::new(spawner),
            container: Box::new(container),
            actions: Box::new(actions),
        };
        (host, parts)
    }

    pub fn with_instance() -> Self {
        let mut h = Self::new();
        h.add_instance();
        h
    }

    pub fn add_instance(&mut self) -> InstanceId {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let surface = MockSurface { log: log.clone() };
        let id = self.ctx.init(ClientSpec::default(), Box::new(surface));
        self.surfaces.push((id, log));
        id
    }

    pub fn first_instance(&self) -> InstanceId {
        self.surfaces[0].0
    }

    pub fn surface(&self, id: InstanceId) -> Rc<RefCell<SurfaceLog>> {
        self.surfaces
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, log)| log.clone())
            .expect("unknown instance")
    }

    pub fn send(&mut self, event: SinkEvent) {
        self.send_event(MixerEvent::Sink(event));
    }

    pub fn send_event(&mut self, event: MixerEvent) {
        self.ctx.dispatch(event);
    }

    /// Renders pushed to the first instance.
    pub fn renders(&self) -> usize {
        self.surfaces[0].1.borrow().renders.len()
    }

    pub fn last_render(&self) -> Option<GadgetState> {
        self.surfaces[0].1.borrow().renders.last().copied()
    }

    pub fn notifications(&self) -> Vec<SentNotification> {
        self.notifications.borrow().clone()
    }

    pub fn backend_log(&self) -> Rc<RefCell<BackendLog>> {
        self.backend.clone()
    }

    pub fn spawned(&self) -> Rc<RefCell<Vec<String>>> {
        self.spawned.clone()
    }
}
