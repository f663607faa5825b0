use crate::pulse::{ChannelVolumes, SinkUpdate};

/// Local mirror of one audio-server output device.
#[derive(Clone, Debug, PartialEq)]
pub struct Sink {
    pub index: u32,
    pub volume: ChannelVolumes,
    pub mute: bool,
    pub name: String,
}

impl Sink {
    pub fn new(index: u32, volume: ChannelVolumes, mute: bool, name: String) -> Self {
        Self { index, volume, mute, name }
    }

    pub fn from_update(update: &SinkUpdate) -> Self {
        Self::new(
            update.index,
            update.volume.clone(),
            update.mute,
            update.name.clone().unwrap_or_default(),
        )
    }

    pub fn percent(&self) -> u32 {
        self.volume.percent()
    }
}

/// Sinks in the order the server announced them, plus the key of the default.
#[derive(Debug, Default)]
pub struct SinkRegistry {
    sinks: Vec<Sink>,
    default: Option<u32>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u32) -> Option<&Sink> {
        self.sinks.iter().find(|s| s.index == index)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut Sink> {
        self.sinks.iter_mut().find(|s| s.index == index)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    /// Appends `sink` unless its index is already known. Returns whether it
    /// was inserted.
    pub fn insert(&mut self, sink: Sink) -> bool {
        if self.contains(sink.index) {
            tracing::debug!("Sink {} already known, ignoring", sink.index);
            return false;
        }
        self.sinks.push(sink);
        true
    }

    /// Drops every sink with `index`, returning how many went away. Clears
    /// the default key if it named one of them.
    pub fn remove(&mut self, index: u32) -> usize {
        let before = self.sinks.len();
        self.sinks.retain(|s| s.index != index);
        if self.default == Some(index) {
            self.default = None;
        }
        before - self.sinks.len()
    }

    pub fn clear(&mut self) {
        self.sinks.clear();
        self.default = None;
    }

    pub fn default_index(&self) -> Option<u32> {
        self.default
    }

    pub fn default_sink(&self) -> Option<&Sink> {
        self.default.and_then(|index| self.get(index))
    }

    pub fn default_sink_mut(&mut self) -> Option<&mut Sink> {
        let index = self.default?;
        self.get_mut(index)
    }

    pub fn is_default(&self, index: u32) -> bool {
        self.default == Some(index)
    }

    /// Makes `index` the default. Unknown indices are refused.
    pub fn set_default(&mut self, index: u32) -> bool {
        if !self.contains(index) {
            return false;
        }
        self.default = Some(index);
        true
    }

    /// Promotes the first sink in insertion order, or clears the default
    /// when nothing is left.
    pub fn promote_first(&mut self) -> Option<u32> {
        self.default = self.sinks.first().map(|s| s.index);
        self.default
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sink> {
        self.sinks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn count(&self) -> usize {
        self.sinks.len()
    }
}
