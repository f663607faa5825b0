use super::volume::ChannelVolumes;

/// Payload shared by every sink notification from the audio server.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkUpdate {
    pub index: u32,
    pub volume: ChannelVolumes,
    pub mute: bool,
    pub name: Option<String>,
}

impl SinkUpdate {
    pub fn new(index: u32, volume: ChannelVolumes, mute: bool) -> Self {
        Self { index, volume, mute, name: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    DefaultChanged(SinkUpdate),
    Changed(SinkUpdate),
    Added(SinkUpdate),
    Removed(u32),
    Disconnected,
}

impl SinkEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SinkEvent::DefaultChanged(_) => "default-changed",
            SinkEvent::Changed(_) => "changed",
            SinkEvent::Added(_) => "added",
            SinkEvent::Removed(_) => "removed",
            SinkEvent::Disconnected => "disconnected",
        }
    }
}
