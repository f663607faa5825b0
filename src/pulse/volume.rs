/// A single channel level in the audio server's native fixed-point unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Volume(pub u32);

impl Volume {
    pub const MUTED: Volume = Volume(0);
    pub const NORM: Volume = Volume(0x10000);
    pub const MAX: Volume = Volume(u32::MAX / 2);

    pub fn from_percent(percent: u32) -> Self {
        let native = (percent as u64 * Self::NORM.0 as u64 + 50) / 100;
        Self(native.min(Self::MAX.0 as u64) as u32)
    }

    pub fn as_percent(&self) -> u32 {
        ((self.0 as u64 * 100 + Self::NORM.0 as u64 / 2) / Self::NORM.0 as u64) as u32
    }
}

/// Per-channel volume vector as reported by the audio server.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ChannelVolumes {
    channels: Vec<Volume>,
}

impl ChannelVolumes {
    pub fn new(channels: Vec<Volume>) -> Self {
        Self { channels }
    }

    /// Every channel at the same level.
    pub fn uniform(channels: usize, volume: Volume) -> Self {
        Self { channels: vec![volume; channels] }
    }

    pub fn from_percent(channels: usize, percent: u32) -> Self {
        Self::uniform(channels, Volume::from_percent(percent))
    }

    pub fn channels(&self) -> &[Volume] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Floor of the arithmetic mean; silence for a channel-less vector.
    pub fn avg(&self) -> Volume {
        if self.channels.is_empty() {
            return Volume::MUTED;
        }
        let sum: u64 = self.channels.iter().map(|v| v.0 as u64).sum();
        Volume((sum / self.channels.len() as u64) as u32)
    }

    pub fn max(&self) -> Volume {
        self.channels.iter().copied().max().unwrap_or(Volume::MUTED)
    }

    pub fn percent(&self) -> u32 {
        self.avg().as_percent()
    }

    pub fn set_all(&mut self, volume: Volume) {
        for channel in &mut self.channels {
            *channel = volume;
        }
    }

    /// Rescales the channels so the loudest one lands on `target`, keeping
    /// the balance between them.
    pub fn scale(&mut self, target: Volume) {
        let max = self.max();
        if max == Volume::MUTED {
            self.set_all(target);
            return;
        }
        for channel in &mut self.channels {
            channel.0 = (channel.0 as u64 * target.0 as u64 / max.0 as u64) as u32;
        }
    }

    pub fn increase(&mut self, step: u32) {
        let max = self.max().0 as u64 + step as u64;
        self.scale(Volume(max.min(Volume::MAX.0 as u64) as u32));
    }

    pub fn decrease(&mut self, step: u32) {
        let max = self.max().0.saturating_sub(step);
        self.scale(Volume(max));
    }
}
