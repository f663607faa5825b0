use super::volume::ChannelVolumes;

/// Outbound half of the audio-server helper. Both calls are fire-and-forget;
/// the boolean only reports whether the request was accepted.
pub trait AudioBackend {
    fn set_volume(&mut self, index: u32, volume: &ChannelVolumes) -> bool;
    fn set_mute(&mut self, index: u32, mute: bool) -> bool;
}
