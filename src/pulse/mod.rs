pub mod backend;
pub mod event;
pub mod loopback;
pub mod volume;

pub use backend::AudioBackend;
pub use event::{SinkEvent, SinkUpdate};
pub use loopback::{LoopbackBackend, SinkTable};
pub use volume::{ChannelVolumes, Volume};
