pub mod actions;
pub mod config;
pub mod error;
pub mod gadget;
pub mod headless;
pub mod launcher;
pub mod mixer;
pub mod module;
pub mod notify;
pub mod pulse;
pub mod script;

pub use actions::{Action, ActionRegistry, ACTION_CATEGORY};
pub use config::{Config, MixerConfig, NotificationsConfig};
pub use error::MixerError;
pub use gadget::{GadgetClass, GadgetContainer, GadgetState, GadgetSurface, InstanceId, Orient};
pub use launcher::{MixerLauncher, ProcessSpawner, TokioSpawner};
pub use mixer::{HostServices, InputEvent, MixerContext, MixerEvent, MixerHandle, MouseButton, Sink, SinkRegistry};
pub use module::MixerModule;
pub use notify::{DesktopNotifier, Notifier, SilentNotifier, VolumeNotification};
pub use pulse::{AudioBackend, ChannelVolumes, LoopbackBackend, SinkEvent, SinkTable, SinkUpdate, Volume};
pub use script::{Script, ScriptFeed};
