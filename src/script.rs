//! Scripted event sequences for driving the mixer without an audio server.
//!
//! A script is a TOML file made of `[[step]]` tables:
//!
//! ```toml
//! [[step]]
//! event = "default"
//! index = 1
//! volume = 50
//! name = "Speakers"
//!
//! [[step]]
//! event = "click"
//! button = 1
//! delay_ms = 500
//! ```

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::actions::Action;
use crate::error::MixerError;
use crate::gadget::{InstanceId, MenuAction};
use crate::mixer::{EventFeed, InputEvent, MixerEvent, MixerHandle, MouseButton};
use crate::pulse::{ChannelVolumes, SinkEvent, SinkTable, SinkUpdate};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(flatten)]
    pub kind: StepKind,
}

fn default_channels() -> usize {
    2
}

fn default_instance() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct SinkLevel {
    pub index: u32,
    #[serde(default)]
    pub volume: u32,
    #[serde(default = "default_channels")]
    pub channels: usize,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl SinkLevel {
    fn update(&self) -> SinkUpdate {
        SinkUpdate {
            index: self.index,
            volume: ChannelVolumes::from_percent(self.channels, self.volume),
            mute: self.mute,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum StepKind {
    Default(SinkLevel),
    Changed(SinkLevel),
    Added(SinkLevel),
    Removed { index: u32 },
    Disconnected,
    Click {
        button: u32,
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Wheel {
        z: i32,
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Slider {
        volume: u32,
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Mute {
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Select {
        index: u32,
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Configure {
        #[serde(default = "default_instance")]
        instance: u32,
    },
    FocusLost {
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Advanced {
        #[serde(default = "default_instance")]
        instance: u32,
    },
    Action { name: Action },
}

impl StepKind {
    pub fn into_event(self) -> MixerEvent {
        let input = |instance: u32, event: InputEvent| MixerEvent::Input(InstanceId(instance), event);
        match self {
            StepKind::Default(level) => MixerEvent::Sink(SinkEvent::DefaultChanged(level.update())),
            StepKind::Changed(level) => MixerEvent::Sink(SinkEvent::Changed(level.update())),
            StepKind::Added(level) => MixerEvent::Sink(SinkEvent::Added(level.update())),
            StepKind::Removed { index } => MixerEvent::Sink(SinkEvent::Removed(index)),
            StepKind::Disconnected => MixerEvent::Sink(SinkEvent::Disconnected),
            StepKind::Click { button, instance } => input(
                instance,
                InputEvent::MouseDown { button: MouseButton::from_number(button), x: 0, y: 0 },
            ),
            StepKind::Wheel { z, instance } => input(instance, InputEvent::Wheel { z }),
            StepKind::Slider { volume, instance } => input(instance, InputEvent::SliderChanged(volume)),
            StepKind::Mute { instance } => input(instance, InputEvent::MuteToggled),
            StepKind::Select { index, instance } => input(instance, InputEvent::SinkSelected(index)),
            StepKind::Configure { instance } => input(instance, InputEvent::ConfigureClicked),
            StepKind::FocusLost { instance } => input(instance, InputEvent::PopupFocusLost),
            StepKind::Advanced { instance } => {
                input(instance, InputEvent::MenuActivated(MenuAction::LaunchMixer))
            }
            StepKind::Action { name } => MixerEvent::Action(name),
        }
    }
}

impl Script {
    /// Unknown events and action names are rejected here, before anything
    /// is played.
    pub fn parse(text: &str) -> Result<Self, MixerError> {
        toml::from_str(text).map_err(|e| MixerError::Script(e.to_string()))
    }

    pub async fn load(path: &Path) -> Result<Self, MixerError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MixerError::Script(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }
}

/// Plays a script into the mixer, mirroring sink events into `table` so a
/// loopback backend can answer requests. Ends with `Shutdown`.
#[derive(Debug)]
pub struct ScriptFeed {
    script: Script,
    table: SinkTable,
}

impl ScriptFeed {
    pub fn new(script: Script, table: SinkTable) -> Self {
        Self { script, table }
    }

    async fn play(&mut self, handle: &MixerHandle) -> Result<(), MixerError> {
        for (n, step) in self.script.steps.drain(..).enumerate() {
            if step.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
            }
            let event = step.kind.into_event();
            if let MixerEvent::Sink(ref sink_event) = event {
                self.table.observe(sink_event);
            }
            tracing::debug!("Script step {}: {:?}", n + 1, event);
            handle.send(event)?;
            tokio::task::yield_now().await;
        }
        Ok(())
    }
}

#[async_trait]
impl EventFeed for ScriptFeed {
    async fn feed(&mut self, handle: MixerHandle) -> Result<(), MixerError> {
        // The loop's own backend and spawner hold senders too, so it only
        // stops on Shutdown. Send it even if playback failed.
        let played = self.play(&handle).await;
        let stopped = handle.send(MixerEvent::Shutdown);
        played.and(stopped)
    }
}
