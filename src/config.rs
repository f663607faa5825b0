use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mixer: MixerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MixerConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_step_count")]
    pub step_count: u32,
    #[serde(default)]
    pub module_dir: Option<String>,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            step_count: default_step_count(),
            module_dir: None,
        }
    }
}

fn default_program() -> String {
    "epulse".to_string()
}

fn default_step_count() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default = "default_expire_ms")]
    pub expire_ms: u32,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            app_name: default_app_name(),
            summary: default_summary(),
            expire_ms: default_expire_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_app_name() -> String {
    "EPulse".to_string()
}

fn default_summary() -> String {
    "Volume Changed".to_string()
}

fn default_expire_ms() -> u32 {
    2000
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match ProjectDirs::from("org", "enlightenment", "pulse-mixer") {
            Some(dirs) => {
                figment = figment.merge(Toml::file(dirs.config_dir().join("config.toml")));
            }
            None => tracing::debug!("No home directory, skipping user config file"),
        }

        figment
            .merge(Env::prefixed("PULSE_MIXER_").split("__"))
            .extract()
    }

    pub fn load_from_path(path: PathBuf) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
    }

    /// Native volume units moved by one increase/decrease step.
    pub fn volume_step(&self) -> u32 {
        crate::pulse::Volume::NORM.0 / self.mixer.step_count.max(1)
    }

    pub fn module_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.mixer.module_dir {
            PathBuf::from(shellexpand::tilde(dir).into_owned())
        } else if let Some(dirs) = ProjectDirs::from("org", "enlightenment", "pulse-mixer") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mixer.program, "epulse");
        assert_eq!(config.mixer.step_count, 20);
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.expire_ms, 2000);
        assert_eq!(config.volume_step(), 0x10000 / 20);
    }

    #[test]
    fn test_load_from_path_merges_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("mixer.toml", r#"
                [mixer]
                program = "pavucontrol"

                [notifications]
                enabled = false
            "#)?;

            let config = Config::load_from_path(PathBuf::from("mixer.toml"))?;
            assert_eq!(config.mixer.program, "pavucontrol");
            assert_eq!(config.mixer.step_count, 20);
            assert!(!config.notifications.enabled);
            assert_eq!(config.notifications.app_name, "EPulse");
            Ok(())
        });
    }

    #[test]
    fn test_zero_step_count_does_not_divide_by_zero() {
        let mut config = Config::default();
        config.mixer.step_count = 0;
        assert_eq!(config.volume_step(), 0x10000);
    }

    #[test]
    fn test_module_dir_override() {
        let mut config = Config::default();
        config.mixer.module_dir = Some("/opt/pulse-mixer".to_string());
        assert_eq!(config.module_dir(), PathBuf::from("/opt/pulse-mixer"));
    }
}
