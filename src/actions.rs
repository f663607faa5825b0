use serde::Deserialize;

/// Category the window manager lists the mixer's key bindings under.
pub const ACTION_CATEGORY: &str = "Pulse Mixer";

/// Deserializes from the registered action name, e.g. `"volume_mute"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Action {
    VolumeIncrease,
    VolumeDecrease,
    MuteToggle,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::VolumeIncrease, Action::VolumeDecrease, Action::MuteToggle];

    pub fn name(&self) -> &'static str {
        match self {
            Action::VolumeIncrease => "volume_increase",
            Action::VolumeDecrease => "volume_decrease",
            Action::MuteToggle => "volume_mute",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::VolumeIncrease => "Increase Volume",
            Action::VolumeDecrease => "Decrease Volume",
            Action::MuteToggle => "Mute volume",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl TryFrom<String> for Action {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or_else(|| format!("unknown action {:?}", name))
    }
}

/// The window manager's action and key-binding registry.
pub trait ActionRegistry {
    /// Returns whether the host accepted the action.
    fn add(&mut self, name: &str, category: &str, label: &str) -> bool;
    fn remove(&mut self, name: &str, category: &str, label: &str);
    fn regrab_keys(&mut self);
}

/// Registers every action and returns the ones the host accepted.
pub fn register_all(registry: &mut dyn ActionRegistry) -> Vec<Action> {
    let registered: Vec<Action> = Action::ALL
        .into_iter()
        .filter(|action| {
            let ok = registry.add(action.name(), ACTION_CATEGORY, action.label());
            if !ok {
                tracing::warn!("Host refused action {}", action.name());
            }
            ok
        })
        .collect();
    registry.regrab_keys();
    registered
}

pub fn unregister_all(registry: &mut dyn ActionRegistry, registered: &[Action]) {
    for action in registered {
        registry.remove(action.name(), ACTION_CATEGORY, action.label());
    }
    registry.regrab_keys();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::testing::MockActions;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
        assert_eq!(Action::from_name("volume_up"), None);
    }

    #[test]
    fn test_action_try_from_name() {
        assert_eq!(Action::try_from("volume_mute".to_string()), Ok(Action::MuteToggle));
        let err = Action::try_from("louder".to_string()).unwrap_err();
        assert!(err.contains("louder"));
    }

    #[test]
    fn test_register_all_regrabs_keys() {
        let actions = MockActions::default();
        let log = actions.log.clone();
        let mut registry = actions;

        let registered = register_all(&mut registry);
        assert_eq!(registered.len(), 3);
        assert_eq!(log.borrow().added.len(), 3);
        assert!(log.borrow().added.iter().all(|(_, category)| category == ACTION_CATEGORY));
        assert_eq!(log.borrow().regrabs, 1);

        unregister_all(&mut registry, &registered);
        assert_eq!(log.borrow().removed, vec!["volume_increase", "volume_decrease", "volume_mute"]);
        assert_eq!(log.borrow().regrabs, 2);
    }

    #[test]
    fn test_refused_actions_are_not_unregistered() {
        let mut registry = MockActions::refusing("volume_mute");
        let log = registry.log.clone();

        let registered = register_all(&mut registry);
        assert_eq!(registered, vec![Action::VolumeIncrease, Action::VolumeDecrease]);
        unregister_all(&mut registry, &registered);
        assert!(!log.borrow().removed.contains(&"volume_mute".to_string()));
    }
}
