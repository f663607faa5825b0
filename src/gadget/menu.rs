#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    LaunchMixer,
    /// Item owned by the host container; activating it is the host's job.
    Host(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub icon: Option<String>,
    pub action: MenuAction,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self { label: label.into(), icon: None, action }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// The gadget's own entry first, then whatever the container adds.
    pub fn context(host_items: Vec<MenuItem>) -> Self {
        let mut items = vec![MenuItem::new("Advanced", MenuAction::LaunchMixer).with_icon("configure")];
        items.extend(host_items);
        Self { items }
    }
}
