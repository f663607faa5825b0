//! Module load/unload: owns the mixer context and registers it with the host.

use crate::actions::{self, Action};
use crate::config::Config;
use crate::gadget::GadgetClass;
use crate::mixer::{HostServices, MixerContext};

#[derive(Debug)]
pub struct MixerModule {
    context: MixerContext,
    registered: Vec<Action>,
}

impl MixerModule {
    /// Builds the context, registers the gadget class with the container and
    /// the key-binding actions with the action registry.
    pub fn init(config: &Config, host: HostServices) -> Self {
        let mut context = MixerContext::new(config, host);

        let (name, label) = (context.name(), context.label());
        context.container.register_provider(name, label);
        let registered = actions::register_all(context.actions.as_mut());
        tracing::info!("Mixer module loaded with {} action(s)", registered.len());

        Self { context, registered }
    }

    pub fn context(&self) -> &MixerContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut MixerContext {
        &mut self.context
    }

    pub fn shutdown(mut self) {
        actions::unregister_all(self.context.actions.as_mut(), &self.registered);
        let name = self.context.name();
        self.context.container.unregister_provider(name);

        let instances: Vec<_> = self.context.instances().map(|i| i.id()).collect();
        for id in instances {
            self.context.shutdown(id);
        }
        tracing::info!("Mixer module unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::testing::{default_changed, Harness};
    use crate::mixer::MixerEvent;

    #[test]
    fn test_init_registers_provider_and_actions() {
        let (host, (_, _, _, providers, action_log)) = Harness::host();
        let module = MixerModule::init(&Config::default(), host);

        assert_eq!(providers.borrow().as_slice(), &["pulse_mixer".to_string()]);
        assert_eq!(action_log.borrow().added.len(), 3);
        assert_eq!(action_log.borrow().regrabs, 1);
        assert!(module.context().registry().is_empty());
    }

    #[test]
    fn test_shutdown_unregisters_everything() {
        let (host, (_, _, _, providers, action_log)) = Harness::host();
        let mut module = MixerModule::init(&Config::default(), host);
        module
            .context_mut()
            .dispatch(MixerEvent::Sink(default_changed(1, 50, false, "A")));

        module.shutdown();

        assert!(providers.borrow().is_empty());
        assert_eq!(action_log.borrow().removed.len(), 3);
        assert_eq!(action_log.borrow().regrabs, 2);
    }
}
