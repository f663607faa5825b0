use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use pulse_mixer::config::Config;
use pulse_mixer::gadget::ClientSpec;
use pulse_mixer::headless::{LogActionRegistry, LogContainer, LogSurface};
use pulse_mixer::mixer::{service, EventFeed};
use pulse_mixer::{
    DesktopNotifier, GadgetClass, HostServices, LoopbackBackend, MixerEvent, MixerHandle,
    MixerLauncher, MixerModule, Notifier, Script, ScriptFeed, SilentNotifier, SinkTable,
    TokioSpawner,
};

#[derive(Parser, Debug)]
#[command(name = "pulse-mixer")]
#[command(about = "Panel volume mixer for the default audio output", long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,
    #[arg(long, env = "PULSE_MIXER_CONFIG")]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the mixer headless against a scripted event sequence
    Replay(ReplayOpts),
    /// Launch the external mixer and wait for it to exit
    Launch,
    /// Print the effective configuration
    Config,
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct ReplayOpts {
    script: PathBuf,
    #[arg(long)]
    no_notify: bool,
    #[arg(long, default_value = "1")]
    instances: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.config {
        Some(ref path) => {
            let path = PathBuf::from(shellexpand::tilde(path).into_owned());
            Config::load_from_path(path.clone())
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid configuration: {}", e);
            Config::default()
        }),
    };

    match cli.command {
        Commands::Replay(opts) => run_replay(opts, &config).await?,
        Commands::Launch => run_launch(&config).await?,
        Commands::Config => print!("{}", toml::to_string_pretty(&config)?),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pulse-mixer", &mut std::io::stdout());
        }
    }

    Ok(())
}

async fn run_replay(opts: ReplayOpts, config: &Config) -> Result<()> {
    let script = Script::load(&opts.script).await?;
    let (handle, rx) = MixerHandle::channel();
    let table = SinkTable::new();

    let notifier: Box<dyn Notifier> = if opts.no_notify || !config.notifications.enabled {
        Box::new(SilentNotifier)
    } else {
        Box::new(DesktopNotifier::new(&config.notifications, handle.sender()))
    };
    let host = HostServices {
        backend: Box::new(LoopbackBackend::new(table.clone(), handle.sender())),
        notifier,
        spawner: Box::new(TokioSpawner::new(handle.sender())),
        container: Box::new(LogContainer),
        actions: Box::new(LogActionRegistry),
    };

    let mut module = MixerModule::init(config, host);
    for n in 1..=opts.instances.max(1) {
        let spec = ClientSpec {
            name: module.context().name().to_string(),
            id: format!("{}.{}", module.context().id_new(), n),
            style: None,
        };
        module
            .context_mut()
            .init(spec, Box::new(LogSurface::new(format!("gadget {}", n))));
    }

    let mut feed = ScriptFeed::new(script, table);
    let producer = tokio::spawn(async move { feed.feed(handle).await });

    let handled = service::run(module.context_mut(), rx).await;
    producer.await??;

    let registry = module.context().registry();
    println!("{} event(s) handled, {} sink(s) known", handled, registry.count());
    match registry.default_sink() {
        Some(sink) => println!("Default sink: {} ({}) at {}%{}", sink.name, sink.index, sink.percent(),
            if sink.mute { ", muted" } else { "" }),
        None => println!("No default sink"),
    }

    module.shutdown();
    Ok(())
}

async fn run_launch(config: &Config) -> Result<()> {
    let (handle, mut rx) = MixerHandle::channel();
    let mut launcher = MixerLauncher::new(config.mixer.program.clone(), Box::new(TokioSpawner::new(handle.sender())));
    launcher.launch()?;
    println!("Launched {}, waiting for it to exit...", launcher.program());

    while let Some(event) = rx.recv().await {
        if let MixerEvent::LauncherExited(pid) = event {
            if launcher.exited(pid) {
                break;
            }
        }
    }

    println!("{} exited", launcher.program());
    Ok(())
}
