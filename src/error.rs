#[derive(Debug, thiserror::Error)]
pub enum MixerError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Notification failed: {0}")]
    Notification(String),
    #[error("Script error: {0}")]
    Script(String),
    #[error("Event loop closed")]
    ChannelClosed,
}
