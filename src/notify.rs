//! Desktop notifications for volume changes on the default sink.

use notify_rust::{Notification, Timeout};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::config::NotificationsConfig;
use crate::error::MixerError;
use crate::mixer::MixerEvent;

/// FDO icon-naming scheme names for the volume levels.
pub const ICON_MUTED: &str = "audio-volume-muted";
pub const ICON_LOW: &str = "audio-volume-low";
pub const ICON_MEDIUM: &str = "audio-volume-medium";
pub const ICON_HIGH: &str = "audio-volume-high";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeNotification {
    pub percent: u32,
    pub icon: &'static str,
    pub body: String,
}

impl VolumeNotification {
    /// `None` for values outside 0..=100.
    pub fn for_volume(percent: u32) -> Option<Self> {
        let icon = match percent {
            0 => ICON_MUTED,
            1..=32 => ICON_LOW,
            33..=66 => ICON_MEDIUM,
            67..=100 => ICON_HIGH,
            _ => return None,
        };
        Some(Self {
            percent,
            icon,
            body: format!("{}%", percent),
        })
    }
}

/// Fire-and-forget delivery. Implementations must not block the caller; the
/// id the desktop assigns comes back later as `MixerEvent::NotificationShown`.
pub trait Notifier {
    /// Queues `notification`, replacing the one with id `replaces` if given.
    fn send(&mut self, notification: &VolumeNotification, replaces: Option<u32>) -> Result<(), MixerError>;
}

/// Delivers notifications over the freedesktop notification service. The
/// D-Bus round trip runs on tokio's blocking pool.
#[derive(Clone, Debug)]
pub struct DesktopNotifier {
    app_name: String,
    summary: String,
    expire_ms: u32,
    events: mpsc::UnboundedSender<MixerEvent>,
}

impl DesktopNotifier {
    pub fn new(config: &NotificationsConfig, events: mpsc::UnboundedSender<MixerEvent>) -> Self {
        Self {
            app_name: config.app_name.clone(),
            summary: config.summary.clone(),
            expire_ms: config.expire_ms,
            events,
        }
    }

    fn build(&self, notification: &VolumeNotification, replaces: Option<u32>) -> Notification {
        let mut builder = Notification::new();
        builder
            .appname(&self.app_name)
            .summary(&self.summary)
            .body(&notification.body)
            .icon(notification.icon)
            .timeout(Timeout::Milliseconds(self.expire_ms));
        if let Some(id) = replaces {
            builder.id(id);
        }
        builder
    }
}

impl Notifier for DesktopNotifier {
    fn send(&mut self, notification: &VolumeNotification, replaces: Option<u32>) -> Result<(), MixerError> {
        let runtime = Handle::try_current().map_err(|e| MixerError::Notification(e.to_string()))?;
        let builder = self.build(notification, replaces);
        let events = self.events.clone();

        runtime.spawn_blocking(move || match builder.show() {
            Ok(handle) => {
                if events.send(MixerEvent::NotificationShown(handle.id())).is_err() {
                    tracing::debug!("Notification shown after the mixer loop stopped");
                }
            }
            Err(e) => tracing::warn!("Failed to send volume notification: {}", e),
        });
        Ok(())
    }
}

/// Notifier for when notifications are switched off.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn send(&mut self, notification: &VolumeNotification, _replaces: Option<u32>) -> Result<(), MixerError> {
        tracing::debug!("Notification suppressed: {}", notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_thresholds() {
        let icon = |p| VolumeNotification::for_volume(p).map(|n| n.icon);
        assert_eq!(icon(0), Some(ICON_MUTED));
        assert_eq!(icon(1), Some(ICON_LOW));
        assert_eq!(icon(32), Some(ICON_LOW));
        assert_eq!(icon(33), Some(ICON_MEDIUM));
        assert_eq!(icon(66), Some(ICON_MEDIUM));
        assert_eq!(icon(67), Some(ICON_HIGH));
        assert_eq!(icon(100), Some(ICON_HIGH));
    }

    #[test]
    fn test_out_of_range_is_suppressed() {
        assert!(VolumeNotification::for_volume(101).is_none());
        assert!(VolumeNotification::for_volume(150).is_none());
    }

    #[test]
    fn test_body_is_percentage() {
        let n = VolumeNotification::for_volume(80).unwrap();
        assert_eq!(n.body, "80%");
    }

    #[test]
    fn test_silent_notifier_reports_nothing() {
        let mut notifier = SilentNotifier;
        let n = VolumeNotification::for_volume(10).unwrap();
        assert!(notifier.send(&n, Some(7)).is_ok());
    }

    #[test]
    fn test_desktop_notifier_needs_a_runtime() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut notifier = DesktopNotifier::new(&NotificationsConfig::default(), tx);
        let n = VolumeNotification::for_volume(40).unwrap();

        assert!(matches!(notifier.send(&n, None), Err(MixerError::Notification(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_desktop_notification_fields() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let notifier = DesktopNotifier::new(&NotificationsConfig::default(), tx);
        let n = VolumeNotification::for_volume(40).unwrap();

        let built = notifier.build(&n, Some(12));
        assert_eq!(built.summary, "Volume Changed");
        assert_eq!(built.body, "40%");
        assert_eq!(built.icon, ICON_MEDIUM);
    }
}
