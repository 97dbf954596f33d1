use std::io::{self, Write};

use anyhow::{Result, anyhow};
use notify_rust::Notification;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierKind {
    #[default]
    Auto,
    Desktop,
    Console,
    Silent,
}

/// Fire-and-forget sink for milestone alerts. Delivery failures are never
/// reported back to the countdown.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, subtitle: &str);
    fn label(&self) -> &'static str;
}

pub struct SelectedNotifier {
    pub notifier: Box<dyn Notifier>,
    pub label: &'static str,
    pub fallback_reason: Option<String>,
}

pub fn select_notifier(kind: NotifierKind, app_name: &str) -> Result<SelectedNotifier> {
    let selected = match kind {
        NotifierKind::Console => without_fallback(ConsoleNotifier),
        NotifierKind::Silent => without_fallback(SilentNotifier),
        NotifierKind::Desktop => {
            let desktop = DesktopNotifier::try_new(app_name)
                .map_err(|err| anyhow!("desktop notifications unavailable: {err}"))?;
            without_fallback(desktop)
        }
        NotifierKind::Auto => match DesktopNotifier::try_new(app_name) {
            Ok(desktop) => without_fallback(desktop),
            Err(err) => SelectedNotifier {
                notifier: Box::new(ConsoleNotifier),
                label: ConsoleNotifier.label(),
                fallback_reason: Some(format!(
                    "Desktop notifications not available, printing alerts instead: {err}"
                )),
            },
        },
    };
    Ok(selected)
}

fn without_fallback<N: Notifier + 'static>(notifier: N) -> SelectedNotifier {
    SelectedNotifier {
        label: notifier.label(),
        notifier: Box::new(notifier),
        fallback_reason: None,
    }
}

pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// Checks once, at startup, that a notification service will accept
    /// alerts. Notifications may still be dropped silently later on.
    pub fn try_new(app_name: &str) -> Result<Self> {
        request_permission()?;
        info!(app_name, "desktop notifications available");
        Ok(Self {
            app_name: app_name.to_string(),
        })
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn request_permission() -> Result<()> {
    let server = notify_rust::get_server_information()
        .map_err(|err| anyhow!("no notification server on the session bus: {err}"))?;
    debug!(server = %server.name, vendor = %server.vendor, "notification server found");
    Ok(())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn request_permission() -> Result<()> {
    Ok(())
}

#[cfg(any(target_os = "macos", target_os = "windows"))]
const DEFAULT_SOUND_NAME: &str = "Default";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_SOUND_NAME: &str = "message-new-instant";

impl DesktopNotifier {
    fn build_notification(&self, title: &str, subtitle: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(subtitle)
            .sound_name(DEFAULT_SOUND_NAME);
        notification
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, subtitle: &str) {
        if let Err(err) = self.build_notification(title, subtitle).show() {
            warn!(title, "failed to deliver notification: {err}");
        }
    }

    fn label(&self) -> &'static str {
        "desktop"
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, subtitle: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{title}: {subtitle}") {
            warn!(title, "failed to print alert: {err}");
        }
    }

    fn label(&self) -> &'static str {
        "console"
    }
}

pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, title: &str, _subtitle: &str) {
        debug!(title, "alert suppressed");
    }

    fn label(&self) -> &'static str {
        "silent"
    }
}
