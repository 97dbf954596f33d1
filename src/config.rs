use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::display::TimeDisplayMode;
use crate::notify::NotifierKind;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_APP_NAME: &str = "RegattaStart";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RaceSettings {
    pub tick_interval_ms: u64,
    pub notifier: NotifierKind,
    pub show_countdown: bool,
    pub time_display: TimeDisplayMode,
    pub app_name: String,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            notifier: NotifierKind::Auto,
            show_countdown: true,
            time_display: TimeDisplayMode::Hour12,
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

pub fn load_settings(path: &Path) -> Result<RaceSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read settings file {}", path.display()))?;
    parse_settings_text(&content)
}

pub fn parse_settings_text(content: &str) -> Result<RaceSettings> {
    let raw = serde_json::from_str::<SettingsFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported settings version {}; expected version 1",
            raw.version
        );
    }

    let settings = raw.settings;
    let app_name = settings.app_name.trim();
    if app_name.is_empty() {
        bail!("app_name must not be empty");
    }

    Ok(RaceSettings {
        tick_interval_ms: settings.tick_interval_ms,
        notifier: settings.notifier,
        show_countdown: settings.show_countdown,
        time_display: settings.time_display,
        app_name: app_name.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    version: u32,
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,
    #[serde(default)]
    notifier: NotifierKind,
    #[serde(default = "default_show_countdown")]
    show_countdown: bool,
    #[serde(default)]
    time_display: TimeDisplayMode,
    #[serde(default = "default_app_name")]
    app_name: String,
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            notifier: NotifierKind::default(),
            show_countdown: default_show_countdown(),
            time_display: TimeDisplayMode::default(),
            app_name: default_app_name(),
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_show_countdown() -> bool {
    true
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}
