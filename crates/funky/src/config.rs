use crate::sys::launch::ExecCommand;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use radial::geometry::{DEFAULT_INNER_RADIUS, DEFAULT_OUTER_RADIUS, GeometryError, Radii};
use radial::mediator::MenuSettings;
use radial::menu::EscapeMode;
use radial::option::{Description, IconHandle, OptionName};
use radial::resources::FontFamily;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptionConfig {
    pub name: OptionName,
    pub description: Option<Description>,
    pub icon: Option<IconHandle>,
    pub exec: Option<ExecCommand>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub escape: EscapeMode,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            escape: EscapeMode::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Matched against installed font families by substring.
    pub font: Option<FontFamily>,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

impl Config {
    /// The overlay has no camera axes to suppress, so `look_axes` stays at the core default.
    pub fn menu_settings(&self) -> Result<MenuSettings, ConfigError> {
        Ok(MenuSettings {
            radii: Radii::new(self.menu.inner_radius, self.menu.outer_radius)?,
            escape: self.menu.escape,
            ..MenuSettings::default()
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid menu geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "funkyui", "funky").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("FUNKY").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

fn default_config() -> Config {
    parse_config(DEFAULT_CONFIG).unwrap_or_default()
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;
    Ok(s.try_deserialize()?)
}

/// Loads the user config, writing the bundled default on first run.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        if let Err(e) = write_default_config() {
            log::warn!("Failed to write default config: {}", e);
        }
        return default_config();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        let settings = config.menu_settings().unwrap();
        assert_eq!(settings.radii, Radii::default());
        assert_eq!(settings.escape, EscapeMode::Cancel);
        assert_eq!(settings.look_axes, MenuSettings::default().look_axes);
        assert_eq!(config.options.len(), 3);
        assert_eq!(config.options[1].name.as_str(), "Inspect");
    }

    #[test]
    fn test_partial_menu_section_keeps_defaults() {
        let config = parse_config(
            r#"
            [menu]
            outer_radius = 400.0
            escape = "Dismiss"
            "#,
        )
        .unwrap();
        let settings = config.menu_settings().unwrap();
        assert_eq!(settings.radii.inner(), DEFAULT_INNER_RADIUS);
        assert_eq!(settings.radii.outer(), 400.0);
        assert_eq!(settings.escape, EscapeMode::Dismiss);
        assert!(config.options.is_empty());
        assert!(config.font.is_none());
    }

    #[test]
    fn test_look_axes_key_is_not_a_setting() {
        let config = parse_config(
            r#"
            [menu]
            look_axes = [0, 1]
            "#,
        )
        .unwrap();
        let settings = config.menu_settings().unwrap();
        assert_eq!(settings.look_axes, MenuSettings::default().look_axes);
    }

    #[test]
    fn test_inverted_radii_rejected() {
        let config = parse_config(
            r#"
            [menu]
            inner_radius = 300.0
            outer_radius = 100.0
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.menu_settings(),
            Err(ConfigError::Geometry(GeometryError::InvertedRadii { .. }))
        ));
    }

    #[test]
    fn test_option_deserialization() {
        let json = r#"{ "name": "Drop", "exec": "notify-send drop" }"#;
        let option: OptionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(option.name.as_str(), "Drop");
        assert!(option.description.is_none());
        assert_eq!(option.exec.unwrap().as_str(), "notify-send drop");
    }
}
