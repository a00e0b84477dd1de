//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;

use zones::consts::DEFAULT_ZONES_FILE;

pub const DEFAULT_BACKGROUND: &str = "res/bg.jpg";
pub const DEFAULT_WINDOW_WIDTH: usize = 1280;
pub const DEFAULT_WINDOW_HEIGHT: usize = 720;
pub const DEFAULT_TARGET_FPS: usize = 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub background: PathBuf,
    pub zones_file: PathBuf,
    pub window_width: usize,
    pub window_height: usize,
    pub target_fps: usize,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `ZONEPICK_BACKGROUND`: background image, default `res/bg.jpg`
    /// - `ZONEPICK_ZONES_FILE`: zones document, default `level1_zones.json`
    /// - `ZONEPICK_WINDOW_WIDTH` / `ZONEPICK_WINDOW_HEIGHT`: default 1280x720
    /// - `ZONEPICK_TARGET_FPS`: default 60
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Numbers that fail to parse fall back to their default; zero is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let background = lookup("ZONEPICK_BACKGROUND").unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
        let zones_file = lookup("ZONEPICK_ZONES_FILE").unwrap_or_else(|| DEFAULT_ZONES_FILE.to_string());

        Ok(Self {
            background: PathBuf::from(background),
            zones_file: PathBuf::from(zones_file),
            window_width: positive(&lookup, "ZONEPICK_WINDOW_WIDTH", DEFAULT_WINDOW_WIDTH)?,
            window_height: positive(&lookup, "ZONEPICK_WINDOW_HEIGHT", DEFAULT_WINDOW_HEIGHT)?,
            target_fps: positive(&lookup, "ZONEPICK_TARGET_FPS", DEFAULT_TARGET_FPS)?,
        })
    }
}

fn positive<F>(lookup: &F, var: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default);
    if value == 0 { Err(ConfigError::Zero { var }) } else { Ok(value) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
