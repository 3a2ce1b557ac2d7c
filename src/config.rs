//! netspeed configuration persistence (htoprc-style key=value format)
//!
//! Loaded from `%APPDATA%/netspeed/netspeedrc` on Windows and
//! `$XDG_CONFIG_HOME/netspeed/netspeedrc` (or `~/.config/...`) elsewhere.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config path")]
    NoConfigPath,
    #[error("failed to create config dir {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write config file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Default config file location for this platform
pub fn default_config_path() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
    };
    base.map(|dir| dir.join("netspeed").join("netspeedrc"))
}

/// Persistable settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetspeedConfig {
    // Key bindings
    pub bit_rate_key: char,
    pub byte_rate_key: char,
    pub quit_key: char,

    // Sinks
    pub osc52_clipboard: bool,
    pub log_capacity: usize,
    pub timestamps: bool,
}

impl Default for NetspeedConfig {
    fn default() -> Self {
        Self {
            bit_rate_key: 'n',
            byte_rate_key: 'b',
            quit_key: 'q',
            osc52_clipboard: true,
            log_capacity: 200,
            timestamps: true,
        }
    }
}

impl NetspeedConfig {
    /// Load config from file, returning defaults if it doesn't exist
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(p) => p,
            None => return Self::default(),
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("loaded config from {}", path.display());
                Self::parse(&content)
            }
            Err(e) => {
                debug!("no config at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse `key=value` lines on top of the defaults
    pub fn parse(content: &str) -> Self {
        let mut cfg = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "bit_rate_key" => set_key(&mut cfg.bit_rate_key, value),
                "byte_rate_key" => set_key(&mut cfg.byte_rate_key, value),
                "quit_key" => set_key(&mut cfg.quit_key, value),
                "osc52_clipboard" => cfg.osc52_clipboard = value == "1",
                "timestamps" => cfg.timestamps = value == "1",
                "log_capacity" => {
                    if let Ok(v) = value.parse::<usize>() {
                        cfg.log_capacity = v.clamp(10, 5000);
                    }
                }
                _ => {} // Ignore unknown keys
            }
        }

        // Every action needs its own key
        let defaults = Self::default();
        if cfg.byte_rate_key == cfg.bit_rate_key {
            warn!("bit_rate_key and byte_rate_key are both '{}', restoring defaults", cfg.bit_rate_key);
            cfg.bit_rate_key = defaults.bit_rate_key;
            cfg.byte_rate_key = defaults.byte_rate_key;
        }
        if cfg.quit_key == cfg.bit_rate_key || cfg.quit_key == cfg.byte_rate_key {
            warn!("quit_key '{}' collides with an announce key, restoring default", cfg.quit_key);
            cfg.quit_key = defaults.quit_key;
        }

        cfg
    }

    /// Serialize to the on-disk format
    pub fn render(&self) -> String {
        let b = |v: bool| if v { "1" } else { "0" };

        let lines = [
            "# netspeed configuration file".to_string(),
            String::new(),
            format!("bit_rate_key={}", self.bit_rate_key),
            format!("byte_rate_key={}", self.byte_rate_key),
            format!("quit_key={}", self.quit_key),
            format!("osc52_clipboard={}", b(self.osc52_clipboard)),
            format!("log_capacity={}", self.log_capacity),
            format!("timestamps={}", b(self.timestamps)),
        ];
        lines.join("\n") + "\n"
    }

    /// Save config to `path`, or the default location
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let write = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        let mut file = fs::File::create(&path).map_err(write)?;
        file.write_all(self.render().as_bytes()).map_err(write)?;

        Ok(path)
    }
}

/// Accept a single printable, non-space character
fn set_key(slot: &mut char, value: &str) {
    let mut chars = value.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if !c.is_whitespace() && !c.is_control() {
            *slot = c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(NetspeedConfig::parse(""), NetspeedConfig::default());
    }

    #[test]
    fn parses_known_keys_and_ignores_the_rest() {
        let cfg = NetspeedConfig::parse(
            "# comment\n\
             bit_rate_key = s\n\
             byte_rate_key=S\n\
             quit_key=x\n\
             osc52_clipboard=0\n\
             timestamps=0\n\
             log_capacity=50\n\
             colour=blue\n\
             not a pair\n",
        );

        assert_eq!(cfg.bit_rate_key, 's');
        assert_eq!(cfg.byte_rate_key, 'S');
        assert_eq!(cfg.quit_key, 'x');
        assert!(!cfg.osc52_clipboard);
        assert!(!cfg.timestamps);
        assert_eq!(cfg.log_capacity, 50);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let cfg = NetspeedConfig::parse("bit_rate_key=nn\nbyte_rate_key= \nlog_capacity=lots\n");
        assert_eq!(cfg, NetspeedConfig::default());
    }

    #[test]
    fn log_capacity_is_clamped() {
        assert_eq!(NetspeedConfig::parse("log_capacity=1").log_capacity, 10);
        assert_eq!(NetspeedConfig::parse("log_capacity=99999").log_capacity, 5000);
    }

    #[test]
    fn colliding_keys_fall_back_to_defaults() {
        let cfg = NetspeedConfig::parse("bit_rate_key=x\nbyte_rate_key=x\n");
        assert_eq!((cfg.bit_rate_key, cfg.byte_rate_key), ('n', 'b'));

        let cfg = NetspeedConfig::parse("quit_key=n\n");
        assert_eq!(cfg.quit_key, 'q');
    }

    #[test]
    fn rendered_config_parses_back() {
        let cfg = NetspeedConfig {
            bit_rate_key: 'k',
            byte_rate_key: 'K',
            quit_key: 'z',
            osc52_clipboard: false,
            log_capacity: 42,
            timestamps: false,
        };
        assert_eq!(NetspeedConfig::parse(&cfg.render()), cfg);
    }

    #[test]
    fn save_then_load_from_explicit_path() {
        let dir = std::env::temp_dir().join(format!("netspeed-config-test-{}", std::process::id()));
        let path = dir.join("netspeedrc");
        let cfg = NetspeedConfig {
            log_capacity: 77,
            ..NetspeedConfig::default()
        };

        let written = cfg.save(Some(&path)).unwrap();
        let loaded = NetspeedConfig::load(Some(&written));
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(written, path);
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("netspeed-definitely-missing").join("netspeedrc");
        assert_eq!(NetspeedConfig::load(Some(&path)), NetspeedConfig::default());
    }
}
