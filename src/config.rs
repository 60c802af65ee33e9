//! Interpreter configuration, persisted under the user's config directory.
//!
//! The file lives at `{config_dir}/rlox/config.json` and currently covers the
//! REPL only. A missing or unreadable file falls back to the defaults, so the
//! interpreter never refuses to start over configuration.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt shown by the interactive session.
    pub prompt: String,
    /// Echo the parsed tree before executing each REPL line.
    pub show_ast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "|> ".to_owned(),
            show_ast: false,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let Some(path) = config_file() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    debug!("ignoring malformed config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Writes the configuration back, creating the directory if necessary.
    pub fn save(&self) -> io::Result<()> {
        let Some(path) = config_file() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no config directory on this system",
            ));
        };

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(path, contents)
    }
}

fn config_file() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("rlox");
    path.push("config.json");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prompt, "|> ");
        assert!(!config.show_ast);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config {
            prompt: "lox> ".to_owned(),
            show_ast: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
