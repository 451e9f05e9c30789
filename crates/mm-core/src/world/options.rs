//! Game options and configuration
//!
//! Handles user preferences, key bindings and `mindmazerc` loading. The file
//! holds `OPTIONS=` lines (comma separated, `!name` negates a flag,
//! `name:value` sets a value) and `BIND=key:command` lines.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::errors::OptionsError;
use crate::vision::ViewDepth;
use crate::{
    BRAID_MAX_PERCENT, BRAID_MIN_PERCENT, DEFAULT_LEVELS, DEFAULT_MAZE_SIZE, DEFAULT_SIZE_STEP,
    MAX_MAZE_SIZE,
};

/// User-configurable game options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOptions {
    // Maze options
    /// Logical maze side on the first level
    pub maze_size: usize,
    /// Side added per completed level
    pub size_step: usize,
    /// Cap on the logical side
    pub max_maze_size: usize,
    /// Endpoints per level
    pub endpoints: usize,
    /// Braiding target range, percent of wall cells
    pub braid_min: usize,
    pub braid_max: usize,

    // Game options
    /// Levels to win the game, 0 for endless
    pub levels: u32,
    /// Question bank file; the built-in bank is used when unset
    pub questions: Option<String>,

    // Display options
    pub view: ViewDepth,
    pub minimap: bool,
    pub color: bool,

    // Custom keybindings
    pub keybindings: HashMap<String, String>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            maze_size: DEFAULT_MAZE_SIZE,
            size_step: DEFAULT_SIZE_STEP,
            max_maze_size: MAX_MAZE_SIZE,
            endpoints: 1,
            braid_min: BRAID_MIN_PERCENT,
            braid_max: BRAID_MAX_PERCENT,

            levels: DEFAULT_LEVELS,
            questions: None,

            view: ViewDepth::Long,
            minimap: true,
            color: true,

            keybindings: HashMap::new(),
        }
    }
}

impl GameOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// `$XDG_CONFIG_HOME/mindmaze/mindmazerc` or the platform equivalent
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mindmaze").join("mindmazerc"))
    }

    /// Parse options from a config string (mindmazerc format)
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            } else if let Some(bind) = line.strip_prefix("BIND=") {
                if let Some((key, cmd)) = bind.split_once(':') {
                    options
                        .keybindings
                        .insert(key.trim().to_string(), cmd.trim().to_string());
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }

        // Handle key=value options
        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), value.trim());
        }
        if let Some((key, value)) = opt.split_once('=') {
            return self.set_option(key.trim(), value.trim());
        }

        // Handle negation
        let (negated, name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };

        self.set_bool_option(name, !negated)
    }

    /// Set a boolean option
    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "minimap" => self.minimap = value,
            "color" => self.color = value,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }

        match name {
            "maze_size" | "size" => self.maze_size = parse_number(name, value)?,
            "size_step" => self.size_step = parse_number(name, value)?,
            "max_maze_size" => self.max_maze_size = parse_number(name, value)?,
            "endpoints" => self.endpoints = parse_number(name, value)?,
            "braid_min" => self.braid_min = parse_number(name, value)?,
            "braid_max" => self.braid_max = parse_number(name, value)?,
            "levels" => self.levels = parse_number(name, value)?,
            "questions" => self.questions = Some(value.to_string()),
            "view" => {
                self.view = value.to_lowercase().parse().map_err(|_| {
                    OptionsError::InvalidValue(name.to_string(), value.to_string())
                })?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Reject combinations the generator cannot honour
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.maze_size == 0 {
            return Err(invalid("maze_size", self.maze_size));
        }
        if self.max_maze_size < self.maze_size {
            return Err(invalid("max_maze_size", self.max_maze_size));
        }
        if self.endpoints == 0 {
            return Err(invalid("endpoints", self.endpoints));
        }
        if self.braid_max > 100 {
            return Err(invalid("braid_max", self.braid_max));
        }
        if self.braid_min > self.braid_max {
            return Err(invalid("braid_min", self.braid_min));
        }
        Ok(())
    }

    /// Logical maze side for a 1-based level number
    pub fn maze_size_for_level(&self, level: u32) -> usize {
        let grown = self.maze_size + self.size_step * level.saturating_sub(1) as usize;
        grown.min(self.max_maze_size).max(1)
    }

    /// Render the options back into mindmazerc form
    pub fn to_config_string(&self) -> String {
        let mut opts = vec![
            format!("maze_size:{}", self.maze_size),
            format!("size_step:{}", self.size_step),
            format!("max_maze_size:{}", self.max_maze_size),
            format!("endpoints:{}", self.endpoints),
            format!("braid_min:{}", self.braid_min),
            format!("braid_max:{}", self.braid_max),
            format!("levels:{}", self.levels),
            format!("view:{}", self.view),
            flag("minimap", self.minimap),
            flag("color", self.color),
        ];
        if let Some(questions) = &self.questions {
            opts.push(format!("questions:{questions}"));
        }

        let mut out = format!("OPTIONS={}\n", opts.join(","));
        let mut binds: Vec<_> = self.keybindings.iter().collect();
        binds.sort();
        for (key, cmd) in binds {
            out.push_str(&format!("BIND={key}:{cmd}\n"));
        }
        out
    }
}

fn parse_number<T: core::str::FromStr>(name: &str, value: &str) -> Result<T, OptionsError> {
    value
        .parse()
        .map_err(|_| OptionsError::InvalidValue(name.to_string(), value.to_string()))
}

fn invalid(name: &str, value: impl ToString) -> OptionsError {
    OptionsError::InvalidValue(name.to_string(), value.to_string())
}

fn flag(name: &str, on: bool) -> String {
    if on {
        name.to_string()
    } else {
        format!("!{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = GameOptions::default();
        assert_eq!(opts.maze_size, DEFAULT_MAZE_SIZE);
        assert_eq!(opts.view, ViewDepth::Long);
        assert!(opts.minimap);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_parse_bool_option() {
        let config = "OPTIONS=!minimap,color";
        let opts = GameOptions::parse_config(config).unwrap();
        assert!(!opts.minimap);
        assert!(opts.color);
    }

    #[test]
    fn test_parse_value_option() {
        let config = "# comment\nOPTIONS=maze_size:5,view:short,levels:0\nOPTIONS=questions:quiz.json";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.maze_size, 5);
        assert_eq!(opts.view, ViewDepth::Short);
        assert_eq!(opts.levels, 0);
        assert_eq!(opts.questions.as_deref(), Some("quiz.json"));
    }

    #[test]
    fn test_parse_keybinding() {
        let config = "BIND=k:forward";
        let opts = GameOptions::parse_config(config).unwrap();
        assert_eq!(opts.keybindings.get("k"), Some(&"forward".to_string()));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            GameOptions::parse_config("OPTIONS=sparkles"),
            Err(OptionsError::UnknownOption("sparkles".to_string()))
        );
        assert_eq!(
            GameOptions::parse_config("OPTIONS=maze_size:big"),
            Err(OptionsError::InvalidValue(
                "maze_size".to_string(),
                "big".to_string()
            ))
        );
        assert_eq!(
            GameOptions::parse_config("OPTIONS=view:"),
            Err(OptionsError::MissingValue("view".to_string()))
        );
        assert!(GameOptions::parse_config("OPTIONS=maze_size:0").is_err());
        assert!(GameOptions::parse_config("OPTIONS=braid_min:20,braid_max:10").is_err());
    }

    #[test]
    fn test_maze_size_progression() {
        let opts = GameOptions {
            maze_size: 4,
            size_step: 3,
            max_maze_size: 12,
            ..GameOptions::default()
        };
        assert_eq!(opts.maze_size_for_level(1), 4);
        assert_eq!(opts.maze_size_for_level(2), 7);
        assert_eq!(opts.maze_size_for_level(4), 12);
        assert_eq!(opts.maze_size_for_level(40), 12);
    }

    #[test]
    fn test_roundtrip() {
        let mut opts = GameOptions::default();
        opts.maze_size = 6;
        opts.minimap = false;
        opts.view = ViewDepth::Short;
        opts.keybindings.insert("k".to_string(), "forward".to_string());

        let config_str = opts.to_config_string();
        let parsed = GameOptions::parse_config(&config_str).unwrap();

        assert_eq!(parsed, opts);
    }
}
