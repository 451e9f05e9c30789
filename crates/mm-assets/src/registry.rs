use std::path::Path;

use mm_core::vision::{ViewDepth, VisibilityCode};
use thiserror::Error;

use crate::mapping::{WallSetEntry, WallSetMapping};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid wall-set pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("No wall-set covers visibility code {0}")]
    NotCovered(String),
}

/// A registry that maps visibility codes to wall-set entries.
///
/// Every code of the registry's depth is resolved once up front, so a lookup
/// during rendering is a single table index.
pub struct WallSetRegistry {
    mapping: WallSetMapping,
    depth: ViewDepth,
    /// Entry index per packed code, `2^len` slots
    table: Vec<Option<usize>>,
}

impl WallSetRegistry {
    /// Create a registry from an existing mapping.
    ///
    /// Patterns are checked here; coverage is not, see `validate_coverage`.
    pub fn new(mapping: WallSetMapping, depth: ViewDepth) -> Result<Self, RegistryError> {
        for entry in &mapping.wallsets {
            check_pattern(entry, depth)?;
        }

        let table = (0..1u32 << depth.len())
            .map(|bits| {
                let code = VisibilityCode::from_bits(bits as u16, depth);
                mapping.best_match(code).map(|(index, _)| index)
            })
            .collect();

        Ok(Self {
            mapping,
            depth,
            table,
        })
    }

    /// Load the registry from a JSON file and validate coverage.
    pub fn load_from_file<P: AsRef<Path>>(path: P, depth: ViewDepth) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        let mapping: WallSetMapping = serde_json::from_str(&content)?;
        let registry = Self::new(mapping, depth)?;
        registry.validate_coverage()?;
        Ok(registry)
    }

    /// The mapping compiled into the game
    pub fn builtin(depth: ViewDepth) -> Result<Self, RegistryError> {
        let registry = Self::new(WallSetMapping::builtin()?, depth)?;
        registry.validate_coverage()?;
        Ok(registry)
    }

    /// Validate that every code of this depth has an entry.
    pub fn validate_coverage(&self) -> Result<(), RegistryError> {
        match self.table.iter().position(Option::is_none) {
            Some(bits) => {
                let code = VisibilityCode::from_bits(bits as u16, self.depth);
                Err(RegistryError::NotCovered(code.to_string()))
            }
            None => Ok(()),
        }
    }

    pub fn depth(&self) -> ViewDepth {
        self.depth
    }

    pub fn mapping(&self) -> &WallSetMapping {
        &self.mapping
    }

    /// Find the best matching entry for a code.
    ///
    /// Codes of another depth are matched against the mapping directly.
    pub fn lookup(&self, code: VisibilityCode) -> Option<&WallSetEntry> {
        if code.depth() != self.depth {
            return self.mapping.best_match(code).map(|(_, entry)| entry);
        }
        let index = (*self.table.get(code.bits() as usize)?)?;
        self.mapping.wallsets.get(index)
    }

    pub fn asset(&self, code: VisibilityCode) -> Option<u16> {
        self.lookup(code).map(|entry| entry.asset)
    }

    /// Color of the wall-set for a code, if it names one ratatui knows
    pub fn color(&self, code: VisibilityCode) -> Option<ratatui::style::Color> {
        self.lookup(code)
            .and_then(|entry| entry.color.as_deref())
            .and_then(Self::parse_color)
    }

    /// Helper to convert a color string to a ratatui color.
    pub fn parse_color(color_name: &str) -> Option<ratatui::style::Color> {
        use ratatui::style::Color;
        match color_name.to_lowercase().as_str() {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "gray" => Some(Color::Gray),
            "darkgray" | "dark_gray" => Some(Color::DarkGray),
            "lightred" | "light_red" => Some(Color::LightRed),
            "lightgreen" | "light_green" => Some(Color::LightGreen),
            "lightyellow" | "light_yellow" => Some(Color::LightYellow),
            "lightblue" | "light_blue" => Some(Color::LightBlue),
            "lightmagenta" | "light_magenta" => Some(Color::LightMagenta),
            "lightcyan" | "light_cyan" => Some(Color::LightCyan),
            "white" => Some(Color::White),
            hex => parse_hex(hex),
        }
    }
}

fn check_pattern(entry: &WallSetEntry, depth: ViewDepth) -> Result<(), RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidPattern {
        pattern: entry.pattern.clone(),
        reason,
    };
    if let Some(c) = entry.invalid_char() {
        return Err(invalid(format!("unexpected character '{c}'")));
    }
    if entry.pattern.len() > depth.len() {
        return Err(invalid(format!(
            "longer than the {} slots of a {depth} view",
            depth.len()
        )));
    }
    Ok(())
}

/// `#rrggbb`
fn parse_hex(s: &str) -> Option<ratatui::style::Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(ratatui::style::Color::Rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}
