use mm_core::vision::VisibilityCode;
use serde::{Deserialize, Serialize};

/// Mapping shipped with the game
pub const BUILTIN_MAPPING: &str = include_str!("../../../assets/wallsets.json");

/// Links a visibility pattern to a wall-set asset.
///
/// Pattern characters line up with code slots: `1` wall, `0` open, `?` either.
/// A pattern shorter than the code leaves the remaining slots unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WallSetEntry {
    pub pattern: String,
    /// Asset index handed to the renderer
    pub asset: u16,
    /// Human-readable name shown in the status line
    pub label: String,
    /// Color name for the TUI (e.g. "yellow", "light_blue")
    #[serde(default)]
    pub color: Option<String>,
}

/// The root structure for the wall-set configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WallSetMapping {
    pub wallsets: Vec<WallSetEntry>,
}

impl WallSetEntry {
    pub fn new(pattern: &str, asset: u16, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            asset,
            label: label.to_string(),
            color: None,
        }
    }

    /// Number of fixed slots; more specific patterns win over broad ones.
    pub fn specificity(&self) -> u32 {
        self.pattern.chars().filter(|&c| c != '?').count() as u32
    }

    /// First character that is not `0`, `1` or `?`
    pub fn invalid_char(&self) -> Option<char> {
        self.pattern.chars().find(|c| !matches!(c, '0' | '1' | '?'))
    }

    pub fn matches(&self, code: VisibilityCode) -> bool {
        self.pattern.len() <= code.len()
            && self.pattern.chars().enumerate().all(|(i, c)| match c {
                '1' => code.is_wall_at(i),
                '0' => !code.is_wall_at(i),
                _ => true,
            })
    }
}

impl WallSetMapping {
    pub fn builtin() -> Result<Self, serde_json::Error> {
        serde_json::from_str(BUILTIN_MAPPING)
    }

    /// Entry with the highest specificity matching `code`; the earliest wins ties
    pub fn best_match(&self, code: VisibilityCode) -> Option<(usize, &WallSetEntry)> {
        let mut best: Option<(usize, &WallSetEntry)> = None;

        for (index, entry) in self.wallsets.iter().enumerate() {
            if !entry.matches(code) {
                continue;
            }
            if best.is_none_or(|(_, b)| entry.specificity() > b.specificity()) {
                best = Some((index, entry));
            }
        }

        best
    }
}
