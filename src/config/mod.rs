pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::components::TetrominoKind;
use ratatui::style::Color;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub palette: PaletteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Flat bonus credited to the current player for every locked piece,
    /// independent of line-clear points.
    pub lock_bonus: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { lock_bonus: 100 }
    }
}

/// Piece colors as `#RRGGBB` strings, one per kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaletteConfig {
    pub i: String,
    pub j: String,
    pub l: String,
    pub o: String,
    pub s: String,
    pub t: String,
    pub z: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            i: "#00FFFF".to_string(),
            j: "#0088FF".to_string(),
            l: "#00CFFF".to_string(),
            o: "#19FFEA".to_string(),
            s: "#38FFD1".to_string(),
            t: "#A084FF".to_string(),
            z: "#9400D3".to_string(),
        }
    }
}

impl Config {
    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        if let Ok(new_config) = loader::load_config_from_file() {
            if let Ok(mut config) = CONFIG.write() {
                *config = new_config;
                return true;
            }
        }
        false
    }
}

/// The per-lock placement bonus from the active configuration.
#[must_use]
pub fn lock_bonus() -> u32 {
    CONFIG
        .read()
        .map(|c| c.scoring.lock_bonus)
        .unwrap_or_else(|_| ScoringConfig::default().lock_bonus)
}

/// Render color for a piece kind from the active palette.
#[must_use]
pub fn piece_color(kind: TetrominoKind) -> Color {
    let palette = CONFIG
        .read()
        .map(|c| c.palette.clone())
        .unwrap_or_default();
    let hex = match kind {
        TetrominoKind::I => palette.i,
        TetrominoKind::J => palette.j,
        TetrominoKind::L => palette.l,
        TetrominoKind::O => palette.o,
        TetrominoKind::S => palette.s,
        TetrominoKind::T => palette.t,
        TetrominoKind::Z => palette.z,
    };
    parse_hex_color(&hex).unwrap_or(Color::Cyan)
}

/// Parse `#RRGGBB` into an RGB color. Malformed values yield `None` and the
/// caller falls back rather than failing.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
