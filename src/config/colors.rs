//! Color configuration for the TUI, including the tag palette.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Tag palette, cycled by tag position.
pub const DEFAULT_TAG_COLORS: [Color; 8] = [
    Color::Rgb(0xB2, 0x22, 0x22),
    Color::Rgb(0x4B, 0x00, 0x82),
    Color::Rgb(0x00, 0x64, 0x00),
    Color::Rgb(0x8B, 0x45, 0x13),
    Color::Rgb(0x46, 0x82, 0xB4),
    Color::Rgb(0x80, 0x00, 0x80),
    Color::Rgb(0xFF, 0x8C, 0x00),
    Color::Rgb(0x2F, 0x4F, 0x4F),
];

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub active_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub inactive_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_author: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_date: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata_link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
    /// Tint of the globe marker shown for articles without an image.
    #[serde(deserialize_with = "deserialize_color")]
    pub icon_globe: Color,
    #[serde(deserialize_with = "deserialize_palette")]
    pub tags: Vec<Color>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            metadata_author: Color::Yellow,
            metadata_date: Color::Yellow,
            metadata_link: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
            icon_globe: Color::Rgb(0x1E, 0x90, 0xFF),
            tags: DEFAULT_TAG_COLORS.to_vec(),
        }
    }
}

impl ColorConfig {
    /// Color for the tag at `index`, wrapping around the palette.
    pub fn tag_color(&self, index: usize) -> Color {
        if self.tags.is_empty() {
            return DEFAULT_TAG_COLORS[index % DEFAULT_TAG_COLORS.len()];
        }
        self.tags[index % self.tags.len()]
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Deserialize a list of color strings.
fn deserialize_palette<'de, D>(deserializer: D) -> Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|s| parse_color_string(s).map_err(de::Error::custom))
        .collect()
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

/// Parse `#RRGGBB` or the `#RGB` shorthand.
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let expanded: String = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return Err(format!("Invalid hex color format: {}", s)),
    };

    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid hex color: {}", s));
    }

    let rgb = u32::from_str_radix(&expanded, 16).map_err(|_| format!("Invalid hex color: {}", s))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}
