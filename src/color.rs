use crate::error::SignatureError;
use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// Presets offered next to the custom color input.
pub const PRESET_COLORS: [&str; 16] = [
    "#000000", "#333333", "#666666", "#999999", "#1e40af", "#3b82f6", "#06b6d4", "#10b981",
    "#f59e0b", "#ef4444", "#ec4899", "#8b5cf6", "#6366f1", "#84cc16", "#f97316", "#dc2626",
];

/// An opaque RGB color used for the signature text and underline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl InkColor {
    pub const BLACK: InkColor = InkColor::rgb(0, 0, 0);
    pub const WHITE: InkColor = InkColor::rgb(255, 255, 255);
    pub const GRAY: InkColor = InkColor::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        InkColor { r, g, b }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Label shown next to the color picker, e.g. "Black" or "#1e40af".
    pub fn label(&self) -> String {
        if *self == InkColor::BLACK {
            "Black".to_string()
        } else {
            self.to_string()
        }
    }

    pub fn presets() -> Vec<InkColor> {
        PRESET_COLORS
            .iter()
            .filter_map(|hex| parse_hex(hex))
            .collect()
    }
}

impl Default for InkColor {
    fn default() -> Self {
        InkColor::BLACK
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for InkColor {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let named = match trimmed.to_lowercase().as_str() {
            "black" => Some(InkColor::BLACK),
            "white" => Some(InkColor::WHITE),
            "gray" | "grey" => Some(InkColor::GRAY),
            "red" => Some(InkColor::rgb(255, 0, 0)),
            "green" => Some(InkColor::rgb(0, 128, 0)),
            "blue" => Some(InkColor::rgb(0, 0, 255)),
            _ => None,
        };
        named
            .or_else(|| parse_hex(trimmed))
            .ok_or_else(|| SignatureError::InvalidColor(s.to_string()))
    }
}

fn parse_hex(s: &str) -> Option<InkColor> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some(InkColor::rgb(channel(0)?, channel(2)?, channel(4)?))
        }
        // #rgb shorthand: each digit is doubled
        3 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
            Some(InkColor::rgb(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#1e40af".parse::<InkColor>().unwrap(), InkColor::rgb(0x1e, 0x40, 0xaf));
        assert_eq!("1E40AF".parse::<InkColor>().unwrap(), InkColor::rgb(0x1e, 0x40, 0xaf));
        assert_eq!("#f00".parse::<InkColor>().unwrap(), InkColor::rgb(255, 0, 0));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Black".parse::<InkColor>().unwrap(), InkColor::BLACK);
        assert_eq!(" grey ".parse::<InkColor>().unwrap(), InkColor::GRAY);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12345", "#gggggg", "purple-ish", "#1234567"] {
            assert!(
                matches!(bad.parse::<InkColor>(), Err(SignatureError::InvalidColor(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn display_and_label() {
        assert_eq!(InkColor::rgb(0x1e, 0x40, 0xaf).to_string(), "#1e40af");
        assert_eq!(InkColor::BLACK.label(), "Black");
        assert_eq!(InkColor::rgb(255, 0, 0).label(), "#ff0000");
    }

    #[test]
    fn all_presets_parse() {
        assert_eq!(InkColor::presets().len(), PRESET_COLORS.len());
    }
}
