use crate::color::InkColor;
use crate::error::SignatureError;
use image::Rgba;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const MIN_FONT_SIZE: f32 = 30.0;
pub const MAX_FONT_SIZE: f32 = 150.0;
pub const DEFAULT_FONT_SIZE: f32 = 80.0;
/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_DIM: u32 = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    White,
    Transparent,
    Solid(InkColor),
}

impl Background {
    pub fn fill(&self) -> Rgba<u8> {
        match self {
            Background::White => Rgba([255, 255, 255, 255]),
            Background::Transparent => Rgba([255, 255, 255, 0]),
            Background::Solid(color) => color.to_rgba(),
        }
    }
}

impl FromStr for Background {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "white" => Ok(Background::White),
            "transparent" | "none" => Ok(Background::Transparent),
            other => other
                .parse::<InkColor>()
                .map(Background::Solid)
                .map_err(|_| SignatureError::InvalidBackground(s.to_string())),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Background::White => write!(f, "white"),
            Background::Transparent => write!(f, "transparent"),
            Background::Solid(color) => write!(f, "{}", color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    pub bold: bool,
    pub shadow: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        CanvasSize { width, height }
    }

    /// Both sides must lie in `1..=MAX_CANVAS_DIM`.
    pub fn validate(self) -> Result<Self, SignatureError> {
        let side = 1..=MAX_CANVAS_DIM;
        if !side.contains(&self.width) || !side.contains(&self.height) {
            return Err(SignatureError::InvalidCanvas {
                width: self.width,
                height: self.height,
                max: MAX_CANVAS_DIM,
            });
        }
        Ok(self)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize::new(900, 300)
    }
}

/// Everything the renderer needs for one signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRequest {
    pub name: String,
    pub font_path: PathBuf,
    pub size: f32,
    pub ink: InkColor,
    pub background: Background,
    pub effects: Effects,
    pub canvas: CanvasSize,
}

impl SignatureRequest {
    pub fn new(name: impl Into<String>, font_path: impl Into<PathBuf>) -> Self {
        SignatureRequest {
            name: name.into(),
            font_path: font_path.into(),
            size: DEFAULT_FONT_SIZE,
            ink: InkColor::default(),
            background: Background::default(),
            effects: Effects::default(),
            canvas: CanvasSize::default(),
        }
    }
}

pub fn check_font_size(size: f32) -> Result<f32, SignatureError> {
    if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(SignatureError::SizeOutOfRange {
            size,
            min: MIN_FONT_SIZE,
            max: MAX_FONT_SIZE,
        })
    }
}
