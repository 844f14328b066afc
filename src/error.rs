use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Please enter a name.")]
    NameRequired,
    #[error("Unknown font: '{0}'. Run `signgen fonts` to list the available fonts.")]
    UnknownFont(String),
    #[error("Invalid font file type: {0}. Please use a .ttf or .otf font file.")]
    InvalidFontFile(PathBuf),
    #[error("Font size {size} is outside the supported range {min}-{max}")]
    SizeOutOfRange { size: f32, min: f32, max: f32 },
    #[error("Invalid color: '{0}'. Expected a name or a hex value like #1e40af")]
    InvalidColor(String),
    #[error("Invalid background: '{0}'. Expected white, transparent or a color")]
    InvalidBackground(String),
    #[error("Canvas sides must be between 1 and {max} pixels, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32, max: u32 },
    #[error("Bundled fallback font could not be parsed")]
    BundledFont,
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
