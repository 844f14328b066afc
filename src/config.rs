use crate::color::InkColor;
use crate::error::SignatureError;
use crate::fonts::{FONTS_DIR, FontEntry, default_catalog};
use crate::request::Background;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE_NAME: &str = "signgen.toml";
pub const DEFAULT_OUTPUT: &str = "signature.png";

/// Optional settings from `signgen.toml`. Command-line flags win over these.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub fonts_dir: Option<PathBuf>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub ink_color: Option<String>,
    pub background: Option<String>,
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub output: Option<PathBuf>,
    pub preview_columns: Option<u32>,
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
}

impl AppConfig {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, SignatureError> {
        toml::from_str(content).map_err(|source| SignatureError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SignatureError> {
        let content = fs::read_to_string(path).map_err(|source| SignatureError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    /// Loads the config, using defaults when the file is absent. Any other
    /// problem is logged and also yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(SignatureError::ConfigRead { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                AppConfig::default()
            }
            Err(e) => {
                warn!("{}. Using program defaults/CLI args.", e);
                AppConfig::default()
            }
        }
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.fonts_dir.clone().unwrap_or_else(|| PathBuf::from(FONTS_DIR))
    }

    /// The configured ink color. A bad value is logged against `path` and
    /// replaced by the default, like a broken config file.
    pub fn ink_color(&self, path: &Path) -> InkColor {
        parse_or_default(path, "ink_color", self.ink_color.as_deref())
    }

    pub fn background(&self, path: &Path) -> Background {
        parse_or_default(path, "background", self.background.as_deref())
    }

    /// The configured catalog, or the built-in one when none is configured.
    pub fn catalog(&self) -> Vec<FontEntry> {
        if self.fonts.is_empty() {
            default_catalog()
        } else {
            self.fonts.clone()
        }
    }
}

fn parse_or_default<T>(path: &Path, key: &str, value: Option<&str>) -> T
where
    T: FromStr<Err = SignatureError> + Default,
{
    match value.map(str::parse::<T>) {
        None => T::default(),
        Some(Ok(parsed)) => parsed,
        Some(Err(e)) => {
            warn!(
                "{} (key `{}` in config file '{}'). Using the default.",
                e,
                key,
                path.display()
            );
            T::default()
        }
    }
}

/// Output file named after the signer: every character other than an ASCII
/// letter or digit becomes `_`, then `_signature.png` is appended.
pub fn default_output_path(name: &str) -> PathBuf {
    let name = name.trim();
    if name.is_empty() {
        return PathBuf::from(DEFAULT_OUTPUT);
    }
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    PathBuf::from(format!("{}_signature.png", stem))
}
