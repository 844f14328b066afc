use crate::error::SignatureError;
use log::{info, warn};
use rusttype::Font;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const FONTS_DIR: &str = "fonts";

/// DejaVu Sans, used whenever the requested font cannot be loaded.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub key: String,
    pub label: String,
    pub file: String,
}

impl FontEntry {
    fn new(key: &str, label: &str, file: &str) -> Self {
        FontEntry {
            key: key.to_string(),
            label: label.to_string(),
            file: file.to_string(),
        }
    }
}

pub fn default_catalog() -> Vec<FontEntry> {
    vec![
        FontEntry::new("great-vibes", "Great Vibes", "GreatVibes-Regular.ttf"),
        FontEntry::new("alex-brush", "Alex Brush", "AlexBrush-Regular.ttf"),
        FontEntry::new(
            "dancing-script",
            "Dancing Script",
            "DancingScript-VariableFont_wght.ttf",
        ),
        FontEntry::new("allura", "Allura", "Allura-Regular.ttf"),
        FontEntry::new("parisienne", "Parisienne", "Parisienne-Regular.ttf"),
    ]
}

/// Which font the user picked: a catalog entry or a font file of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    Catalog(String),
    File(PathBuf),
}

impl Default for FontChoice {
    fn default() -> Self {
        FontChoice::Catalog("great-vibes".to_string())
    }
}

/// Why the requested font was replaced by the bundled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFallback {
    pub path: PathBuf,
    pub reason: String,
}

pub struct LoadedFont {
    pub font: Font<'static>,
    pub fallback: Option<FontFallback>,
}

pub struct FontLibrary {
    catalog: Vec<FontEntry>,
    fonts_dir: PathBuf,
    bundled: Font<'static>,
}

impl FontLibrary {
    pub fn new(catalog: Vec<FontEntry>, fonts_dir: impl Into<PathBuf>) -> Result<Self, SignatureError> {
        let bundled = Font::try_from_bytes(BUNDLED_FONT).ok_or(SignatureError::BundledFont)?;
        Ok(FontLibrary {
            catalog,
            fonts_dir: fonts_dir.into(),
            bundled,
        })
    }

    pub fn with_defaults() -> Result<Self, SignatureError> {
        Self::new(default_catalog(), FONTS_DIR)
    }

    pub fn catalog(&self) -> &[FontEntry] {
        &self.catalog
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    /// Finds a catalog entry by key or label, ignoring case.
    pub fn find(&self, name: &str) -> Option<&FontEntry> {
        let wanted = name.trim();
        self.catalog
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(wanted) || e.label.eq_ignore_ascii_case(wanted))
    }

    pub fn entry_path(&self, entry: &FontEntry) -> PathBuf {
        self.fonts_dir.join(&entry.file)
    }

    /// Maps a choice to the font file to load. Unknown catalog names and
    /// custom files without a font extension are rejected.
    pub fn resolve(&self, choice: &FontChoice) -> Result<PathBuf, SignatureError> {
        match choice {
            FontChoice::Catalog(name) => self
                .find(name)
                .map(|entry| self.entry_path(entry))
                .ok_or_else(|| SignatureError::UnknownFont(name.clone())),
            FontChoice::File(path) => {
                check_font_extension(path)?;
                Ok(path.clone())
            }
        }
    }

    /// Loads a font file, substituting the bundled font on any failure.
    pub fn load(&self, path: &Path) -> LoadedFont {
        match read_font(path) {
            Ok(font) => {
                info!("Loaded font: {}", path.display());
                LoadedFont { font, fallback: None }
            }
            Err(reason) => {
                warn!(
                    "Could not load font {} ({}), using the bundled font instead",
                    path.display(),
                    reason
                );
                LoadedFont {
                    font: self.bundled.clone(),
                    fallback: Some(FontFallback {
                        path: path.to_path_buf(),
                        reason,
                    }),
                }
            }
        }
    }
}

fn read_font(path: &Path) -> Result<Font<'static>, String> {
    let data = fs::read(path).map_err(|e| format!("failed to read font file: {}", e))?;
    Font::try_from_vec(data).ok_or_else(|| "file is not a usable TrueType/OpenType font".to_string())
}

pub fn check_font_extension(path: &Path) -> Result<(), SignatureError> {
    let ok = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FONT_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(SignatureError::InvalidFontFile(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> FontLibrary {
        FontLibrary::new(default_catalog(), "/opt/fonts").unwrap()
    }

    #[test]
    fn finds_catalog_fonts_by_key_or_label() {
        let lib = library();
        assert_eq!(lib.find("allura").unwrap().file, "Allura-Regular.ttf");
        assert_eq!(lib.find("Great Vibes").unwrap().key, "great-vibes");
        assert_eq!(lib.find("DANCING-SCRIPT").unwrap().label, "Dancing Script");
        assert!(lib.find("comic-sans").is_none());
    }

    #[test]
    fn resolves_catalog_entries_against_fonts_dir() {
        let lib = library();
        let path = lib.resolve(&FontChoice::Catalog("parisienne".into())).unwrap();
        assert_eq!(path, Path::new("/opt/fonts/Parisienne-Regular.ttf"));
        assert!(matches!(
            lib.resolve(&FontChoice::Catalog("nope".into())),
            Err(SignatureError::UnknownFont(name)) if name == "nope"
        ));
    }

    #[test]
    fn custom_fonts_need_a_font_extension() {
        assert!(check_font_extension(Path::new("mine.TTF")).is_ok());
        assert!(check_font_extension(Path::new("dir/mine.otf")).is_ok());
        for bad in ["mine.woff", "mine", "ttf"] {
            assert!(matches!(
                check_font_extension(Path::new(bad)),
                Err(SignatureError::InvalidFontFile(_))
            ));
        }
    }

    #[test]
    fn missing_font_falls_back_to_bundled() {
        let lib = library();
        let loaded = lib.load(Path::new("/definitely/not/here.ttf"));
        let fallback = loaded.fallback.expect("fallback recorded");
        assert_eq!(fallback.path, Path::new("/definitely/not/here.ttf"));
        assert!(fallback.reason.contains("failed to read"));
    }

    #[test]
    fn garbage_font_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").unwrap();
        let loaded = library().load(&path);
        assert!(loaded.fallback.is_some());
    }

    #[test]
    fn loads_real_font_without_fallback() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSans.ttf");
        let loaded = library().load(&path);
        assert!(loaded.fallback.is_none());
    }
}
