use crate::color::InkColor;
use crate::error::SignatureError;
use crate::fonts::{FontChoice, FontLibrary};
use crate::render::{Signature, generate_signature};
use crate::request::{
    Background, CanvasSize, DEFAULT_FONT_SIZE, Effects, SignatureRequest, check_font_size,
};
use image::ImageFormat;
use log::info;
use std::path::{Path, PathBuf};

/// The signature form: the user's current inputs plus the last preview.
pub struct SignatureForm {
    pub name: String,
    pub font: FontChoice,
    pub size: f32,
    pub ink: InkColor,
    pub background: Background,
    pub effects: Effects,
    pub canvas: CanvasSize,
    preview: Option<Signature>,
}

pub struct Saved {
    pub path: PathBuf,
    pub signature: Signature,
}

impl Default for SignatureForm {
    fn default() -> Self {
        SignatureForm {
            name: String::new(),
            font: FontChoice::default(),
            size: DEFAULT_FONT_SIZE,
            ink: InkColor::default(),
            background: Background::default(),
            effects: Effects::default(),
            canvas: CanvasSize::default(),
            preview: None,
        }
    }
}

impl SignatureForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the inputs. Nothing is rendered when this fails.
    pub fn request(&self, fonts: &FontLibrary) -> Result<SignatureRequest, SignatureError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SignatureError::NameRequired);
        }
        Ok(SignatureRequest {
            name: name.to_string(),
            font_path: fonts.resolve(&self.font)?,
            size: check_font_size(self.size)?,
            ink: self.ink,
            background: self.background,
            effects: self.effects,
            canvas: self.canvas.validate()?,
        })
    }

    /// Renders the current inputs and keeps the result as the preview.
    /// On error the previous preview is left untouched.
    pub fn preview(&mut self, fonts: &FontLibrary) -> Result<&Signature, SignatureError> {
        let request = self.request(fonts)?;
        let signature = generate_signature(&request, fonts);
        Ok(&*self.preview.insert(signature))
    }

    pub fn current_preview(&self) -> Option<&Signature> {
        self.preview.as_ref()
    }

    /// Renders a fresh image and writes it as PNG. Does not touch the preview.
    pub fn save(&self, fonts: &FontLibrary, path: &Path) -> Result<Saved, SignatureError> {
        let request = self.request(fonts)?;
        let signature = generate_signature(&request, fonts);
        let path = with_png_extension(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        signature.image.save_with_format(&path, ImageFormat::Png)?;
        info!("Signature saved as {}", path.display());
        Ok(Saved { path, signature })
    }
}

/// Adds `.png` when the path has no extension.
pub fn with_png_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_extension_is_added_only_when_missing() {
        assert_eq!(with_png_extension(Path::new("out/sig")), Path::new("out/sig.png"));
        assert_eq!(with_png_extension(Path::new("sig.png")), Path::new("sig.png"));
        assert_eq!(with_png_extension(Path::new("sig.PNG")), Path::new("sig.PNG"));
    }

    #[test]
    fn blank_name_is_rejected_before_font_lookup() {
        let fonts = FontLibrary::with_defaults().unwrap();
        let mut form = SignatureForm::new();
        form.name = "  \t".into();
        form.font = FontChoice::Catalog("does-not-exist".into());
        assert!(matches!(form.request(&fonts), Err(SignatureError::NameRequired)));
    }

    #[test]
    fn request_carries_trimmed_name_and_resolved_font() {
        let fonts = FontLibrary::with_defaults().unwrap();
        let mut form = SignatureForm::new();
        form.name = "  R.Maunick ".into();
        form.font = FontChoice::Catalog("Allura".into());
        let request = form.request(&fonts).unwrap();
        assert_eq!(request.name, "R.Maunick");
        assert_eq!(request.font_path, Path::new("fonts/Allura-Regular.ttf"));
        assert_eq!(request.size, DEFAULT_FONT_SIZE);
        assert_eq!(request.canvas, CanvasSize::new(900, 300));
    }

    #[test]
    fn invalid_inputs_block_the_action() {
        let fonts = FontLibrary::with_defaults().unwrap();
        let mut form = SignatureForm::new();
        form.name = "Ada".into();

        form.size = 12.0;
        assert!(matches!(form.request(&fonts), Err(SignatureError::SizeOutOfRange { .. })));
        form.size = DEFAULT_FONT_SIZE;

        form.font = FontChoice::File("signature.woff2".into());
        assert!(matches!(form.request(&fonts), Err(SignatureError::InvalidFontFile(_))));
        form.font = FontChoice::default();

        form.canvas = CanvasSize::new(900, 0);
        assert!(matches!(form.request(&fonts), Err(SignatureError::InvalidCanvas { .. })));
    }
}
