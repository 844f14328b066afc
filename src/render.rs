//! Rasterizes a [`SignatureRequest`] into a centered, styled RGBA image.
//!
//! Layers are composited bottom to top: background, shadow, main text
//! (optionally redrawn at unit offsets to simulate bold), underline.

use crate::color::InkColor;
use crate::fonts::{FontFallback, FontLibrary};
use crate::request::SignatureRequest;
use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::{debug, info};
use rusttype::{Font, Scale, point};

pub const SHADOW_OFFSET: i32 = 3;
pub const SHADOW_COLOR: InkColor = InkColor::GRAY;
pub const BOLD_OFFSETS: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
pub const UNDERLINE_GAP: i32 = 5;
pub const UNDERLINE_THICKNESS: u32 = 3;

/// Union of glyph pixel boxes, relative to the origin passed to `draw_text_mut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

/// Where the measured text box ended up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.left as f32 + self.width as f32 / 2.0,
            self.top as f32 + self.height as f32 / 2.0,
        )
    }
}

/// The underline as drawn: `thickness` rows starting at `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underline {
    pub x: i32,
    pub y: i32,
    pub length: u32,
    pub thickness: u32,
}

pub struct Signature {
    pub image: RgbaImage,
    pub placement: Placement,
    pub underline: Option<Underline>,
    pub fallback: Option<FontFallback>,
}

/// Measures the ink box of `text`, laid out the same way `draw_text_mut` lays
/// it out (baseline at the font ascent). `None` when no glyph has any ink.
pub fn measure_text(font: &Font, scale: Scale, text: &str) -> Option<TextBounds> {
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent))
        .filter_map(|g| g.pixel_bounding_box())
        .fold(None, |acc: Option<TextBounds>, bb| {
            Some(match acc {
                None => TextBounds {
                    min_x: bb.min.x,
                    min_y: bb.min.y,
                    max_x: bb.max.x,
                    max_y: bb.max.y,
                },
                Some(b) => TextBounds {
                    min_x: b.min_x.min(bb.min.x),
                    min_y: b.min_y.min(bb.min.y),
                    max_x: b.max_x.max(bb.max.x),
                    max_y: b.max_y.max(bb.max.y),
                },
            })
        })
}

/// Loads the requested font (falling back to the bundled one) and renders.
/// The canvas is expected to have passed `CanvasSize::validate`.
pub fn generate_signature(request: &SignatureRequest, fonts: &FontLibrary) -> Signature {
    info!(
        "Rendering signature \"{}\" with font {} at size {}",
        request.name,
        request.font_path.display(),
        request.size
    );
    let loaded = fonts.load(&request.font_path);
    let mut signature = render_with_font(request, &loaded.font);
    signature.fallback = loaded.fallback;
    signature
}

pub fn render_with_font(request: &SignatureRequest, font: &Font) -> Signature {
    let canvas = request.canvas;
    let mut image: RgbaImage =
        ImageBuffer::from_pixel(canvas.width, canvas.height, request.background.fill());

    let scale = Scale::uniform(request.size);
    let text = request.name.as_str();
    let bounds = measure_text(font, scale, text);
    let (width, height) = bounds.map(|b| (b.width(), b.height())).unwrap_or((0, 0));

    // Floor division keeps oversized text anchored the same way on both sides.
    let left = (canvas.width as i32 - width).div_euclid(2);
    let top = (canvas.height as i32 - height).div_euclid(2);
    let placement = Placement {
        left,
        top,
        width,
        height,
    };

    let Some(bounds) = bounds else {
        debug!("No inkable glyphs in \"{}\", canvas left blank", text);
        return Signature {
            image,
            placement,
            underline: None,
            fallback: None,
        };
    };

    let origin_x = left - bounds.min_x;
    let origin_y = top - bounds.min_y;
    debug!(
        "Text box {}x{} at ({}, {}), draw origin ({}, {})",
        width, height, left, top, origin_x, origin_y
    );

    let effects = request.effects;
    if effects.shadow {
        draw_text_mut(
            &mut image,
            SHADOW_COLOR.to_rgba(),
            origin_x + SHADOW_OFFSET,
            origin_y + SHADOW_OFFSET,
            scale,
            font,
            text,
        );
    }

    let ink: Rgba<u8> = request.ink.to_rgba();
    let offsets: &[(i32, i32)] = if effects.bold { &BOLD_OFFSETS } else { &[(0, 0)] };
    for (dx, dy) in offsets {
        draw_text_mut(&mut image, ink, origin_x + dx, origin_y + dy, scale, font, text);
    }

    let underline = if effects.underline && width > 0 {
        // The line is centered on `bottom + gap`, so its top row is below the text.
        let line = Underline {
            x: left,
            y: placement.bottom() + UNDERLINE_GAP - (UNDERLINE_THICKNESS as i32) / 2,
            length: width as u32,
            thickness: UNDERLINE_THICKNESS,
        };
        draw_filled_rect_mut(
            &mut image,
            Rect::at(line.x, line.y).of_size(line.length, line.thickness),
            ink,
        );
        Some(line)
    } else {
        None
    };

    Signature {
        image,
        placement,
        underline,
        fallback: None,
    }
}
