use image::RgbaImage;

pub const DEFAULT_COLUMNS: u32 = 90;

// Light to dark.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Draws the image as text, one character per cell. A cell is twice as tall
/// as it is wide to make up for terminal character proportions.
pub fn render_ascii(image: &RgbaImage, columns: u32) -> String {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || columns == 0 {
        return String::new();
    }
    let columns = columns.min(width);
    let cell_w = width as f32 / columns as f32;
    let cell_h = cell_w * 2.0;
    let rows = ((height as f32 / cell_h).ceil() as u32).max(1);

    let mut out = String::with_capacity(((columns + 1) * rows) as usize);
    for row in 0..rows {
        let y0 = ((row as f32 * cell_h) as u32).min(height - 1);
        let y1 = (((row + 1) as f32 * cell_h) as u32).clamp(y0 + 1, height);
        for col in 0..columns {
            let x0 = ((col as f32 * cell_w) as u32).min(width - 1);
            let x1 = (((col + 1) as f32 * cell_w) as u32).clamp(x0 + 1, width);
            let darkness = cell_darkness(image, x0..x1, y0..y1);
            let idx = ((darkness * (RAMP.len() - 1) as f32).round() as usize).min(RAMP.len() - 1);
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    out
}

/// Mean darkness of a region after compositing over white, in 0.0..=1.0.
fn cell_darkness(image: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> f32 {
    let mut total = 0.0;
    let mut count = 0u32;
    for y in ys {
        for x in xs.clone() {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            let alpha = a as f32 / 255.0;
            let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
            let over_white = luma * alpha + (1.0 - alpha);
            total += 1.0 - over_white;
            count += 1;
        }
    }
    if count == 0 { 0.0 } else { total / count as f32 }
}
