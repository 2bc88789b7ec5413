//! Placard compositor: combines template, text block, and speaker photo.
//!
//! The speaker photo is decoded, center-cropped to a square, resized, and
//! masked to a circle once per talk. Every placard then starts from its own
//! copy of the template: the text block is drawn at a fixed anchor and the
//! circular photo is alpha-blended onto the center of the canvas.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use placard_common::config::StyleConfig;
use placard_common::error::{PlacardError, PlacardResult};
use placard_layout::TextLayout;

/// Fixed drawing parameters shared by every placard of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacardStyle {
    pub text_color: Rgba<u8>,

    /// Top-left anchor of the first text line.
    pub text_origin: (i32, i32),

    /// Extra pixels between consecutive lines.
    pub line_spacing: u32,

    /// Edge length of the circular photo's bounding square.
    pub photo_size: u32,
}

impl From<&StyleConfig> for PlacardStyle {
    fn from(config: &StyleConfig) -> Self {
        let [r, g, b] = config.text_color;
        Self {
            text_color: Rgba([r, g, b, 255]),
            text_origin: (config.text_origin[0], config.text_origin[1]),
            line_spacing: config.line_spacing,
            photo_size: config.photo_size,
        }
    }
}

impl Default for PlacardStyle {
    fn default() -> Self {
        Self::from(&StyleConfig::default())
    }
}

/// Draws single lines of text onto a canvas.
pub trait TextPainter {
    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    );

    /// Height of one line at `size`, excluding extra spacing.
    fn line_height(&self, size: f32) -> f32;
}

/// [`TextPainter`] backed by a TrueType/OpenType font.
#[derive(Clone)]
pub struct GlyphPainter {
    font: FontArc,
}

impl std::fmt::Debug for GlyphPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphPainter").finish_non_exhaustive()
    }
}

impl GlyphPainter {
    /// Load a font file.
    pub fn load(path: &Path) -> PlacardResult<Self> {
        if !path.exists() {
            return Err(PlacardError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
            .map_err(|e| PlacardError::font(format!("{}: {e}", path.display())))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> PlacardResult<Self> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| PlacardError::font(format!("not a usable font: {e}")))?;
        Ok(Self { font })
    }

    /// Scale at which one em is `size` pixels.
    ///
    /// `PxScale` measures ascent to descent, which is usually taller than
    /// the em square.
    fn scale(&self, size: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(size * self.font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(size),
        }
    }
}

impl TextPainter for GlyphPainter {
    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        size: f32,
        color: Rgba<u8>,
        text: &str,
    ) {
        draw_text_mut(canvas, color, x, y, self.scale(size), &self.font, text);
    }

    fn line_height(&self, size: f32) -> f32 {
        self.font.as_scaled(self.scale(size)).height()
    }
}

/// Decode downloaded photo bytes.
pub fn decode_photo(bytes: &[u8], url: &str) -> PlacardResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| PlacardError::photo_decode(url, e.to_string()))
}

/// Crop the largest centered square and resize it to `size`×`size`.
///
/// Cropping comes first so the resize never works on more than the square,
/// whatever the photo's aspect ratio.
pub fn fill_crop(photo: &DynamicImage, size: u32) -> RgbaImage {
    let (width, height) = (photo.width(), photo.height());
    let side = width.min(height);
    if side == 0 {
        return RgbaImage::new(size, size);
    }
    photo
        .crop_imm((width - side) / 2, (height - side) / 2, side, side)
        .resize_exact(size, size, FilterType::CatmullRom)
        .to_rgba8()
}

/// Alpha mask of a filled circle inscribed in a `size`×`size` square.
///
/// A pixel is opaque when its center lies inside the circle, which keeps the
/// mask symmetric for even and odd sizes alike.
pub fn circle_mask(size: u32) -> GrayImage {
    let radius = size as f32 / 2.0;
    GrayImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        if dx * dx + dy * dy <= radius * radius {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Fill-crop a photo and replace its alpha channel with a circular mask.
pub fn circular_photo(photo: &DynamicImage, size: u32) -> RgbaImage {
    let mut square = fill_crop(photo, size);
    let mask = circle_mask(size);
    for (pixel, alpha) in square.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = alpha.0[0];
    }
    square
}

/// Top-left position that centers a `size`-square on the canvas.
pub fn centered_offset(canvas_width: u32, canvas_height: u32, size: u32) -> (i64, i64) {
    let half = i64::from(size / 2);
    (
        i64::from(canvas_width / 2) - half,
        i64::from(canvas_height / 2) - half,
    )
}

/// Draw the layout's text block line by line.
pub fn draw_text_block(
    canvas: &mut RgbaImage,
    layout: &TextLayout,
    style: &PlacardStyle,
    painter: &dyn TextPainter,
) {
    let size = layout.font_size as f32;
    let advance = painter.line_height(size) + style.line_spacing as f32;
    let (x, y0) = style.text_origin;

    for (i, line) in layout.lines().iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = y0 + (i as f32 * advance).round() as i32;
        painter.draw_line(canvas, x, y, size, style.text_color, line);
    }
}

/// Decode a downloaded photo and turn it into the circular cut-out shared by
/// every template variant of a talk.
pub fn prepare_photo(
    photo_bytes: &[u8],
    photo_url: &str,
    size: u32,
) -> PlacardResult<RgbaImage> {
    let photo = decode_photo(photo_bytes, photo_url)?;
    Ok(circular_photo(&photo, size))
}

/// Render one placard in memory from a prepared photo.
pub fn composite(
    layout: &TextLayout,
    template: &RgbaImage,
    photo: &RgbaImage,
    style: &PlacardStyle,
    painter: &dyn TextPainter,
) -> RgbaImage {
    let mut canvas = template.clone();
    draw_text_block(&mut canvas, layout, style, painter);

    let (x, y) = centered_offset(canvas.width(), canvas.height(), photo.width());
    imageops::overlay(&mut canvas, photo, x, y);

    canvas
}
