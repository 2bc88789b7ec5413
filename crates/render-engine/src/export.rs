//! Template loading, output naming, and per-talk rendering.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use placard_common::config::{EventConfig, TemplateVariant};
use placard_common::error::{PlacardError, PlacardResult};
use placard_layout::{layout_text, LayoutConfig, LayoutInput, TextLayout};
use placard_talk_model::Talk;

use crate::compositor::{composite, prepare_photo, GlyphPainter, PlacardStyle, TextPainter};

/// A template variant with its decoded background image.
#[derive(Debug, Clone)]
pub struct Template {
    pub variant: TemplateVariant,
    pub image: RgbaImage,
}

impl Template {
    pub fn new(variant: TemplateVariant, image: RgbaImage) -> Self {
        Self { variant, image }
    }

    /// Read the variant's image from disk.
    pub fn load(variant: &TemplateVariant) -> PlacardResult<Self> {
        if !variant.path.exists() {
            return Err(PlacardError::FileNotFound {
                path: variant.path.clone(),
            });
        }
        let image = image::open(&variant.path).map_err(|e| PlacardError::Template {
            path: variant.path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            template = %variant.name,
            width = image.width(),
            height = image.height(),
            "Loaded template"
        );
        Ok(Self::new(variant.clone(), image.to_rgba8()))
    }
}

/// Output file name for a speaker and variant suffix.
///
/// The speaker name is used as-is apart from path separators, which become
/// `-` so the file stays inside the output directory. Two speakers with the
/// same name map to the same file; the later one wins.
pub fn placard_file_name(speaker_name: &str, suffix: &str) -> String {
    let stem: String = speaker_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{stem}{suffix}.png")
}

/// Encode a finished canvas as PNG.
pub fn encode_png(canvas: &RgbaImage) -> PlacardResult<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PlacardError::render(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

/// Write a finished canvas to `output_dir`.
pub fn save_placard(
    canvas: &RgbaImage,
    output_dir: &Path,
    speaker_name: &str,
    suffix: &str,
) -> PlacardResult<PathBuf> {
    let path = output_dir.join(placard_file_name(speaker_name, suffix));
    std::fs::write(&path, encode_png(canvas)?)?;
    Ok(path)
}

/// Renders every template variant for a talk.
pub struct PlacardRenderer {
    templates: Vec<Template>,
    style: PlacardStyle,
    layout: LayoutConfig,
    painter: Box<dyn TextPainter>,
    output_dir: PathBuf,
}

impl PlacardRenderer {
    pub fn new(
        templates: Vec<Template>,
        style: PlacardStyle,
        layout: LayoutConfig,
        painter: Box<dyn TextPainter>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates,
            style,
            layout,
            painter,
            output_dir: output_dir.into(),
        }
    }

    /// Load the font and every template named by the config.
    pub fn from_config(config: &EventConfig) -> PlacardResult<Self> {
        let painter = GlyphPainter::load(&config.style.font_path)?;
        let templates = config
            .templates
            .iter()
            .map(Template::load)
            .collect::<PlacardResult<Vec<_>>>()?;

        Ok(Self::new(
            templates,
            PlacardStyle::from(&config.style),
            config.layout.clone(),
            Box::new(painter),
            config.output_dir.clone(),
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Layout decisions for a talk.
    pub fn layout(&self, talk: &Talk) -> TextLayout {
        layout_text(
            LayoutInput {
                talk_code: &talk.code,
                title: &talk.title,
                time: &talk.time,
                speaker_name: &talk.speaker_name,
            },
            &self.layout,
        )
    }

    /// Render and save one placard per template.
    ///
    /// The photo is decoded and cut out once, then shared by every variant.
    /// All variants are composited in memory before anything is written, so
    /// a photo that fails to decode leaves no files behind.
    pub fn render_talk(&self, talk: &Talk, photo_bytes: &[u8]) -> PlacardResult<Vec<PathBuf>> {
        let photo_url = talk.photo_url.as_deref().unwrap_or_default();
        let layout = self.layout(talk);
        tracing::debug!(
            code = %talk.code,
            font_size = layout.font_size,
            title_lines = layout.title_lines.len(),
            name_lines = layout.speaker.lines.len(),
            "Computed layout"
        );

        let photo = prepare_photo(photo_bytes, photo_url, self.style.photo_size)?;
        let canvases: Vec<RgbaImage> = self
            .templates
            .iter()
            .map(|template| {
                composite(
                    &layout,
                    &template.image,
                    &photo,
                    &self.style,
                    self.painter.as_ref(),
                )
            })
            .collect();

        std::fs::create_dir_all(&self.output_dir)?;

        self.templates
            .iter()
            .zip(&canvases)
            .map(|(template, canvas)| {
                save_placard(
                    canvas,
                    &self.output_dir,
                    &layout.speaker.display_name,
                    &template.variant.suffix,
                )
            })
            .collect()
    }
}
