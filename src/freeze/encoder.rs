//! Snapshot serialization into self-contained `data:` URIs.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use base64::Engine as _;

use crate::{
    animation::directive::DirectiveKind,
    document::{serialize::write_tree, tree::local_name},
    foundation::error::{FramesError, FramesResult},
    freeze::freezer::Snapshot,
};

/// Largest raster edge, in pixels.
const MAX_DIM: u32 = 16_384;

/// Encoded frame payload type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameFormat {
    /// Neutralized SVG markup.
    #[default]
    Svg,
    /// The neutralized markup rasterized to PNG.
    Png,
}

impl FrameFormat {
    /// MIME type used in the data URI.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }

    /// File extension for frames written to disk.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Options for [`SnapshotEncoder`].
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeOptions {
    /// Output payload type.
    pub format: FrameFormat,
    /// Raster scale relative to the document size (PNG only).
    pub raster_scale: f64,
    /// Directory relative image references are resolved against (PNG only).
    pub resources_dir: Option<PathBuf>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: FrameFormat::Svg,
            raster_scale: 1.0,
            resources_dir: None,
        }
    }
}

/// One encoded, independently loadable frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    index: usize,
    time: f64,
    format: FrameFormat,
    uri: String,
}

impl Frame {
    /// Position in the sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sample time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Payload type.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// The `data:` URI, usable wherever an image source is expected.
    pub fn src(&self) -> &str {
        &self.uri
    }

    /// Decode the URI back into the raw payload bytes.
    pub fn payload(&self) -> FramesResult<Vec<u8>> {
        let (_, b64) = self
            .uri
            .split_once(";base64,")
            .ok_or_else(|| FramesError::encode("frame uri is not base64 encoded"))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .context("decode frame payload")?;
        Ok(bytes)
    }
}

/// Turns snapshots into [`Frame`]s.
#[derive(Clone)]
pub struct SnapshotEncoder {
    options: EncodeOptions,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
}

impl std::fmt::Debug for SnapshotEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotEncoder")
            .field("options", &self.options)
            .field("font_faces", &self.fontdb.as_ref().map(|db| db.len()))
            .finish()
    }
}

impl SnapshotEncoder {
    /// Validate options. System fonts are loaded once here when rasterizing.
    pub fn new(options: EncodeOptions) -> FramesResult<Self> {
        if !options.raster_scale.is_finite() || options.raster_scale <= 0.0 {
            return Err(FramesError::validation(format!(
                "raster scale must be a finite number > 0, got {}",
                options.raster_scale
            )));
        }
        let fontdb = match options.format {
            FrameFormat::Svg => None,
            FrameFormat::Png => {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.len(), "loaded system fonts");
                Some(Arc::new(db))
            }
        };
        Ok(Self { options, fontdb })
    }

    /// Configured options.
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Serialize a snapshot with every directive element renamed so no consumer
    /// re-animates it.
    pub fn markup(snapshot: &Snapshot) -> String {
        write_tree(snapshot.tree(), &neutralize)
    }

    /// Encode one snapshot as frame `index`.
    #[tracing::instrument(skip(self, snapshot), fields(time = snapshot.time()))]
    pub fn encode(&self, index: usize, snapshot: &Snapshot) -> FramesResult<Frame> {
        let markup = Self::markup(snapshot);
        let payload = match self.options.format {
            FrameFormat::Svg => markup.into_bytes(),
            FrameFormat::Png => self.rasterize(&markup)?,
        };
        Ok(Frame {
            index,
            time: snapshot.time(),
            format: self.options.format,
            uri: data_uri(self.options.format.mime(), &payload),
        })
    }

    fn rasterize(&self, markup: &str) -> FramesResult<Vec<u8>> {
        let mut opts = usvg::Options {
            resources_dir: self.options.resources_dir.clone(),
            ..Default::default()
        };
        if let Some(db) = &self.fontdb {
            opts.fontdb = db.clone();
        }
        let tree = usvg::Tree::from_str(markup, &opts).context("parse snapshot svg")?;

        let scale = self.options.raster_scale;
        let size = tree.size();
        let width = raster_edge(size.width(), scale)?;
        let height = raster_edge(size.height(), scale)?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| FramesError::encode("failed to allocate frame pixmap"))?;
        let sx = width as f32 / size.width();
        let sy = height as f32 / size.height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut rgba = pixmap.take();
        demultiply_rgba8_in_place(&mut rgba);
        let img = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| FramesError::encode("pixmap size does not match its dimensions"))?;
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode png frame")?;
        Ok(png)
    }
}

fn neutralize(name: &str) -> Option<String> {
    let local = local_name(name);
    let kind = DirectiveKind::from_local_name(local)?;
    let prefix = &name[..name.len() - local.len()];
    Some(format!("{prefix}{}", kind.neutralized_tag()))
}

fn data_uri(mime: &str, payload: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(payload);
    format!("data:{mime};base64,{b64}")
}

fn raster_edge(logical: f32, scale: f64) -> FramesResult<u32> {
    let px = (f64::from(logical) * scale).ceil();
    if !px.is_finite() || px < 1.0 {
        return Err(FramesError::encode("svg has invalid width/height"));
    }
    if px > f64::from(MAX_DIM) {
        return Err(FramesError::encode(format!(
            "frame raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px as u32)
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/encoder.rs"]
mod tests;
