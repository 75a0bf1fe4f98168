use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Rect,
        error::{ShotframeError, ShotframeResult},
    },
    text::fit::MAX_FONT_SIZE,
};

/// Font family used when a text layer does not name one.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica Neue";
/// Font size used when a text layer does not specify one.
pub const DEFAULT_FONT_SIZE: f64 = 25.0;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A screenshot project: ordered layers plus export settings.
///
/// Layer order is z-order; the first layer is the background.
pub struct Project {
    /// Ordered layers, bottom to top.
    #[serde(default)]
    pub layers: Vec<LayerDescriptor>,
    /// Project-wide export template, e.g. `Export/$language/iPhone-$image framed.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Language codes to export.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Number of numbered screenshots in the project.
    #[serde(default = "default_image_count")]
    pub images: u32,
}

fn default_image_count() -> u32 {
    1
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// What a layer draws.
pub enum LayerKind {
    /// A bitmap loaded from disk.
    #[default]
    Image,
    /// Localized text read from a dictionary file.
    Text,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One visual element of the composed screenshot.
pub struct LayerDescriptor {
    /// Path template relative to the project root (`$image`, `$language` placeholders).
    pub file: String,
    /// Placement in output coordinates.
    #[serde(with = "frame_serde")]
    pub frame: Rect,
    /// Rotation around the frame center in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: LayerKind,
    #[serde(default, rename = "font", skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Export template carried by this layer; `Some` marks the layer as producing output.
    ///
    /// Only the background's template (or the project-wide one) becomes the export path.
    /// On an overlay the value is checked for emptiness, which reports
    /// [`LayoutError::NoOutputFile`](crate::LayoutError::NoOutputFile), and is otherwise unused.
    #[serde(default, rename = "output", skip_serializing_if = "Option::is_none")]
    pub output_template: Option<String>,
}

impl LayerDescriptor {
    /// Image layer with no rotation or output template.
    pub fn image(file: impl Into<String>, frame: Rect) -> Self {
        Self {
            file: file.into(),
            frame,
            rotation: None,
            kind: LayerKind::Image,
            font_family: None,
            font_size: None,
            output_template: None,
        }
    }

    /// Text layer reading from the dictionary template `file`.
    pub fn text(file: impl Into<String>, frame: Rect) -> Self {
        Self {
            kind: LayerKind::Text,
            ..Self::image(file, frame)
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font_family = Some(family.into());
        self.font_size = Some(size);
        self
    }

    pub fn with_output(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    /// Rotation with the absent case made explicit.
    pub fn effective_rotation(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }

    /// Font family, defaulting when unset or blank.
    pub fn effective_font_family(&self) -> &str {
        match self.font_family.as_deref() {
            Some(f) if !f.trim().is_empty() => f,
            _ => DEFAULT_FONT_FAMILY,
        }
    }

    pub fn effective_font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }
}

impl Project {
    /// Read and validate a project JSON file.
    pub fn from_json_file(path: &Path) -> ShotframeResult<Self> {
        let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
        let project: Project = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ShotframeError::serde(format!("parse project JSON: {e}")))?;
        project.validate()?;
        Ok(project)
    }

    /// Parse and validate a project from a JSON string.
    pub fn from_json_str(s: &str) -> ShotframeResult<Self> {
        let project: Project = serde_json::from_str(s)
            .map_err(|e| ShotframeError::serde(format!("parse project JSON: {e}")))?;
        project.validate()?;
        Ok(project)
    }

    /// Structural checks on numeric fields.
    ///
    /// An empty layer list is accepted; it is reported by the layout pass instead.
    pub fn validate(&self) -> ShotframeResult<()> {
        for (idx, layer) in self.layers.iter().enumerate() {
            let f = layer.frame;
            if ![f.x0, f.y0, f.x1, f.y1].iter().all(|v| v.is_finite()) {
                return Err(ShotframeError::project(format!(
                    "layer {idx} frame must be finite"
                )));
            }
            if f.width() < 0.0 || f.height() < 0.0 {
                return Err(ShotframeError::project(format!(
                    "layer {idx} frame width/height must be >= 0"
                )));
            }
            if let Some(r) = layer.rotation
                && !r.is_finite()
            {
                return Err(ShotframeError::project(format!(
                    "layer {idx} rotation must be finite"
                )));
            }
            if let Some(size) = layer.font_size
                && (!size.is_finite() || size <= 0.0 || size > MAX_FONT_SIZE)
            {
                return Err(ShotframeError::project(format!(
                    "layer {idx} fontSize must be finite, > 0 and <= {MAX_FONT_SIZE}"
                )));
            }
        }
        Ok(())
    }
}

mod frame_serde {
    use kurbo::Rect;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct FrameRepr {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    }

    pub(super) fn serialize<S: Serializer>(rect: &Rect, s: S) -> Result<S::Ok, S::Error> {
        FrameRepr {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
        }
        .serialize(s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rect, D::Error> {
        let f = FrameRepr::deserialize(d)?;
        Ok(Rect::new(f.x, f.y, f.x + f.width, f.y + f.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
