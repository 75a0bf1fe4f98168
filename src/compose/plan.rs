use std::path::PathBuf;

use crate::{foundation::core::Rect, project::model::LayerKind, text::style::RenderableText};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Diagnostic describing why a composed screenshot may be wrong.
///
/// Diagnostics are advisory: they are collected on a [`LayoutPass`], never raised.
pub enum LayoutError {
    /// Nothing to report.
    None,
    /// The project has no layers.
    NoLayers,
    /// A text layer could not be shrunk enough to fit its frame.
    FontTooBig,
    /// No export destination was configured.
    NoOutputFile,
}

impl LayoutError {
    /// Fixed explanation meant for direct display to the user.
    pub fn explanation(self) -> &'static str {
        match self {
            Self::None => "- No errors\n  Everything went fine",
            Self::NoLayers => {
                "- No layers present.\n  Check your project file and make sure it contains at least one layer"
            }
            Self::FontTooBig => {
                "- The font of one label is too big. This often happens in a language other than the one you designed in.\n  \
                 Check all languages in your project and decrease the font size or increase the frame of the label.\n  \
                 The font is decreased on affected labels so the contents fit on screen.\n  \
                 You can ignore this warning with the '--ignore-font-too-big' flag"
            }
            Self::NoOutputFile => {
                "- You forgot to specify an output path or entered an incorrect one.\n  \
                 The default path is: 'Export/$language/iPhone XXX-$image framed.png'"
            }
        }
    }
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.explanation())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// What the renderer should paint for an instruction.
pub enum Fill {
    /// Draw the resolved image file.
    Asset,
    /// Draw the resolved text.
    Text,
    /// Asset or text is missing: paint the red placeholder.
    ErrorFill,
    /// Background asset is missing: paint the light-gray backdrop.
    BackgroundFill,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Position-derived role of a layer.
pub enum LayerRole {
    /// First layer of the list: never highlighted, gets the backdrop fill, owns export.
    Background,
    /// Every later layer.
    Overlay,
}

impl LayerRole {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            Self::Background
        } else {
            Self::Overlay
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Fully resolved render instruction for one layer.
pub struct RenderInstruction {
    pub kind: LayerKind,
    pub role: LayerRole,
    /// Resolved file: the image, or the dictionary for text layers.
    pub asset_path: Option<PathBuf>,
    /// Whether `asset_path` named a regular file when probed.
    pub asset_exists: bool,
    pub text: Option<RenderableText>,
    pub font_family: Option<String>,
    /// Size after shrink-to-fit.
    pub effective_font_size: Option<f64>,
    #[serde(serialize_with = "serialize_frame")]
    pub frame: Rect,
    /// Degrees around the frame center; `0.0` when the layer has none.
    pub rotation: f64,
    pub highlighted: bool,
    pub fill: Fill,
}

impl RenderInstruction {
    pub fn is_background(&self) -> bool {
        self.role == LayerRole::Background
    }
}

fn serialize_frame<S: serde::Serializer>(rect: &Rect, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct as _;
    let mut st = s.serialize_struct("Frame", 4)?;
    st.serialize_field("x", &rect.x0)?;
    st.serialize_field("y", &rect.y0)?;
    st.serialize_field("width", &rect.width())?;
    st.serialize_field("height", &rect.height())?;
    st.end()
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Ordered render instructions, bottom to top.
pub struct CompositionPlan {
    pub instructions: Vec<RenderInstruction>,
    /// Export destination for this view, resolved from the background layer's template or
    /// the project-wide one. Overlay templates never contribute.
    pub output_path: Option<PathBuf>,
}

impl CompositionPlan {
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn background(&self) -> Option<&RenderInstruction> {
        self.instructions.first()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Result of one layout pass: the plan plus its diagnostics in reporting order.
pub struct LayoutPass {
    pub plan: CompositionPlan,
    pub errors: Vec<LayoutError>,
}

impl LayoutPass {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether an export of this pass should be refused.
    pub fn blocks_export(&self) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, LayoutError::NoLayers | LayoutError::NoOutputFile))
    }

    /// Explanations of all diagnostics, one block per error.
    pub fn report(&self) -> String {
        if self.errors.is_empty() {
            return LayoutError::None.explanation().to_string();
        }
        self.errors
            .iter()
            .map(|e| e.explanation())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
