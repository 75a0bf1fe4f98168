//! shotframe plans framed, localized device screenshots.
//!
//! A project is an ordered list of layers (background image, overlay images, localized
//! text). For a given [`ViewState`] (language + image number) a layout pass turns that list
//! into a [`CompositionPlan`] and a list of advisory [`LayoutError`] diagnostics. Pixels are
//! out of scope: the plan says what to draw, from which file, with what text, at what size.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: each layer's path template is resolved by [`PathResolver`] through a fixed
//!    fallback search (language + project specialization first, plain file last).
//! 2. **Localize**: text layers read their string from a dictionary file
//!    ([`lookup_localized`]) and pick up a sibling stylesheet ([`style_text`]).
//! 3. **Fit**: [`FontFitter`] shrinks text in half-point steps until it fits its frame or
//!    reaches 6pt, using a [`TextMeasurer`].
//! 4. **Compose**: [`LayoutComposer`] runs the above per layer, in order, and returns a
//!    [`LayoutPass`].
//!
//! Passes are pure functions of (layers, context, view state, options, filesystem): nothing is
//! cached between calls.
#![forbid(unsafe_code)]

mod compose;
mod foundation;
mod project;
mod resolve;
mod text;

pub use compose::composer::{ComposeOptions, LayoutComposer};
pub use compose::plan::{
    CompositionPlan, Fill, LayerRole, LayoutError, LayoutPass, RenderInstruction,
};
pub use foundation::core::{ProjectContext, RAW_SCREENSHOTS_DIR, Rect, Size, ViewState};
pub use foundation::error::{ShotframeError, ShotframeResult};
pub use project::model::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, LayerDescriptor, LayerKind, Project,
};
pub use resolve::path::{
    IMAGE_TOKEN, LANGUAGE_TOKEN, PathResolver, specialize, substitute_placeholders,
    with_template_extension,
};
pub use text::fit::{FONT_SIZE_STEP, FitResult, FontFitter, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use text::localization::{
    lookup as lookup_localized, parse_dictionary, parse_dictionary_bytes, read_dictionary,
};
pub use text::measure::{MonospaceMeasurer, ParleyMeasurer, TextMeasurer};
pub use text::style::{RenderableText, STYLESHEET_EXTENSION, style as style_text};
