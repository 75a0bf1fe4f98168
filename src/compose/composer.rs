use crate::{
    compose::plan::{CompositionPlan, Fill, LayerRole, LayoutError, LayoutPass, RenderInstruction},
    foundation::core::{ProjectContext, ViewState},
    project::model::{LayerDescriptor, LayerKind},
    resolve::path::{PathResolver, with_template_extension},
    text::{
        fit::FontFitter,
        localization,
        measure::TextMeasurer,
        style::{self, STYLESHEET_EXTENSION},
    },
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Per-pass knobs supplied by the preview or export driver.
pub struct ComposeOptions {
    /// Do not report [`LayoutError::FontTooBig`]; text is still shrunk.
    pub ignore_font_too_big: bool,
    /// Layer to outline in the preview. The background is never highlighted.
    pub highlight_layer: Option<usize>,
    /// Project-wide export template, used when the background layer carries none.
    pub output_template: Option<String>,
}

/// Per-pass error accumulator. `NoOutputFile` is recorded at most once.
#[derive(Default)]
struct Diagnostics {
    errors: Vec<LayoutError>,
    output_reported: bool,
}

impl Diagnostics {
    fn font_too_big(&mut self) {
        self.errors.push(LayoutError::FontTooBig);
    }

    fn no_output_file(&mut self) {
        if !self.output_reported {
            self.output_reported = true;
            self.errors.push(LayoutError::NoOutputFile);
        }
    }
}

/// Turns a layer list and a view state into a [`LayoutPass`].
///
/// Stateless: every call re-resolves every path and re-fits every label.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutComposer;

impl LayoutComposer {
    #[tracing::instrument(
        skip_all,
        fields(layers = layers.len(), language = %view.language, image = view.image_index)
    )]
    /// Run one layout pass.
    pub fn compose<M: TextMeasurer + ?Sized>(
        layers: &[LayerDescriptor],
        context: &ProjectContext,
        view: &ViewState,
        options: &ComposeOptions,
        measurer: &mut M,
    ) -> LayoutPass {
        if layers.is_empty() {
            tracing::warn!("layout requested without layers");
            return LayoutPass {
                plan: CompositionPlan::default(),
                errors: vec![LayoutError::NoLayers],
            };
        }

        let resolver = PathResolver::new(context);
        let mut diagnostics = Diagnostics::default();
        let mut instructions = Vec::with_capacity(layers.len());
        let mut output_path = None;

        for (index, layer) in layers.iter().enumerate() {
            let role = LayerRole::for_index(index);

            let mut instruction = match layer.kind {
                LayerKind::Image => image_instruction(&resolver, layer, role, view),
                LayerKind::Text => text_instruction(
                    &resolver,
                    layer,
                    role,
                    view,
                    options,
                    measurer,
                    &mut diagnostics,
                ),
            };
            instruction.highlighted =
                role == LayerRole::Overlay && options.highlight_layer == Some(index);

            if instruction.fill == Fill::ErrorFill {
                tracing::warn!(
                    layer = index,
                    file = %layer.file,
                    "layer has no usable content, rendering error fill"
                );
            }

            if let Some(template) = output_designation(layer, role, options) {
                match template {
                    Some(t) if !t.is_empty() => {
                        // One export per view; overlays only assert that one exists.
                        if role == LayerRole::Background {
                            output_path = resolver.output_path(t, view);
                        }
                    }
                    _ => diagnostics.no_output_file(),
                }
            }

            instructions.push(instruction);
        }

        LayoutPass {
            plan: CompositionPlan {
                instructions,
                output_path,
            },
            errors: diagnostics.errors,
        }
    }
}

/// `None` when the layer does not produce export output; otherwise its effective template.
fn output_designation<'a>(
    layer: &'a LayerDescriptor,
    role: LayerRole,
    options: &'a ComposeOptions,
) -> Option<Option<&'a str>> {
    match role {
        LayerRole::Background => Some(
            layer
                .output_template
                .as_deref()
                .or(options.output_template.as_deref()),
        ),
        LayerRole::Overlay => layer.output_template.as_deref().map(Some),
    }
}

fn base_instruction(layer: &LayerDescriptor, role: LayerRole) -> RenderInstruction {
    RenderInstruction {
        kind: layer.kind,
        role,
        asset_path: None,
        asset_exists: false,
        text: None,
        font_family: None,
        effective_font_size: None,
        frame: layer.frame,
        rotation: layer.effective_rotation(),
        highlighted: false,
        fill: missing_fill(role),
    }
}

fn missing_fill(role: LayerRole) -> Fill {
    match role {
        LayerRole::Background => Fill::BackgroundFill,
        LayerRole::Overlay => Fill::ErrorFill,
    }
}

fn image_instruction(
    resolver: &PathResolver<'_>,
    layer: &LayerDescriptor,
    role: LayerRole,
    view: &ViewState,
) -> RenderInstruction {
    let mut out = base_instruction(layer, role);
    let path = resolver.resolve(&layer.file, view);
    out.asset_exists = path.as_deref().is_some_and(|p| p.is_file());
    out.asset_path = path;
    if out.asset_exists {
        out.fill = Fill::Asset;
    }
    out
}

fn text_instruction<M: TextMeasurer + ?Sized>(
    resolver: &PathResolver<'_>,
    layer: &LayerDescriptor,
    role: LayerRole,
    view: &ViewState,
    options: &ComposeOptions,
    measurer: &mut M,
    diagnostics: &mut Diagnostics,
) -> RenderInstruction {
    let mut out = base_instruction(layer, role);
    let path = resolver.resolve(&layer.file, view);
    out.asset_exists = path.as_deref().is_some_and(|p| p.is_file());

    let Some(text) = localization::lookup(path.as_deref(), view.image_index) else {
        out.asset_path = path;
        return out;
    };
    out.asset_path = path;

    let stylesheet_template = with_template_extension(&layer.file, STYLESHEET_EXTENSION);
    let stylesheet = resolver.resolve(&stylesheet_template, view);
    let styled = style::style(&text, stylesheet.as_deref());

    let family = layer.effective_font_family();
    let fit = FontFitter::fit(
        measurer,
        styled.plain_text(),
        layer.frame,
        layer.effective_font_size(),
        family,
    );
    if !fit.fits {
        if options.ignore_font_too_big {
            tracing::debug!(file = %layer.file, "font too big, suppressed");
        } else {
            diagnostics.font_too_big();
        }
    }

    out.font_family = Some(family.to_string());
    out.effective_font_size = Some(fit.font_size);
    out.text = Some(styled);
    out.fill = Fill::Text;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
