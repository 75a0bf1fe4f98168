use std::path::Path;

use crate::foundation::{
    core::Size,
    error::{ShotframeError, ShotframeResult},
};

/// Measures the bounding box of text laid out at a size, wrapped to a width.
///
/// Implementations must be deterministic: equal inputs give equal sizes.
pub trait TextMeasurer {
    /// Bounding box of `text` in `font_family` at `size`, wrapped at `max_width`.
    fn measure(&mut self, text: &str, font_family: &str, size: f64, max_width: f64) -> Size;
}

impl<F> TextMeasurer for F
where
    F: FnMut(&str, &str, f64, f64) -> Size,
{
    fn measure(&mut self, text: &str, font_family: &str, size: f64, max_width: f64) -> Size {
        self(text, font_family, size, max_width)
    }
}

/// Fixed-advance approximation with greedy word wrapping.
///
/// Every character advances `size * advance_ratio`; every line is
/// `size * line_height_ratio` tall. Words longer than the width overflow their line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&mut self, text: &str, _font_family: &str, size: f64, max_width: f64) -> Size {
        let advance = size * self.advance_ratio;
        let mut widest = 0.0f64;
        let mut lines = 0usize;

        for paragraph in text.split('\n') {
            let mut line_w = 0.0f64;
            let mut line_has_words = false;
            for word in paragraph.split_whitespace() {
                let word_w = word.chars().count() as f64 * advance;
                if !line_has_words {
                    line_w = word_w;
                    line_has_words = true;
                } else if line_w + advance + word_w <= max_width {
                    line_w += advance + word_w;
                } else {
                    widest = widest.max(line_w);
                    lines += 1;
                    line_w = word_w;
                }
            }
            widest = widest.max(line_w);
            lines += 1;
        }

        Size::new(widest, lines.max(1) as f64 * size * self.line_height_ratio)
    }
}

/// Text measurement backed by Parley shaping and line breaking.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: Vec<String>,
}

impl std::fmt::Debug for ParleyMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasurer")
            .field("families", &self.families)
            .finish()
    }
}

impl ParleyMeasurer {
    /// Register every font blob in `fonts`. Fails when none yields a family.
    pub fn from_font_bytes(fonts: impl IntoIterator<Item = Vec<u8>>) -> ShotframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let mut families = Vec::<String>::new();
        for bytes in fonts {
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes), None);
            for (family_id, _) in registered {
                if let Some(name) = font_ctx.collection.family_name(family_id)
                    && !families.iter().any(|f| f == name)
                {
                    families.push(name.to_string());
                }
            }
        }
        if families.is_empty() {
            return Err(ShotframeError::validation(
                "no font families registered for text measurement",
            ));
        }
        tracing::debug!(?families, "registered measurement fonts");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            families,
        })
    }

    /// Register all `ttf`/`otf`/`ttc` files directly inside each of `dirs`.
    pub fn from_font_dirs<P: AsRef<Path>>(dirs: &[P]) -> ShotframeResult<Self> {
        let mut blobs = Vec::new();
        for dir in dirs {
            load_fonts_from_dir(&mut blobs, dir.as_ref());
        }
        Self::from_font_bytes(blobs)
    }

    /// Registered family names, in registration order.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Exact (case-insensitive) family match, else the first registered family.
    fn family_for(&self, requested: &str) -> &str {
        self.families
            .iter()
            .find(|f| f.eq_ignore_ascii_case(requested))
            .unwrap_or(&self.families[0])
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str, font_family: &str, size: f64, max_width: f64) -> Size {
        let family = self.family_for(font_family).to_string();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(Some(max_width as f32));

        let mut w = 0.0f64;
        let mut h = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            // Trailing spaces may hang past the wrap width; they are not ink.
            w = w.max(f64::from(m.advance - m.trailing_whitespace));
            h += f64::from(m.ascent + m.descent + m.leading);
        }
        Size::new(w, h)
    }
}

fn load_fonts_from_dir(out: &mut Vec<Vec<u8>>, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<_> = rd.flatten().map(|e| e.path()).collect();
    // read_dir order is platform dependent; registration order decides the fallback family.
    paths.sort();
    for path in paths {
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        match std::fs::read(&path) {
            Ok(bytes) => out.push(bytes),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
