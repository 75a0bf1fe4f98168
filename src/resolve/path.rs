use std::path::{Path, PathBuf};

use crate::foundation::core::{ProjectContext, ViewState};

/// Placeholder replaced with the decimal image index.
pub const IMAGE_TOKEN: &str = "$image";
/// Placeholder replaced with the selected language code.
pub const LANGUAGE_TOKEN: &str = "$language";

/// Resolves layer path templates to files under a project root.
///
/// Resolution only probes the filesystem for existence; it never writes.
#[derive(Clone, Copy, Debug)]
pub struct PathResolver<'a> {
    context: &'a ProjectContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(context: &'a ProjectContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'a ProjectContext {
        self.context
    }

    /// Resolve `template` for `view` using the four-step fallback search.
    ///
    /// Candidates, in order: (view language, base name), (view language, none),
    /// (no language, base name), (no language, none). The first one that is a regular
    /// file wins. When none exists the last candidate is returned anyway so callers can
    /// report which file is missing. Returns `None` only for an empty template or an
    /// unsaved project.
    pub fn resolve(&self, template: &str, view: &ViewState) -> Option<PathBuf> {
        if template.is_empty() {
            return None;
        }
        let root = self.context.project_root.as_deref()?;
        let base_name = self.context.project_base_name.as_deref();

        let attempts = [
            (view.language.as_str(), base_name),
            (view.language.as_str(), None),
            ("", base_name),
        ];
        for (language, specialization) in attempts {
            let candidate = candidate_path(root, template, view.image_index, language, specialization);
            let exists = candidate.is_file();
            tracing::trace!(candidate = %candidate.display(), exists, "probe asset candidate");
            if exists {
                tracing::debug!(template, resolved = %candidate.display(), "resolved asset");
                return Some(candidate);
            }
        }

        let fallback = candidate_path(root, template, view.image_index, "", None);
        tracing::debug!(
            template,
            resolved = %fallback.display(),
            exists = fallback.is_file(),
            "resolved asset to unspecialized fallback"
        );
        Some(fallback)
    }

    /// Export destination for `template` in `view`. No fallback search, no existence check.
    pub fn output_path(&self, template: &str, view: &ViewState) -> Option<PathBuf> {
        if template.is_empty() {
            return None;
        }
        let root = self.context.project_root.as_deref()?;
        Some(candidate_path(
            root,
            template,
            view.image_index,
            &view.language,
            None,
        ))
    }
}

/// Substitute placeholders in `template`. `$image` is replaced before `$language`.
pub fn substitute_placeholders(template: &str, image_index: u32, language: &str) -> String {
    let replaced = template
        .replace(IMAGE_TOKEN, &image_index.to_string())
        .replace(LANGUAGE_TOKEN, language);
    collapse_separators(&replaced)
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }
    out
}

fn candidate_path(
    root: &Path,
    template: &str,
    image_index: u32,
    language: &str,
    specialization: Option<&str>,
) -> PathBuf {
    let rel = substitute_placeholders(template, image_index, language);
    // A template starting with an empty `$language` segment must stay under the root.
    let path = root.join(rel.trim_start_matches('/'));
    match specialization {
        Some(suffix) => specialize(&path, suffix),
        None => path,
    }
}

/// Insert `-<suffix>` before the extension of the final path component.
pub fn specialize(path: &Path, suffix: &str) -> PathBuf {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return path.to_path_buf();
    };
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-{suffix}.{ext}"),
        None => format!("{stem}-{suffix}"),
    };
    path.with_file_name(file_name)
}

/// Swap the extension of a path template, leaving placeholders intact.
pub fn with_template_extension(template: &str, extension: &str) -> String {
    let name_start = template.rfind('/').map_or(0, |i| i + 1);
    match template[name_start..].rfind('.') {
        Some(dot) if dot > 0 => format!("{}.{extension}", &template[..name_start + dot]),
        _ => format!("{template}.{extension}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/path.rs"]
mod tests;
