use std::path::{Path, PathBuf};

pub use kurbo::{Rect, Size};

/// Name of the directory holding unframed screenshots inside a project.
pub const RAW_SCREENSHOTS_DIR: &str = "raw";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// The (language, image index) pair selecting which variant of each asset to use.
pub struct ViewState {
    /// Selected language code; empty means "no language".
    #[serde(default)]
    pub language: String,
    /// Selected image number.
    #[serde(default)]
    pub image_index: u32,
}

impl ViewState {
    /// Build a view state from a language code and an image index.
    pub fn new(language: impl Into<String>, image_index: u32) -> Self {
        Self {
            language: language.into(),
            image_index,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Properties that only become known once a project has been saved.
///
/// An unsaved project has no root; every resolution against it yields nothing.
pub struct ProjectContext {
    /// Directory the project file lives in.
    pub project_root: Option<PathBuf>,
    /// Project file name without extension, used as the specialization suffix.
    pub project_base_name: Option<String>,
}

impl ProjectContext {
    /// Context for a project rooted at `root` with an optional base name.
    pub fn new(root: impl Into<PathBuf>, base_name: Option<String>) -> Self {
        Self {
            project_root: Some(root.into()),
            project_base_name: base_name,
        }
    }

    /// Context for a project that has not been saved yet.
    pub fn unsaved() -> Self {
        Self::default()
    }

    /// Derive root and base name from the location of a project file.
    pub fn for_project_file(path: &Path) -> Self {
        let root = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let base_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            project_root: Some(root),
            project_base_name: base_name,
        }
    }

    /// `<root>/raw`, when the project has a root.
    pub fn raw_screenshots_dir(&self) -> Option<PathBuf> {
        self.project_root
            .as_ref()
            .map(|root| root.join(RAW_SCREENSHOTS_DIR))
    }
}

/// Whether `measured` fits inside `frame` in both dimensions.
pub fn size_fits(measured: Size, frame: Size) -> bool {
    measured.width <= frame.width && measured.height <= frame.height
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
