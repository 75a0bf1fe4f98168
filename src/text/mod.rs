pub(crate) mod fit;
pub(crate) mod localization;
pub(crate) mod measure;
pub(crate) mod style;
