use super::*;

#[test]
fn context_from_project_file_uses_parent_and_stem() {
    let ctx = ProjectContext::for_project_file(Path::new("/work/shots/Proj.json"));
    assert_eq!(ctx.project_root, Some(PathBuf::from("/work/shots")));
    assert_eq!(ctx.project_base_name.as_deref(), Some("Proj"));
    assert_eq!(
        ctx.raw_screenshots_dir(),
        Some(PathBuf::from("/work/shots/raw"))
    );
}

#[test]
fn bare_file_name_roots_at_current_dir() {
    let ctx = ProjectContext::for_project_file(Path::new("Proj.json"));
    assert_eq!(ctx.project_root, Some(PathBuf::from(".")));
}

#[test]
fn unsaved_context_has_no_raw_dir() {
    assert_eq!(ProjectContext::unsaved().raw_screenshots_dir(), None);
}

#[test]
fn size_fits_is_inclusive_on_both_axes() {
    let frame = Size::new(100.0, 20.0);
    assert!(size_fits(Size::new(100.0, 20.0), frame));
    assert!(!size_fits(Size::new(100.5, 10.0), frame));
    assert!(!size_fits(Size::new(10.0, 20.5), frame));
}
