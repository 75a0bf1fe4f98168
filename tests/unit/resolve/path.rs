use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "shotframe_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn touch(root: &Path, rel: &str) {
    let p = root.join(rel);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(p, b"x").unwrap();
}

fn fixture(name: &str, files: &[&str]) -> (PathBuf, ProjectContext) {
    let root = temp_dir(name);
    std::fs::create_dir_all(&root).unwrap();
    for f in files {
        touch(&root, f);
    }
    let ctx = ProjectContext::new(&root, Some("Proj".to_string()));
    (root, ctx)
}

#[test]
fn prefers_specialized_file() {
    let (root, ctx) = fixture("resolve_specialized", &["art/3-Proj.png", "art/3.png"]);
    let view = ViewState::new("en", 3);
    let got = PathResolver::new(&ctx).resolve("art/$image.png", &view);
    assert_eq!(got, Some(root.join("art/3-Proj.png")));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn falls_back_to_plain_file() {
    let (root, ctx) = fixture("resolve_plain", &["art/3.png"]);
    let view = ViewState::new("en", 3);
    let got = PathResolver::new(&ctx).resolve("art/$image.png", &view);
    assert_eq!(got, Some(root.join("art/3.png")));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_everywhere_returns_unspecialized_path() {
    let (root, ctx) = fixture("resolve_missing", &[]);
    let view = ViewState::new("en", 3);
    let got = PathResolver::new(&ctx).resolve("art/$image.png", &view).unwrap();
    assert_eq!(got, root.join("art/3.png"));
    assert!(!got.exists());
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn language_candidates_beat_language_free_ones() {
    let (root, ctx) = fixture(
        "resolve_language_order",
        &["text/de/title.strings", "text/title-Proj.strings"],
    );
    let resolver = PathResolver::new(&ctx);

    let de = resolver.resolve("text/$language/title.strings", &ViewState::new("de", 1));
    assert_eq!(de, Some(root.join("text/de/title.strings")));

    // No `fr` folder: the language-free specialized file is next in line.
    let fr = resolver.resolve("text/$language/title.strings", &ViewState::new("fr", 1));
    assert_eq!(fr, Some(root.join("text/title-Proj.strings")));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn language_specialized_file_ranks_first() {
    let (root, ctx) = fixture(
        "resolve_language_specialized",
        &["text/en/title-Proj.strings", "text/en/title.strings"],
    );
    let got = PathResolver::new(&ctx).resolve("text/$language/title.strings", &ViewState::new("en", 0));
    assert_eq!(got, Some(root.join("text/en/title-Proj.strings")));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn directories_do_not_count_as_files() {
    let (root, ctx) = fixture("resolve_dir", &["art/3.png"]);
    std::fs::create_dir_all(root.join("art/3-Proj.png")).unwrap();
    let got = PathResolver::new(&ctx).resolve("art/$image.png", &ViewState::new("", 3));
    assert_eq!(got, Some(root.join("art/3.png")));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn empty_template_resolves_to_nothing() {
    let ctx = ProjectContext::new("/tmp", Some("Proj".to_string()));
    assert_eq!(PathResolver::new(&ctx).resolve("", &ViewState::new("en", 1)), None);
    assert_eq!(
        PathResolver::new(&ProjectContext::unsaved()).resolve("", &ViewState::default()),
        None
    );
}

#[test]
fn unsaved_project_resolves_to_nothing() {
    let ctx = ProjectContext::unsaved();
    let got = PathResolver::new(&ctx).resolve("art/$image.png", &ViewState::new("en", 1));
    assert_eq!(got, None);
}

#[test]
fn image_is_substituted_before_language() {
    assert_eq!(substitute_placeholders("$language/$image", 7, "x$image"), "x$image/7");
    assert_eq!(substitute_placeholders("a/$language/b.png", 1, ""), "a/b.png");
    assert_eq!(substitute_placeholders("a///b", 1, ""), "a/b");
}

#[test]
fn empty_leading_language_stays_under_root() {
    let ctx = ProjectContext::new("/proj", None);
    let got = PathResolver::new(&ctx).resolve("$language/bg.png", &ViewState::default());
    assert_eq!(got, Some(PathBuf::from("/proj/bg.png")));
}

#[test]
fn specialization_goes_before_extension() {
    assert_eq!(
        specialize(Path::new("/p/icon.png"), "Proj"),
        PathBuf::from("/p/icon-Proj.png")
    );
    assert_eq!(
        specialize(Path::new("/p/LICENSE"), "Proj"),
        PathBuf::from("/p/LICENSE-Proj")
    );
}

#[test]
fn template_extension_swap_keeps_placeholders() {
    assert_eq!(
        with_template_extension("text/$language/title.strings", "css"),
        "text/$language/title.css"
    );
    assert_eq!(with_template_extension("v1.2/title", "css"), "v1.2/title.css");
}

#[test]
fn output_path_uses_view_language_without_fallback() {
    let ctx = ProjectContext::new("/proj", Some("Proj".to_string()));
    let resolver = PathResolver::new(&ctx);
    let view = ViewState::new("de", 2);
    assert_eq!(
        resolver.output_path("Export/$language/iPhone-$image framed.png", &view),
        Some(PathBuf::from("/proj/Export/de/iPhone-2 framed.png"))
    );
    assert_eq!(resolver.output_path("", &view), None);
    assert_eq!(
        PathResolver::new(&ProjectContext::unsaved()).output_path("out.png", &view),
        None
    );
}
