use super::*;

#[test]
fn stylesheet_is_embedded_inline() {
    let dir = std::env::temp_dir().join(format!("shotframe_style_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let css_path = dir.join("title.css");
    std::fs::write(&css_path, "body { color: white; }").unwrap();

    let out = style("Hello", Some(&css_path));
    assert!(out.is_styled());
    assert_eq!(out.plain_text(), "Hello");
    let RenderableText::Styled { markup, stylesheet, .. } = out else {
        panic!("expected styled text");
    };
    assert_eq!(stylesheet, "body { color: white; }");
    assert_eq!(
        markup,
        "<html><head><style>body { color: white; }</style></head><body>Hello</body></html>"
    );
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_stylesheet_falls_back_to_plain() {
    let out = style("Hello", Some(Path::new("/no/such/title.css")));
    assert_eq!(
        out,
        RenderableText::Plain {
            text: "Hello".to_string()
        }
    );
    assert_eq!(style("Hello", None).plain_text(), "Hello");
}

#[test]
fn serializes_with_style_tag() {
    let json = serde_json::to_value(style("Hi", None)).unwrap();
    assert_eq!(json["style"], "plain");
    assert_eq!(json["text"], "Hi");
}
