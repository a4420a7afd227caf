//! Integration tests for the LayoutBuilder API

use boxnest::{
    BoxnestError, LayoutBuilder,
    config::{AppConfig, DocumentConfig, RenderConfig},
    element::Element,
    geometry::BBox,
};

fn render(source: &str) -> String {
    let builder = LayoutBuilder::default();
    let batch = builder.parse(source).expect("Failed to parse");
    let tree = builder.build(batch.elements().to_vec());
    builder.render_fragment(&tree).expect("Failed to render")
}

#[test]
fn test_header_wraps_button() {
    let html = render(
        r#"{"annotations": [
            {"class": "header", "class_id": 5, "bbox": [0, 0, 100, 20]},
            {"class": "button", "class_id": 0, "bbox": [10, 5, 40, 15]}
        ]}"#,
    );

    let mut lines = html.lines();
    assert!(lines.next().unwrap().starts_with("<header "));
    assert!(lines.next().unwrap().starts_with("  <button "));
    assert_eq!(lines.next(), Some("  </button>"));
    assert_eq!(lines.next(), Some("</header>"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_invalid_box_excluded_and_reported() {
    let builder = LayoutBuilder::default();
    let batch = builder
        .parse(
            r#"{"annotations": [
                {"class": "header", "bbox": [0, 0, 100, 20]},
                {"class": "div", "bbox": [50, 50, 10, 10]},
                {"class": "button", "bbox": [10, 5, 40, 15]}
            ]}"#,
        )
        .unwrap();
    let tree = builder.build(batch.elements().to_vec());

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.rejections().len(), 1);
    assert_eq!(tree.rejections()[0].index(), 1);

    let html = builder.render_fragment(&tree).unwrap();
    assert!(!html.contains("data-type='div'"));
    assert!(html.contains("data-type='button'"));
    assert!(builder.check(&tree).is_ok());
}

#[test]
fn test_root_is_never_rendered() {
    let html = render(r#"[{"class": "text", "bbox": [0, 0, 40, 10]}]"#);

    assert_eq!(html.lines().count(), 2);
    assert!(html.starts_with("<span "));
    assert!(!html.contains("root"));
}

#[test]
fn test_empty_batch_renders_empty_fragment() {
    assert_eq!(render(r#"{"annotations": []}"#), "");
}

#[test]
fn test_malformed_entries_skipped() {
    let builder = LayoutBuilder::default();
    let batch = builder
        .parse(
            r#"{"annotations": [
                {"bbox": [0, 0, 10, 10]},
                {"class": "text", "bbox": [0, 0, 10]},
                {"class": "icon", "bbox": [0, 0, 10, 10]}
            ]}"#,
        )
        .unwrap();

    assert_eq!(batch.elements().len(), 1);
    assert_eq!(batch.warnings().len(), 2);
}

#[test]
fn test_invalid_json_is_fatal() {
    let builder = LayoutBuilder::default();
    let result = builder.parse("{\"annotations\": [");

    match result {
        Err(BoxnestError::Parse { err, src }) => {
            assert!(!err.diagnostics().is_empty());
            assert_eq!(src, "{\"annotations\": [");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_strict_parse_fails_on_skipped_entries() {
    let builder = LayoutBuilder::default().with_strict(true);
    let result = builder.parse(r#"[{"class": "text"}, {"class": "icon", "bbox": [0, 0, 5, 5]}]"#);

    match result {
        Err(BoxnestError::Parse { err, .. }) => {
            assert_eq!(err.diagnostics().len(), 1);
            assert!(!err.is_fatal());
            assert_eq!(err.diagnostics()[0].entry(), Some(0));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_strict_check() {
    let builder = LayoutBuilder::default().with_strict(true);

    let tree = builder.build(vec![
        Element::new("header", BBox::new(0, 0, 100, 20)),
        Element::new("div", BBox::new(50, 50, 10, 10)),
    ]);
    assert!(matches!(
        builder.check(&tree),
        Err(BoxnestError::Rejected(_))
    ));

    let empty = builder.build(Vec::new());
    assert!(matches!(
        builder.check(&empty),
        Err(BoxnestError::Rejected(_))
    ));

    let clean = builder.build(vec![Element::new("header", BBox::new(0, 0, 100, 20))]);
    assert!(builder.check(&clean).is_ok());
}

#[test]
fn test_input_order_does_not_matter() {
    let elements = vec![
        Element::new("section", BBox::new(0, 100, 800, 600)),
        Element::new("header", BBox::new(0, 0, 800, 80)),
        Element::new("button", BBox::new(600, 20, 700, 60)),
        Element::new("image", BBox::new(20, 120, 380, 400)),
        Element::new("paragraph", BBox::new(420, 120, 780, 300)),
        Element::new("icon", BBox::new(20, 20, 60, 60)),
    ];

    let builder = LayoutBuilder::default();
    let forward = builder
        .render_fragment(&builder.build(elements.clone()))
        .unwrap();
    let reversed = builder
        .render_fragment(&builder.build(elements.into_iter().rev().collect()))
        .unwrap();

    assert_eq!(forward, reversed);
}

#[test]
fn test_render_html_document() {
    let config = AppConfig::new(
        RenderConfig::default().with_indent_width(4),
        DocumentConfig::default().with_title("Landing"),
    );
    let builder = LayoutBuilder::new(config);
    let tree = builder.build(vec![
        Element::new("section", BBox::new(0, 0, 400, 400)),
        Element::new("heading", BBox::new(20, 20, 380, 60)),
    ]);

    let html = builder.render_html(&tree).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Landing</title>"));
    assert!(html.contains("\n    <h2 "));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_render_outline() {
    let builder = LayoutBuilder::default();
    let tree = builder.build(vec![
        Element::new("header", BBox::new(0, 0, 100, 20)).with_class_id(5),
        Element::new("button", BBox::new(10, 5, 40, 15)),
    ]);

    let outline = builder.render_outline(&tree);
    assert!(outline.contains("header [0, 0, 100, 20] id=5"));
    assert!(outline.contains("  button [10, 5, 40, 15]"));
}

#[test]
fn test_builder_reusability() {
    let builder = LayoutBuilder::default();

    let first = builder.build(vec![Element::new("text", BBox::new(0, 0, 10, 10))]);
    let second = builder.build(vec![Element::new("icon", BBox::new(0, 0, 10, 10))]);

    assert!(builder.render_fragment(&first).unwrap().contains("data-type='text'"));
    assert!(builder.render_fragment(&second).unwrap().contains("data-type='icon'"));
}

#[test]
fn test_bad_escape_next_to_accented_text_is_reported() {
    let builder = LayoutBuilder::default();

    let result = builder.parse("[\"\\u12\u{e9}\"]");

    assert!(matches!(result, Err(BoxnestError::Parse { err, .. }) if err.is_fatal()));
}

#[test]
fn test_extreme_coordinates_build_and_render() {
    let builder = LayoutBuilder::default();
    let batch = builder
        .parse(r#"[{"class":"div","bbox":[-2000000000,0,2000000000,10]}]"#)
        .unwrap();
    assert!(batch.warnings().is_empty());

    let tree = builder.build(batch.elements().to_vec());

    assert_eq!(tree.len(), 1);
    assert!(tree.rejections().is_empty());
    assert!(builder.render_fragment(&tree).unwrap().contains("data-type='div'"));
}
