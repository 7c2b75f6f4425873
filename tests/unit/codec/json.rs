use super::*;
use crate::layout::model::{ElementTemplate, add, default_elements, find};

#[test]
fn export_import_roundtrip_is_identity() {
    let (els, _) = add(&default_elements(), ElementTemplate::text());
    let mut els = els;
    els.push(AlertElement {
        id: "bg".to_string(),
        x: 0.0,
        y: 0.0,
        width: Some(800.0),
        height: Some(600.0),
        visible: false,
        z_index: -1,
        protected: false,
        kind: ElementKind::Background(BackgroundStyle {
            background_color: Some("#1F2937".to_string()),
            image_url: None,
            border_radius: Some(12.0),
        }),
    });

    let raw = export(&els).unwrap();
    assert_eq!(import(&raw).unwrap(), els);
}

#[test]
fn dragged_positions_survive_roundtrip_bit_exact() {
    use crate::foundation::core::{Canvas, Point};

    let canvas = Canvas::from_size(1337.0, 771.0).unwrap();
    let template = find(&default_elements(), "donor-info").unwrap().clone();
    let els: Vec<AlertElement> = (0..5000u32)
        .map(|i| {
            let p = Point::new(1.0 + f64::from(i) * 0.0617, 3.0 + f64::from(i) * 0.0371);
            let (x, y) = canvas.px_to_percent_clamped(p);
            AlertElement {
                id: format!("el-{i}"),
                x,
                y,
                ..template.clone()
            }
        })
        .collect();

    let back = import(&export(&els).unwrap()).unwrap();
    assert_eq!(back.len(), els.len());
    for (a, b) in els.iter().zip(&back) {
        assert_eq!(
            (a.x.to_bits(), a.y.to_bits()),
            (b.x.to_bits(), b.y.to_bits()),
            "{}",
            a.id
        );
    }
    assert_eq!(back, els);
}

#[test]
fn export_is_versioned_and_flat() {
    let raw = export(&default_elements()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["version"], LAYOUT_SCHEMA_VERSION);
    let first = &v["elements"][0];
    assert_eq!(first["id"], "animation");
    assert_eq!(first["type"], "image");
    assert_eq!(first["zIndex"], 3);
    assert!(first.get("content").is_none());
    assert!(first["imageUrl"].is_string());
}

#[test]
fn legacy_bare_array_is_accepted() {
    let raw = r##"[
        {"id": "donor-info", "type": "text", "x": 50, "y": 35, "visible": true, "zIndex": 2,
         "content": "{donor_name} - {amount}₽", "fontSize": 32, "color": "#ffffff"},
        {"id": "extra", "type": "image", "x": 15, "y": 15, "visible": true, "zIndex": 4,
         "imageUrl": "https://example.test/a.gif", "content": "ignored"}
    ]"##;
    let els = import(raw).unwrap();
    assert_eq!(els.len(), 2);
    assert!(find(&els, "donor-info").unwrap().protected);
    let extra = find(&els, "extra").unwrap();
    assert!(!extra.protected);
    assert_eq!(extra.text_content(), None);
}

#[test]
fn explicit_protected_flag_wins() {
    let raw = r#"[{"id": "animation", "type": "image", "x": 1, "y": 2, "zIndex": 1, "protected": false}]"#;
    let els = import(raw).unwrap();
    assert!(!els[0].protected);
    assert!(els[0].visible);
}

#[test]
fn malformed_inputs_are_typed_errors() {
    let cases = [
        "not json",
        r#"{"id": "x"}"#,
        r#"{"version": 99, "elements": []}"#,
        r#"{"version": 1}"#,
        "42",
        r#"[{"type": "text", "x": 1, "y": 1}]"#,
        r#"[{"id": "a", "x": 1, "y": 1}]"#,
        r#"[{"id": "a", "type": "video", "x": 1, "y": 1}]"#,
        r#"[{"id": "a", "type": "text"}, {"id": "a", "type": "image"}]"#,
        r#"[{"id": "  ", "type": "text"}]"#,
    ];
    for raw in cases {
        let err = import(raw).unwrap_err();
        assert!(
            matches!(err, AlertError::MalformedImport(_)),
            "{raw}: unexpected {err:?}"
        );
    }
}

#[test]
fn normalize_defaults_only_when_empty() {
    assert_eq!(normalize(None), default_elements());
    assert_eq!(normalize(Some(&[][..])), default_elements());
    let one = vec![default_elements().remove(1)];
    assert_eq!(normalize(Some(one.as_slice())), one);
}

#[test]
fn export_file_name_convention() {
    assert_eq!(export_file_name("Big"), "alert-layout-Big.json");
    assert_eq!(export_file_name("a/b"), "alert-layout-a_b.json");
    assert_eq!(export_file_name("  "), "alert-layout-layout.json");
}
