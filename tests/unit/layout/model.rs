use super::*;

fn ids(els: &[AlertElement]) -> Vec<&str> {
    els.iter().map(|e| e.id.as_str()).collect()
}

fn text(id: &str, z: i64) -> AlertElement {
    AlertElement {
        id: id.to_string(),
        x: 10.0,
        y: 10.0,
        width: None,
        height: None,
        visible: true,
        z_index: z,
        protected: false,
        kind: ElementKind::Text(TextStyle::default()),
    }
}

#[test]
fn defaults_match_canonical_geometry() {
    let els = with_defaults(None);
    assert_eq!(ids(&els), CANONICAL_IDS.to_vec());

    let geom: Vec<_> = els
        .iter()
        .map(|e| (e.element_type(), e.x, e.y, e.width, e.height, e.z_index))
        .collect();
    assert_eq!(
        geom,
        vec![
            (ElementType::Image, 50.0, 10.0, Some(120.0), Some(120.0), 3),
            (ElementType::Text, 50.0, 35.0, Some(500.0), Some(60.0), 2),
            (ElementType::Text, 50.0, 55.0, Some(600.0), Some(80.0), 1),
        ]
    );
    assert!(els.iter().all(|e| e.protected && e.visible));
}

#[test]
fn defaults_are_idempotent() {
    let once = with_defaults(None);
    let twice = with_defaults(Some(once.as_slice()));
    assert_eq!(once, twice);
    assert_eq!(with_defaults(Some(&[][..])), once);
}

#[test]
fn with_defaults_passes_existing_through() {
    let custom = vec![text("a", 1)];
    assert_eq!(with_defaults(Some(custom.as_slice())), custom);
}

#[test]
fn upsert_merges_and_ignores_unknown_id() {
    let els = default_elements();
    let moved = upsert(&els, DONOR_INFO_ID, &ElementPatch::position(20.0, 80.0));
    let el = find(&moved, DONOR_INFO_ID).unwrap();
    assert_eq!((el.x, el.y), (20.0, 80.0));
    assert_eq!(el.width, Some(500.0));
    assert_eq!(el.text_content(), None);

    assert_eq!(upsert(&els, "missing", &ElementPatch::visible(false)), els);
}

#[test]
fn upsert_ignores_fields_of_other_kinds() {
    let els = default_elements();
    let patch = ElementPatch {
        content: Some("nope".to_string()),
        image_url: Some("https://example.test/a.gif".to_string()),
        ..ElementPatch::default()
    };
    let out = upsert(&els, ANIMATION_ID, &patch);
    let anim = find(&out, ANIMATION_ID).unwrap();
    assert_eq!(anim.text_content(), None);
    match &anim.kind {
        ElementKind::Image(i) => {
            assert_eq!(i.image_url.as_deref(), Some("https://example.test/a.gif"))
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn remove_filters_even_protected_ids() {
    let out = remove(&default_elements(), ANIMATION_ID);
    assert_eq!(ids(&out), vec![DONOR_INFO_ID, MESSAGE_TEXT_ID]);
}

#[test]
fn reorder_then_render_order_follows_sequence() {
    let els = vec![text("a", 1), text("b", 1), text("c", 1)];
    let out = reorder_by_explicit_sequence(&els, &["c", "a", "b"]);
    assert_eq!(ids(&render_order(&out)), vec!["c", "a", "b"]);
    // Storage order is untouched.
    assert_eq!(ids(&out), vec!["a", "b", "c"]);
}

#[test]
fn reorder_partial_leaves_others_alone() {
    let els = vec![text("a", 7), text("b", 1), text("c", 1)];
    let out = reorder_by_explicit_sequence(&els, &["c", "b"]);
    let z: Vec<_> = out.iter().map(|e| e.z_index).collect();
    assert_eq!(z, vec![7, 1, 2]);
}

#[test]
fn render_order_is_stable_for_ties() {
    let els = vec![text("a", 1), text("b", 5), text("c", 1), text("d", 5)];
    assert_eq!(ids(&render_order(&els)), vec!["b", "d", "a", "c"]);
}

#[test]
fn add_allocates_free_id_and_top_z() {
    let (els, id) = add(&default_elements(), ElementTemplate::text());
    assert_eq!(id, "element-1");
    let added = find(&els, &id).unwrap();
    assert_eq!(added.z_index, 4);
    assert!(!added.protected);

    let (els, id2) = add(&els, ElementTemplate::image("https://example.test/x.gif"));
    assert_eq!(id2, "element-2");
    assert_eq!(find(&els, &id2).unwrap().z_index, 5);

    let (empty_added, _) = add(&[], ElementTemplate::text());
    assert_eq!(empty_added[0].z_index, 1);
}

#[test]
fn validate_catches_duplicates_and_out_of_range() {
    assert!(validate(&default_elements()).is_ok());
    assert!(validate(&[text("a", 1), text("a", 2)]).is_err());

    let mut bad = text("a", 1);
    bad.x = 140.0;
    assert!(validate(&[bad]).is_err());

    let mut zero = text("a", 1);
    zero.width = Some(0.0);
    assert!(validate(&[zero]).is_err());
}

#[test]
fn backgrounds_are_not_draggable() {
    let mut bg = text("bg", 0);
    bg.kind = ElementKind::Background(BackgroundStyle::default());
    assert!(!bg.is_draggable());
    assert!(text("t", 0).is_draggable());
}
