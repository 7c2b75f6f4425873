use super::*;

#[test]
fn clamp_percent_bounds_and_nan() {
    assert_eq!(clamp_percent(-5.0), 0.0);
    assert_eq!(clamp_percent(250.0), 100.0);
    assert_eq!(clamp_percent(42.5), 42.5);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
    assert_eq!(clamp_percent(f64::INFINITY), 100.0);
    assert_eq!(clamp_percent(f64::NEG_INFINITY), 0.0);
}

#[test]
fn is_percent_rejects_out_of_range() {
    assert!(is_percent(0.0));
    assert!(is_percent(100.0));
    assert!(!is_percent(100.5));
    assert!(!is_percent(f64::NAN));
}

#[test]
fn canvas_rejects_degenerate_rect() {
    assert!(Canvas::from_size(0.0, 600.0).is_err());
    assert!(Canvas::from_size(800.0, 0.0).is_err());
    assert!(Canvas::from_size(800.0, 600.0).is_ok());
}

#[test]
fn percent_px_conversion_respects_origin() {
    let canvas = Canvas::new(Rect::new(100.0, 50.0, 900.0, 650.0)).unwrap();
    let p = canvas.percent_to_px(50.0, 10.0);
    assert_eq!(p, Point::new(500.0, 110.0));
    assert_eq!(canvas.px_to_percent_clamped(p), (50.0, 10.0));
    assert_eq!(
        canvas.px_to_percent_clamped(Point::new(-4000.0, 9000.0)),
        (0.0, 100.0)
    );
}

#[test]
fn deserialized_canvas_is_validated() {
    let flat = serde_json::to_value(Rect::new(0.0, 0.0, 0.0, 600.0)).unwrap();
    assert!(serde_json::from_value::<Canvas>(flat).is_err());

    let canvas = Canvas::new(Rect::new(10.0, 20.0, 810.0, 620.0)).unwrap();
    let v = serde_json::to_value(canvas).unwrap();
    assert_eq!(v, serde_json::to_value(canvas.rect()).unwrap());
    assert_eq!(serde_json::from_value::<Canvas>(v).unwrap(), canvas);
}
