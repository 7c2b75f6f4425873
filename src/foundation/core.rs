use crate::foundation::error::{AlertError, AlertResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Lower bound of the normalized canvas coordinate space.
pub const PERCENT_MIN: f64 = 0.0;
/// Upper bound of the normalized canvas coordinate space.
pub const PERCENT_MAX: f64 = 100.0;

/// Clamp a percentage coordinate into `[0, 100]`.
///
/// Non-finite input collapses onto the nearest bound (`NaN` maps to `0`).
pub fn clamp_percent(v: f64) -> f64 {
    if v.is_nan() {
        return PERCENT_MIN;
    }
    v.clamp(PERCENT_MIN, PERCENT_MAX)
}

/// `true` when `v` is a finite value inside `[0, 100]`.
pub fn is_percent(v: f64) -> bool {
    v.is_finite() && (PERCENT_MIN..=PERCENT_MAX).contains(&v)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Rect", into = "Rect")]
/// Pixel bounding box of the authoring canvas, as reported by the host at gesture start.
pub struct Canvas {
    rect: Rect,
}

impl Canvas {
    /// Build a canvas from its pixel bounding box. Width and height must be positive.
    pub fn new(rect: Rect) -> AlertResult<Self> {
        let rect = rect.abs();
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            return Err(AlertError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { rect })
    }

    /// Canvas anchored at the origin with the given pixel size.
    pub fn from_size(width: f64, height: f64) -> AlertResult<Self> {
        Self::new(Rect::new(0.0, 0.0, width, height))
    }

    pub fn rect(self) -> Rect {
        self.rect
    }

    pub fn origin(self) -> Point {
        self.rect.origin()
    }

    pub fn size(self) -> Size {
        self.rect.size()
    }

    /// Absolute pixel position of a percentage coordinate.
    pub fn percent_to_px(self, x: f64, y: f64) -> Point {
        let size = self.size();
        self.origin() + Vec2::new(x / 100.0 * size.width, y / 100.0 * size.height)
    }

    /// Percentage coordinate of an absolute pixel position, clamped to `[0, 100]`.
    pub fn px_to_percent_clamped(self, p: Point) -> (f64, f64) {
        let size = self.size();
        let local = p - self.origin();
        (
            clamp_percent(local.x / size.width * 100.0),
            clamp_percent(local.y / size.height * 100.0),
        )
    }
}

impl TryFrom<Rect> for Canvas {
    type Error = AlertError;

    fn try_from(rect: Rect) -> AlertResult<Self> {
        Self::new(rect)
    }
}

impl From<Canvas> for Rect {
    fn from(canvas: Canvas) -> Self {
        canvas.rect
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
