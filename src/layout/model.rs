use std::collections::BTreeSet;

use crate::foundation::{
    core::is_percent,
    error::{AlertError, AlertResult},
};

/// Id of the canonical animation (GIF) element.
pub const ANIMATION_ID: &str = "animation";
/// Id of the canonical donor name + amount element.
pub const DONOR_INFO_ID: &str = "donor-info";
/// Id of the canonical donor message element.
pub const MESSAGE_TEXT_ID: &str = "message-text";
/// Canonical element ids, top to bottom.
pub const CANONICAL_IDS: [&str; 3] = [ANIMATION_ID, DONOR_INFO_ID, MESSAGE_TEXT_ID];

/// Stock GIF used by the default animation element.
pub const DEFAULT_GIF_URL: &str = "https://media.giphy.com/media/26u4cqiYI30juCOGY/giphy.gif";

/// `true` for the ids synthesized by [`default_elements`].
pub fn is_canonical_id(id: &str) -> bool {
    CANONICAL_IDS.contains(&id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Discriminant of [`ElementKind`], as written on the wire.
pub enum ElementType {
    /// Text block; center-anchored.
    Text,
    /// Image or GIF; center-anchored.
    Image,
    /// Full background layer; top-left anchored and never draggable.
    Background,
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Background => "background",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Presentation attributes of a text element.
pub struct TextStyle {
    /// Template resolved at compose time. `None` falls back to the tier template.
    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_radius: Option<f64>,
    pub padding: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Presentation attributes of an image element.
pub struct ImageStyle {
    pub image_url: Option<String>,
    pub border_radius: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Presentation attributes of a background element.
pub struct BackgroundStyle {
    pub background_color: Option<String>,
    pub image_url: Option<String>,
    pub border_radius: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
/// Type-specific part of an element. Each variant carries only the attributes it uses.
pub enum ElementKind {
    /// Text block.
    Text(TextStyle),
    /// Image or GIF.
    Image(ImageStyle),
    /// Background layer.
    Background(BackgroundStyle),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Image(_) => ElementType::Image,
            Self::Background(_) => ElementType::Background,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(
    try_from = "crate::codec::json::WireElement",
    into = "crate::codec::json::WireElement"
)]
/// One positioned visual primitive of an alert layout.
///
/// `x`/`y` are percentages of the canvas size. Text and image elements are
/// anchored at their center, backgrounds at their top-left corner.
pub struct AlertElement {
    /// Unique within one layout.
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Pixel width; `None` means intrinsic.
    pub width: Option<f64>,
    /// Pixel height; `None` means intrinsic.
    pub height: Option<f64>,
    /// Hidden elements stay in the layout but are not rendered.
    pub visible: bool,
    /// Paint order; higher is on top.
    pub z_index: i64,
    /// Consumers should refuse to delete protected elements.
    pub protected: bool,
    pub kind: ElementKind,
}

impl AlertElement {
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Backgrounds are pinned; everything else can be dragged.
    pub fn is_draggable(&self) -> bool {
        self.element_type() != ElementType::Background
    }

    /// Text template of a text element.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(t) => t.content.as_deref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Partial update shallow-merged into an element by [`upsert`].
///
/// Fields for attributes the target kind does not have are ignored.
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub visible: Option<bool>,
    pub z_index: Option<i64>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_radius: Option<f64>,
    pub padding: Option<f64>,
}

impl ElementPatch {
    /// Patch that moves an element.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Patch that resizes an element.
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Patch that shows or hides an element.
    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    fn apply(&self, el: &mut AlertElement) {
        fn set<T: Clone>(dst: &mut T, src: &Option<T>) {
            if let Some(v) = src {
                *dst = v.clone();
            }
        }
        fn set_opt<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if src.is_some() {
                dst.clone_from(src);
            }
        }

        set(&mut el.x, &self.x);
        set(&mut el.y, &self.y);
        set_opt(&mut el.width, &self.width);
        set_opt(&mut el.height, &self.height);
        set(&mut el.visible, &self.visible);
        set(&mut el.z_index, &self.z_index);

        match &mut el.kind {
            ElementKind::Text(t) => {
                set_opt(&mut t.content, &self.content);
                set_opt(&mut t.font_size, &self.font_size);
                set_opt(&mut t.color, &self.color);
                set_opt(&mut t.background_color, &self.background_color);
                set_opt(&mut t.border_radius, &self.border_radius);
                set_opt(&mut t.padding, &self.padding);
            }
            ElementKind::Image(i) => {
                set_opt(&mut i.image_url, &self.image_url);
                set_opt(&mut i.border_radius, &self.border_radius);
            }
            ElementKind::Background(b) => {
                set_opt(&mut b.background_color, &self.background_color);
                set_opt(&mut b.image_url, &self.image_url);
                set_opt(&mut b.border_radius, &self.border_radius);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Blueprint for [`add`]; everything except the id and z-order.
pub struct ElementTemplate {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub visible: bool,
    pub kind: ElementKind,
}

impl ElementTemplate {
    /// Extra text block, as offered by the layer panel.
    pub fn text() -> Self {
        Self {
            x: 50.0,
            y: 75.0,
            width: Some(400.0),
            height: Some(50.0),
            visible: true,
            kind: ElementKind::Text(TextStyle {
                content: Some("Дополнительный текст".to_string()),
                font_size: Some(20.0),
                color: Some("#ffffff".to_string()),
                background_color: Some("rgba(0,0,0,0.3)".to_string()),
                border_radius: Some(6.0),
                padding: Some(10.0),
            }),
        }
    }

    /// Extra image/GIF in the upper-left area.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            x: 15.0,
            y: 15.0,
            width: Some(100.0),
            height: Some(100.0),
            visible: true,
            kind: ElementKind::Image(ImageStyle {
                image_url: Some(url.into()),
                border_radius: None,
            }),
        }
    }
}

/// The canonical three-element layout: animation, donor info, message.
pub fn default_elements() -> Vec<AlertElement> {
    vec![
        AlertElement {
            id: ANIMATION_ID.to_string(),
            x: 50.0,
            y: 10.0,
            width: Some(120.0),
            height: Some(120.0),
            visible: true,
            z_index: 3,
            protected: true,
            kind: ElementKind::Image(ImageStyle {
                image_url: Some(DEFAULT_GIF_URL.to_string()),
                border_radius: None,
            }),
        },
        AlertElement {
            id: DONOR_INFO_ID.to_string(),
            x: 50.0,
            y: 35.0,
            width: Some(500.0),
            height: Some(60.0),
            visible: true,
            z_index: 2,
            protected: true,
            // No own template: the slot shows the tier-wide text.
            kind: ElementKind::Text(TextStyle {
                content: None,
                font_size: Some(32.0),
                color: Some("#ffffff".to_string()),
                background_color: Some("rgba(0,0,0,0.2)".to_string()),
                border_radius: Some(8.0),
                padding: Some(12.0),
            }),
        },
        AlertElement {
            id: MESSAGE_TEXT_ID.to_string(),
            x: 50.0,
            y: 55.0,
            width: Some(600.0),
            height: Some(80.0),
            visible: true,
            z_index: 1,
            protected: true,
            kind: ElementKind::Text(TextStyle {
                content: Some("{message}".to_string()),
                font_size: Some(24.0),
                color: Some("#ffffff".to_string()),
                background_color: Some("rgba(0,0,0,0.1)".to_string()),
                border_radius: Some(6.0),
                padding: Some(16.0),
            }),
        },
    ]
}

/// `existing` unchanged when non-empty, otherwise [`default_elements`].
pub fn with_defaults(existing: Option<&[AlertElement]>) -> Vec<AlertElement> {
    match existing {
        Some(els) if !els.is_empty() => els.to_vec(),
        _ => default_elements(),
    }
}

pub fn find<'a>(elements: &'a [AlertElement], id: &str) -> Option<&'a AlertElement> {
    elements.iter().find(|e| e.id == id)
}

/// Copy of `elements` with `patch` merged into the element `id`. Unknown ids leave it unchanged.
pub fn upsert(elements: &[AlertElement], id: &str, patch: &ElementPatch) -> Vec<AlertElement> {
    elements
        .iter()
        .map(|el| {
            let mut el = el.clone();
            if el.id == id {
                patch.apply(&mut el);
            }
            el
        })
        .collect()
}

/// Copy of `elements` without `id`. Protection is a caller policy and is not checked here.
pub fn remove(elements: &[AlertElement], id: &str) -> Vec<AlertElement> {
    elements.iter().filter(|e| e.id != id).cloned().collect()
}

/// Assign `z_index = N - index` to each id of `ordered_ids` (top to bottom).
///
/// Elements not named keep their z-order; ids not present are skipped but
/// still count towards `N`.
pub fn reorder_by_explicit_sequence(
    elements: &[AlertElement],
    ordered_ids: &[&str],
) -> Vec<AlertElement> {
    let n = ordered_ids.len() as i64;
    let mut out = elements.to_vec();
    for (idx, id) in ordered_ids.iter().enumerate() {
        if let Some(el) = out.iter_mut().find(|e| e.id == *id) {
            el.z_index = n - idx as i64;
        }
    }
    out
}

/// Elements in paint order, topmost first. Stable: equal z keeps storage order.
pub fn render_order(elements: &[AlertElement]) -> Vec<AlertElement> {
    let mut out = elements.to_vec();
    out.sort_by(|a, b| b.z_index.cmp(&a.z_index));
    out
}

/// Append a new element built from `template` on top of the stack.
///
/// Returns the new layout and the generated id (`element-<n>`, lowest free `n`).
pub fn add(elements: &[AlertElement], template: ElementTemplate) -> (Vec<AlertElement>, String) {
    let taken: BTreeSet<&str> = elements.iter().map(|e| e.id.as_str()).collect();
    let id = (1u64..)
        .map(|n| format!("element-{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_default();
    let z_index = elements.iter().map(|e| e.z_index).max().map_or(1, |z| z + 1);

    let mut out = elements.to_vec();
    out.push(AlertElement {
        id: id.clone(),
        x: template.x,
        y: template.y,
        width: template.width,
        height: template.height,
        visible: template.visible,
        z_index,
        protected: false,
        kind: template.kind,
    });
    (out, id)
}

/// Check id uniqueness, coordinate range and positive sizes.
pub fn validate(elements: &[AlertElement]) -> AlertResult<()> {
    let mut seen = BTreeSet::new();
    for el in elements {
        if el.id.trim().is_empty() {
            return Err(AlertError::validation("element id must be non-empty"));
        }
        if !seen.insert(el.id.as_str()) {
            return Err(AlertError::validation(format!(
                "duplicate element id '{}'",
                el.id
            )));
        }
        if !is_percent(el.x) || !is_percent(el.y) {
            return Err(AlertError::validation(format!(
                "element '{}' position must be within [0, 100]",
                el.id
            )));
        }
        for (name, v) in [("width", el.width), ("height", el.height)] {
            if let Some(v) = v
                && !(v.is_finite() && v > 0.0)
            {
                return Err(AlertError::validation(format!(
                    "element '{}' {name} must be finite and > 0",
                    el.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
