//! JSON export/import of alert layouts.
//!
//! In memory an element is a tagged union ([`ElementKind`]); on the wire it is
//! the flat camelCase object the authoring UI and stored settings use
//! (`{"id", "type", "x", "y", "zIndex", "content", "imageUrl", ...}`).
//!
//! Exports are wrapped in a versioned envelope. Imports accept that envelope
//! as well as the legacy bare array.

use std::collections::BTreeSet;

use crate::{
    foundation::error::{AlertError, AlertResult},
    layout::model::{
        AlertElement, BackgroundStyle, ElementKind, ElementType, ImageStyle, TextStyle,
        is_canonical_id, with_defaults,
    },
};

/// Schema version written by [`export`]; imports above it are rejected.
pub const LAYOUT_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireElement {
    id: String,
    #[serde(rename = "type")]
    kind: ElementType,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    z_index: i64,
    // Absent in layouts saved before the flag existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    padding: Option<f64>,
}

fn default_visible() -> bool {
    true
}

impl TryFrom<WireElement> for AlertElement {
    type Error = AlertError;

    fn try_from(w: WireElement) -> AlertResult<Self> {
        if w.id.trim().is_empty() {
            return Err(AlertError::malformed_import("element id must be non-empty"));
        }
        let kind = match w.kind {
            ElementType::Text => ElementKind::Text(TextStyle {
                content: w.content,
                font_size: w.font_size,
                color: w.color,
                background_color: w.background_color,
                border_radius: w.border_radius,
                padding: w.padding,
            }),
            ElementType::Image => ElementKind::Image(ImageStyle {
                image_url: w.image_url,
                border_radius: w.border_radius,
            }),
            ElementType::Background => ElementKind::Background(BackgroundStyle {
                background_color: w.background_color,
                image_url: w.image_url,
                border_radius: w.border_radius,
            }),
        };
        let protected = w.protected.unwrap_or_else(|| is_canonical_id(&w.id));
        Ok(Self {
            id: w.id,
            x: w.x,
            y: w.y,
            width: w.width,
            height: w.height,
            visible: w.visible,
            z_index: w.z_index,
            protected,
            kind,
        })
    }
}

impl From<AlertElement> for WireElement {
    fn from(el: AlertElement) -> Self {
        let mut w = WireElement {
            kind: el.element_type(),
            id: el.id,
            x: el.x,
            y: el.y,
            width: el.width,
            height: el.height,
            visible: el.visible,
            z_index: el.z_index,
            protected: Some(el.protected),
            content: None,
            image_url: None,
            font_size: None,
            color: None,
            background_color: None,
            border_radius: None,
            padding: None,
        };
        match el.kind {
            ElementKind::Text(t) => {
                w.content = t.content;
                w.font_size = t.font_size;
                w.color = t.color;
                w.background_color = t.background_color;
                w.border_radius = t.border_radius;
                w.padding = t.padding;
            }
            ElementKind::Image(i) => {
                w.image_url = i.image_url;
                w.border_radius = i.border_radius;
            }
            ElementKind::Background(b) => {
                w.background_color = b.background_color;
                w.image_url = b.image_url;
                w.border_radius = b.border_radius;
            }
        }
        w
    }
}

#[derive(serde::Serialize)]
struct LayoutFile<'a> {
    version: u32,
    elements: &'a [AlertElement],
}

/// Serialize a full layout as pretty-printed, versioned JSON.
#[tracing::instrument(skip(elements), fields(count = elements.len()))]
pub fn export(elements: &[AlertElement]) -> AlertResult<String> {
    let file = LayoutFile {
        version: LAYOUT_SCHEMA_VERSION,
        elements,
    };
    serde_json::to_string_pretty(&file).map_err(|e| AlertError::serde(e.to_string()))
}

/// Parse an exported (or legacy bare-array) layout.
///
/// All-or-nothing: any parse or shape error yields
/// [`AlertError::MalformedImport`] and no elements.
#[tracing::instrument(skip(raw), fields(len = raw.len()))]
pub fn import(raw: &str) -> AlertResult<Vec<AlertElement>> {
    let result = import_impl(raw);
    if let Err(e) = &result {
        tracing::warn!(error = %e, "layout import rejected");
    }
    result
}

fn import_impl(raw: &str) -> AlertResult<Vec<AlertElement>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| AlertError::malformed_import(format!("invalid JSON: {e}")))?;

    let elements_value = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut obj) => {
            let version = obj
                .get("version")
                .and_then(serde_json::Value::as_u64)
                .ok_or_else(|| {
                    AlertError::malformed_import("layout object must carry a numeric 'version'")
                })?;
            if version == 0 || version > u64::from(LAYOUT_SCHEMA_VERSION) {
                return Err(AlertError::malformed_import(format!(
                    "unsupported layout version {version} (supported: {LAYOUT_SCHEMA_VERSION})"
                )));
            }
            match obj.remove("elements") {
                Some(v @ serde_json::Value::Array(_)) => v,
                _ => {
                    return Err(AlertError::malformed_import(
                        "layout object must carry an 'elements' array",
                    ));
                }
            }
        }
        _ => {
            return Err(AlertError::malformed_import(
                "expected a JSON array of elements or a layout object",
            ));
        }
    };

    let elements: Vec<AlertElement> = serde_json::from_value(elements_value)
        .map_err(|e| AlertError::malformed_import(format!("invalid element: {e}")))?;

    let mut seen = BTreeSet::new();
    for el in &elements {
        if !seen.insert(el.id.as_str()) {
            return Err(AlertError::malformed_import(format!(
                "duplicate element id '{}'",
                el.id
            )));
        }
    }

    Ok(elements)
}

/// Absent or empty layouts become the canonical defaults; anything else passes through.
pub fn normalize(maybe_elements: Option<&[AlertElement]>) -> Vec<AlertElement> {
    with_defaults(maybe_elements)
}

/// Download name for a tier's layout: `alert-layout-<tierName>.json`.
pub fn export_file_name(tier_name: &str) -> String {
    let cleaned: String = tier_name
        .trim()
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = if cleaned.is_empty() { "layout" } else { &cleaned };
    format!("alert-layout-{stem}.json")
}

#[cfg(test)]
#[path = "../../tests/unit/codec/json.rs"]
mod tests;
