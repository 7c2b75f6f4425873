//! Authoring-time drag and selection controller over a layout.
//!
//! The controller is single-threaded and event driven: the host forwards
//! pointer events, and every handled event produces a complete, valid element
//! list. Global pointer listeners are modelled by [`PointerSource`]; the
//! controller holds a [`PointerSubscription`] only while a drag is active.

use crate::{
    codec::json::{export, import},
    foundation::{
        core::{Canvas, Point, Vec2},
        error::{AlertError, AlertResult},
    },
    layout::model::{
        AlertElement, ElementPatch, ElementTemplate, add, default_elements, find, remove,
        render_order, reorder_by_explicit_sequence, upsert,
    },
};

/// Host-side provider of document-wide pointer move/up events.
pub trait PointerSource {
    /// Start delivering move/up events; delivery stops when the guard drops.
    fn subscribe(&self) -> PointerSubscription;
}

/// Scoped pointer listener registration. Dropping it releases the listeners.
pub struct PointerSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl PointerSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Pointer source for hosts that push events directly (tests, headless tools).
pub struct DetachedPointerSource;

impl PointerSource for DetachedPointerSource {
    fn subscribe(&self) -> PointerSubscription {
        PointerSubscription::detached()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Gesture state. Selection is tracked separately and survives both states.
pub enum DragState {
    Idle,
    Dragging {
        element_id: String,
        /// Pointer position minus the element's pixel anchor at gesture start.
        pointer_offset: Vec2,
        /// Canvas bounds the gesture started against.
        canvas: Canvas,
    },
}

/// Interactive editor owning one tier's layout for an authoring session.
pub struct LayoutEditor {
    elements: Vec<AlertElement>,
    canvas: Canvas,
    state: DragState,
    selected: Option<String>,
    source: Box<dyn PointerSource>,
    subscription: Option<PointerSubscription>,
}

impl LayoutEditor {
    pub fn new(
        elements: Vec<AlertElement>,
        canvas: Canvas,
        source: Box<dyn PointerSource>,
    ) -> Self {
        Self {
            elements,
            canvas,
            state: DragState::Idle,
            selected: None,
            source,
            subscription: None,
        }
    }

    /// Editor without host pointer plumbing.
    pub fn detached(elements: Vec<AlertElement>, canvas: Canvas) -> Self {
        Self::new(elements, canvas, Box::new(DetachedPointerSource))
    }

    pub fn elements(&self) -> &[AlertElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<AlertElement> {
        self.elements
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Update the canvas bounding box (e.g. after a resize).
    ///
    /// An active drag keeps the bounds it started with; the next gesture uses these.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Elements topmost first, hidden ones included (layer panel order).
    pub fn layers(&self) -> Vec<AlertElement> {
        render_order(&self.elements)
    }

    /// Press on an element. Returns `true` when a drag started.
    ///
    /// Ignored while another drag is active. Unknown ids are a no-op;
    /// backgrounds are selected but never dragged.
    pub fn pointer_down(&mut self, element_id: &str, pointer: Point) -> bool {
        if self.is_dragging() {
            tracing::debug!(element_id, "pointer down ignored: drag already active");
            return false;
        }
        let Some(el) = find(&self.elements, element_id) else {
            return false;
        };
        self.selected = Some(el.id.clone());
        if !el.is_draggable() {
            return false;
        }

        let anchor = self.canvas.percent_to_px(el.x, el.y);
        self.state = DragState::Dragging {
            element_id: el.id.clone(),
            pointer_offset: pointer - anchor,
            canvas: self.canvas,
        };
        self.subscription = Some(self.source.subscribe());
        tracing::debug!(element_id, "drag started");
        true
    }

    /// Move the dragged element under the pointer. Returns its new clamped position.
    ///
    /// Depends only on the pointer position, so repeated events do not drift.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<(f64, f64)> {
        let DragState::Dragging {
            element_id,
            pointer_offset,
            canvas,
        } = &self.state
        else {
            return None;
        };
        let (x, y) = canvas.px_to_percent_clamped(pointer - *pointer_offset);
        self.elements = upsert(&self.elements, element_id, &ElementPatch::position(x, y));
        Some((x, y))
    }

    /// End the active drag; the last clamped position stays.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging { element_id, .. } = &self.state {
            tracing::debug!(element_id = element_id.as_str(), "drag finished");
        }
        self.state = DragState::Idle;
        self.subscription = None;
    }

    /// Click on empty canvas: clears the selection.
    pub fn click_background(&mut self) {
        self.selected = None;
    }

    /// Select an element by id. Returns `false` for unknown ids.
    pub fn select(&mut self, element_id: &str) -> bool {
        if find(&self.elements, element_id).is_none() {
            return false;
        }
        self.selected = Some(element_id.to_string());
        true
    }

    pub fn update(&mut self, element_id: &str, patch: &ElementPatch) {
        self.elements = upsert(&self.elements, element_id, patch);
    }

    /// Add a new element on top and select it.
    pub fn add(&mut self, template: ElementTemplate) -> String {
        let (elements, id) = add(&self.elements, template);
        self.elements = elements;
        self.selected = Some(id.clone());
        id
    }

    /// Delete an element unless it is protected.
    pub fn delete(&mut self, element_id: &str) -> AlertResult<()> {
        let el = find(&self.elements, element_id).ok_or_else(|| {
            AlertError::validation(format!("no element with id '{element_id}'"))
        })?;
        if el.protected {
            return Err(AlertError::validation(format!(
                "element '{element_id}' is protected and cannot be deleted"
            )));
        }
        if matches!(&self.state, DragState::Dragging { element_id: d, .. } if d == element_id) {
            self.pointer_up();
        }
        self.elements = remove(&self.elements, element_id);
        if self.selected.as_deref() == Some(element_id) {
            self.selected = None;
        }
        Ok(())
    }

    pub fn delete_selected(&mut self) -> AlertResult<()> {
        let Some(id) = self.selected.clone() else {
            return Err(AlertError::validation("no element selected"));
        };
        self.delete(&id)
    }

    /// Assign z-order from a top-to-bottom id list.
    pub fn reorder(&mut self, ordered_ids: &[&str]) {
        self.elements = reorder_by_explicit_sequence(&self.elements, ordered_ids);
    }

    /// Restore the canonical default layout.
    pub fn reset(&mut self) {
        self.pointer_up();
        self.elements = default_elements();
        self.selected = None;
    }

    pub fn export(&self) -> AlertResult<String> {
        export(&self.elements)
    }

    /// Replace the whole layout from JSON. On error the current layout is kept.
    pub fn import(&mut self, raw: &str) -> AlertResult<()> {
        let elements = import(raw)?;
        self.pointer_up();
        self.elements = elements;
        self.selected = None;
        Ok(())
    }
}

impl std::fmt::Debug for LayoutEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEditor")
            .field("elements", &self.elements.len())
            .field("canvas", &self.canvas)
            .field("state", &self.state)
            .field("selected", &self.selected)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/controller.rs"]
mod tests;
