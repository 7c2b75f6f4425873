//! Alert composition engine for donation overlays.
//!
//! Turns a donation event plus a streamer's tier configuration into a render-ready,
//! ordered list of positioned elements, and backs the drag-and-drop layout editor
//! that authors those elements.
//!
//! # Pipeline overview
//!
//! 1. **Match**: `[Tier] + amount -> Tier` ([`match_tier`], with an optional [`FallbackPolicy`])
//! 2. **Layout**: `Tier -> [AlertElement]` (persisted layout, or the three canonical defaults)
//! 3. **Resolve**: `{donor_name}`, `{amount}`, `{message}` substituted into every text element
//! 4. **Order**: visible elements sorted by descending `z_index`, ties kept in authoring order
//!
//! [`AlertComposer`] runs all four and returns a [`Composition`]: either a
//! [`RenderableAlert`] or an explicit suppression.
//!
//! Layouts live in a percentage coordinate space (`0..=100` on both axes) anchored at
//! element centers. [`LayoutEditor`] maps pointer gestures in pixels onto that space, and
//! the JSON codec ([`export_layout`] / [`import_layout`]) moves layouts between tiers.
#![forbid(unsafe_code)]

mod codec;
mod compose;
mod editor;
mod foundation;
mod layout;
mod template;
mod tier;

pub use codec::json::{
    LAYOUT_SCHEMA_VERSION, export as export_layout, export_file_name, import as import_layout,
    normalize as normalize_layout,
};
pub use compose::composer::{
    ANONYMOUS_DONOR_NAME, AlertComposer, ComposeOptions, Composition, Donation, RenderableAlert,
    RenderableElement, SuppressReason,
};
pub use compose::settings::{AlertSettings, default_tier};
pub use editor::controller::{
    DetachedPointerSource, DragState, LayoutEditor, PointerSource, PointerSubscription,
};
pub use foundation::core::{
    Canvas, PERCENT_MAX, PERCENT_MIN, Point, Rect, Size, Vec2, clamp_percent, is_percent,
};
pub use foundation::error::{AlertError, AlertResult};
pub use layout::model::{
    ANIMATION_ID, AlertElement, BackgroundStyle, CANONICAL_IDS, DEFAULT_GIF_URL, DONOR_INFO_ID,
    ElementKind, ElementPatch, ElementTemplate, ElementType, ImageStyle, MESSAGE_TEXT_ID,
    TextStyle, add as add_element, default_elements, find as find_element, is_canonical_id,
    remove as remove_element, render_order, reorder_by_explicit_sequence,
    upsert as upsert_element, validate as validate_layout, with_defaults,
};
pub use template::resolver::{
    AmountFormat, CURRENCY_SUFFIX, Placeholder, TemplateContext, TemplateResolver, format_amount,
    placeholders, resolve as resolve_template,
};
pub use tier::matcher::{
    DEFAULT_TEXT_TEMPLATE, FallbackPolicy, Tier, match_tier, match_with_fallback, validate_tiers,
};
