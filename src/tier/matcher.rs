use std::collections::BTreeSet;

use crate::{
    codec::json::normalize,
    foundation::error::{AlertError, AlertResult},
    layout::model::{ANIMATION_ID, AlertElement, ElementKind, validate},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A donation-amount bracket with its own alert configuration.
///
/// The engine only reads tiers; creating and deleting them is the settings UI's job.
pub struct Tier {
    /// Opaque stable identifier.
    pub id: String,
    /// Display name; falls back to `id` when empty.
    #[serde(default)]
    pub name: String,
    /// Inclusive lower bound in whole currency units.
    #[serde(alias = "minAmount")]
    pub min_amount: f64,
    /// Inclusive upper bound; `None` is open-ended.
    #[serde(default, alias = "maxAmount", skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    /// Tier-wide template, resolved into the alert summary.
    #[serde(default = "default_text_template", alias = "textTemplate")]
    pub text_template: String,
    /// Persisted layout; `None` or empty synthesizes the defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<AlertElement>>,
    /// How long the alert stays on screen, in seconds.
    #[serde(default = "default_alert_duration")]
    pub alert_duration: u32,
    /// When `false` the tier still matches but renders no elements.
    #[serde(default = "default_true")]
    pub visual_enabled: bool,
    /// Drives the synthesized animation element; `None` keeps the stock GIF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gif_urls: Vec<String>,
}

/// Template used by stored tiers that never set one.
pub const DEFAULT_TEXT_TEMPLATE: &str = "{donor_name} донатит {amount}₽! {message}";

fn default_text_template() -> String {
    DEFAULT_TEXT_TEMPLATE.to_string()
}

fn default_alert_duration() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

impl Tier {
    /// Minimal tier over `[min_amount, max_amount]` with the given template.
    pub fn new(
        id: impl Into<String>,
        min_amount: f64,
        max_amount: Option<f64>,
        text_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            min_amount,
            max_amount,
            text_template: text_template.into(),
            elements: None,
            alert_duration: default_alert_duration(),
            visual_enabled: true,
            animation_enabled: None,
            gif_url: None,
            gif_urls: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// `min_amount <= amount <= max_amount` (upper bound optional).
    pub fn matches(&self, amount: f64) -> bool {
        amount >= self.min_amount && self.max_amount.is_none_or(|max| amount <= max)
    }

    /// Layout to compose: the persisted one, or defaults shaped by the animation settings.
    pub fn layout(&self) -> Vec<AlertElement> {
        let persisted = self.elements.as_deref().filter(|e| !e.is_empty());
        let mut elements = normalize(persisted);
        if persisted.is_some() {
            return elements;
        }

        if let Some(enabled) = self.animation_enabled
            && let Some(anim) = elements.iter_mut().find(|e| e.id == ANIMATION_ID)
        {
            anim.visible = enabled;
            let gif = self.gif_urls.first().or(self.gif_url.as_ref());
            if let (ElementKind::Image(img), Some(gif)) = (&mut anim.kind, gif) {
                img.image_url = Some(gif.clone());
            }
        }
        elements
    }

    /// Check the range invariant and any persisted layout.
    pub fn validate(&self) -> AlertResult<()> {
        if self.id.trim().is_empty() {
            return Err(AlertError::validation("tier id must be non-empty"));
        }
        if !self.min_amount.is_finite() || self.min_amount < 0.0 {
            return Err(AlertError::validation(format!(
                "tier '{}' min_amount must be finite and >= 0",
                self.id
            )));
        }
        if let Some(max) = self.max_amount
            && !(max.is_finite() && max >= self.min_amount)
        {
            return Err(AlertError::validation(format!(
                "tier '{}' max_amount must be >= min_amount",
                self.id
            )));
        }
        if let Some(elements) = &self.elements {
            validate(elements)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What to do when no tier covers an amount.
pub enum FallbackPolicy {
    /// No alert.
    #[default]
    Suppress,
    /// Use the tier with the smallest `min_amount`.
    LowestTier,
    /// Use the last configured tier.
    LastTier,
}

/// Tier covering `amount`; overlaps go to the largest `min_amount`, then input order.
pub fn match_tier(tiers: &[Tier], amount: f64) -> Option<&Tier> {
    tiers
        .iter()
        .filter(|t| t.matches(amount))
        .fold(None, |best: Option<&Tier>, t| match best {
            Some(b) if b.min_amount >= t.min_amount => Some(b),
            _ => Some(t),
        })
}

/// [`match_tier`], then `policy` when nothing matched.
pub fn match_with_fallback(tiers: &[Tier], amount: f64, policy: FallbackPolicy) -> Option<&Tier> {
    if let Some(t) = match_tier(tiers, amount) {
        return Some(t);
    }
    let fallback = match policy {
        FallbackPolicy::Suppress => None,
        FallbackPolicy::LowestTier => tiers
            .iter()
            .min_by(|a, b| a.min_amount.total_cmp(&b.min_amount)),
        FallbackPolicy::LastTier => tiers.last(),
    };
    tracing::debug!(
        amount,
        ?policy,
        tier = fallback.map(|t| t.id.as_str()),
        "no tier matched amount"
    );
    fallback
}

/// Validate every tier and id uniqueness across the set.
pub fn validate_tiers(tiers: &[Tier]) -> AlertResult<()> {
    let mut seen = BTreeSet::new();
    for tier in tiers {
        tier.validate()?;
        if !seen.insert(tier.id.as_str()) {
            return Err(AlertError::validation(format!(
                "duplicate tier id '{}'",
                tier.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/tier/matcher.rs"]
mod tests;
