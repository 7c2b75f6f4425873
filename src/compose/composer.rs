use crate::{
    compose::settings::AlertSettings,
    layout::model::{AlertElement, ElementKind, render_order},
    template::resolver::{AmountFormat, TemplateContext, TemplateResolver},
    tier::matcher::{FallbackPolicy, Tier, match_with_fallback},
};

/// Display name used for anonymous (or nameless) donors.
pub const ANONYMOUS_DONOR_NAME: &str = "Аноним";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Donation event handed over by the ingestion side.
pub struct Donation {
    #[serde(default, alias = "donorName")]
    pub donor_name: String,
    pub amount: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "isAnonymous")]
    pub is_anonymous: bool,
}

impl Donation {
    pub fn new(donor_name: impl Into<String>, amount: f64, message: impl Into<String>) -> Self {
        Self {
            donor_name: donor_name.into(),
            amount,
            message: message.into(),
            is_anonymous: false,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }
}

/// An element of the render output; text content is already resolved.
pub type RenderableElement = AlertElement;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Render-ready alert for the overlay renderer.
pub struct RenderableAlert {
    /// Tier the donation landed in.
    pub tier_id: String,
    /// Tier-wide template resolved against the donation.
    pub summary: String,
    /// On-screen time in seconds.
    pub duration_secs: u32,
    /// Visible elements, topmost first.
    pub elements: Vec<RenderableElement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Why no alert is shown.
pub enum SuppressReason {
    NoMatchingTier,
    AlertsDisabled,
    AnonymousHidden,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
/// Result of composing one donation.
pub enum Composition {
    Render(RenderableAlert),
    Suppressed { reason: SuppressReason },
}

impl Composition {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }

    pub fn alert(&self) -> Option<&RenderableAlert> {
        match self {
            Self::Render(a) => Some(a),
            Self::Suppressed { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Knobs fixed per composer instance.
pub struct ComposeOptions {
    /// `{amount}` rendering for every template this composer resolves.
    #[serde(default)]
    pub amount_format: AmountFormat,
    /// Behavior when no tier covers the amount.
    #[serde(default)]
    pub fallback: FallbackPolicy,
    /// Name substituted for anonymous donors.
    #[serde(default = "default_anonymous_name")]
    pub anonymous_name: String,
}

fn default_anonymous_name() -> String {
    ANONYMOUS_DONOR_NAME.to_string()
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            amount_format: AmountFormat::Bare,
            fallback: FallbackPolicy::Suppress,
            anonymous_name: default_anonymous_name(),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// Turns a donation plus tier configuration into a render-ready element list.
///
/// Pure and total: every donation yields either a render or a suppression.
pub struct AlertComposer {
    options: ComposeOptions,
}

impl AlertComposer {
    pub fn new(options: ComposeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose `donation` against a bare tier set.
    #[tracing::instrument(skip(self, tiers, donation), fields(amount = donation.amount))]
    pub fn compose(&self, tiers: &[Tier], donation: &Donation) -> Composition {
        let Some(tier) = match_with_fallback(tiers, donation.amount, self.options.fallback) else {
            tracing::debug!("alert suppressed: no matching tier");
            return Composition::Suppressed {
                reason: SuppressReason::NoMatchingTier,
            };
        };
        tracing::debug!(tier = tier.id.as_str(), "tier matched");
        Composition::Render(self.render_tier(tier, donation, &donation.message))
    }

    /// Compose `donation` honoring streamer-wide settings.
    #[tracing::instrument(skip(self, settings, donation), fields(amount = donation.amount))]
    pub fn compose_for_settings(&self, settings: &AlertSettings, donation: &Donation) -> Composition {
        if !settings.alerts_enabled {
            tracing::debug!("alert suppressed: alerts disabled");
            return Composition::Suppressed {
                reason: SuppressReason::AlertsDisabled,
            };
        }
        if donation.is_anonymous && !settings.show_anonymous {
            tracing::debug!("alert suppressed: anonymous donations hidden");
            return Composition::Suppressed {
                reason: SuppressReason::AnonymousHidden,
            };
        }
        let Some(tier) =
            match_with_fallback(&settings.tiers, donation.amount, self.options.fallback)
        else {
            tracing::debug!("alert suppressed: no matching tier");
            return Composition::Suppressed {
                reason: SuppressReason::NoMatchingTier,
            };
        };

        let message = settings.mask_banned_words(&donation.message);
        let mut alert = self.render_tier(tier, donation, &message);
        alert.duration_secs = settings.clamp_duration(alert.duration_secs);
        Composition::Render(alert)
    }

    fn render_tier(&self, tier: &Tier, donation: &Donation, message: &str) -> RenderableAlert {
        let donor_name = if donation.is_anonymous || donation.donor_name.trim().is_empty() {
            self.options.anonymous_name.as_str()
        } else {
            donation.donor_name.as_str()
        };
        let ctx = TemplateContext::new(donor_name, donation.amount, message);
        let resolver = TemplateResolver::new(self.options.amount_format);

        let elements = if tier.visual_enabled {
            tier.layout()
        } else {
            Vec::new()
        };
        let elements = render_order(&elements)
            .into_iter()
            .filter(|el| el.visible)
            .map(|mut el| {
                if let ElementKind::Text(text) = &mut el.kind {
                    let template = text.content.as_deref().unwrap_or(&tier.text_template);
                    text.content = Some(resolver.resolve(template, &ctx));
                }
                el
            })
            .collect();

        RenderableAlert {
            tier_id: tier.id.clone(),
            summary: resolver.resolve(&tier.text_template, &ctx),
            duration_secs: tier.alert_duration,
            elements,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
