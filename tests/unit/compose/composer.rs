use super::*;
use crate::layout::model::{
    ANIMATION_ID, DONOR_INFO_ID, ElementPatch, ElementTemplate, MESSAGE_TEXT_ID, add,
    default_elements, upsert,
};

fn scenario_tiers() -> Vec<Tier> {
    vec![
        Tier::new("t1", 0.0, Some(99.0), "{donor_name} gave {amount}"),
        Tier::new("t2", 100.0, None, "BIG: {donor_name} gave {amount}"),
    ]
}

fn content_of<'a>(alert: &'a RenderableAlert, id: &str) -> Option<&'a str> {
    alert
        .elements
        .iter()
        .find(|e| e.id == id)
        .and_then(|e| e.text_content())
}

#[test]
fn end_to_end_scenario() {
    let out = AlertComposer::default().compose(&scenario_tiers(), &Donation::new("Mia", 150.0, "yay"));
    let alert = out.alert().expect("alert rendered");
    assert_eq!(alert.tier_id, "t2");
    assert_eq!(alert.summary, "BIG: Mia gave 150");

    let ids: Vec<_> = alert.elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![ANIMATION_ID, DONOR_INFO_ID, MESSAGE_TEXT_ID]);
    assert_eq!(content_of(alert, DONOR_INFO_ID), Some("BIG: Mia gave 150"));
    assert_eq!(content_of(alert, MESSAGE_TEXT_ID), Some("yay"));
}

#[test]
fn unmatched_amount_is_suppressed() {
    let tiers = vec![Tier::new("t", 10.0, None, "x")];
    let out = AlertComposer::default().compose(&tiers, &Donation::new("a", 5.0, ""));
    assert_eq!(
        out,
        Composition::Suppressed {
            reason: SuppressReason::NoMatchingTier
        }
    );
    assert!(out.is_suppressed());
}

#[test]
fn zero_and_huge_amounts_are_total() {
    let composer = AlertComposer::default();
    let tiers = scenario_tiers();
    assert_eq!(
        composer.compose(&tiers, &Donation::new("a", 0.0, "")).alert().unwrap().tier_id,
        "t1"
    );
    assert_eq!(
        composer.compose(&tiers, &Donation::new("a", 1e15, "")).alert().unwrap().tier_id,
        "t2"
    );
    assert!(composer.compose(&[], &Donation::new("a", 1.0, "")).is_suppressed());
}

#[test]
fn fallback_policy_can_pick_a_tier() {
    let tiers = vec![Tier::new("only", 50.0, None, "{amount}")];
    let composer = AlertComposer::new(ComposeOptions {
        fallback: FallbackPolicy::LowestTier,
        ..ComposeOptions::default()
    });
    let out = composer.compose(&tiers, &Donation::new("a", 5.0, ""));
    assert_eq!(out.alert().unwrap().summary, "5");
}

#[test]
fn per_element_content_and_tier_template_are_independent() {
    let mut tier = Tier::new("t", 0.0, None, "tier: {donor_name}");
    let els = upsert(
        &default_elements(),
        DONOR_INFO_ID,
        &ElementPatch {
            content: Some("{donor_name} - {amount}".to_string()),
            ..ElementPatch::default()
        },
    );
    let (els, extra) = add(&els, ElementTemplate::text());
    tier.elements = Some(els);

    let out = AlertComposer::default().compose(&[tier], &Donation::new("Kim", 42.0, "hi"));
    let alert = out.alert().unwrap();
    assert_eq!(alert.summary, "tier: Kim");
    assert_eq!(content_of(alert, DONOR_INFO_ID), Some("Kim - 42"));
    assert_eq!(content_of(alert, &extra), Some("Дополнительный текст"));
    // The added element sits on top.
    assert_eq!(alert.elements[0].id, extra);
}

#[test]
fn hidden_elements_are_dropped_from_output() {
    let mut tier = Tier::new("t", 0.0, None, "x");
    tier.elements = Some(upsert(&default_elements(), ANIMATION_ID, &ElementPatch::visible(false)));
    let out = AlertComposer::default().compose(&[tier], &Donation::new("a", 1.0, ""));
    let ids: Vec<_> = out.alert().unwrap().elements.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![DONOR_INFO_ID, MESSAGE_TEXT_ID]);
}

#[test]
fn currency_format_applies_to_every_template() {
    let composer = AlertComposer::new(ComposeOptions {
        amount_format: AmountFormat::WithCurrency,
        ..ComposeOptions::default()
    });
    let tiers = vec![Tier::new("t", 0.0, None, "{amount}")];
    let out = composer.compose(&tiers, &Donation::new("a", 99.5, ""));
    let alert = out.alert().unwrap();
    assert_eq!(alert.summary, "99.5 ₽");
    assert_eq!(content_of(alert, DONOR_INFO_ID), Some("99.5 ₽"));
}

#[test]
fn anonymous_donor_uses_placeholder_name() {
    let tiers = vec![Tier::new("t", 0.0, None, "{donor_name}")];
    let composer = AlertComposer::default();
    let out = composer.compose(&tiers, &Donation::new("Secret", 10.0, "").anonymous());
    assert_eq!(out.alert().unwrap().summary, ANONYMOUS_DONOR_NAME);
    let out = composer.compose(&tiers, &Donation::new("  ", 10.0, ""));
    assert_eq!(out.alert().unwrap().summary, ANONYMOUS_DONOR_NAME);
}

#[test]
fn disabled_visuals_render_no_elements() {
    let mut tier = Tier::new("t", 0.0, None, "{amount}");
    tier.visual_enabled = false;
    let out = AlertComposer::default().compose(&[tier], &Donation::new("a", 3.0, ""));
    let alert = out.alert().unwrap();
    assert!(alert.elements.is_empty());
    assert_eq!(alert.summary, "3");
}

#[test]
fn settings_gate_and_shape_the_alert() {
    let mut settings = AlertSettings {
        tiers: scenario_tiers(),
        banned_words: Some("spam, Scam".to_string()),
        ..AlertSettings::default()
    };
    settings.tiers[1].alert_duration = 60;
    let composer = AlertComposer::default();

    let out = composer.compose_for_settings(&settings, &Donation::new("Mia", 150.0, "SPAM or scam? spammer"));
    let alert = out.alert().unwrap();
    assert_eq!(content_of(alert, MESSAGE_TEXT_ID), Some("**** or ****? spammer"));
    assert_eq!(alert.duration_secs, 15);

    settings.show_anonymous = false;
    let out = composer.compose_for_settings(&settings, &Donation::new("x", 150.0, "").anonymous());
    assert_eq!(
        out,
        Composition::Suppressed {
            reason: SuppressReason::AnonymousHidden
        }
    );

    settings.alerts_enabled = false;
    let out = composer.compose_for_settings(&settings, &Donation::new("x", 150.0, ""));
    assert_eq!(
        out,
        Composition::Suppressed {
            reason: SuppressReason::AlertsDisabled
        }
    );
}

#[test]
fn composition_serializes_with_outcome_tag() {
    let out = AlertComposer::default().compose(&scenario_tiers(), &Donation::new("Mia", 150.0, "yay"));
    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["outcome"], "render");
    assert_eq!(v["tier_id"], "t2");
    assert_eq!(v["elements"][1]["content"], "BIG: Mia gave 150");

    let suppressed = serde_json::to_value(Composition::Suppressed {
        reason: SuppressReason::NoMatchingTier,
    })
    .unwrap();
    assert_eq!(suppressed["outcome"], "suppressed");
    assert_eq!(suppressed["reason"], "no_matching_tier");
}
