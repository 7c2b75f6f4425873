use std::{collections::BTreeSet, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{AlertError, AlertResult},
    tier::matcher::{Tier, validate_tiers},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Streamer-wide alert settings wrapping the ordered tier set.
pub struct AlertSettings {
    /// Master switch; `false` suppresses every alert.
    #[serde(default = "default_true")]
    pub alerts_enabled: bool,
    /// Ordered tier set. Stored settings may carry `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tiers: Vec<Tier>,
    /// Show alerts for anonymous donations.
    #[serde(default = "default_true")]
    pub show_anonymous: bool,
    /// Comma-separated words masked out of donor messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banned_words: Option<String>,
    /// Lower bound for on-screen time, in seconds.
    #[serde(default = "default_min_display_time")]
    pub min_display_time: u32,
    /// Upper bound for on-screen time, in seconds.
    #[serde(default = "default_max_display_time")]
    pub max_display_time: u32,
}

fn default_true() -> bool {
    true
}

fn default_min_display_time() -> u32 {
    2
}

fn default_max_display_time() -> u32 {
    15
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Tier>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Option<Vec<Tier>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(v.unwrap_or_default())
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            alerts_enabled: true,
            tiers: vec![default_tier()],
            show_anonymous: true,
            banned_words: None,
            min_display_time: default_min_display_time(),
            max_display_time: default_max_display_time(),
        }
    }
}

/// Starter tier given to new streamers: everything from 1 upwards.
pub fn default_tier() -> Tier {
    let mut tier = Tier::new(
        "default",
        1.0,
        None,
        "🎉 {donor_name} донатит {amount}₽! {message}",
    );
    tier.name = "Базовый алерт".to_string();
    tier.animation_enabled = Some(true);
    tier
}

impl AlertSettings {
    /// Parse settings JSON and validate it.
    pub fn from_json_str(raw: &str) -> AlertResult<Self> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|e| AlertError::serde(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file.
    pub fn from_path(path: &Path) -> AlertResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> AlertResult<()> {
        validate_tiers(&self.tiers)?;
        if self.min_display_time > self.max_display_time {
            return Err(AlertError::validation(
                "min_display_time must be <= max_display_time",
            ));
        }
        Ok(())
    }

    pub fn tier(&self, id: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn tier_mut(&mut self, id: &str) -> Option<&mut Tier> {
        self.tiers.iter_mut().find(|t| t.id == id)
    }

    /// Clamp a tier's alert duration into the display-time bounds.
    pub fn clamp_duration(&self, secs: u32) -> u32 {
        let lo = self.min_display_time.min(self.max_display_time);
        secs.clamp(lo, self.max_display_time)
    }

    /// Lower-cased banned words, empty entries dropped.
    pub fn banned_word_set(&self) -> BTreeSet<String> {
        self.banned_words
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Replace every banned word of `message` with asterisks.
    ///
    /// Matching is whole-word and case-insensitive; separators are kept.
    pub fn mask_banned_words(&self, message: &str) -> String {
        let banned = self.banned_word_set();
        if banned.is_empty() {
            return message.to_string();
        }

        let mut out = String::with_capacity(message.len());
        let mut word = String::new();
        let flush = |word: &mut String, out: &mut String| {
            if banned.contains(&word.to_lowercase()) {
                out.extend(std::iter::repeat_n('*', word.chars().count()));
            } else {
                out.push_str(word);
            }
            word.clear();
        };
        for c in message.chars() {
            if c.is_alphanumeric() {
                word.push(c);
            } else {
                flush(&mut word, &mut out);
                out.push(c);
            }
        }
        flush(&mut word, &mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/settings.rs"]
mod tests;
