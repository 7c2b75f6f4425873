//! Placeholder substitution for user-authored alert text.
//!
//! Recognized tokens are `{donor_name}`, `{amount}` and `{message}`. Every
//! occurrence is replaced in a single left-to-right pass; substituted values
//! are never re-scanned, so a donor named `{message}` stays literal.
//! Anything else between braces is copied through verbatim.

/// Currency suffix appended by [`AmountFormat::WithCurrency`].
pub const CURRENCY_SUFFIX: &str = " ₽";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How `{amount}` is rendered.
pub enum AmountFormat {
    /// Bare number (`150`), for templates that carry their own currency sign.
    #[default]
    Bare,
    /// Number followed by [`CURRENCY_SUFFIX`] (`150 ₽`).
    WithCurrency,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// A placeholder recognized by the resolver.
pub enum Placeholder {
    /// `{donor_name}`
    DonorName,
    /// `{amount}`
    Amount,
    /// `{message}`
    Message,
}

impl Placeholder {
    /// All recognized placeholders.
    pub const ALL: [Placeholder; 3] = [Self::DonorName, Self::Amount, Self::Message];

    /// Literal token as it appears in templates.
    pub fn token(self) -> &'static str {
        match self {
            Self::DonorName => "{donor_name}",
            Self::Amount => "{amount}",
            Self::Message => "{message}",
        }
    }

    fn match_prefix(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| s.starts_with(p.token()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Values substituted into a template.
pub struct TemplateContext<'a> {
    /// Replaces `{donor_name}`.
    pub donor_name: &'a str,
    /// Replaces `{amount}`.
    pub amount: f64,
    /// Replaces `{message}`; empty when the donor left none.
    pub message: &'a str,
}

impl<'a> TemplateContext<'a> {
    pub fn new(donor_name: &'a str, amount: f64, message: &'a str) -> Self {
        Self {
            donor_name,
            amount,
            message,
        }
    }
}

impl TemplateContext<'static> {
    /// Sample values shown in the authoring preview and layer list.
    pub fn preview(amount: f64) -> Self {
        Self {
            donor_name: "Донатер",
            amount,
            message: "Привет!",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Resolver bound to a single amount format, so one call site stays consistent.
pub struct TemplateResolver {
    /// Format used for every `{amount}` this resolver substitutes.
    pub amount_format: AmountFormat,
}

impl TemplateResolver {
    pub fn new(amount_format: AmountFormat) -> Self {
        Self { amount_format }
    }

    /// Substitute all recognized placeholders in `template`.
    pub fn resolve(&self, template: &str, ctx: &TemplateContext<'_>) -> String {
        resolve(template, ctx, self.amount_format)
    }
}

/// Substitute all recognized placeholders in `template` using `format` for `{amount}`.
pub fn resolve(template: &str, ctx: &TemplateContext<'_>, format: AmountFormat) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match Placeholder::match_prefix(tail) {
            Some(p) => {
                match p {
                    Placeholder::DonorName => out.push_str(ctx.donor_name),
                    Placeholder::Amount => out.push_str(&format_amount(ctx.amount, format)),
                    Placeholder::Message => out.push_str(ctx.message),
                }
                rest = &tail[p.token().len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render an amount: integral values without a fraction, others with at most two decimals.
pub fn format_amount(amount: f64, format: AmountFormat) -> String {
    let number = if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else if amount.is_finite() {
        let s = format!("{amount:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        "0".to_string()
    };
    match format {
        AmountFormat::Bare => number,
        AmountFormat::WithCurrency => format!("{number}{CURRENCY_SUFFIX}"),
    }
}

/// Distinct recognized placeholders referenced by `template`, in order of first use.
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        let tail = &rest[pos..];
        match Placeholder::match_prefix(tail) {
            Some(p) => {
                if !found.contains(&p) {
                    found.push(p);
                }
                rest = &tail[p.token().len()..];
            }
            None => rest = &tail[1..],
        }
    }
    found
}

#[cfg(test)]
#[path = "../../tests/unit/template/resolver.rs"]
mod tests;
