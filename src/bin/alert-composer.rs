use std::path::{Path, PathBuf};

use alert_composer::{
    AlertComposer, AlertSettings, AmountFormat, ComposeOptions, Donation, FallbackPolicy,
};
use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "alert-composer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose one donation and print the render JSON.
    Compose(ComposeArgs),
    /// Print the default three-element layout as an export document.
    Defaults,
    /// Write a tier's layout to `alert-layout-<tier name>.json`.
    Export(ExportArgs),
    /// Validate a layout file, optionally storing it into a tier.
    Import(ImportArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Settings JSON. Built-in defaults when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Donation amount in whole currency units.
    #[arg(long)]
    amount: f64,

    #[arg(long, default_value = "")]
    donor: String,

    #[arg(long, default_value = "")]
    message: String,

    /// Hide the donor name.
    #[arg(long)]
    anonymous: bool,

    #[arg(long, value_enum, default_value_t = AmountFormatChoice::Bare)]
    amount_format: AmountFormatChoice,

    /// What to do when no tier covers the amount.
    #[arg(long, value_enum, default_value_t = FallbackChoice::Suppress)]
    fallback: FallbackChoice,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Settings JSON.
    #[arg(long)]
    settings: PathBuf,

    /// Tier id.
    #[arg(long)]
    tier: String,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Layout JSON (export envelope or bare element array).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Settings JSON to update in place.
    #[arg(long, requires = "tier")]
    settings: Option<PathBuf>,

    /// Tier id receiving the layout.
    #[arg(long, requires = "settings")]
    tier: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AmountFormatChoice {
    Bare,
    WithCurrency,
}

impl From<AmountFormatChoice> for AmountFormat {
    fn from(c: AmountFormatChoice) -> Self {
        match c {
            AmountFormatChoice::Bare => Self::Bare,
            AmountFormatChoice::WithCurrency => Self::WithCurrency,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FallbackChoice {
    Suppress,
    Lowest,
    Last,
}

impl From<FallbackChoice> for FallbackPolicy {
    fn from(c: FallbackChoice) -> Self {
        match c {
            FallbackChoice::Suppress => Self::Suppress,
            FallbackChoice::Lowest => Self::LowestTier,
            FallbackChoice::Last => Self::LastTier,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Defaults => cmd_defaults(),
        Command::Export(args) => cmd_export(args),
        Command::Import(args) => cmd_import(args),
    }
}

fn read_settings_json(path: &Path) -> anyhow::Result<AlertSettings> {
    AlertSettings::from_path(path).with_context(|| format!("load settings '{}'", path.display()))
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let settings = match &args.settings {
        Some(path) => read_settings_json(path)?,
        None => AlertSettings::default(),
    };

    let composer = AlertComposer::new(ComposeOptions {
        amount_format: args.amount_format.into(),
        fallback: args.fallback.into(),
        ..ComposeOptions::default()
    });
    let mut donation = Donation::new(args.donor, args.amount, args.message);
    donation.is_anonymous = args.anonymous;

    let out = composer.compose_for_settings(&settings, &donation);
    println!(
        "{}",
        serde_json::to_string_pretty(&out).with_context(|| "serialize composition")?
    );
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    println!(
        "{}",
        alert_composer::export_layout(&alert_composer::default_elements())?
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let settings = read_settings_json(&args.settings)?;
    let tier = settings
        .tier(&args.tier)
        .with_context(|| format!("tier '{}' not found", args.tier))?;

    let json = alert_composer::export_layout(&tier.layout())?;
    let out = args
        .out_dir
        .join(alert_composer::export_file_name(tier.display_name()));
    write_file(&out, &json)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read layout '{}'", args.in_path.display()))?;
    let elements = alert_composer::import_layout(&raw)?;

    let (Some(settings_path), Some(tier_id)) = (args.settings, args.tier) else {
        eprintln!("{}: {} elements ok", args.in_path.display(), elements.len());
        return Ok(());
    };

    let mut settings = read_settings_json(&settings_path)?;
    let tier = settings
        .tier_mut(&tier_id)
        .with_context(|| format!("tier '{tier_id}' not found"))?;
    tier.elements = Some(elements);

    let json = serde_json::to_string_pretty(&settings).with_context(|| "serialize settings")?;
    write_file(&settings_path, &json)?;

    eprintln!("wrote {}", settings_path.display());
    Ok(())
}
