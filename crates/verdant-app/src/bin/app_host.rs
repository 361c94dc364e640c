//! Minimal host intended for downstream bindings and manual inspection.
//! Guarded by the `host` feature: boots an `AppContext`, applies the mode and
//! facility given on the command line, and prints the views a UI would
//! receive as JSON.
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use verdant_app::navigation::{MemoryNavigator, Navigator};
use verdant_app::views::OnboardingInput;
use verdant_app::{workflows, AppConfig, AppContext};
use verdant_core::{AccountMode, Facility, FacilityRole, Plan, User, VerdantConfig};

#[derive(Parser)]
#[command(name = "app-host")]
#[command(about = "Verdant headless core host", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Billing plan label (unknown labels fail closed)
    #[arg(long, default_value = "FREE")]
    plan: String,

    /// Mode to switch to after start-up
    #[arg(long)]
    mode: Option<AccountMode>,

    /// Role within the facility
    #[arg(long)]
    role: Option<String>,

    /// Facility to select (enters FACILITY mode)
    #[arg(long)]
    facility: Option<String>,

    /// Facility count
    #[arg(long, default_value = "0")]
    facilities: u32,

    /// Room count
    #[arg(long, default_value = "0")]
    rooms: u32,

    /// Grow count
    #[arg(long, default_value = "0")]
    grows: u32,

    /// Pending invitation count
    #[arg(long, default_value = "0")]
    invites: u32,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.merge_with_env().context("applying VERDANT_* overrides")?;
    if cli.verbose {
        config.log_level = "debug".to_string();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let ctx = AppContext::new(config);
    let nav = MemoryNavigator::new();

    if let Some(mode) = cli.mode {
        workflows::switch_mode(&ctx, mode, &nav);
    }
    if let Some(id) = &cli.facility {
        workflows::select_facility(&ctx, Facility::new(id.as_str(), id.as_str()), &nav);
    }

    let mut user = User::new("host", Plan::parse(&cli.plan), ctx.store().mode());
    if let (Some(id), Some(role)) = (&cli.facility, &cli.role) {
        user = user.with_facility(id.as_str(), FacilityRole::parse(role));
    }

    let access = ctx.access_view(&user);
    let granted: Vec<String> = access.can.granted().map(|c| c.to_string()).collect();
    let input = OnboardingInput::counts(cli.facilities, cli.rooms, cli.grows, cli.invites);
    let report = serde_json::json!({
        "mode": ctx.store().mode(),
        "selectedFacility": ctx.store().selected_facility(),
        "route": nav.current_path(),
        "access": access,
        "granted": granted,
        "entitlements": ctx.entitlements_view(&user),
        "onboarding": ctx.onboarding_view(&input),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
