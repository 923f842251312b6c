//! Rota CLI
//!
//! Replay wheel interaction scripts and inspect engine defaults.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod script;

use rota_animation::Easing;
use rota_platform::VendorPrefix;
use rota_wheel::WheelConfig;
use script::{ReplayReport, ReplayScript};

#[derive(Parser)]
#[command(name = "rota")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rota wheel picker CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an interaction script against a wheel
    Replay {
        /// Script file (TOML)
        script: PathBuf,

        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show engine defaults and supported hosts
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so replay output stays machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay { script, json } => cmd_replay(&script, json),
        Commands::Info => cmd_info(),
    }
}

fn cmd_replay(path: &Path, json: bool) -> Result<()> {
    let script = ReplayScript::load(path)?;
    info!(
        "Replaying {} ({} rows, {} events)",
        path.display(),
        script.rows.len(),
        script.events.len()
    );

    let report = script.replay()?;
    if json {
        print_json(&report);
    } else {
        print_text(&report);
    }
    Ok(())
}

fn print_text(report: &ReplayReport) {
    for selection in &report.selections {
        println!(
            "t={}ms  select #{} {} ({})",
            selection.t, selection.index, selection.value, selection.text
        );
    }

    let last = &report.final_state;
    println!();
    println!("Final state: {}", last.state);
    println!("  offset:     {}px", last.offset);
    match (&last.index, &last.value) {
        (Some(index), Some(value)) => println!("  selected:   #{} {}", index, value),
        _ => println!("  selected:   (no rows)"),
    }
    println!("  transform:  {} ({})", last.transform, last.prefix);
    if let Some(transition) = &last.transition {
        println!("  transition: {}", transition);
    }
}

fn print_json(report: &ReplayReport) {
    for selection in &report.selections {
        println!(
            "{}",
            serde_json::json!({ "event": "select", "selection": selection })
        );
    }
    println!(
        "{}",
        serde_json::json!({ "event": "final", "state": report.final_state })
    );
}

fn cmd_info() -> Result<()> {
    println!("Rota Wheel Picker");
    println!("=================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Default wheel config:");
    let defaults = toml::to_string_pretty(&WheelConfig::default())?;
    for line in defaults.lines() {
        println!("  {}", line);
    }
    println!();
    println!("Easing presets:");
    println!("  - ease-out-quint: {}", Easing::ease_out_quint().to_css());
    println!("  - ease-out-quad:  {}", Easing::ease_out_quad().to_css());
    println!("  - ease-out-quart: {}", Easing::ease_out_quart().to_css());
    println!();
    println!("Host style names:");
    for prefix in VendorPrefix::ALL {
        println!(
            "  - {:<8} {} / {} / {}",
            prefix.to_string(),
            prefix.transform_property(),
            prefix.transition_property(),
            prefix.transition_end_event()
        );
    }

    Ok(())
}
