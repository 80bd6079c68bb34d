mod canvas;
mod config;
mod error;
mod export;
mod font;
mod generator;
mod installer;
mod strategy;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use config::AppConfig;
use strategy::Strategy;

#[derive(Parser)]
#[command(
    name = "iconsmith",
    about = "Icon generator and installer build helper for the Cred Management+ desktop app"
)]
struct Cli {
    /// Config file (default: ~/.config/iconsmith/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Exit with status 1 when icon generation fails instead of only reporting it
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw the icon: circle with a centered text label
    Draw,
    /// Build the icon from the source logo
    Logo,
    /// Compile the desktop app and build the Windows installer
    Package,
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("iconsmith=info".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // An explicit --config must exist and parse; the default location may be absent.
    let config = match &cli.config {
        Some(path) if !matches!(cli.command, Command::InitConfig { .. }) => {
            AppConfig::try_load_from(path)?
        }
        _ => AppConfig::load(),
    };

    match cli.command {
        Command::Draw => Ok(run_generate(&config, Strategy::Procedural, cli.strict)),
        Command::Logo => Ok(run_generate(&config, Strategy::Logo, cli.strict)),
        Command::Package => Ok(run_package(&config)),
        Command::InitConfig { force } => {
            init_config(cli.config.unwrap_or_else(AppConfig::path), force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_generate(config: &AppConfig, strategy: Strategy, strict: bool) -> ExitCode {
    match generator::generate_icon(config, strategy) {
        Ok(out) => {
            println!("PNG created: {}", out.png.display());
            println!("ICO created: {}", out.ico.display());
            println!("\nIcon generated successfully!");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_fatal() => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            // Reported, not propagated: the run still counts as done unless --strict.
            debug!("Icon generation failed: {:?}", e);
            let _ = report_generation_failure(&mut std::io::stderr().lock(), &e, &config.manual_guide);
            if strict {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn report_generation_failure(
    out: &mut impl Write,
    err: &error::IconError,
    manual_guide: &Path,
) -> std::io::Result<()> {
    writeln!(out, "Error generating icon: {}", err)?;
    writeln!(out, "\nYou will need to add an icon manually.")?;
    writeln!(out, "   See: {}", manual_guide.display())
}

fn run_package(config: &AppConfig) -> ExitCode {
    let rule = "=".repeat(50);
    println!("{}", rule);
    println!("  {} - Build Desktop App", config.installer.product_name);
    println!("{}", rule);

    match installer::run_pipeline(&config.installer) {
        Ok(release_dir) => {
            println!("\n{}", rule);
            println!("  [OK] BUILD COMPLETED SUCCESSFULLY!");
            println!("{}", rule);
            println!("\nInstaller written to:\n  {}", release_dir.display());
            if config.installer.open_release_dir {
                installer::reveal(&release_dir);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n[ERROR] {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to(&path)?;
    info!("Default configuration written");
    println!("Config written: {}", path.display());
    Ok(())
}
