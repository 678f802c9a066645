// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SCAD Preview CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scad_preview::cli::Reporter;
use scad_preview::io::{extract, read_source, strip_code_fences};
use scad_preview::{preview_with_config, PreviewConfig};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "scad-preview")]
#[command(about = "Extract OpenSCAD primitives and frame them for preview", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SCAD file (`-` reads stdin)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Configuration file (defaults to scad-preview.toml when present)
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Override the camera field of view in degrees
    #[arg(long, global = true, value_name = "DEG")]
    fov: Option<f64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print recognized descriptors and mismatches as JSON
    Extract {
        /// Input SCAD file
        input: String,
    },

    /// Print the full preview (scene, camera, warnings) as JSON
    Frame {
        /// Input SCAD file
        input: String,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Some(Commands::Extract { input }) => extract_command(input),
        Some(Commands::Frame { input, output }) => frame_command(input, output.as_ref(), &config),
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => match &cli.input {
            Some(input) => preview_command(input, &config),
            None => {
                Reporter::report_warning("Input file required");
                eprintln!("Usage: scad-preview <FILE>");
                std::process::exit(1);
            }
        },
    }
}

fn load_config(cli: &Cli) -> Result<PreviewConfig> {
    let mut config = match &cli.config {
        Some(path) => PreviewConfig::from_file(path)?,
        None => PreviewConfig::load()?,
    };

    if let Some(fov) = cli.fov {
        config.camera.fov_degrees = fov;
        config.validate().context("Invalid --fov")?;
    }

    Ok(config)
}

fn preview_command(input: &str, config: &PreviewConfig) -> Result<()> {
    let source = read_source(input)?;

    let start = Instant::now();
    let preview = preview_with_config(&source, config);
    let elapsed = start.elapsed();

    Reporter::report_preview(input, &preview, elapsed);
    Ok(())
}

fn extract_command(input: &str) -> Result<()> {
    let source = read_source(input)?;
    let extraction = extract(&strip_code_fences(&source));

    let json = serde_json::to_string_pretty(&extraction)?;
    println!("{}", json);
    Ok(())
}

fn frame_command(input: &str, output: Option<&PathBuf>, config: &PreviewConfig) -> Result<()> {
    let source = read_source(input)?;
    let preview = preview_with_config(&source, config);
    let json = serde_json::to_string_pretty(&preview)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write preview: {}", path.display()))?;
            Reporter::success(&format!("Preview written to {}", path.display()));
        }
        None => println!("{}", json),
    }

    Ok(())
}
