//! Terraform Provider for FortiOS
//!
//! This provider implements the Terraform Plugin Protocol for managing
//! FortiGate configuration objects over the FortiOS REST API.

use clap::Parser;
use std::io::{self, BufRead, Write};
use terraform_provider_fortios::provider::FortiosProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Terraform Provider for FortiOS
#[derive(Parser, Debug)]
#[command(name = "terraform-provider-fortios")]
#[command(about = "Terraform provider for FortiOS configuration objects")]
struct Args {
    /// Enable debug mode
    #[arg(long, env = "TF_LOG")]
    debug: bool,
}

fn main() {
    // stdout carries the plugin protocol; logs must go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let _args = Args::parse();

    tracing::info!("Starting Terraform Provider for FortiOS");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();

    let provider = FortiosProvider::new();

    for line in stdin.lock().lines() {
        match line {
            Ok(input) => {
                let response = provider.handle_request(&input);
                if let Err(e) = writeln!(stdout_lock, "{}", response) {
                    tracing::error!("Failed to write response: {}", e);
                    break;
                }
                if let Err(e) = stdout_lock.flush() {
                    tracing::error!("Failed to flush stdout: {}", e);
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    tracing::info!("Terraform Provider shutting down");
}
