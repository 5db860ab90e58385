//! Command-line interface for claimvoice.
//!
//! Provides commands for submitting a recorded claim, checking the
//! backend, and showing the resolved configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{ClaimEndpoint, HttpClaimEndpoint};
use crate::capture::WavFileCapture;
use crate::config;
use crate::core::FormOrchestrator;
use crate::domain::{Notice, Severity, SubmissionStatus};
use crate::playback::HeadlessMedia;

/// claimvoice - State an insurance claim by voice
#[derive(Parser, Debug)]
#[command(name = "claimvoice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a recorded claim
    Submit {
        /// Phone number to reach the claimant on
        #[arg(short, long)]
        phone: String,

        /// WAV recording of the claim
        #[arg(short, long)]
        audio: PathBuf,

        /// Submission URL (overrides config)
        #[arg(short, long, env = "CLAIMVOICE_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Check that the backend is running
    Health {
        /// Submission URL (overrides config)
        #[arg(short, long, env = "CLAIMVOICE_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Submit {
                phone,
                audio,
                endpoint,
            } => submit_claim(&phone, audio, endpoint).await,
            Commands::Health { endpoint } => check_health(endpoint).await,
            Commands::Config => show_config(),
        }
    }
}

fn resolve_endpoint(endpoint: Option<String>) -> Result<HttpClaimEndpoint> {
    let url = match endpoint {
        Some(url) => url,
        None => config::config()?.endpoint.clone(),
    };
    HttpClaimEndpoint::new(&url).context("Invalid submission endpoint")
}

fn print_notice(notice: &Notice) {
    match notice.severity {
        Severity::Info => println!("{}", notice),
        Severity::Error => eprintln!("{}", notice),
    }
}

/// Run one claim session end to end
async fn submit_claim(phone: &str, audio: PathBuf, endpoint: Option<String>) -> Result<()> {
    let endpoint = resolve_endpoint(endpoint)?;
    let capture = WavFileCapture::new(audio).with_max_bytes(config::config()?.max_artifact_bytes);

    let mut session = FormOrchestrator::new(endpoint, capture.flag(), HeadlessMedia::new());
    session.set_phone(phone);

    session.on_recording_started();
    let artifact = capture
        .record()
        .await
        .with_context(|| format!("Failed to load recording: {}", capture.path().display()))?;
    session.on_recording_complete(artifact);
    if let Some(notice) = session.take_notice() {
        print_notice(&notice);
    }

    println!("{}", session.submit_label());
    let result = session.submit().await;

    if let Some(notice) = session.take_notice() {
        print_notice(&notice);
    }

    let status = match result {
        Ok(status) => status,
        Err(rejection) => anyhow::bail!("Submission rejected: {}", rejection),
    };

    if let Some(message) = session.status_message() {
        println!();
        println!("{}", message);
    }

    if let Some(view) = session.player().view() {
        println!("Response audio: {} ({})", view.resource, view.total);
    }

    if status == SubmissionStatus::Error {
        anyhow::bail!("Claim submission failed");
    }

    Ok(())
}

async fn check_health(endpoint: Option<String>) -> Result<()> {
    let endpoint = resolve_endpoint(endpoint)?;
    let report = endpoint
        .health_check()
        .await
        .with_context(|| format!("Backend not reachable ({})", endpoint.url()))?;

    println!("Backend OK: {}", report.message);
    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::config()?;

    println!();
    println!("claimvoice configuration");
    println!("══════════════════════════════════════════════════════════════");
    println!();
    println!("Endpoint:     {}", config.endpoint);
    println!("Max upload:   {} bytes", config.max_artifact_bytes);
    match &config.config_file {
        Some(path) => println!("Config file:  {}", path.display()),
        None => println!("Config file:  (none, using defaults)"),
    }
    println!();

    Ok(())
}
