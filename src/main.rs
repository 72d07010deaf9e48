//! Ask the device's file manager to open a folder.
//!
//! Prints `true` when a launch request was accepted.  Otherwise prints
//! `ERROR: <message>` on stderr and exits with status 1.
//! Run with `--dry-run` to see the `am` commands without starting anything.

mod app;
mod config;
mod core;
mod platform;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::app::{reply::BridgeReply, runtime};
use crate::core::{
    context::LaunchContext,
    opener::{FolderOpener, Launcher},
};
use crate::platform::{am::ActivityManagerLauncher, dry_run::DryRunLauncher, props};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Open a folder in the system file manager")]
struct Cli {
    /// Folder to open.
    path: PathBuf,

    /// Print the `am` commands instead of running them.
    #[arg(long)]
    dry_run: bool,

    /// Print the reply as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// API level to assume instead of asking `getprop`.
    #[arg(long)]
    sdk: Option<u32>,

    /// Activity-manager binary to use.
    #[arg(long = "am")]
    am_path: Option<PathBuf>,

    /// Save the effective settings to the config file before opening.
    #[arg(long)]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout carries the reply
        .init();

    let cli = Cli::parse();

    let mut config = config::AppConfig::load();
    if let Some(am) = cli.am_path {
        config.am_path = am;
    }
    if cli.sdk.is_some() {
        config.sdk_int = cli.sdk;
    }
    if cli.write_config {
        let saved = config.save()?;
        debug!(path = %saved.display(), "config written");
    }

    let sdk_int = config
        .sdk_int
        .or_else(|| props::detect_sdk_int(&config.getprop_path));
    let mut ctx = LaunchContext::new(sdk_int);
    ctx.chooser_title = config.chooser_title.clone();
    debug!(?ctx, path = %cli.path.display(), "opening folder");

    let reply = if cli.dry_run {
        let opener = Arc::new(
            FolderOpener::new(DryRunLauncher::new(config.am_path.display().to_string()))
                .with_chain(config.strategies.clone()),
        );
        let reply = run(Arc::clone(&opener), ctx, cli.path).await;
        for line in opener.launcher().issued() {
            eprintln!("{line}");
        }
        reply
    } else {
        let opener = Arc::new(
            FolderOpener::new(ActivityManagerLauncher::new(config.am_path.clone()))
                .with_chain(config.strategies.clone()),
        );
        run(opener, ctx, cli.path).await
    };

    if cli.json {
        println!("{}", serde_json::to_string(&reply)?);
    } else {
        match &reply {
            BridgeReply::Resolved(value) => println!("{value}"),
            BridgeReply::Rejected { code, message } => eprintln!("{code}: {message}"),
        }
    }

    Ok(if reply.is_resolved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run<L>(opener: Arc<FolderOpener<L>>, ctx: LaunchContext, path: PathBuf) -> BridgeReply
where
    L: Launcher + Send + Sync + 'static,
{
    BridgeReply::from(runtime::open_folder(opener, ctx, path).await)
}
